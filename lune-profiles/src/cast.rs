//! Cast profile domain model
//!
//! A cast profile is what members browse. Photos are stored externally and
//! referenced here by URL only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::tiers::CastTier;

/// Profile of a cast account.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use lune_profiles::{Cast, CastTier};
///
/// let cast = Cast::new(Uuid::now_v7(), "Mio")
///     .with_tier(CastTier::HighClass)
///     .with_location("Ginza")
///     .with_age(26);
/// assert!(cast.is_active);
/// assert!(!cast.is_featured);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cast {
    /// Unique cast ID
    pub id: Uuid,

    /// Owning user ID
    pub user_id: Uuid,

    /// Tier classification controlling which members may see this cast
    pub tier_classification: CastTier,

    /// Whether the profile is published
    pub is_active: bool,

    /// Whether the profile is promoted in listings
    pub is_featured: bool,

    /// Public display name
    pub display_name: String,

    /// Age in years
    pub age: Option<u8>,

    /// Height in centimetres
    pub height_cm: Option<u16>,

    /// Area the cast is usually available in
    pub location: Option<String>,

    /// Free-form introduction
    pub bio: Option<String>,

    /// Photo URLs, first is the cover photo
    #[serde(default)]
    pub photo_urls: Vec<String>,

    /// Additional profile attributes (hobbies, languages, ...)
    #[serde(default)]
    pub attributes: HashMap<String, serde_json::Value>,

    /// When the profile was created
    pub created_at: DateTime<Utc>,

    /// When the profile was last updated
    pub updated_at: DateTime<Utc>,
}

impl Cast {
    /// Creates a new active, unfeatured Standard cast profile.
    pub fn new(user_id: Uuid, display_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            user_id,
            tier_classification: CastTier::Standard,
            is_active: true,
            is_featured: false,
            display_name: display_name.into(),
            age: None,
            height_cm: None,
            location: None,
            bio: None,
            photo_urls: Vec::new(),
            attributes: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the tier classification.
    pub fn with_tier(mut self, tier: CastTier) -> Self {
        self.tier_classification = tier;
        self
    }

    /// Set the age.
    pub fn with_age(mut self, age: u8) -> Self {
        self.age = Some(age);
        self
    }

    /// Set the height in centimetres.
    pub fn with_height(mut self, height_cm: u16) -> Self {
        self.height_cm = Some(height_cm);
        self
    }

    /// Set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the introduction text.
    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    /// Append a photo URL.
    pub fn with_photo(mut self, url: impl Into<String>) -> Self {
        self.photo_urls.push(url.into());
        self
    }

    /// Mark the profile as featured.
    pub fn featured(mut self) -> Self {
        self.is_featured = true;
        self
    }

    /// Set a profile attribute.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.attributes.insert(key.into(), value);
        self.updated_at = Utc::now();
    }

    /// Change the tier classification. Returns the previous value.
    pub fn change_tier(&mut self, tier: CastTier) -> CastTier {
        let previous = self.tier_classification;
        self.tier_classification = tier;
        self.updated_at = Utc::now();
        previous
    }

    /// Publish or unpublish the profile.
    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
        self.updated_at = Utc::now();
    }

    /// Promote or demote the profile in listings.
    pub fn set_featured(&mut self, featured: bool) {
        self.is_featured = featured;
        self.updated_at = Utc::now();
    }

    /// Cover photo URL, if any.
    pub fn cover_photo(&self) -> Option<&str> {
        self.photo_urls.first().map(String::as_str)
    }

    /// Lightweight listing view of this profile.
    pub fn summary(&self) -> CastSummary {
        CastSummary {
            id: self.id,
            display_name: self.display_name.clone(),
            tier_classification: self.tier_classification,
            is_featured: self.is_featured,
            age: self.age,
            location: self.location.clone(),
            cover_photo_url: self.cover_photo().map(str::to_string),
        }
    }
}

/// Summary of a cast for list displays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastSummary {
    /// Cast ID
    pub id: Uuid,

    /// Display name
    pub display_name: String,

    /// Tier classification
    pub tier_classification: CastTier,

    /// Featured flag
    pub is_featured: bool,

    /// Age
    pub age: Option<u8>,

    /// Location
    pub location: Option<String>,

    /// Cover photo
    pub cover_photo_url: Option<String>,
}
