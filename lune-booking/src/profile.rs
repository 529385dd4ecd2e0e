//! Cast self-service edits.

use chrono::Utc;
use lune_profiles::Cast;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{BookingError, BookingResult};

/// Fields a cast may edit on their own profile.
///
/// `None` leaves a field unchanged. Tier, activity and featured flags are
/// admin-only and cannot be set here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CastProfileUpdate {
    pub display_name: Option<String>,
    pub age: Option<u8>,
    pub height_cm: Option<u16>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub photo_urls: Option<Vec<String>>,
    #[serde(default)]
    pub attributes: HashMap<String, serde_json::Value>,
}

impl CastProfileUpdate {
    /// Reject values the profile cannot hold.
    pub fn validate(&self) -> BookingResult<()> {
        if self
            .display_name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(BookingError::validation("display_name cannot be empty"));
        }
        if self.age.is_some_and(|age| age < 18) {
            return Err(BookingError::validation("age must be at least 18"));
        }
        Ok(())
    }

    /// Write the descriptive fields onto `cast`, leaving admin-owned fields alone.
    pub fn apply(self, cast: &mut Cast) {
        if let Some(name) = self.display_name {
            cast.display_name = name.trim().to_string();
        }
        if self.age.is_some() {
            cast.age = self.age;
        }
        if self.height_cm.is_some() {
            cast.height_cm = self.height_cm;
        }
        if self.location.is_some() {
            cast.location = self.location.filter(|l| !l.trim().is_empty());
        }
        if self.bio.is_some() {
            cast.bio = self.bio.filter(|b| !b.trim().is_empty());
        }
        if let Some(photos) = self.photo_urls {
            cast.photo_urls = photos;
        }
        for (key, value) in self.attributes {
            cast.set_attribute(key, value);
        }
        cast.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lune_profiles::CastTier;
    use uuid::Uuid;

    #[test]
    fn test_validate() {
        assert!(CastProfileUpdate::default().validate().is_ok());

        let blank = CastProfileUpdate {
            display_name: Some("  ".into()),
            ..Default::default()
        };
        assert!(matches!(blank.validate(), Err(BookingError::Validation(_))));

        let underage = CastProfileUpdate {
            age: Some(17),
            ..Default::default()
        };
        assert!(underage.validate().is_err());
    }

    #[test]
    fn test_apply_keeps_admin_fields() {
        let mut cast = Cast::new(Uuid::now_v7(), "Aoi")
            .with_tier(CastTier::HighClass)
            .with_bio("old")
            .featured();

        CastProfileUpdate {
            display_name: Some(" Aoi T. ".into()),
            bio: Some("".into()),
            location: Some("Ginza".into()),
            ..Default::default()
        }
        .apply(&mut cast);

        assert_eq!(cast.display_name, "Aoi T.");
        assert!(cast.bio.is_none());
        assert_eq!(cast.location.as_deref(), Some("Ginza"));
        assert_eq!(cast.tier_classification, CastTier::HighClass);
        assert!(cast.is_featured);
        assert!(cast.is_active);
    }
}
