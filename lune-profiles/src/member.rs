//! Member profile domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::tiers::MemberTier;

/// Profile of a member account.
///
/// Created together with the owning user and removed only when the user is.
/// The tier is changed by admin action only.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use lune_profiles::{Member, MemberTier};
///
/// let member = Member::new(Uuid::now_v7(), "Ken").with_tier(MemberTier::Gold);
/// assert!(member.is_active);
/// assert!(!member.is_paid);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Unique member ID
    pub id: Uuid,

    /// Owning user ID
    pub user_id: Uuid,

    /// Membership tier
    pub tier: MemberTier,

    /// Whether the membership fee has been paid
    pub is_paid: bool,

    /// Whether the member may use the platform
    pub is_active: bool,

    /// Nickname shown to admins
    pub nickname: String,

    /// When the profile was created
    pub created_at: DateTime<Utc>,

    /// When the profile was last updated
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Creates a new active, unpaid Standard member.
    pub fn new(user_id: Uuid, nickname: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            user_id,
            tier: MemberTier::Standard,
            is_paid: false,
            is_active: true,
            nickname: nickname.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the initial tier.
    pub fn with_tier(mut self, tier: MemberTier) -> Self {
        self.tier = tier;
        self
    }

    /// Set the initial payment status.
    pub fn with_paid(mut self, paid: bool) -> Self {
        self.is_paid = paid;
        self
    }

    /// Change the tier. Returns the previous tier.
    pub fn change_tier(&mut self, tier: MemberTier) -> MemberTier {
        let previous = self.tier;
        self.tier = tier;
        self.updated_at = Utc::now();
        previous
    }

    /// Activate or deactivate the profile.
    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
        self.updated_at = Utc::now();
    }

    /// Record the payment status.
    pub fn set_paid(&mut self, paid: bool) {
        self.is_paid = paid;
        self.updated_at = Utc::now();
    }
}
