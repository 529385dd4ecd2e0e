//! # Cast Visibility Policy
//!
//! The single decision deciding whether a member may see a cast. Listing,
//! detail pages, bookmarks and meeting requests all go through
//! [`Viewer::can_view`] so the gates cannot drift apart.

use lune_profiles::{CastTier, MemberTier};
use serde::{Deserialize, Serialize};

/// Decide whether a member of `member_tier` may see a cast classified `cast_tier`.
///
/// Standard members see Standard casts only. Gold and VIP members see every
/// classification.
///
/// # Example
///
/// ```
/// use lune_access::is_cast_visible_to;
/// use lune_profiles::{CastTier, MemberTier};
///
/// assert!(is_cast_visible_to(MemberTier::Standard, CastTier::Standard));
/// assert!(!is_cast_visible_to(MemberTier::Standard, CastTier::HighClass));
/// assert!(is_cast_visible_to(MemberTier::Gold, CastTier::HighClass));
/// ```
pub fn is_cast_visible_to(member_tier: MemberTier, cast_tier: CastTier) -> bool {
    match (member_tier, cast_tier) {
        (_, CastTier::Standard) => true,
        (MemberTier::Gold | MemberTier::Vip, CastTier::HighClass) => true,
        (MemberTier::Standard, CastTier::HighClass) => false,
    }
}

/// Same decision as [`is_cast_visible_to`] over raw tier labels.
///
/// Unknown labels fail closed: an unrecognised member tier is treated as
/// Standard and an unrecognised cast tier as HighClass.
///
/// # Example
///
/// ```
/// use lune_access::is_cast_visible_to_labels;
///
/// assert!(is_cast_visible_to_labels("VIP", "HIGH_CLASS"));
/// assert!(!is_cast_visible_to_labels("diamond", "HIGH_CLASS"));
/// assert!(!is_cast_visible_to_labels("gold", "mystery"));
/// assert!(is_cast_visible_to_labels("gold", "standard"));
/// ```
pub fn is_cast_visible_to_labels(member_tier: &str, cast_tier: &str) -> bool {
    is_cast_visible_to(
        MemberTier::parse_or_restrictive(member_tier),
        CastTier::parse_or_restrictive(cast_tier),
    )
}

/// Who is looking at cast profiles.
///
/// Admins bypass the tier policy entirely; members are gated by tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "tier", rename_all = "snake_case")]
pub enum Viewer {
    /// Platform admin
    Admin,

    /// Member with the given tier
    Member(MemberTier),
}

impl Viewer {
    /// Check whether this viewer may see a cast of the given classification.
    pub fn can_view(&self, cast_tier: CastTier) -> bool {
        match self {
            Viewer::Admin => true,
            Viewer::Member(tier) => is_cast_visible_to(*tier, cast_tier),
        }
    }

    /// The classifications this viewer may see.
    pub fn visible_tiers(&self) -> Vec<CastTier> {
        CastTier::ALL
            .into_iter()
            .filter(|tier| self.can_view(*tier))
            .collect()
    }
}
