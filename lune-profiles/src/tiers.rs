//! Member tiers and cast tier classifications
//!
//! This module defines the access levels that control which casts a member
//! may browse. Member tiers are ordered; cast classifications describe which
//! member tiers a cast is published to.

use serde::{Deserialize, Serialize};

/// Membership tier of a member.
///
/// Tiers are ordered: Standard < Gold < Vip. Only an admin can change a
/// member's tier.
///
/// # Examples
///
/// ```
/// use lune_profiles::MemberTier;
///
/// assert!(MemberTier::Vip > MemberTier::Gold);
/// assert_eq!(MemberTier::parse("GOLD"), Some(MemberTier::Gold));
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MemberTier {
    /// Entry tier
    Standard,

    /// Premium tier
    Gold,

    /// Top tier
    Vip,
}

impl MemberTier {
    /// All member tiers, lowest first.
    pub const ALL: [MemberTier; 3] = [MemberTier::Standard, MemberTier::Gold, MemberTier::Vip];

    /// Parse tier from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive)
    ///
    /// # Returns
    ///
    /// `Some(MemberTier)` if valid, `None` otherwise
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Some(MemberTier::Standard),
            "gold" => Some(MemberTier::Gold),
            "vip" => Some(MemberTier::Vip),
            _ => None,
        }
    }

    /// Parse a tier label, treating anything unrecognised as `Standard`.
    ///
    /// Used where the label comes from an untrusted or legacy source and
    /// access must fail closed.
    ///
    /// # Examples
    ///
    /// ```
    /// use lune_profiles::MemberTier;
    ///
    /// assert_eq!(MemberTier::parse_or_restrictive("platinum"), MemberTier::Standard);
    /// assert_eq!(MemberTier::parse_or_restrictive("vip"), MemberTier::Vip);
    /// ```
    pub fn parse_or_restrictive(s: &str) -> Self {
        Self::parse(s).unwrap_or(MemberTier::Standard)
    }

    /// Get string representation of the tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberTier::Standard => "standard",
            MemberTier::Gold => "gold",
            MemberTier::Vip => "vip",
        }
    }

    /// Get a human-readable display name for the tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            MemberTier::Standard => "Standard",
            MemberTier::Gold => "Gold",
            MemberTier::Vip => "VIP",
        }
    }

    /// Check if this is a premium tier (Gold or above).
    pub fn is_premium(&self) -> bool {
        *self >= MemberTier::Gold
    }
}

impl Default for MemberTier {
    fn default() -> Self {
        MemberTier::Standard
    }
}

impl std::fmt::Display for MemberTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tier classification of a cast.
///
/// High-class casts are only published to premium members.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CastTier {
    /// Visible to every member
    Standard,

    /// Visible to Gold and VIP members only
    HighClass,
}

impl CastTier {
    /// All cast classifications.
    pub const ALL: [CastTier; 2] = [CastTier::Standard, CastTier::HighClass];

    /// Parse classification from string representation.
    ///
    /// Accepts `high_class`, `high-class` and `HIGH_CLASS`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "standard" => Some(CastTier::Standard),
            "highclass" => Some(CastTier::HighClass),
            _ => None,
        }
    }

    /// Parse a classification label, treating anything unrecognised as `HighClass`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lune_profiles::CastTier;
    ///
    /// assert_eq!(CastTier::parse_or_restrictive("premium"), CastTier::HighClass);
    /// assert_eq!(CastTier::parse_or_restrictive("STANDARD"), CastTier::Standard);
    /// ```
    pub fn parse_or_restrictive(s: &str) -> Self {
        Self::parse(s).unwrap_or(CastTier::HighClass)
    }

    /// Get string representation of the classification.
    pub fn as_str(&self) -> &'static str {
        match self {
            CastTier::Standard => "standard",
            CastTier::HighClass => "high_class",
        }
    }

    /// Get a human-readable display name for the classification.
    pub fn display_name(&self) -> &'static str {
        match self {
            CastTier::Standard => "Standard",
            CastTier::HighClass => "High Class",
        }
    }
}

impl Default for CastTier {
    fn default() -> Self {
        CastTier::Standard
    }
}

impl std::fmt::Display for CastTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_tier_parsing() {
        assert_eq!(MemberTier::parse("standard"), Some(MemberTier::Standard));
        assert_eq!(MemberTier::parse("GOLD"), Some(MemberTier::Gold));
        assert_eq!(MemberTier::parse(" Vip "), Some(MemberTier::Vip));
        assert_eq!(MemberTier::parse("platinum"), None);
    }

    #[test]
    fn test_member_tier_hierarchy() {
        assert!(MemberTier::Gold > MemberTier::Standard);
        assert!(MemberTier::Vip > MemberTier::Gold);
        assert!(!MemberTier::Standard.is_premium());
        assert!(MemberTier::Gold.is_premium());
        assert!(MemberTier::Vip.is_premium());
    }

    #[test]
    fn test_cast_tier_parsing() {
        assert_eq!(CastTier::parse("HIGH_CLASS"), Some(CastTier::HighClass));
        assert_eq!(CastTier::parse("high-class"), Some(CastTier::HighClass));
        assert_eq!(CastTier::parse("standard"), Some(CastTier::Standard));
        assert_eq!(CastTier::parse("elite"), None);
    }

    #[test]
    fn test_restrictive_fallbacks() {
        assert_eq!(MemberTier::parse_or_restrictive(""), MemberTier::Standard);
        assert_eq!(CastTier::parse_or_restrictive(""), CastTier::HighClass);
    }

    #[test]
    fn test_serde_labels() {
        assert_eq!(
            serde_json::to_string(&CastTier::HighClass).unwrap(),
            "\"high_class\""
        );
        let tier: MemberTier = serde_json::from_str("\"vip\"").unwrap();
        assert_eq!(tier, MemberTier::Vip);
    }
}
