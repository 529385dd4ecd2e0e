//! Account roles and verification status
//!
//! Every user has exactly one role. Roles are not hierarchical: a member,
//! a cast and an admin each see a different slice of the platform.

use serde::{Deserialize, Serialize};

/// Role of a user account.
///
/// # Examples
///
/// ```
/// use lune_profiles::Role;
///
/// assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
/// assert!(Role::Admin.is_admin());
/// assert!(!Role::Cast.is_admin());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Browses casts and requests meetings
    Member,

    /// Offers companionship and maintains a public profile
    Cast,

    /// Approves accounts and coordinates meeting requests
    Admin,
}

impl Role {
    /// Check if this role has admin privileges.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Parse role from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive)
    ///
    /// # Returns
    ///
    /// `Some(Role)` if valid, `None` otherwise
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "member" => Some(Self::Member),
            "cast" => Some(Self::Cast),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Get string representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Cast => "cast",
            Self::Admin => "admin",
        }
    }

    /// Get a human-readable display name for the role.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Member => "Member",
            Self::Cast => "Cast",
            Self::Admin => "Admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Admin review state of a user account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// Awaiting admin review
    Pending,

    /// Approved by an admin
    Approved,

    /// Rejected by an admin
    Rejected,
}

impl VerificationStatus {
    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Check whether the account has been approved.
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl Default for VerificationStatus {
    fn default() -> Self {
        Self::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("member"), Some(Role::Member));
        assert_eq!(Role::parse("CAST"), Some(Role::Cast));
        assert_eq!(Role::parse("Admin"), Some(Role::Admin));
        assert_eq!(Role::parse("owner"), None);
    }

    #[test]
    fn test_role_round_trip_labels() {
        for role in [Role::Member, Role::Cast, Role::Admin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_verification_default() {
        assert_eq!(VerificationStatus::default(), VerificationStatus::Pending);
        assert!(!VerificationStatus::Rejected.is_approved());
        assert!(VerificationStatus::Approved.is_approved());
    }
}
