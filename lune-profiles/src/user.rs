//! User account domain model
//!
//! A user is the identity behind a member, cast or admin profile. Members and
//! casts own exactly one profile each; admins have no profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::roles::{Role, VerificationStatus};

/// A user account.
///
/// # Examples
///
/// ```
/// use lune_profiles::{Role, User, VerificationStatus};
///
/// let user = User::new("hana@example.com", "Hana", Role::Member);
/// assert_eq!(user.verification, VerificationStatus::Pending);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID
    pub id: Uuid,

    /// Login email (unique across the platform)
    pub email: String,

    /// Display name
    pub name: String,

    /// Account role
    pub role: Role,

    /// Admin review state
    pub verification: VerificationStatus,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user awaiting verification.
    ///
    /// # Arguments
    ///
    /// * `email` - Login email
    /// * `name` - Display name
    /// * `role` - Account role
    pub fn new(email: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            email: email.into(),
            name: name.into(),
            role,
            verification: VerificationStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the user as approved (admin-created accounts start approved).
    pub fn approved(mut self) -> Self {
        self.verification = VerificationStatus::Approved;
        self
    }

    /// Set the verification status and bump the update timestamp.
    pub fn set_verification(&mut self, status: VerificationStatus) {
        self.verification = status;
        self.updated_at = Utc::now();
    }

    /// Normalised email used for uniqueness checks.
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }
}

/// Normalise an email address for comparison.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("a@example.com", "A", Role::Cast);
        assert_eq!(user.role, Role::Cast);
        assert_eq!(user.verification, VerificationStatus::Pending);
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_approved_builder() {
        let user = User::new("admin@example.com", "Admin", Role::Admin).approved();
        assert!(user.verification.is_approved());
    }

    #[test]
    fn test_normalized_email() {
        let user = User::new("  Hana@Example.COM ", "Hana", Role::Member);
        assert_eq!(user.normalized_email(), "hana@example.com");
    }
}
