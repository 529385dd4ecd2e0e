//! Member bookmarks of cast profiles

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A member's bookmark of a cast. Identity is the `(member_id, cast_id)` pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmark {
    /// Bookmarking member
    pub member_id: Uuid,

    /// Bookmarked cast
    pub cast_id: Uuid,

    /// When the bookmark was added
    pub created_at: DateTime<Utc>,
}

impl Bookmark {
    /// Creates a bookmark stamped with the current time.
    pub fn new(member_id: Uuid, cast_id: Uuid) -> Self {
        Self {
            member_id,
            cast_id,
            created_at: Utc::now(),
        }
    }

    /// The unique key of this bookmark.
    pub fn key(&self) -> (Uuid, Uuid) {
        (self.member_id, self.cast_id)
    }
}

impl PartialEq for Bookmark {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Bookmark {}

/// Outcome of a bookmark toggle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookmarkToggle {
    /// The bookmark did not exist and was added
    Added,

    /// The bookmark existed and was removed
    Removed,
}

impl BookmarkToggle {
    /// Whether the cast is bookmarked after the toggle.
    pub fn is_bookmarked(&self) -> bool {
        matches!(self, BookmarkToggle::Added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bookmark_identity_ignores_timestamp() {
        let member_id = Uuid::now_v7();
        let cast_id = Uuid::now_v7();
        let a = Bookmark::new(member_id, cast_id);
        let mut b = Bookmark::new(member_id, cast_id);
        b.created_at = a.created_at - chrono::Duration::days(1);

        assert_eq!(a, b);
    }

    #[test]
    fn test_toggle_outcome() {
        assert!(BookmarkToggle::Added.is_bookmarked());
        assert!(!BookmarkToggle::Removed.is_bookmarked());
    }
}
