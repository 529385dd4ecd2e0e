//! Persistence seam for the booking core.
//!
//! [`BookingStore`] is what the service needs from a database: inserts and
//! reads, field-targeted updates of profiles, an atomic status
//! compare-and-swap for meeting requests and an atomic bookmark toggle.
//! [`MemoryStore`] keeps everything in process.
//!
//! Profiles are never written back whole. Each update touches only the
//! fields it owns, so an admin's tier change and a cast's own profile edit
//! cannot overwrite each other.

use async_trait::async_trait;
use lune_profiles::{
    normalize_email, Bookmark, BookmarkToggle, Cast, CastTier, Member, MemberTier, User,
    VerificationStatus,
};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{BookingError, BookingResult};
use crate::meeting::{MeetingRequest, MeetingStatus};
use crate::profile::CastProfileUpdate;

/// Storage backend for users, profiles, meeting requests and bookmarks.
///
/// Reads return `Ok(None)` for missing records; updates of missing records
/// return [`BookingError::NotFound`]. Infrastructure failures surface as
/// [`BookingError::Storage`].
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Insert a user. Fails with `Validation` if the email is taken.
    async fn insert_user(&self, user: User) -> BookingResult<()>;

    /// Get a user by ID.
    async fn get_user(&self, id: Uuid) -> BookingResult<Option<User>>;

    /// Find a user by email, compared after normalization.
    async fn find_user_by_email(&self, email: &str) -> BookingResult<Option<User>>;

    /// Set a user's verification status.
    async fn set_user_verification(
        &self,
        id: Uuid,
        status: VerificationStatus,
    ) -> BookingResult<User>;

    /// Insert a member profile.
    async fn insert_member(&self, member: Member) -> BookingResult<()>;

    /// Get a member profile by ID.
    async fn get_member(&self, id: Uuid) -> BookingResult<Option<Member>>;

    /// Get the member profile owned by a user.
    async fn get_member_by_user(&self, user_id: Uuid) -> BookingResult<Option<Member>>;

    /// Set a member's tier. Returns the previous tier and the stored profile.
    async fn set_member_tier(&self, id: Uuid, tier: MemberTier)
        -> BookingResult<(MemberTier, Member)>;

    /// Set a member's payment flag.
    async fn set_member_paid(&self, id: Uuid, is_paid: bool) -> BookingResult<Member>;

    /// Set a member's activity flag.
    async fn set_member_active(&self, id: Uuid, is_active: bool) -> BookingResult<Member>;

    /// Insert a cast profile.
    async fn insert_cast(&self, cast: Cast) -> BookingResult<()>;

    /// Get a cast profile by ID.
    async fn get_cast(&self, id: Uuid) -> BookingResult<Option<Cast>>;

    /// Get the cast profile owned by a user.
    async fn get_cast_by_user(&self, user_id: Uuid) -> BookingResult<Option<Cast>>;

    /// Set a cast's classification. Returns the previous tier and the stored profile.
    async fn set_cast_tier(&self, id: Uuid, tier: CastTier) -> BookingResult<(CastTier, Cast)>;

    /// Set a cast's activity flag.
    async fn set_cast_active(&self, id: Uuid, is_active: bool) -> BookingResult<Cast>;

    /// Set a cast's featured flag.
    async fn set_cast_featured(&self, id: Uuid, is_featured: bool) -> BookingResult<Cast>;

    /// Apply a cast's own edit to the descriptive fields only.
    async fn update_cast_profile(
        &self,
        id: Uuid,
        update: CastProfileUpdate,
    ) -> BookingResult<Cast>;

    /// All cast profiles, in no particular order.
    async fn list_casts(&self) -> BookingResult<Vec<Cast>>;

    /// Insert a pending meeting request.
    ///
    /// When `max_pending` is non-zero and the member already holds that many
    /// pending requests, nothing is inserted and `Ok(false)` is returned. The
    /// count and the insert are atomic.
    async fn insert_meeting(
        &self,
        request: MeetingRequest,
        max_pending: usize,
    ) -> BookingResult<bool>;

    /// Get a meeting request by ID.
    async fn get_meeting(&self, id: Uuid) -> BookingResult<Option<MeetingRequest>>;

    /// Meeting requests, newest first, optionally restricted to one member.
    async fn list_meetings(&self, member_id: Option<Uuid>) -> BookingResult<Vec<MeetingRequest>>;

    /// Replace a meeting request only if its stored status is still `expected`.
    ///
    /// Returns `Ok(false)` when another writer changed the status first.
    async fn compare_and_set_meeting(
        &self,
        expected: MeetingStatus,
        updated: MeetingRequest,
    ) -> BookingResult<bool>;

    /// Add the bookmark if absent, remove it if present. Atomic per pair.
    async fn toggle_bookmark(&self, member_id: Uuid, cast_id: Uuid)
        -> BookingResult<BookmarkToggle>;

    /// Check whether a bookmark exists.
    async fn is_bookmarked(&self, member_id: Uuid, cast_id: Uuid) -> BookingResult<bool>;

    /// A member's bookmarks, newest first.
    async fn list_bookmarks(&self, member_id: Uuid) -> BookingResult<Vec<Bookmark>>;
}

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    emails: HashMap<String, Uuid>,
    members: HashMap<Uuid, Member>,
    casts: HashMap<Uuid, Cast>,
    meetings: HashMap<Uuid, MeetingRequest>,
    bookmarks: HashMap<(Uuid, Uuid), Bookmark>,
}

impl Tables {
    fn user_mut(&mut self, id: Uuid) -> BookingResult<&mut User> {
        self.users
            .get_mut(&id)
            .ok_or_else(|| BookingError::not_found("user", id))
    }

    fn member_mut(&mut self, id: Uuid) -> BookingResult<&mut Member> {
        self.members
            .get_mut(&id)
            .ok_or_else(|| BookingError::not_found("member", id))
    }

    fn cast_mut(&mut self, id: Uuid) -> BookingResult<&mut Cast> {
        self.casts
            .get_mut(&id)
            .ok_or_else(|| BookingError::not_found("cast", id))
    }
}

/// In-memory store.
///
/// All tables sit behind one lock, so multi-table checks and the status
/// compare-and-swap observe a consistent snapshot.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").finish_non_exhaustive()
    }
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn insert_user(&self, user: User) -> BookingResult<()> {
        let mut tables = self.tables.write().await;
        let email = user.normalized_email();
        if tables.emails.contains_key(&email) {
            return Err(BookingError::validation(format!(
                "email already registered: {email}"
            )));
        }
        tables.emails.insert(email, user.id);
        tables.users.insert(user.id, user);
        Ok(())
    }

    async fn get_user(&self, id: Uuid) -> BookingResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> BookingResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .emails
            .get(&normalize_email(email))
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn set_user_verification(
        &self,
        id: Uuid,
        status: VerificationStatus,
    ) -> BookingResult<User> {
        let mut tables = self.tables.write().await;
        let user = tables.user_mut(id)?;
        user.set_verification(status);
        Ok(user.clone())
    }

    async fn insert_member(&self, member: Member) -> BookingResult<()> {
        let mut tables = self.tables.write().await;
        if tables.members.values().any(|m| m.user_id == member.user_id) {
            return Err(BookingError::validation(
                "user already has a member profile",
            ));
        }
        tables.members.insert(member.id, member);
        Ok(())
    }

    async fn get_member(&self, id: Uuid) -> BookingResult<Option<Member>> {
        Ok(self.tables.read().await.members.get(&id).cloned())
    }

    async fn get_member_by_user(&self, user_id: Uuid) -> BookingResult<Option<Member>> {
        Ok(self
            .tables
            .read()
            .await
            .members
            .values()
            .find(|m| m.user_id == user_id)
            .cloned())
    }

    async fn set_member_tier(
        &self,
        id: Uuid,
        tier: MemberTier,
    ) -> BookingResult<(MemberTier, Member)> {
        let mut tables = self.tables.write().await;
        let member = tables.member_mut(id)?;
        let previous = member.tier;
        if previous != tier {
            member.change_tier(tier);
        }
        Ok((previous, member.clone()))
    }

    async fn set_member_paid(&self, id: Uuid, is_paid: bool) -> BookingResult<Member> {
        let mut tables = self.tables.write().await;
        let member = tables.member_mut(id)?;
        member.set_paid(is_paid);
        Ok(member.clone())
    }

    async fn set_member_active(&self, id: Uuid, is_active: bool) -> BookingResult<Member> {
        let mut tables = self.tables.write().await;
        let member = tables.member_mut(id)?;
        member.set_active(is_active);
        Ok(member.clone())
    }

    async fn insert_cast(&self, cast: Cast) -> BookingResult<()> {
        let mut tables = self.tables.write().await;
        if tables.casts.values().any(|c| c.user_id == cast.user_id) {
            return Err(BookingError::validation("user already has a cast profile"));
        }
        tables.casts.insert(cast.id, cast);
        Ok(())
    }

    async fn get_cast(&self, id: Uuid) -> BookingResult<Option<Cast>> {
        Ok(self.tables.read().await.casts.get(&id).cloned())
    }

    async fn get_cast_by_user(&self, user_id: Uuid) -> BookingResult<Option<Cast>> {
        Ok(self
            .tables
            .read()
            .await
            .casts
            .values()
            .find(|c| c.user_id == user_id)
            .cloned())
    }

    async fn set_cast_tier(&self, id: Uuid, tier: CastTier) -> BookingResult<(CastTier, Cast)> {
        let mut tables = self.tables.write().await;
        let cast = tables.cast_mut(id)?;
        let previous = cast.tier_classification;
        if previous != tier {
            cast.change_tier(tier);
        }
        Ok((previous, cast.clone()))
    }

    async fn set_cast_active(&self, id: Uuid, is_active: bool) -> BookingResult<Cast> {
        let mut tables = self.tables.write().await;
        let cast = tables.cast_mut(id)?;
        cast.set_active(is_active);
        Ok(cast.clone())
    }

    async fn set_cast_featured(&self, id: Uuid, is_featured: bool) -> BookingResult<Cast> {
        let mut tables = self.tables.write().await;
        let cast = tables.cast_mut(id)?;
        cast.set_featured(is_featured);
        Ok(cast.clone())
    }

    async fn update_cast_profile(
        &self,
        id: Uuid,
        update: CastProfileUpdate,
    ) -> BookingResult<Cast> {
        let mut tables = self.tables.write().await;
        let cast = tables.cast_mut(id)?;
        update.apply(cast);
        Ok(cast.clone())
    }

    async fn list_casts(&self) -> BookingResult<Vec<Cast>> {
        Ok(self.tables.read().await.casts.values().cloned().collect())
    }

    async fn insert_meeting(
        &self,
        request: MeetingRequest,
        max_pending: usize,
    ) -> BookingResult<bool> {
        let mut tables = self.tables.write().await;
        if max_pending > 0 {
            let pending = tables
                .meetings
                .values()
                .filter(|m| m.member_id == request.member_id)
                .filter(|m| m.status == MeetingStatus::Pending)
                .count();
            if pending >= max_pending {
                return Ok(false);
            }
        }
        tables.meetings.insert(request.id, request);
        Ok(true)
    }

    async fn get_meeting(&self, id: Uuid) -> BookingResult<Option<MeetingRequest>> {
        Ok(self.tables.read().await.meetings.get(&id).cloned())
    }

    async fn list_meetings(&self, member_id: Option<Uuid>) -> BookingResult<Vec<MeetingRequest>> {
        let tables = self.tables.read().await;
        let mut meetings: Vec<MeetingRequest> = tables
            .meetings
            .values()
            .filter(|m| member_id.map_or(true, |id| m.member_id == id))
            .cloned()
            .collect();
        meetings.sort_by(|a, b| {
            b.requested_at
                .cmp(&a.requested_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(meetings)
    }

    async fn compare_and_set_meeting(
        &self,
        expected: MeetingStatus,
        updated: MeetingRequest,
    ) -> BookingResult<bool> {
        let mut tables = self.tables.write().await;
        let Some(slot) = tables.meetings.get_mut(&updated.id) else {
            return Err(BookingError::not_found("meeting_request", updated.id));
        };
        if slot.status != expected {
            return Ok(false);
        }
        *slot = updated;
        Ok(true)
    }

    async fn toggle_bookmark(
        &self,
        member_id: Uuid,
        cast_id: Uuid,
    ) -> BookingResult<BookmarkToggle> {
        let mut tables = self.tables.write().await;
        let key = (member_id, cast_id);
        if tables.bookmarks.remove(&key).is_some() {
            return Ok(BookmarkToggle::Removed);
        }
        tables
            .bookmarks
            .insert(key, Bookmark::new(member_id, cast_id));
        Ok(BookmarkToggle::Added)
    }

    async fn is_bookmarked(&self, member_id: Uuid, cast_id: Uuid) -> BookingResult<bool> {
        Ok(self
            .tables
            .read()
            .await
            .bookmarks
            .contains_key(&(member_id, cast_id)))
    }

    async fn list_bookmarks(&self, member_id: Uuid) -> BookingResult<Vec<Bookmark>> {
        let tables = self.tables.read().await;
        let mut bookmarks: Vec<Bookmark> = tables
            .bookmarks
            .values()
            .filter(|b| b.member_id == member_id)
            .cloned()
            .collect();
        bookmarks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookmarks)
    }
}
