//! Service behaviour when another writer changes a record between the
//! service's read and its write.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use lune_booking::{
    BookingConfig, BookingError, BookingResult, BookingService, BookingStore, CastProfileUpdate,
    ConfirmDetails, MeetingAction, MeetingRequest, MeetingStatus, MemoryStore,
};
use lune_events::MemoryEventBus;
use lune_profiles::{
    Bookmark, BookmarkToggle, Cast, CastTier, Member, MemberTier, RequestContext, Role, User,
    VerificationStatus,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

const READ_PAUSE: std::time::Duration = std::time::Duration::from_millis(50);
const ADMIN_DELAY: std::time::Duration = std::time::Duration::from_millis(10);

/// What the store does to a meeting request around the service's status swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SwapScript {
    /// Pass every swap through.
    Passthrough,
    /// Before the first swap, another admin confirms the pending request.
    RivalConfirmsFirst,
    /// Every swap reports a concurrent change.
    AlwaysConflict,
}

/// [`MemoryStore`] with scripted timing and interference.
struct ScriptedStore {
    inner: MemoryStore,
    pause_profile_reads: bool,
    swaps: SwapScript,
    swap_calls: AtomicUsize,
}

impl ScriptedStore {
    fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            pause_profile_reads: false,
            swaps: SwapScript::Passthrough,
            swap_calls: AtomicUsize::new(0),
        }
    }

    fn pausing_profile_reads(mut self) -> Self {
        self.pause_profile_reads = true;
        self
    }

    fn with_swaps(mut self, swaps: SwapScript) -> Self {
        self.swaps = swaps;
        self
    }

    async fn pause(&self) {
        if self.pause_profile_reads {
            tokio::time::sleep(READ_PAUSE).await;
        }
    }

    async fn rival_confirm(&self, id: Uuid) -> BookingResult<()> {
        let Some(stored) = self.inner.get_meeting(id).await? else {
            return Ok(());
        };
        if stored.status == MeetingStatus::Pending {
            let confirmed = stored.confirm(ConfirmDetails::new(
                Utc::now() + Duration::days(2),
                "Lune Roppongi",
            ))?;
            self.inner
                .compare_and_set_meeting(MeetingStatus::Pending, confirmed)
                .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl BookingStore for ScriptedStore {
    async fn insert_user(&self, user: User) -> BookingResult<()> {
        self.inner.insert_user(user).await
    }

    async fn get_user(&self, id: Uuid) -> BookingResult<Option<User>> {
        self.inner.get_user(id).await
    }

    async fn find_user_by_email(&self, email: &str) -> BookingResult<Option<User>> {
        self.inner.find_user_by_email(email).await
    }

    async fn set_user_verification(
        &self,
        id: Uuid,
        status: VerificationStatus,
    ) -> BookingResult<User> {
        self.inner.set_user_verification(id, status).await
    }

    async fn insert_member(&self, member: Member) -> BookingResult<()> {
        self.inner.insert_member(member).await
    }

    async fn get_member(&self, id: Uuid) -> BookingResult<Option<Member>> {
        let member = self.inner.get_member(id).await?;
        self.pause().await;
        Ok(member)
    }

    async fn get_member_by_user(&self, user_id: Uuid) -> BookingResult<Option<Member>> {
        let member = self.inner.get_member_by_user(user_id).await?;
        self.pause().await;
        Ok(member)
    }

    async fn set_member_tier(
        &self,
        id: Uuid,
        tier: MemberTier,
    ) -> BookingResult<(MemberTier, Member)> {
        self.inner.set_member_tier(id, tier).await
    }

    async fn set_member_paid(&self, id: Uuid, is_paid: bool) -> BookingResult<Member> {
        self.inner.set_member_paid(id, is_paid).await
    }

    async fn set_member_active(&self, id: Uuid, is_active: bool) -> BookingResult<Member> {
        self.inner.set_member_active(id, is_active).await
    }

    async fn insert_cast(&self, cast: Cast) -> BookingResult<()> {
        self.inner.insert_cast(cast).await
    }

    async fn get_cast(&self, id: Uuid) -> BookingResult<Option<Cast>> {
        let cast = self.inner.get_cast(id).await?;
        self.pause().await;
        Ok(cast)
    }

    async fn get_cast_by_user(&self, user_id: Uuid) -> BookingResult<Option<Cast>> {
        let cast = self.inner.get_cast_by_user(user_id).await?;
        self.pause().await;
        Ok(cast)
    }

    async fn set_cast_tier(&self, id: Uuid, tier: CastTier) -> BookingResult<(CastTier, Cast)> {
        self.inner.set_cast_tier(id, tier).await
    }

    async fn set_cast_active(&self, id: Uuid, is_active: bool) -> BookingResult<Cast> {
        self.inner.set_cast_active(id, is_active).await
    }

    async fn set_cast_featured(&self, id: Uuid, is_featured: bool) -> BookingResult<Cast> {
        self.inner.set_cast_featured(id, is_featured).await
    }

    async fn update_cast_profile(
        &self,
        id: Uuid,
        update: CastProfileUpdate,
    ) -> BookingResult<Cast> {
        self.inner.update_cast_profile(id, update).await
    }

    async fn list_casts(&self) -> BookingResult<Vec<Cast>> {
        self.inner.list_casts().await
    }

    async fn insert_meeting(
        &self,
        request: MeetingRequest,
        max_pending: usize,
    ) -> BookingResult<bool> {
        self.inner.insert_meeting(request, max_pending).await
    }

    async fn get_meeting(&self, id: Uuid) -> BookingResult<Option<MeetingRequest>> {
        self.inner.get_meeting(id).await
    }

    async fn list_meetings(&self, member_id: Option<Uuid>) -> BookingResult<Vec<MeetingRequest>> {
        self.inner.list_meetings(member_id).await
    }

    async fn compare_and_set_meeting(
        &self,
        expected: MeetingStatus,
        updated: MeetingRequest,
    ) -> BookingResult<bool> {
        let call = self.swap_calls.fetch_add(1, Ordering::SeqCst);
        match self.swaps {
            SwapScript::Passthrough => {}
            SwapScript::RivalConfirmsFirst if call == 0 => self.rival_confirm(updated.id).await?,
            SwapScript::RivalConfirmsFirst => {}
            SwapScript::AlwaysConflict => return Ok(false),
        }
        self.inner.compare_and_set_meeting(expected, updated).await
    }

    async fn toggle_bookmark(
        &self,
        member_id: Uuid,
        cast_id: Uuid,
    ) -> BookingResult<BookmarkToggle> {
        self.inner.toggle_bookmark(member_id, cast_id).await
    }

    async fn is_bookmarked(&self, member_id: Uuid, cast_id: Uuid) -> BookingResult<bool> {
        self.inner.is_bookmarked(member_id, cast_id).await
    }

    async fn list_bookmarks(&self, member_id: Uuid) -> BookingResult<Vec<Bookmark>> {
        self.inner.list_bookmarks(member_id).await
    }
}

struct Setup {
    service: BookingService<ScriptedStore>,
    admin: RequestContext,
    member: Member,
    cast: Cast,
}

async fn setup(store: ScriptedStore) -> Setup {
    let admin = User::new("admin@lune.test", "Admin", Role::Admin).approved();
    let admin_ctx = RequestContext::new(admin.id, Role::Admin);
    store.inner.insert_user(admin).await.unwrap();

    let member_user = User::new("m@example.com", "Member", Role::Member).approved();
    let member = Member::new(member_user.id, "Member").with_tier(MemberTier::Gold);
    store.inner.insert_user(member_user).await.unwrap();
    store.inner.insert_member(member.clone()).await.unwrap();

    let cast_user = User::new("c@example.com", "Cast", Role::Cast).approved();
    let cast = Cast::new(cast_user.id, "Aoi");
    store.inner.insert_user(cast_user).await.unwrap();
    store.inner.insert_cast(cast.clone()).await.unwrap();

    let service = BookingService::new(
        Arc::new(store),
        Arc::new(MemoryEventBus::new()),
        BookingConfig::default(),
    );
    Setup {
        service,
        admin: admin_ctx,
        member,
        cast,
    }
}

async fn pending_request(setup: &Setup) -> MeetingRequest {
    let request = MeetingRequest::new(setup.member.id, setup.cast.id);
    assert!(setup
        .service
        .store()
        .inner
        .insert_meeting(request.clone(), 0)
        .await
        .unwrap());
    request
}

fn details() -> ConfirmDetails {
    ConfirmDetails::new(Utc::now() + Duration::days(1), "Lune Ginza")
}

#[tokio::test]
async fn test_profile_edit_keeps_concurrent_tier_change() {
    let s = setup(ScriptedStore::new().pausing_profile_reads()).await;
    let cast_ctx = RequestContext::new(s.cast.user_id, Role::Cast);
    let update = CastProfileUpdate {
        bio: Some("hi".into()),
        ..Default::default()
    };

    let (edited, promoted) = tokio::join!(
        s.service.update_cast_profile(&cast_ctx, update),
        async {
            tokio::time::sleep(ADMIN_DELAY).await;
            s.service
                .set_cast_tier(&s.admin, s.cast.id, CastTier::HighClass)
                .await
        }
    );
    edited.unwrap();
    promoted.unwrap();

    let stored = s.service.store().inner.get_cast(s.cast.id).await.unwrap().unwrap();
    assert_eq!(stored.tier_classification, CastTier::HighClass);
    assert_eq!(stored.bio.as_deref(), Some("hi"));
}

#[tokio::test]
async fn test_deactivation_keeps_concurrent_cast_tier_change() {
    let s = setup(ScriptedStore::new().pausing_profile_reads()).await;

    let (deactivated, promoted) = tokio::join!(
        s.service.deactivate_user(&s.admin, s.cast.user_id),
        async {
            tokio::time::sleep(ADMIN_DELAY).await;
            s.service
                .set_cast_tier(&s.admin, s.cast.id, CastTier::HighClass)
                .await
        }
    );
    deactivated.unwrap();
    promoted.unwrap();

    let stored = s.service.store().inner.get_cast(s.cast.id).await.unwrap().unwrap();
    assert!(!stored.is_active);
    assert_eq!(stored.tier_classification, CastTier::HighClass);
}

#[tokio::test]
async fn test_member_admin_writes_compose() {
    let s = setup(ScriptedStore::new().pausing_profile_reads()).await;

    let (deactivated, upgraded, paid) = tokio::join!(
        s.service.deactivate_user(&s.admin, s.member.user_id),
        async {
            tokio::time::sleep(ADMIN_DELAY).await;
            s.service
                .set_member_tier(&s.admin, s.member.id, MemberTier::Vip)
                .await
        },
        async {
            tokio::time::sleep(ADMIN_DELAY).await;
            s.service.mark_member_paid(&s.admin, s.member.id, true).await
        }
    );
    deactivated.unwrap();
    upgraded.unwrap();
    paid.unwrap();

    let stored = s
        .service
        .store()
        .inner
        .get_member(s.member.id)
        .await
        .unwrap()
        .unwrap();
    assert!(!stored.is_active);
    assert!(stored.is_paid);
    assert_eq!(stored.tier, MemberTier::Vip);
}

#[tokio::test]
async fn test_confirm_after_rival_confirm_is_rejected() {
    let s = setup(ScriptedStore::new().with_swaps(SwapScript::RivalConfirmsFirst)).await;
    let request = pending_request(&s).await;

    let err = s
        .service
        .confirm_meeting(&s.admin, request.id, details())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BookingError::InvalidTransition {
            from: MeetingStatus::Confirmed,
            action: MeetingAction::Confirm,
        }
    ));

    // The rival's schedule stands
    let stored = s.service.store().inner.get_meeting(request.id).await.unwrap().unwrap();
    assert_eq!(stored.status, MeetingStatus::Confirmed);
    assert_eq!(stored.lune_location.as_deref(), Some("Lune Roppongi"));
    assert_eq!(s.service.store().swap_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_cancel_retries_against_rival_confirm() {
    let s = setup(ScriptedStore::new().with_swaps(SwapScript::RivalConfirmsFirst)).await;
    let request = pending_request(&s).await;

    let cancelled = s
        .service
        .cancel_meeting(&s.admin, request.id, Some("Member withdrew".into()))
        .await
        .unwrap();
    assert_eq!(cancelled.status, MeetingStatus::Cancelled);
    assert_eq!(cancelled.lune_location.as_deref(), Some("Lune Roppongi"));
    assert!(cancelled.schedule_consistent());
    assert_eq!(s.service.store().swap_calls.load(Ordering::SeqCst), 2);

    let stored = s.service.store().inner.get_meeting(request.id).await.unwrap().unwrap();
    assert_eq!(stored.status, MeetingStatus::Cancelled);
}

#[tokio::test]
async fn test_persistent_conflict_surfaces_storage_error() {
    let s = setup(ScriptedStore::new().with_swaps(SwapScript::AlwaysConflict)).await;
    let request = pending_request(&s).await;

    let err = s
        .service
        .confirm_meeting(&s.admin, request.id, details())
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Storage(_)));
    assert_eq!(err.status_code(), 500);
    assert!(s.service.store().swap_calls.load(Ordering::SeqCst) > 1);

    let stored = s.service.store().inner.get_meeting(request.id).await.unwrap().unwrap();
    assert_eq!(stored.status, MeetingStatus::Pending);
}
