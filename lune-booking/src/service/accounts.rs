//! Registration and admin account management.

use lune_access::Capability;
use lune_events::AccountEvent;
use lune_profiles::{
    Cast, CastTier, Member, MemberTier, RequestContext, Role, User, VerificationStatus,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use super::BookingService;
use crate::error::{BookingError, BookingResult};
use crate::store::BookingStore;

/// Sign-up form for members and casts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    /// Login email
    pub email: String,

    /// Account name
    pub name: String,

    /// Nickname for members, public name for casts; defaults to `name`
    pub display_name: Option<String>,
}

impl Registration {
    /// Create a registration.
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            display_name: None,
        }
    }

    /// Set the display name.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    fn into_user(self, role: Role) -> BookingResult<(User, String)> {
        let email = self.email.trim();
        let name = self.name.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(BookingError::validation("a valid email is required"));
        }
        if name.is_empty() {
            return Err(BookingError::validation("name is required"));
        }

        let display_name = self
            .display_name
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| name.to_string());
        Ok((User::new(email, name, role), display_name))
    }
}

impl<S: BookingStore> BookingService<S> {
    /// Sign up a member. The account starts unapproved, Standard and unpaid.
    #[instrument(skip(self, registration))]
    pub async fn register_member(&self, registration: Registration) -> BookingResult<(User, Member)> {
        let (user, nickname) = registration.into_user(Role::Member)?;
        self.ensure_email_free(&user).await?;

        let member = Member::new(user.id, nickname);
        self.store.insert_user(user.clone()).await?;
        self.store.insert_member(member.clone()).await?;

        info!(user_id = %user.id, member_id = %member.id, "Member registered");
        self.announce_registration(&user).await;
        Ok((user, member))
    }

    /// Sign up a cast. The profile starts unapproved and Standard.
    #[instrument(skip(self, registration))]
    pub async fn register_cast(&self, registration: Registration) -> BookingResult<(User, Cast)> {
        let (user, display_name) = registration.into_user(Role::Cast)?;
        self.ensure_email_free(&user).await?;

        let cast = Cast::new(user.id, display_name);
        self.store.insert_user(user.clone()).await?;
        self.store.insert_cast(cast.clone()).await?;

        info!(user_id = %user.id, cast_id = %cast.id, "Cast registered");
        self.announce_registration(&user).await;
        Ok((user, cast))
    }

    /// Mark a user as approved.
    #[instrument(skip(self, ctx), fields(user_id = %ctx.user_id()))]
    pub async fn approve_user(&self, ctx: &RequestContext, target: Uuid) -> BookingResult<User> {
        let user = self
            .set_verification(ctx, target, VerificationStatus::Approved)
            .await?;
        self.publish(ctx, AccountEvent::Approved { user_id: user.id }.to_event())
            .await;
        Ok(user)
    }

    /// Mark a user as rejected.
    #[instrument(skip(self, ctx), fields(user_id = %ctx.user_id()))]
    pub async fn reject_user(&self, ctx: &RequestContext, target: Uuid) -> BookingResult<User> {
        let user = self
            .set_verification(ctx, target, VerificationStatus::Rejected)
            .await?;
        self.publish(ctx, AccountEvent::Rejected { user_id: user.id }.to_event())
            .await;
        Ok(user)
    }

    /// Re-enable a user's member or cast profile.
    #[instrument(skip(self, ctx), fields(user_id = %ctx.user_id()))]
    pub async fn activate_user(&self, ctx: &RequestContext, target: Uuid) -> BookingResult<()> {
        self.set_profile_active(ctx, target, true).await?;
        self.publish(ctx, AccountEvent::Activated { user_id: target }.to_event())
            .await;
        Ok(())
    }

    /// Disable a user's member or cast profile.
    #[instrument(skip(self, ctx), fields(user_id = %ctx.user_id()))]
    pub async fn deactivate_user(&self, ctx: &RequestContext, target: Uuid) -> BookingResult<()> {
        self.set_profile_active(ctx, target, false).await?;
        self.publish(ctx, AccountEvent::Deactivated { user_id: target }.to_event())
            .await;
        Ok(())
    }

    /// Change a member's tier.
    #[instrument(skip(self, ctx), fields(user_id = %ctx.user_id()))]
    pub async fn set_member_tier(
        &self,
        ctx: &RequestContext,
        member_id: Uuid,
        tier: MemberTier,
    ) -> BookingResult<Member> {
        self.require(ctx, Capability::ManageTiers)?;
        let (previous, member) = self.store.set_member_tier(member_id, tier).await?;
        if previous == tier {
            return Ok(member);
        }

        info!(member_id = %member_id, from = %previous, to = %tier, "Member tier changed");
        self.publish(
            ctx,
            AccountEvent::MemberTierChanged {
                member_id,
                from: previous,
                to: tier,
            }
            .to_event(),
        )
        .await;
        Ok(member)
    }

    /// Record whether a member has paid.
    #[instrument(skip(self, ctx), fields(user_id = %ctx.user_id()))]
    pub async fn mark_member_paid(
        &self,
        ctx: &RequestContext,
        member_id: Uuid,
        is_paid: bool,
    ) -> BookingResult<Member> {
        self.require(ctx, Capability::ManageUsers)?;
        let member = self.store.set_member_paid(member_id, is_paid).await?;
        info!(member_id = %member_id, is_paid, "Member payment status set");
        self.publish(
            ctx,
            AccountEvent::MemberPaymentMarked { member_id, is_paid }.to_event(),
        )
        .await;
        Ok(member)
    }

    /// Change a cast's classification.
    #[instrument(skip(self, ctx), fields(user_id = %ctx.user_id()))]
    pub async fn set_cast_tier(
        &self,
        ctx: &RequestContext,
        cast_id: Uuid,
        tier: CastTier,
    ) -> BookingResult<Cast> {
        self.require(ctx, Capability::ManageTiers)?;
        let (previous, cast) = self.store.set_cast_tier(cast_id, tier).await?;
        if previous == tier {
            return Ok(cast);
        }

        info!(cast_id = %cast_id, from = %previous, to = %tier, "Cast tier changed");
        self.publish(
            ctx,
            AccountEvent::CastTierChanged {
                cast_id,
                from: previous,
                to: tier,
            }
            .to_event(),
        )
        .await;
        Ok(cast)
    }

    /// Feature or unfeature a cast in listings.
    #[instrument(skip(self, ctx), fields(user_id = %ctx.user_id()))]
    pub async fn set_cast_featured(
        &self,
        ctx: &RequestContext,
        cast_id: Uuid,
        is_featured: bool,
    ) -> BookingResult<Cast> {
        self.require(ctx, Capability::ManageTiers)?;
        let cast = self.store.set_cast_featured(cast_id, is_featured).await?;
        info!(cast_id = %cast_id, is_featured, "Cast featured flag set");
        self.publish(
            ctx,
            AccountEvent::CastFeatured {
                cast_id,
                is_featured,
            }
            .to_event(),
        )
        .await;
        Ok(cast)
    }

    async fn ensure_email_free(&self, user: &User) -> BookingResult<()> {
        if self.store.find_user_by_email(&user.email).await?.is_some() {
            return Err(BookingError::validation(format!(
                "email already registered: {}",
                user.normalized_email()
            )));
        }
        Ok(())
    }

    async fn announce_registration(&self, user: &User) {
        let ctx = RequestContext::new(user.id, user.role);
        self.publish(
            &ctx,
            AccountEvent::Registered {
                user_id: user.id,
                role: user.role,
            }
            .to_event(),
        )
        .await;
    }

    async fn set_verification(
        &self,
        ctx: &RequestContext,
        target: Uuid,
        status: VerificationStatus,
    ) -> BookingResult<User> {
        self.require(ctx, Capability::ManageUsers)?;
        let user = self.store.set_user_verification(target, status).await?;
        info!(target_user = %target, status = status.as_str(), "User verification set");
        Ok(user)
    }

    async fn set_profile_active(
        &self,
        ctx: &RequestContext,
        target: Uuid,
        active: bool,
    ) -> BookingResult<()> {
        self.require(ctx, Capability::ManageUsers)?;
        let user = self
            .store
            .get_user(target)
            .await?
            .ok_or_else(|| BookingError::not_found("user", target))?;

        match user.role {
            Role::Member => {
                let member = self
                    .store
                    .get_member_by_user(target)
                    .await?
                    .ok_or_else(|| BookingError::not_found("member", target))?;
                self.store.set_member_active(member.id, active).await?;
            }
            Role::Cast => {
                let cast = self
                    .store
                    .get_cast_by_user(target)
                    .await?
                    .ok_or_else(|| BookingError::not_found("cast", target))?;
                self.store.set_cast_active(cast.id, active).await?;
            }
            Role::Admin => {
                return Err(BookingError::validation(
                    "admin accounts have no profile to activate",
                ));
            }
        }
        info!(target_user = %target, active, "Profile activity set");
        Ok(())
    }
}
