//! Booking service
//!
//! [`BookingService`] is the entry point the presentation layer calls. Every
//! operation receives the caller's [`RequestContext`], checks the role's
//! capabilities, applies the tier policy where casts are involved and
//! publishes a domain event once the change is stored.

mod accounts;
mod catalog;
mod meetings;

pub use accounts::Registration;
pub use catalog::CastDetail;

use lune_access::{Capability, CapabilitySet, Viewer};
use lune_events::{Event, EventBus, MemoryEventBus};
use lune_profiles::{Cast, Member, RequestContext};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::BookingConfig;
use crate::error::{BookingError, BookingResult};
use crate::store::{BookingStore, MemoryStore};

/// Booking operations over a [`BookingStore`].
pub struct BookingService<S: BookingStore> {
    store: Arc<S>,
    events: Arc<dyn EventBus>,
    config: BookingConfig,
}

impl<S: BookingStore> std::fmt::Debug for BookingService<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl BookingService<MemoryStore> {
    /// Service backed by an in-memory store and event bus.
    pub fn in_memory(config: BookingConfig) -> Self {
        Self::new(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryEventBus::new()),
            config,
        )
    }
}

impl<S: BookingStore> BookingService<S> {
    /// Create a new service.
    pub fn new(store: Arc<S>, events: Arc<dyn EventBus>, config: BookingConfig) -> Self {
        Self {
            store,
            events,
            config,
        }
    }

    /// The backing store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// The event bus events are published to.
    pub fn events(&self) -> &Arc<dyn EventBus> {
        &self.events
    }

    /// Active configuration.
    pub fn config(&self) -> &BookingConfig {
        &self.config
    }

    fn require(&self, ctx: &RequestContext, capability: Capability) -> BookingResult<()> {
        if CapabilitySet::for_role(ctx.role()).has(capability) {
            return Ok(());
        }
        debug!(
            user_id = %ctx.user_id(),
            role = %ctx.role(),
            capability = %capability,
            "Capability check failed"
        );
        Err(BookingError::forbidden(format!(
            "{} accounts cannot {}",
            ctx.role().display_name(),
            capability
        )))
    }

    /// The caller's member profile, if it may currently use the platform.
    async fn active_member(&self, ctx: &RequestContext) -> BookingResult<Member> {
        let member = self
            .store
            .get_member_by_user(ctx.user_id())
            .await?
            .ok_or_else(|| BookingError::forbidden("no member profile for this account"))?;

        if !member.is_active {
            return Err(BookingError::forbidden("member account is inactive"));
        }
        if self.config.require_verified_members {
            let user = self
                .store
                .get_user(ctx.user_id())
                .await?
                .ok_or_else(|| BookingError::not_found("user", ctx.user_id()))?;
            if !user.verification.is_approved() {
                return Err(BookingError::forbidden(
                    "member account has not been approved",
                ));
            }
        }
        if self.config.require_paid_members && !member.is_paid {
            return Err(BookingError::forbidden("membership fee has not been paid"));
        }
        Ok(member)
    }

    /// Resolve who is looking at casts. Members must pass the member gate.
    async fn viewer(&self, ctx: &RequestContext) -> BookingResult<(Viewer, Option<Member>)> {
        if ctx.actor.is_admin() {
            return Ok((Viewer::Admin, None));
        }
        let member = self.active_member(ctx).await?;
        Ok((Viewer::Member(member.tier), Some(member)))
    }

    /// Whether members may find this cast at all: the profile is active and
    /// its account has been approved.
    async fn is_listed(&self, cast: &Cast) -> BookingResult<bool> {
        if !cast.is_active {
            return Ok(false);
        }
        let approved = self
            .store
            .get_user(cast.user_id)
            .await?
            .is_some_and(|owner| owner.verification.is_approved());
        Ok(approved)
    }

    /// Load a cast the viewer may see.
    ///
    /// Unlisted casts do not exist for members. A cast outside the member's
    /// tier is forbidden.
    async fn visible_cast(&self, viewer: &Viewer, cast_id: Uuid) -> BookingResult<Cast> {
        let cast = self
            .store
            .get_cast(cast_id)
            .await?
            .ok_or_else(|| BookingError::not_found("cast", cast_id))?;

        if matches!(viewer, Viewer::Member(_)) && !self.is_listed(&cast).await? {
            return Err(BookingError::not_found("cast", cast_id));
        }
        if !viewer.can_view(cast.tier_classification) {
            return Err(BookingError::forbidden(format!(
                "{} casts are not available at this membership tier",
                cast.tier_classification.display_name()
            )));
        }
        Ok(cast)
    }

    /// Publish after a committed change. Failures are logged, never returned.
    async fn publish(&self, ctx: &RequestContext, event: Event) {
        let mut event = event.with_actor(ctx.user_id());
        if let Some(correlation_id) = &ctx.correlation_id {
            event = event.with_correlation_id(correlation_id.clone());
        }
        let topic = event.event_type.clone();

        if let Err(e) = self.events.publish(event).await {
            warn!(topic = %topic, error = %e, "Failed to publish event");
        }
    }
}
