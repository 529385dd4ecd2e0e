//! Cast browsing, bookmarks and cast self-service.

use lune_access::{Capability, Viewer};
use lune_events::BookmarkEvent;
use lune_profiles::{BookmarkToggle, Cast, CastSummary, RequestContext};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::BookingService;
use crate::error::{BookingError, BookingResult};
use crate::filter::{sort_for_listing, CastFilter, Page};
use crate::profile::CastProfileUpdate;
use crate::store::BookingStore;

/// A cast profile as shown on its detail page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastDetail {
    /// The profile
    pub cast: Cast,

    /// Whether the viewing member has bookmarked it; always false for admins
    pub is_bookmarked: bool,
}

impl<S: BookingStore> BookingService<S> {
    /// List the casts the caller may see, filtered and paginated.
    #[instrument(skip(self, ctx, filter), fields(user_id = %ctx.user_id()))]
    pub async fn browse_casts(
        &self,
        ctx: &RequestContext,
        filter: CastFilter,
    ) -> BookingResult<Page<CastSummary>> {
        self.require(ctx, Capability::BrowseCasts)?;
        let (viewer, _) = self.viewer(ctx).await?;
        let is_member = matches!(viewer, Viewer::Member(_));

        let mut casts = Vec::new();
        for cast in self.store.list_casts().await? {
            if !viewer.can_view(cast.tier_classification) || !filter.matches(&cast) {
                continue;
            }
            if is_member && !self.is_listed(&cast).await? {
                continue;
            }
            casts.push(cast);
        }
        sort_for_listing(&mut casts);

        let page_size = self.config.page_size(filter.page_size);
        let page = Page::paginate(casts, filter.page.unwrap_or(1), page_size);
        debug!(total = page.total, page = page.page, "Browsed casts");
        Ok(page.map(|c| c.summary()))
    }

    /// Fetch one cast, gated by the same policy as the listing.
    #[instrument(skip(self, ctx), fields(user_id = %ctx.user_id()))]
    pub async fn get_cast(&self, ctx: &RequestContext, cast_id: Uuid) -> BookingResult<CastDetail> {
        self.require(ctx, Capability::ViewCast)?;
        let (viewer, member) = self.viewer(ctx).await?;
        let cast = self.visible_cast(&viewer, cast_id).await?;

        let is_bookmarked = match member {
            Some(member) => self.store.is_bookmarked(member.id, cast.id).await?,
            None => false,
        };
        Ok(CastDetail {
            cast,
            is_bookmarked,
        })
    }

    /// Add or remove a bookmark. The cast must be visible to the member.
    #[instrument(skip(self, ctx), fields(user_id = %ctx.user_id()))]
    pub async fn toggle_bookmark(
        &self,
        ctx: &RequestContext,
        cast_id: Uuid,
    ) -> BookingResult<BookmarkToggle> {
        self.require(ctx, Capability::ToggleBookmark)?;
        let member = self.active_member(ctx).await?;
        let cast = self
            .visible_cast(&Viewer::Member(member.tier), cast_id)
            .await?;

        let outcome = self.store.toggle_bookmark(member.id, cast.id).await?;
        info!(member_id = %member.id, cast_id = %cast.id, outcome = ?outcome, "Bookmark toggled");

        let event = match outcome {
            BookmarkToggle::Added => BookmarkEvent::Added {
                member_id: member.id,
                cast_id: cast.id,
            },
            BookmarkToggle::Removed => BookmarkEvent::Removed {
                member_id: member.id,
                cast_id: cast.id,
            },
        };
        self.publish(ctx, event.to_event()).await;
        Ok(outcome)
    }

    /// Bookmarked casts that are still visible to the member, newest bookmark first.
    #[instrument(skip(self, ctx), fields(user_id = %ctx.user_id()))]
    pub async fn list_bookmarks(&self, ctx: &RequestContext) -> BookingResult<Vec<CastSummary>> {
        self.require(ctx, Capability::ToggleBookmark)?;
        let member = self.active_member(ctx).await?;
        let viewer = Viewer::Member(member.tier);

        let mut summaries = Vec::new();
        for bookmark in self.store.list_bookmarks(member.id).await? {
            let Some(cast) = self.store.get_cast(bookmark.cast_id).await? else {
                continue;
            };
            if viewer.can_view(cast.tier_classification) && self.is_listed(&cast).await? {
                summaries.push(cast.summary());
            }
        }
        Ok(summaries)
    }

    /// The caller's own cast profile.
    #[instrument(skip(self, ctx), fields(user_id = %ctx.user_id()))]
    pub async fn my_cast_profile(&self, ctx: &RequestContext) -> BookingResult<Cast> {
        self.require(ctx, Capability::EditOwnCastProfile)?;
        self.own_cast(ctx).await
    }

    /// Edit the caller's own cast profile.
    #[instrument(skip(self, ctx, update), fields(user_id = %ctx.user_id()))]
    pub async fn update_cast_profile(
        &self,
        ctx: &RequestContext,
        update: CastProfileUpdate,
    ) -> BookingResult<Cast> {
        self.require(ctx, Capability::EditOwnCastProfile)?;
        update.validate()?;
        let own = self.own_cast(ctx).await?;

        let cast = self.store.update_cast_profile(own.id, update).await?;
        info!(cast_id = %cast.id, "Cast profile updated");
        Ok(cast)
    }

    async fn own_cast(&self, ctx: &RequestContext) -> BookingResult<Cast> {
        self.store
            .get_cast_by_user(ctx.user_id())
            .await?
            .ok_or_else(|| BookingError::not_found("cast", ctx.user_id()))
    }
}
