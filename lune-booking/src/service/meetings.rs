//! Meeting request creation and admin coordination.

use lune_access::{Capability, Viewer};
use lune_events::MeetingEvent;
use lune_profiles::RequestContext;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::BookingService;
use crate::error::{BookingError, BookingResult};
use crate::meeting::{ConfirmDetails, MeetingAction, MeetingRequest, MeetingStatus};
use crate::store::BookingStore;

/// Status changes are monotone, so a request can be overtaken at most this
/// many times before it reaches a terminal state.
const MAX_TRANSITION_ATTEMPTS: usize = 4;

impl<S: BookingStore> BookingService<S> {
    /// Ask to meet a cast. The cast must be visible to the member.
    #[instrument(skip(self, ctx, note), fields(user_id = %ctx.user_id()))]
    pub async fn create_meeting_request(
        &self,
        ctx: &RequestContext,
        cast_id: Uuid,
        note: Option<String>,
    ) -> BookingResult<MeetingRequest> {
        self.require(ctx, Capability::RequestMeeting)?;
        let member = self.active_member(ctx).await?;
        let cast = self
            .visible_cast(&Viewer::Member(member.tier), cast_id)
            .await?;

        let mut request = MeetingRequest::new(member.id, cast.id);
        if let Some(note) = note {
            request = request.with_member_note(note);
        }

        let limit = self.config.max_pending_requests;
        if !self.store.insert_meeting(request.clone(), limit).await? {
            debug!(member_id = %member.id, limit, "Pending request limit reached");
            return Err(BookingError::validation(format!(
                "at most {limit} pending meeting requests are allowed"
            )));
        }

        info!(
            request_id = %request.id,
            member_id = %member.id,
            cast_id = %cast.id,
            "Meeting requested"
        );
        self.publish(
            ctx,
            MeetingEvent::Requested {
                request_id: request.id,
                member_id: member.id,
                cast_id: cast.id,
            }
            .to_event(),
        )
        .await;
        Ok(request)
    }

    /// The caller's own requests, newest first.
    #[instrument(skip(self, ctx), fields(user_id = %ctx.user_id()))]
    pub async fn list_my_requests(&self, ctx: &RequestContext) -> BookingResult<Vec<MeetingRequest>> {
        self.require(ctx, Capability::ViewOwnRequests)?;
        let member = self.active_member(ctx).await?;
        self.store.list_meetings(Some(member.id)).await
    }

    /// All requests for admins, optionally filtered by status.
    #[instrument(skip(self, ctx), fields(user_id = %ctx.user_id()))]
    pub async fn list_meeting_requests(
        &self,
        ctx: &RequestContext,
        status: Option<MeetingStatus>,
    ) -> BookingResult<Vec<MeetingRequest>> {
        self.require(ctx, Capability::CoordinateMeetings)?;
        let mut requests = self.store.list_meetings(None).await?;
        if let Some(status) = status {
            requests.retain(|r| r.status == status);
        }
        Ok(requests)
    }

    /// One request. Members only see their own; anyone else's reads as missing.
    #[instrument(skip(self, ctx), fields(user_id = %ctx.user_id()))]
    pub async fn get_meeting_request(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
    ) -> BookingResult<MeetingRequest> {
        let owner = if ctx.actor.is_admin() {
            self.require(ctx, Capability::CoordinateMeetings)?;
            None
        } else {
            self.require(ctx, Capability::ViewOwnRequests)?;
            Some(self.active_member(ctx).await?)
        };

        let request = self
            .store
            .get_meeting(request_id)
            .await?
            .ok_or_else(|| BookingError::not_found("meeting_request", request_id))?;
        match owner {
            Some(member) if request.member_id != member.id => {
                Err(BookingError::not_found("meeting_request", request_id))
            }
            _ => Ok(request),
        }
    }

    /// Pending → Confirmed with a date and venue.
    #[instrument(skip(self, ctx, details), fields(user_id = %ctx.user_id()))]
    pub async fn confirm_meeting(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
        details: ConfirmDetails,
    ) -> BookingResult<MeetingRequest> {
        let (_, confirmed) = self
            .transition(ctx, request_id, MeetingAction::Confirm, |current| {
                current.confirm(details.clone())
            })
            .await?;

        if let (Some(scheduled_date), Some(location)) =
            (confirmed.scheduled_date, confirmed.lune_location.clone())
        {
            self.publish(
                ctx,
                MeetingEvent::Confirmed {
                    request_id: confirmed.id,
                    member_id: confirmed.member_id,
                    cast_id: confirmed.cast_id,
                    scheduled_date,
                    location,
                }
                .to_event(),
            )
            .await;
        }
        Ok(confirmed)
    }

    /// Pending or Confirmed → Cancelled.
    #[instrument(skip(self, ctx, admin_notes), fields(user_id = %ctx.user_id()))]
    pub async fn cancel_meeting(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
        admin_notes: Option<String>,
    ) -> BookingResult<MeetingRequest> {
        let (previous, cancelled) = self
            .transition(ctx, request_id, MeetingAction::Cancel, |current| {
                current.cancel(admin_notes.clone())
            })
            .await?;

        self.publish(
            ctx,
            MeetingEvent::Cancelled {
                request_id: cancelled.id,
                member_id: cancelled.member_id,
                cast_id: cancelled.cast_id,
                was_confirmed: previous == MeetingStatus::Confirmed,
            }
            .to_event(),
        )
        .await;
        Ok(cancelled)
    }

    /// Confirmed → Completed.
    #[instrument(skip(self, ctx, admin_notes), fields(user_id = %ctx.user_id()))]
    pub async fn complete_meeting(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
        admin_notes: Option<String>,
    ) -> BookingResult<MeetingRequest> {
        let (_, completed) = self
            .transition(ctx, request_id, MeetingAction::Complete, |current| {
                current.complete(admin_notes.clone())
            })
            .await?;

        self.publish(
            ctx,
            MeetingEvent::Completed {
                request_id: completed.id,
                member_id: completed.member_id,
                cast_id: completed.cast_id,
            }
            .to_event(),
        )
        .await;
        Ok(completed)
    }

    /// Read, apply and compare-and-swap on status.
    ///
    /// When another admin changes the status first, the action is re-applied
    /// to the fresh record, so it either succeeds against the new state or
    /// fails with `InvalidTransition` from it. Returns the status the action
    /// was applied to and the stored result.
    async fn transition<F>(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
        action: MeetingAction,
        apply: F,
    ) -> BookingResult<(MeetingStatus, MeetingRequest)>
    where
        F: Fn(&MeetingRequest) -> BookingResult<MeetingRequest> + Send + Sync,
    {
        self.require(ctx, Capability::CoordinateMeetings)?;

        for attempt in 1..=MAX_TRANSITION_ATTEMPTS {
            let current = self
                .store
                .get_meeting(request_id)
                .await?
                .ok_or_else(|| BookingError::not_found("meeting_request", request_id))?;

            let next = match apply(&current) {
                Ok(next) => next,
                Err(e) => {
                    debug!(
                        request_id = %request_id,
                        status = %current.status,
                        action = %action,
                        error = %e,
                        "Meeting transition rejected"
                    );
                    return Err(e);
                }
            };

            if self
                .store
                .compare_and_set_meeting(current.status, next.clone())
                .await?
            {
                info!(
                    request_id = %request_id,
                    from = %current.status,
                    to = %next.status,
                    "Meeting request updated"
                );
                return Ok((current.status, next));
            }

            debug!(
                request_id = %request_id,
                attempt,
                "Meeting request changed concurrently, retrying"
            );
        }

        warn!(request_id = %request_id, action = %action, "Meeting transition kept conflicting");
        Err(BookingError::Storage(format!(
            "meeting request {request_id} kept changing during {action}"
        )))
    }
}
