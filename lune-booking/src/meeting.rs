//! Meeting request lifecycle
//!
//! A meeting request moves through a small state machine coordinated by
//! admins:
//!
//! ```text
//! Pending ──confirm──→ Confirmed ──complete──→ Completed
//!    │                     │
//!    └──cancel──→ Cancelled ←──cancel──┘
//! ```
//!
//! Transitions here are pure: they take the current record and return the
//! next one. Persisting the result atomically against the stored status is the
//! store's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{BookingError, BookingResult};

/// Status of a meeting request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MeetingStatus {
    /// Awaiting admin coordination
    Pending,

    /// Scheduled by an admin
    Confirmed,

    /// Withdrawn; terminal
    Cancelled,

    /// Took place; terminal
    Completed,
}

impl MeetingStatus {
    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingStatus::Pending => "pending",
            MeetingStatus::Confirmed => "confirmed",
            MeetingStatus::Cancelled => "cancelled",
            MeetingStatus::Completed => "completed",
        }
    }

    /// Parse status from string representation (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(MeetingStatus::Pending),
            "confirmed" => Some(MeetingStatus::Confirmed),
            "cancelled" | "canceled" => Some(MeetingStatus::Cancelled),
            "completed" => Some(MeetingStatus::Completed),
            _ => None,
        }
    }

    /// Check if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, MeetingStatus::Cancelled | MeetingStatus::Completed)
    }

    /// Check if the request still awaits an outcome.
    pub fn is_open(&self) -> bool {
        !self.is_terminal()
    }

    /// The status reached by applying `action`, if the action is legal here.
    ///
    /// # Example
    ///
    /// ```
    /// use lune_booking::{MeetingAction, MeetingStatus};
    ///
    /// assert_eq!(
    ///     MeetingStatus::Pending.next(MeetingAction::Confirm),
    ///     Some(MeetingStatus::Confirmed)
    /// );
    /// assert_eq!(MeetingStatus::Pending.next(MeetingAction::Complete), None);
    /// ```
    pub fn next(&self, action: MeetingAction) -> Option<MeetingStatus> {
        match (self, action) {
            (MeetingStatus::Pending, MeetingAction::Confirm) => Some(MeetingStatus::Confirmed),
            (MeetingStatus::Pending | MeetingStatus::Confirmed, MeetingAction::Cancel) => {
                Some(MeetingStatus::Cancelled)
            }
            (MeetingStatus::Confirmed, MeetingAction::Complete) => Some(MeetingStatus::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for MeetingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Admin action on a meeting request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MeetingAction {
    /// Schedule the meeting
    Confirm,

    /// Withdraw the request
    Cancel,

    /// Record that the meeting took place
    Complete,
}

impl MeetingAction {
    /// Get string representation of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingAction::Confirm => "confirm",
            MeetingAction::Cancel => "cancel",
            MeetingAction::Complete => "complete",
        }
    }
}

impl std::fmt::Display for MeetingAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Details an admin supplies when confirming a request.
///
/// Both the date and the location are mandatory; they are optional here so
/// that a form submission with missing fields surfaces as a validation error
/// instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfirmDetails {
    /// When the meeting takes place
    pub scheduled_date: Option<DateTime<Utc>>,

    /// Lune venue where the meeting takes place
    pub lune_location: Option<String>,

    /// Internal notes
    pub admin_notes: Option<String>,
}

impl ConfirmDetails {
    /// Details with the mandatory fields set.
    pub fn new(scheduled_date: DateTime<Utc>, lune_location: impl Into<String>) -> Self {
        Self {
            scheduled_date: Some(scheduled_date),
            lune_location: Some(lune_location.into()),
            admin_notes: None,
        }
    }

    /// Attach admin notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.admin_notes = Some(notes.into());
        self
    }

    fn validated(self) -> BookingResult<(DateTime<Utc>, String, Option<String>)> {
        let scheduled_date = self
            .scheduled_date
            .ok_or_else(|| BookingError::validation("scheduled_date is required"))?;
        let location = self
            .lune_location
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .ok_or_else(|| BookingError::validation("lune_location is required"))?;
        Ok((scheduled_date, location, normalize_notes(self.admin_notes)))
    }
}

fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}

/// A member's request to meet a cast.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use uuid::Uuid;
/// use lune_booking::{ConfirmDetails, MeetingRequest, MeetingStatus};
///
/// let request = MeetingRequest::new(Uuid::now_v7(), Uuid::now_v7());
/// assert_eq!(request.status, MeetingStatus::Pending);
///
/// let confirmed = request
///     .confirm(ConfirmDetails::new(Utc::now() + Duration::days(2), "Lune Ginza"))
///     .unwrap();
/// assert_eq!(confirmed.status, MeetingStatus::Confirmed);
/// assert_eq!(confirmed.lune_location.as_deref(), Some("Lune Ginza"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeetingRequest {
    /// Unique request ID
    pub id: Uuid,

    /// Requesting member
    pub member_id: Uuid,

    /// Requested cast
    pub cast_id: Uuid,

    /// Current status
    pub status: MeetingStatus,

    /// When the member made the request
    pub requested_at: DateTime<Utc>,

    /// Scheduled date, set on confirmation
    pub scheduled_date: Option<DateTime<Utc>>,

    /// Venue, set on confirmation
    pub lune_location: Option<String>,

    /// Internal admin notes
    pub admin_notes: Option<String>,

    /// Note the member attached to the request
    pub member_note: Option<String>,

    /// When the record last changed
    pub updated_at: DateTime<Utc>,
}

impl MeetingRequest {
    /// Creates a new pending request.
    pub fn new(member_id: Uuid, cast_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            member_id,
            cast_id,
            status: MeetingStatus::Pending,
            requested_at: now,
            scheduled_date: None,
            lune_location: None,
            admin_notes: None,
            member_note: None,
            updated_at: now,
        }
    }

    /// Attach a note from the member.
    pub fn with_member_note(mut self, note: impl Into<String>) -> Self {
        self.member_note = normalize_notes(Some(note.into()));
        self
    }

    fn transition(&self, action: MeetingAction) -> BookingResult<MeetingRequest> {
        let status = self
            .status
            .next(action)
            .ok_or(BookingError::InvalidTransition {
                from: self.status,
                action,
            })?;

        let mut next = self.clone();
        next.status = status;
        next.updated_at = Utc::now();
        Ok(next)
    }

    /// Pending → Confirmed with a date and venue.
    pub fn confirm(&self, details: ConfirmDetails) -> BookingResult<MeetingRequest> {
        let mut next = self.transition(MeetingAction::Confirm)?;
        let (scheduled_date, location, notes) = details.validated()?;

        next.scheduled_date = Some(scheduled_date);
        next.lune_location = Some(location);
        if notes.is_some() {
            next.admin_notes = notes;
        }
        Ok(next)
    }

    /// Pending or Confirmed → Cancelled.
    ///
    /// A request cancelled after confirmation keeps its schedule for the record.
    pub fn cancel(&self, admin_notes: Option<String>) -> BookingResult<MeetingRequest> {
        let mut next = self.transition(MeetingAction::Cancel)?;
        if let Some(notes) = normalize_notes(admin_notes) {
            next.admin_notes = Some(notes);
        }
        Ok(next)
    }

    /// Confirmed → Completed.
    pub fn complete(&self, admin_notes: Option<String>) -> BookingResult<MeetingRequest> {
        let mut next = self.transition(MeetingAction::Complete)?;
        if let Some(notes) = normalize_notes(admin_notes) {
            next.admin_notes = Some(notes);
        }
        Ok(next)
    }

    /// Check that the schedule fields agree with the status.
    ///
    /// Pending requests have no schedule, Confirmed and Completed requests
    /// always have one, and Cancelled requests may have either.
    pub fn schedule_consistent(&self) -> bool {
        let scheduled = self.scheduled_date.is_some() && self.lune_location.is_some();
        let unscheduled = self.scheduled_date.is_none() && self.lune_location.is_none();
        match self.status {
            MeetingStatus::Pending => unscheduled,
            MeetingStatus::Confirmed | MeetingStatus::Completed => scheduled,
            MeetingStatus::Cancelled => scheduled || unscheduled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn pending() -> MeetingRequest {
        MeetingRequest::new(Uuid::now_v7(), Uuid::now_v7())
    }

    fn details() -> ConfirmDetails {
        ConfirmDetails::new(Utc::now() + Duration::days(3), "Lune Roppongi")
    }

    fn confirmed() -> MeetingRequest {
        pending().confirm(details()).unwrap()
    }

    fn assert_invalid(result: BookingResult<MeetingRequest>, from: MeetingStatus) {
        match result {
            Err(BookingError::InvalidTransition { from: actual, .. }) => assert_eq!(actual, from),
            other => panic!("expected InvalidTransition, got {other:?}"),
        }
    }

    #[test]
    fn test_new_request_is_pending_and_unscheduled() {
        let request = pending();
        assert_eq!(request.status, MeetingStatus::Pending);
        assert!(request.scheduled_date.is_none());
        assert!(request.lune_location.is_none());
        assert!(request.admin_notes.is_none());
        assert!(request.schedule_consistent());
    }

    #[test]
    fn test_confirm_sets_schedule() {
        let when = Utc::now() + Duration::days(1);
        let request = pending()
            .confirm(ConfirmDetails::new(when, "  Lune Ginza ").with_notes("VIP room"))
            .unwrap();

        assert_eq!(request.status, MeetingStatus::Confirmed);
        assert_eq!(request.scheduled_date, Some(when));
        assert_eq!(request.lune_location.as_deref(), Some("Lune Ginza"));
        assert_eq!(request.admin_notes.as_deref(), Some("VIP room"));
        assert!(request.schedule_consistent());
    }

    #[test]
    fn test_confirm_requires_date_and_location() {
        let missing_date = ConfirmDetails {
            scheduled_date: None,
            lune_location: Some("Lune Ginza".into()),
            admin_notes: None,
        };
        assert!(matches!(
            pending().confirm(missing_date),
            Err(BookingError::Validation(_))
        ));

        let blank_location = ConfirmDetails {
            scheduled_date: Some(Utc::now()),
            lune_location: Some("   ".into()),
            admin_notes: None,
        };
        assert!(matches!(
            pending().confirm(blank_location),
            Err(BookingError::Validation(_))
        ));
    }

    #[test]
    fn test_confirm_rejected_outside_pending() {
        let confirmed = confirmed();
        assert_invalid(confirmed.confirm(details()), MeetingStatus::Confirmed);

        let cancelled = pending().cancel(None).unwrap();
        assert_invalid(cancelled.confirm(details()), MeetingStatus::Cancelled);

        let completed = confirmed.complete(None).unwrap();
        assert_invalid(completed.confirm(details()), MeetingStatus::Completed);
    }

    #[test]
    fn test_complete_only_from_confirmed() {
        let completed = confirmed().complete(Some("went well".into())).unwrap();
        assert_eq!(completed.status, MeetingStatus::Completed);
        assert!(completed.schedule_consistent());

        assert_invalid(pending().complete(None), MeetingStatus::Pending);
        let cancelled = pending().cancel(None).unwrap();
        assert_invalid(cancelled.complete(None), MeetingStatus::Cancelled);
    }

    #[test]
    fn test_cancel_from_open_states() {
        let from_pending = pending().cancel(None).unwrap();
        assert_eq!(from_pending.status, MeetingStatus::Cancelled);
        assert!(from_pending.scheduled_date.is_none());

        let from_confirmed = confirmed().cancel(Some("member unwell".into())).unwrap();
        assert_eq!(from_confirmed.status, MeetingStatus::Cancelled);
        assert!(from_confirmed.scheduled_date.is_some());
        assert_eq!(from_confirmed.admin_notes.as_deref(), Some("member unwell"));
        assert!(from_confirmed.schedule_consistent());
    }

    #[test]
    fn test_terminal_states_reject_cancel() {
        let cancelled = pending().cancel(None).unwrap();
        assert_invalid(cancelled.cancel(None), MeetingStatus::Cancelled);

        let completed = confirmed().complete(None).unwrap();
        assert_invalid(completed.cancel(None), MeetingStatus::Completed);
    }

    #[test]
    fn test_transition_table() {
        use MeetingAction::*;
        use MeetingStatus::*;

        let table = [
            (Pending, Confirm, Some(Confirmed)),
            (Pending, Cancel, Some(Cancelled)),
            (Pending, Complete, None),
            (Confirmed, Confirm, None),
            (Confirmed, Cancel, Some(Cancelled)),
            (Confirmed, Complete, Some(Completed)),
            (Cancelled, Confirm, None),
            (Cancelled, Cancel, None),
            (Cancelled, Complete, None),
            (Completed, Confirm, None),
            (Completed, Cancel, None),
            (Completed, Complete, None),
        ];
        for (from, action, expected) in table {
            assert_eq!(from.next(action), expected, "{from} --{action}-->");
        }
    }

    #[test]
    fn test_transition_does_not_mutate_source() {
        let request = pending();
        let _ = request.confirm(details()).unwrap();
        assert_eq!(request.status, MeetingStatus::Pending);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(MeetingStatus::parse("PENDING"), Some(MeetingStatus::Pending));
        assert_eq!(MeetingStatus::parse("canceled"), Some(MeetingStatus::Cancelled));
        assert_eq!(MeetingStatus::parse("archived"), None);
        assert!(MeetingStatus::Completed.is_terminal());
        assert!(MeetingStatus::Confirmed.is_open());
    }

    #[test]
    fn test_member_note_blank_is_dropped() {
        let request = pending().with_member_note("   ");
        assert!(request.member_note.is_none());
    }
}
