//! Event types published by the Lune platform
//!
//! Every domain event converts into the generic [`Event`] envelope whose
//! `event_type` doubles as the routing topic (e.g. `meeting.confirmed`).

use chrono::{DateTime, Utc};
use lune_profiles::{CastTier, MemberTier, Role};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Event envelope.
///
/// All events are wrapped in this envelope which provides metadata
/// for routing, tracing, and processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Unique event ID
    pub id: Uuid,

    /// Event type, also the topic (e.g., "meeting.confirmed")
    pub event_type: String,

    /// Timestamp when event was created
    pub timestamp: DateTime<Utc>,

    /// User who triggered the event
    pub actor_id: Option<Uuid>,

    /// Correlation ID for tracing
    pub correlation_id: Option<String>,

    /// Event version for schema evolution
    pub version: u32,

    /// Event payload
    pub payload: serde_json::Value,

    /// Additional metadata
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Event {
    /// Create a new event.
    ///
    /// # Arguments
    ///
    /// * `event_type` - The event type string
    /// * `payload` - The event payload
    pub fn new(event_type: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            id: Uuid::now_v7(),
            event_type: event_type.into(),
            timestamp: Utc::now(),
            actor_id: None,
            correlation_id: None,
            version: 1,
            payload,
            metadata: HashMap::new(),
        }
    }

    /// Set the acting user.
    pub fn with_actor(mut self, actor_id: Uuid) -> Self {
        self.actor_id = Some(actor_id);
        self
    }

    /// Set correlation ID.
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }

    /// Add metadata.
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Get the topic for this event.
    pub fn topic(&self) -> &str {
        &self.event_type
    }

    /// Parse the payload into a specific type.
    pub fn parse_payload<T: for<'de> Deserialize<'de>>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.payload.clone())
    }
}

/// Event categories for filtering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    /// Meeting request lifecycle
    Meeting,
    /// Bookmark changes
    Bookmark,
    /// Account and profile administration
    Account,
}

impl EventCategory {
    /// Parse from event type string.
    pub fn from_event_type(event_type: &str) -> Option<Self> {
        let prefix = event_type.split('.').next()?;
        match prefix {
            "meeting" => Some(EventCategory::Meeting),
            "bookmark" => Some(EventCategory::Bookmark),
            "account" => Some(EventCategory::Account),
            _ => None,
        }
    }
}

fn envelope<T: Serialize>(event_type: &str, event: &T) -> Event {
    Event::new(event_type, serde_json::to_value(event).unwrap_or_default())
}

// ============================================================================
// Meeting Events
// ============================================================================

/// Meeting request lifecycle events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MeetingEvent {
    /// A member asked for a meeting
    Requested {
        request_id: Uuid,
        member_id: Uuid,
        cast_id: Uuid,
    },
    /// An admin scheduled the meeting
    Confirmed {
        request_id: Uuid,
        member_id: Uuid,
        cast_id: Uuid,
        scheduled_date: DateTime<Utc>,
        location: String,
    },
    /// The request was cancelled
    Cancelled {
        request_id: Uuid,
        member_id: Uuid,
        cast_id: Uuid,
        was_confirmed: bool,
    },
    /// The meeting took place
    Completed {
        request_id: Uuid,
        member_id: Uuid,
        cast_id: Uuid,
    },
}

impl MeetingEvent {
    /// Convert to generic event.
    pub fn to_event(&self) -> Event {
        let event_type = match self {
            MeetingEvent::Requested { .. } => "meeting.requested",
            MeetingEvent::Confirmed { .. } => "meeting.confirmed",
            MeetingEvent::Cancelled { .. } => "meeting.cancelled",
            MeetingEvent::Completed { .. } => "meeting.completed",
        };
        envelope(event_type, self)
    }

    /// The meeting request this event concerns.
    pub fn request_id(&self) -> Uuid {
        match self {
            MeetingEvent::Requested { request_id, .. }
            | MeetingEvent::Confirmed { request_id, .. }
            | MeetingEvent::Cancelled { request_id, .. }
            | MeetingEvent::Completed { request_id, .. } => *request_id,
        }
    }
}

// ============================================================================
// Bookmark Events
// ============================================================================

/// Bookmark events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BookmarkEvent {
    /// Bookmark added
    Added { member_id: Uuid, cast_id: Uuid },
    /// Bookmark removed
    Removed { member_id: Uuid, cast_id: Uuid },
}

impl BookmarkEvent {
    /// Convert to generic event.
    pub fn to_event(&self) -> Event {
        let event_type = match self {
            BookmarkEvent::Added { .. } => "bookmark.added",
            BookmarkEvent::Removed { .. } => "bookmark.removed",
        };
        envelope(event_type, self)
    }
}

// ============================================================================
// Account Events
// ============================================================================

/// Account and profile administration events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccountEvent {
    /// A user registered
    Registered { user_id: Uuid, role: Role },
    /// An admin approved a user
    Approved { user_id: Uuid },
    /// An admin rejected a user
    Rejected { user_id: Uuid },
    /// A profile was activated
    Activated { user_id: Uuid },
    /// A profile was deactivated
    Deactivated { user_id: Uuid },
    /// A member's tier changed
    MemberTierChanged {
        member_id: Uuid,
        from: MemberTier,
        to: MemberTier,
    },
    /// A member's payment status changed
    MemberPaymentMarked { member_id: Uuid, is_paid: bool },
    /// A cast's classification changed
    CastTierChanged {
        cast_id: Uuid,
        from: CastTier,
        to: CastTier,
    },
    /// A cast was featured or unfeatured
    CastFeatured { cast_id: Uuid, is_featured: bool },
}

impl AccountEvent {
    /// Convert to generic event.
    pub fn to_event(&self) -> Event {
        let event_type = match self {
            AccountEvent::Registered { .. } => "account.registered",
            AccountEvent::Approved { .. } => "account.approved",
            AccountEvent::Rejected { .. } => "account.rejected",
            AccountEvent::Activated { .. } => "account.activated",
            AccountEvent::Deactivated { .. } => "account.deactivated",
            AccountEvent::MemberTierChanged { .. } => "account.member_tier_changed",
            AccountEvent::MemberPaymentMarked { .. } => "account.member_payment_marked",
            AccountEvent::CastTierChanged { .. } => "account.cast_tier_changed",
            AccountEvent::CastFeatured { .. } => "account.cast_featured",
        };
        envelope(event_type, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_creation() {
        let payload = serde_json::json!({"key": "value"});
        let actor = Uuid::now_v7();
        let event = Event::new("meeting.requested", payload)
            .with_actor(actor)
            .with_correlation_id("req-1");

        assert_eq!(event.event_type, "meeting.requested");
        assert_eq!(event.topic(), "meeting.requested");
        assert_eq!(event.actor_id, Some(actor));
        assert_eq!(event.version, 1);
    }

    #[test]
    fn test_meeting_event() {
        let request_id = Uuid::now_v7();
        let meeting_event = MeetingEvent::Confirmed {
            request_id,
            member_id: Uuid::now_v7(),
            cast_id: Uuid::now_v7(),
            scheduled_date: Utc::now(),
            location: "Lune Ginza".to_string(),
        };
        let event = meeting_event.to_event();

        assert_eq!(event.event_type, "meeting.confirmed");
        assert_eq!(event.payload["type"], "confirmed");
        assert_eq!(meeting_event.request_id(), request_id);
    }

    #[test]
    fn test_payload_round_trip() {
        let original = BookmarkEvent::Added {
            member_id: Uuid::now_v7(),
            cast_id: Uuid::now_v7(),
        };
        let event = original.to_event();
        let parsed: BookmarkEvent = event.parse_payload().unwrap();

        match (original, parsed) {
            (
                BookmarkEvent::Added { cast_id: a, .. },
                BookmarkEvent::Added { cast_id: b, .. },
            ) => assert_eq!(a, b),
            _ => panic!("unexpected variant"),
        }
    }

    #[test]
    fn test_account_event() {
        let event = AccountEvent::MemberTierChanged {
            member_id: Uuid::now_v7(),
            from: MemberTier::Standard,
            to: MemberTier::Gold,
        }
        .to_event();

        assert_eq!(event.event_type, "account.member_tier_changed");
        assert_eq!(event.payload["to"], "gold");
    }

    #[test]
    fn test_event_category() {
        assert_eq!(
            EventCategory::from_event_type("meeting.confirmed"),
            Some(EventCategory::Meeting)
        );
        assert_eq!(
            EventCategory::from_event_type("bookmark.added"),
            Some(EventCategory::Bookmark)
        );
        assert_eq!(
            EventCategory::from_event_type("account.approved"),
            Some(EventCategory::Account)
        );
        assert_eq!(EventCategory::from_event_type("billing.invoice"), None);
    }
}
