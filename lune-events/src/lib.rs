//! # Lune Events
//!
//! This crate provides the domain events of the Lune platform and an event
//! bus to deliver them, so notification and audit consumers can react to
//! bookings without coupling to the booking core.
//!
//! ## Overview
//!
//! The lune-events crate handles:
//! - **Event Types**: Strongly-typed meeting, bookmark and account events
//! - **Event Bus**: Publish/subscribe messaging
//! - **Event Handlers**: Async event processing
//!
//! ## Features
//!
//! - `memory` (default): In-memory event bus for single-process deployments
//!
//! ## Usage
//!
//! ### Publishing Events
//!
//! ```rust,no_run
//! use lune_events::{EventBus, MeetingEvent, MemoryEventBus};
//! use uuid::Uuid;
//!
//! async fn publish_example() {
//!     let bus = MemoryEventBus::new();
//!
//!     let event = MeetingEvent::Requested {
//!         request_id: Uuid::now_v7(),
//!         member_id: Uuid::now_v7(),
//!         cast_id: Uuid::now_v7(),
//!     };
//!
//!     bus.publish(event.to_event()).await.unwrap();
//! }
//! ```
//!
//! ### Subscribing to Events
//!
//! ```rust,no_run
//! use lune_events::{EventBus, MemoryEventBus};
//!
//! async fn subscribe_example() {
//!     let bus = MemoryEventBus::new();
//!
//!     // All meeting lifecycle events
//!     let mut sub = bus.subscribe("meeting.*").await.unwrap();
//!
//!     while let Ok(event) = sub.recv().await {
//!         println!("Received: {}", event.event_type);
//!     }
//! }
//! ```
//!
//! ## Topic Patterns
//!
//! Topics are structured as `{category}.{event}`:
//! - `meeting.confirmed` - Specific event
//! - `meeting.*` - All meeting events
//! - `#` - All events
//!
//! Wildcards:
//! - `*` matches exactly one segment
//! - `#` matches zero or more segments

pub mod bus;
pub mod types;

// Re-export main types
pub use bus::{
    EventBus, EventBusError, EventBusResult, EventBusStats, EventHandler, MemoryEventBus,
    Subscription,
};
pub use types::{AccountEvent, BookmarkEvent, Event, EventCategory, MeetingEvent};
