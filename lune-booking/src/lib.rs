//! # Lune Booking
//!
//! Booking core of the Lune platform: tier-gated cast browsing, member
//! bookmarks and the admin-coordinated meeting request lifecycle.
//!
//! ## Overview
//!
//! The lune-booking crate handles:
//! - **Meeting Requests**: The Pending → Confirmed → Completed lifecycle, with
//!   cancellation from either open state
//! - **Browsing**: Filtered, paginated cast listings that honour the tier policy
//! - **Bookmarks**: Per-member toggles on visible casts
//! - **Account Administration**: Verification, activation, tiers and payment
//!
//! Storage is abstracted behind [`BookingStore`]; [`MemoryStore`] is the
//! in-process implementation. Domain events go to any
//! [`lune_events::EventBus`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lune_booking::{BookingConfig, BookingService, CastFilter};
//! use lune_profiles::{RequestContext, Role};
//! use uuid::Uuid;
//!
//! async fn browse_example(user_id: Uuid) {
//!     let service = BookingService::in_memory(BookingConfig::from_env());
//!     let ctx = RequestContext::new(user_id, Role::Member);
//!
//!     let page = service
//!         .browse_casts(&ctx, CastFilter::new().featured())
//!         .await
//!         .unwrap();
//!     for cast in page.items {
//!         println!("{}", cast.display_name);
//!     }
//! }
//! ```
//!
//! ## Concurrency
//!
//! Admin transitions are applied with a compare-and-swap on the stored
//! status. Two admins confirming the same request at once produce exactly
//! one confirmation; the other receives [`BookingError::InvalidTransition`].

pub mod config;
pub mod error;
pub mod filter;
pub mod meeting;
pub mod profile;
pub mod service;
pub mod store;

// Re-export main types
pub use config::{BookingConfig, ConfigError};
pub use error::{BookingError, BookingResult};
pub use filter::{CastFilter, Page};
pub use meeting::{ConfirmDetails, MeetingAction, MeetingRequest, MeetingStatus};
pub use profile::CastProfileUpdate;
pub use service::{BookingService, CastDetail, Registration};
pub use store::{BookingStore, MemoryStore};
