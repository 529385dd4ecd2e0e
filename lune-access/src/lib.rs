//! # Lune Access Control
//!
//! This crate decides what an actor may see and do on the Lune platform.
//!
//! ## Overview
//!
//! The lune-access crate handles:
//! - **Visibility policy**: Which cast classifications a member tier may see
//! - **Viewers**: Admin bypass versus tier-gated members
//! - **Capabilities**: Operations each role may perform
//!
//! ## Visibility
//!
//! ```text
//!                 cast: standard   cast: high_class
//! member: standard      yes              no
//! member: gold          yes              yes
//! member: vip           yes              yes
//! admin                 yes              yes
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lune_access::{Capability, CapabilitySet, Viewer};
//! use lune_profiles::{CastTier, MemberTier, Role};
//!
//! // Role gate
//! let caps = CapabilitySet::for_role(Role::Member);
//! assert!(caps.has(Capability::RequestMeeting));
//!
//! // Tier gate
//! let viewer = Viewer::Member(MemberTier::Standard);
//! assert!(!viewer.can_view(CastTier::HighClass));
//! ```
//!
//! ## Integration with lune-booking
//!
//! The booking service builds a `Viewer` for every member request and applies
//! `Viewer::can_view` to listings, detail pages, bookmarks and meeting
//! requests alike.

pub mod capabilities;
pub mod policy;

// Re-export main types for convenience
pub use capabilities::{Capability, CapabilitySet};
pub use policy::{is_cast_visible_to, is_cast_visible_to_labels, Viewer};
