//! # Lune Profiles
//!
//! This crate provides the identity and profile entities for the Lune
//! membership booking platform.
//!
//! ## Overview
//!
//! The lune-profiles crate handles:
//! - **Users**: Accounts with a role and admin verification status
//! - **Members**: Member profiles with a tier and payment status
//! - **Casts**: Cast profiles with a tier classification and listing flags
//! - **Bookmarks**: Member-to-cast bookmarks
//! - **Tiers**: Member tiers and cast tier classifications
//! - **Context**: Request-scoped actor context
//!
//! ## Architecture
//!
//! ```text
//! User (role, verification)
//!   ├─ Member (tier, is_paid, is_active)
//!   │     └─ Bookmark ─→ Cast
//!   └─ Cast (tier_classification, is_active, is_featured)
//!
//! RequestContext ─→ Actor::{Member, Cast, Admin}
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lune_profiles::{Cast, CastTier, Member, MemberTier, Role, User};
//!
//! let user = User::new("ken@example.com", "Ken", Role::Member);
//! let member = Member::new(user.id, "Ken").with_tier(MemberTier::Gold);
//!
//! let cast_user = User::new("mio@example.com", "Mio", Role::Cast);
//! let cast = Cast::new(cast_user.id, "Mio").with_tier(CastTier::HighClass);
//! ```
//!
//! ## Cross-Crate Integration
//!
//! This crate is designed to work with:
//! - `lune-access`: Tier visibility policy and role capabilities
//! - `lune-auth`: Session tokens that resolve to a `RequestContext`
//! - `lune-booking`: Meeting requests and bookmarks over these entities

pub mod bookmark;
pub mod cast;
pub mod context;
pub mod member;
pub mod roles;
pub mod tiers;
pub mod user;

// Re-export main types for convenience
pub use bookmark::{Bookmark, BookmarkToggle};
pub use cast::{Cast, CastSummary};
pub use context::{Actor, RequestContext};
pub use member::Member;
pub use roles::{Role, VerificationStatus};
pub use tiers::{CastTier, MemberTier};
pub use user::{normalize_email, User};
