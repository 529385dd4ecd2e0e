//! # Lune Authentication
//!
//! This crate issues and validates the session tokens that identify the
//! caller of every Lune request.
//!
//! ## Overview
//!
//! The lune-auth crate handles:
//! - **JWT**: Access/refresh token issuance, validation and rotation
//! - **Claims**: User ID, email, role and session ID
//! - **Context**: Turning a validated access token into a `RequestContext`
//!
//! ## Features
//!
//! - `jwt` (default): JWT token support using jsonwebtoken
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lune_auth::JwtService;
//! use lune_profiles::Role;
//! use uuid::Uuid;
//!
//! let service = JwtService::with_secret("your-secret-key").unwrap();
//!
//! let user_id = Uuid::now_v7();
//! let pair = service.issue_token_pair(user_id, "ken@example.com", Role::Member).unwrap();
//!
//! // On each request
//! let ctx = service.authenticate(&pair.access_token).unwrap();
//! assert_eq!(ctx.user_id(), user_id);
//! ```
//!
//! ## Cross-Crate Integration
//!
//! This crate integrates with:
//! - `lune-profiles`: Roles and the request context
//! - `lune-booking`: Every booking operation takes the resulting context

pub mod claims;
pub mod error;
#[cfg(feature = "jwt")]
pub mod jwt;

// Re-export main types
pub use claims::{SessionClaims, TokenType};
pub use error::{AuthError, AuthResult};

#[cfg(feature = "jwt")]
pub use jwt::{JwtAlgorithm, JwtConfig, JwtService, TokenPair};
