//! Session token claims
//!
//! This module defines the JWT claims carried by a Lune session token. The
//! claims identify the user and their role; everything else about the user is
//! loaded from the store per request.

use chrono::{DateTime, Utc};
use lune_profiles::{RequestContext, Role};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AuthError, AuthResult};

/// Default token issuer.
pub const DEFAULT_ISSUER: &str = "lune";

/// Default token audience.
pub const DEFAULT_AUDIENCE: &str = "lune-web";

/// Standard JWT claims with session extensions.
///
/// # Example
///
/// ```
/// use chrono::Duration;
/// use lune_auth::SessionClaims;
/// use lune_profiles::Role;
/// use uuid::Uuid;
///
/// let user_id = Uuid::now_v7();
/// let claims = SessionClaims::new(user_id, "ken@example.com", Role::Member, Duration::hours(1));
/// assert_eq!(claims.user_id(), Some(user_id));
/// assert!(!claims.is_expired());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    // Standard JWT claims (RFC 7519)
    /// Subject (user ID)
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: Vec<String>,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// JWT ID (unique identifier for this token)
    pub jti: String,

    // Session claims
    /// User email
    pub email: String,

    /// Account role
    pub role: Role,

    /// Session ID shared by the access and refresh tokens of one login
    pub session_id: String,

    /// Token type (access, refresh)
    pub token_type: TokenType,
}

impl SessionClaims {
    /// Create new claims for a user.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's unique identifier
    /// * `email` - The user's email address
    /// * `role` - The user's role
    /// * `duration` - Token validity duration
    pub fn new(
        user_id: Uuid,
        email: impl Into<String>,
        role: Role,
        duration: chrono::Duration,
    ) -> Self {
        let now = Utc::now();
        let exp = now + duration;

        Self {
            sub: user_id.to_string(),
            iss: DEFAULT_ISSUER.to_string(),
            aud: vec![DEFAULT_AUDIENCE.to_string()],
            exp: exp.timestamp(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            jti: Uuid::now_v7().to_string(),
            email: email.into(),
            role,
            session_id: Uuid::now_v7().to_string(),
            token_type: TokenType::Access,
        }
    }

    /// Get the user ID as UUID.
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }

    /// Check if the token is expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Get expiration as DateTime.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }

    /// Set the token type.
    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = token_type;
        self
    }

    /// Set the session ID.
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    /// Set issuer and audience.
    pub fn with_issuer(mut self, issuer: impl Into<String>, audience: Vec<String>) -> Self {
        self.iss = issuer.into();
        self.aud = audience;
        self
    }

    /// Build the request context for these claims.
    ///
    /// Only access tokens authenticate requests.
    pub fn to_context(&self) -> AuthResult<RequestContext> {
        if self.token_type != TokenType::Access {
            return Err(AuthError::WrongTokenType { expected: "access" });
        }
        let user_id = self
            .user_id()
            .ok_or_else(|| AuthError::InvalidToken("Subject is not a user ID".to_string()))?;

        Ok(RequestContext::new(user_id, self.role)
            .with_session_id(self.session_id.clone())
            .with_correlation_id(self.jti.clone()))
    }
}

/// Token type enumeration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Access token (short-lived)
    Access,

    /// Refresh token (long-lived)
    Refresh,
}

impl Default for TokenType {
    fn default() -> Self {
        TokenType::Access
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_claims_creation() {
        let user_id = Uuid::now_v7();
        let claims = SessionClaims::new(user_id, "test@example.com", Role::Cast, Duration::hours(1));

        assert_eq!(claims.user_id(), Some(user_id));
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.role, Role::Cast);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_claims_expiration() {
        let user_id = Uuid::now_v7();

        let mut claims =
            SessionClaims::new(user_id, "test@example.com", Role::Member, Duration::hours(1));
        claims.exp = Utc::now().timestamp() - 3600;

        assert!(claims.is_expired());
    }

    #[test]
    fn test_to_context() {
        let user_id = Uuid::now_v7();
        let claims = SessionClaims::new(user_id, "a@example.com", Role::Admin, Duration::hours(1))
            .with_session_id("session-1");

        let ctx = claims.to_context().unwrap();
        assert_eq!(ctx.user_id(), user_id);
        assert_eq!(ctx.role(), Role::Admin);
        assert_eq!(ctx.session_id.as_deref(), Some("session-1"));
    }

    #[test]
    fn test_refresh_token_cannot_authenticate() {
        let claims = SessionClaims::new(Uuid::now_v7(), "a@example.com", Role::Member, Duration::days(7))
            .with_token_type(TokenType::Refresh);

        assert!(matches!(
            claims.to_context(),
            Err(AuthError::WrongTokenType { .. })
        ));
    }

    #[test]
    fn test_bad_subject_rejected() {
        let mut claims =
            SessionClaims::new(Uuid::now_v7(), "a@example.com", Role::Member, Duration::hours(1));
        claims.sub = "not-a-uuid".to_string();

        assert!(matches!(claims.to_context(), Err(AuthError::InvalidToken(_))));
    }
}
