//! JWT session token issuance and validation
//!
//! This module provides session token operations using the jsonwebtoken crate.
//! It supports HS256/384/512, RS256/384/512, ES256 and ES384.

use crate::claims::{SessionClaims, TokenType, DEFAULT_AUDIENCE, DEFAULT_ISSUER};
use crate::error::{AuthError, AuthResult};
use chrono::Duration;
use lune_profiles::{RequestContext, Role};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "jwt")]
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation,
};

/// JWT configuration for token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for HMAC algorithms (HS256, HS384, HS512)
    pub secret: Option<String>,

    /// Private key (PEM) for RSA/EC algorithms
    pub private_key: Option<String>,

    /// Public key (PEM) for RSA/EC algorithms
    pub public_key: Option<String>,

    /// Algorithm to use
    pub algorithm: JwtAlgorithm,

    /// Token issuer
    pub issuer: String,

    /// Token audience
    pub audience: Vec<String>,

    /// Access token duration
    pub access_token_duration: Duration,

    /// Refresh token duration
    pub refresh_token_duration: Duration,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: None,
            private_key: None,
            public_key: None,
            algorithm: JwtAlgorithm::HS256,
            issuer: DEFAULT_ISSUER.to_string(),
            audience: vec![DEFAULT_AUDIENCE.to_string()],
            access_token_duration: Duration::hours(1),
            refresh_token_duration: Duration::days(30),
        }
    }
}

impl JwtConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `LUNE_JWT_SECRET`: HMAC secret
    /// - `LUNE_JWT_PRIVATE_KEY` / `LUNE_JWT_PUBLIC_KEY`: PEM keys for RSA/EC
    /// - `LUNE_JWT_ALGORITHM`: Algorithm name (default: HS256)
    /// - `LUNE_JWT_ISSUER`: Issuer (default: lune)
    /// - `LUNE_ACCESS_TOKEN_MINUTES`: Access token lifetime (default: 60)
    /// - `LUNE_REFRESH_TOKEN_DAYS`: Refresh token lifetime (default: 30)
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            secret: std::env::var("LUNE_JWT_SECRET").ok(),
            private_key: std::env::var("LUNE_JWT_PRIVATE_KEY").ok(),
            public_key: std::env::var("LUNE_JWT_PUBLIC_KEY").ok(),
            algorithm: std::env::var("LUNE_JWT_ALGORITHM")
                .ok()
                .and_then(|s| JwtAlgorithm::parse(&s))
                .unwrap_or(default.algorithm),
            issuer: std::env::var("LUNE_JWT_ISSUER").unwrap_or(default.issuer),
            audience: default.audience,
            access_token_duration: std::env::var("LUNE_ACCESS_TOKEN_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::minutes)
                .unwrap_or(default.access_token_duration),
            refresh_token_duration: std::env::var("LUNE_REFRESH_TOKEN_DAYS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::days)
                .unwrap_or(default.refresh_token_duration),
        }
    }
}

/// Supported JWT algorithms.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum JwtAlgorithm {
    /// HMAC using SHA-256
    HS256,
    /// HMAC using SHA-384
    HS384,
    /// HMAC using SHA-512
    HS512,
    /// RSASSA-PKCS1-v1_5 using SHA-256
    RS256,
    /// RSASSA-PKCS1-v1_5 using SHA-384
    RS384,
    /// RSASSA-PKCS1-v1_5 using SHA-512
    RS512,
    /// ECDSA using P-256 and SHA-256
    ES256,
    /// ECDSA using P-384 and SHA-384
    ES384,
}

impl JwtAlgorithm {
    /// Parse algorithm name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "HS256" => Some(Self::HS256),
            "HS384" => Some(Self::HS384),
            "HS512" => Some(Self::HS512),
            "RS256" => Some(Self::RS256),
            "RS384" => Some(Self::RS384),
            "RS512" => Some(Self::RS512),
            "ES256" => Some(Self::ES256),
            "ES384" => Some(Self::ES384),
            _ => None,
        }
    }

    fn is_hmac(&self) -> bool {
        matches!(self, Self::HS256 | Self::HS384 | Self::HS512)
    }
}

#[cfg(feature = "jwt")]
impl From<JwtAlgorithm> for Algorithm {
    fn from(alg: JwtAlgorithm) -> Self {
        match alg {
            JwtAlgorithm::HS256 => Algorithm::HS256,
            JwtAlgorithm::HS384 => Algorithm::HS384,
            JwtAlgorithm::HS512 => Algorithm::HS512,
            JwtAlgorithm::RS256 => Algorithm::RS256,
            JwtAlgorithm::RS384 => Algorithm::RS384,
            JwtAlgorithm::RS512 => Algorithm::RS512,
            JwtAlgorithm::ES256 => Algorithm::ES256,
            JwtAlgorithm::ES384 => Algorithm::ES384,
        }
    }
}

/// JWT service issuing and validating session tokens.
pub struct JwtService {
    config: JwtConfig,
    #[cfg(feature = "jwt")]
    encoding_key: EncodingKey,
    #[cfg(feature = "jwt")]
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("config", &self.config)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service with the given configuration.
    #[cfg(feature = "jwt")]
    pub fn new(config: JwtConfig) -> AuthResult<Self> {
        let encoding_key = Self::create_encoding_key(&config)?;
        let decoding_key = Self::create_decoding_key(&config)?;

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
        })
    }

    /// Create with a simple secret (HS256).
    #[cfg(feature = "jwt")]
    pub fn with_secret(secret: impl Into<String>) -> AuthResult<Self> {
        let config = JwtConfig {
            secret: Some(secret.into()),
            algorithm: JwtAlgorithm::HS256,
            ..Default::default()
        };
        Self::new(config)
    }

    #[cfg(feature = "jwt")]
    fn create_encoding_key(config: &JwtConfig) -> AuthResult<EncodingKey> {
        if config.algorithm.is_hmac() {
            let secret = config
                .secret
                .as_ref()
                .ok_or_else(|| AuthError::ConfigError("Secret required for HMAC".to_string()))?;
            return Ok(EncodingKey::from_secret(secret.as_bytes()));
        }

        let key = config
            .private_key
            .as_ref()
            .ok_or_else(|| AuthError::ConfigError("Private key required".to_string()))?;
        match config.algorithm {
            JwtAlgorithm::ES256 | JwtAlgorithm::ES384 => EncodingKey::from_ec_pem(key.as_bytes())
                .map_err(|e| AuthError::ConfigError(format!("Invalid EC private key: {}", e))),
            _ => EncodingKey::from_rsa_pem(key.as_bytes())
                .map_err(|e| AuthError::ConfigError(format!("Invalid RSA private key: {}", e))),
        }
    }

    #[cfg(feature = "jwt")]
    fn create_decoding_key(config: &JwtConfig) -> AuthResult<DecodingKey> {
        if config.algorithm.is_hmac() {
            let secret = config
                .secret
                .as_ref()
                .ok_or_else(|| AuthError::ConfigError("Secret required for HMAC".to_string()))?;
            return Ok(DecodingKey::from_secret(secret.as_bytes()));
        }

        let key = config
            .public_key
            .as_ref()
            .ok_or_else(|| AuthError::ConfigError("Public key required".to_string()))?;
        match config.algorithm {
            JwtAlgorithm::ES256 | JwtAlgorithm::ES384 => DecodingKey::from_ec_pem(key.as_bytes())
                .map_err(|e| AuthError::ConfigError(format!("Invalid EC public key: {}", e))),
            _ => DecodingKey::from_rsa_pem(key.as_bytes())
                .map_err(|e| AuthError::ConfigError(format!("Invalid RSA public key: {}", e))),
        }
    }

    fn claims_for(
        &self,
        user_id: Uuid,
        email: String,
        role: Role,
        duration: Duration,
    ) -> SessionClaims {
        SessionClaims::new(user_id, email, role, duration)
            .with_issuer(self.config.issuer.clone(), self.config.audience.clone())
    }

    /// Issue an access token for a user.
    #[cfg(feature = "jwt")]
    pub fn issue_access_token(
        &self,
        user_id: Uuid,
        email: impl Into<String>,
        role: Role,
    ) -> AuthResult<String> {
        let claims = self.claims_for(user_id, email.into(), role, self.config.access_token_duration);
        self.encode_claims(&claims)
    }

    /// Issue an access/refresh token pair sharing one session ID.
    #[cfg(feature = "jwt")]
    pub fn issue_token_pair(
        &self,
        user_id: Uuid,
        email: impl Into<String>,
        role: Role,
    ) -> AuthResult<TokenPair> {
        let email = email.into();
        let access = self.claims_for(user_id, email.clone(), role, self.config.access_token_duration);
        let refresh = self
            .claims_for(user_id, email, role, self.config.refresh_token_duration)
            .with_token_type(TokenType::Refresh)
            .with_session_id(access.session_id.clone());

        Ok(TokenPair::new(
            self.encode_claims(&access)?,
            self.encode_claims(&refresh)?,
            self.config.access_token_duration.num_seconds(),
        ))
    }

    /// Exchange a refresh token for a new token pair in the same session.
    #[cfg(feature = "jwt")]
    pub fn refresh(&self, refresh_token: &str) -> AuthResult<TokenPair> {
        let claims = self.validate_token(refresh_token)?;
        if claims.token_type != TokenType::Refresh {
            return Err(AuthError::WrongTokenType {
                expected: "refresh",
            });
        }
        let user_id = claims
            .user_id()
            .ok_or_else(|| AuthError::MissingClaim("sub".to_string()))?;

        let access = self
            .claims_for(user_id, claims.email.clone(), claims.role, self.config.access_token_duration)
            .with_session_id(claims.session_id.clone());
        let refresh = self
            .claims_for(user_id, claims.email, claims.role, self.config.refresh_token_duration)
            .with_token_type(TokenType::Refresh)
            .with_session_id(claims.session_id);

        Ok(TokenPair::new(
            self.encode_claims(&access)?,
            self.encode_claims(&refresh)?,
            self.config.access_token_duration.num_seconds(),
        ))
    }

    /// Encode claims into a token.
    #[cfg(feature = "jwt")]
    pub fn encode_claims(&self, claims: &SessionClaims) -> AuthResult<String> {
        let header = Header::new(self.config.algorithm.into());
        encode(&header, claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Token encoding failed: {}", e)))
    }

    /// Validate and decode a token.
    #[cfg(feature = "jwt")]
    pub fn validate_token(&self, token: &str) -> AuthResult<SessionClaims> {
        let mut validation = Validation::new(self.config.algorithm.into());
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&self.config.audience);

        let token_data: TokenData<SessionClaims> = decode(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AuthError::InvalidToken("Malformed token".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AuthError::InvalidToken("Invalid signature".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                    AuthError::InvalidToken("Invalid issuer".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidAudience => {
                    AuthError::InvalidToken("Invalid audience".to_string())
                }
                _ => AuthError::InvalidToken(e.to_string()),
            })?;

        Ok(token_data.claims)
    }

    /// Validate an access token and build the request context from it.
    #[cfg(feature = "jwt")]
    pub fn authenticate(&self, token: &str) -> AuthResult<RequestContext> {
        self.validate_token(token)?.to_context()
    }

    /// Get the configuration.
    pub fn config(&self) -> &JwtConfig {
        &self.config
    }
}

/// Token pair containing access and refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Access token (short-lived)
    pub access_token: String,

    /// Refresh token (long-lived)
    pub refresh_token: String,

    /// Token type (always "Bearer")
    pub token_type: String,

    /// Access token expiration in seconds
    pub expires_in: i64,
}

impl TokenPair {
    /// Create a new token pair.
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}
