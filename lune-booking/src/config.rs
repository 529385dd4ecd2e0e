//! Booking configuration.
//!
//! Loaded from environment variables with defaults suitable for local
//! development.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// Booking service configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingConfig {
    /// Casts per page when the caller does not ask for a size.
    pub default_page_size: usize,

    /// Upper bound on any requested page size.
    pub max_page_size: usize,

    /// Open (pending) requests a member may hold at once. Zero disables the limit.
    pub max_pending_requests: usize,

    /// Members must be approved by an admin before using the platform.
    pub require_verified_members: bool,

    /// Members must have paid before using the platform.
    pub require_paid_members: bool,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
            max_pending_requests: 5,
            require_verified_members: true,
            require_paid_members: false,
        }
    }
}

impl BookingConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `LUNE_PAGE_SIZE`: default page size (default: 20)
    /// - `LUNE_MAX_PAGE_SIZE`: page size cap (default: 100)
    /// - `LUNE_MAX_PENDING_REQUESTS`: open requests per member, 0 = unlimited (default: 5)
    /// - `LUNE_REQUIRE_VERIFIED`: require approved members (default: true)
    /// - `LUNE_REQUIRE_PAID`: require paid members (default: false)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            default_page_size: env_parse("LUNE_PAGE_SIZE", default.default_page_size),
            max_page_size: env_parse("LUNE_MAX_PAGE_SIZE", default.max_page_size),
            max_pending_requests: env_parse(
                "LUNE_MAX_PENDING_REQUESTS",
                default.max_pending_requests,
            ),
            require_verified_members: env_flag(
                "LUNE_REQUIRE_VERIFIED",
                default.require_verified_members,
            ),
            require_paid_members: env_flag("LUNE_REQUIRE_PAID", default.require_paid_members),
        }
    }

    /// Reject impossible combinations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_page_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "LUNE_PAGE_SIZE".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.default_page_size > self.max_page_size {
            return Err(ConfigError::InvalidValue {
                key: "LUNE_PAGE_SIZE".to_string(),
                message: format!(
                    "{} exceeds LUNE_MAX_PAGE_SIZE ({})",
                    self.default_page_size, self.max_page_size
                ),
            });
        }
        Ok(())
    }

    /// Clamp a requested page size into `1..=max_page_size`.
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size.max(1))
    }

    /// Builder: set the pending request limit.
    pub fn with_max_pending_requests(mut self, limit: usize) -> Self {
        self.max_pending_requests = limit;
        self
    }

    /// Builder: toggle the verification requirement.
    pub fn with_require_verified(mut self, required: bool) -> Self {
        self.require_verified_members = required;
        self
    }

    /// Builder: toggle the payment requirement.
    pub fn with_require_paid(mut self, required: bool) -> Self {
        self.require_paid_members = required;
        self
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(v) => match v.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}
