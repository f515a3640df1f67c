//! Client configuration.
//!
//! A [`ClientConfig`] is built once (from defaults, the builder methods or the
//! environment), validated, and then shared read-only behind an `Arc` by every clone of a
//! [`ResourceClient`](crate::client::ResourceClient).

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Account name must not be empty")]
    EmptyAccount,

    #[error("Channel capacity must be at least 1")]
    ZeroCapacity,

    #[error("{name} must be greater than zero")]
    ZeroDuration { name: &'static str },

    #[error("Poll interval ({poll:?}) exceeds the default timeout ({timeout:?})")]
    PollExceedsTimeout { poll: Duration, timeout: Duration },
}

// ============================================================================
// CLIENT CONFIGURATION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Account the client talks to. Only used for diagnostics by the local service.
    pub account: String,

    /// Capacity of the request channel between transport and service.
    pub channel_capacity: usize,

    /// Bound used by callers waiting on a completion signal.
    pub default_timeout: Duration,

    /// Sleep between checks in blocking waits.
    pub poll_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            account: "local".to_string(),
            channel_capacity: 32,
            default_timeout: Duration::from_secs(5),
            poll_interval: Duration::from_millis(10),
        }
    }
}

impl ClientConfig {
    /// Loads overrides from the environment, falling back to defaults for unset or
    /// unparsable variables:
    ///
    /// - `DOCDB_ACCOUNT`
    /// - `DOCDB_CHANNEL_CAPACITY`
    /// - `DOCDB_TIMEOUT_MS`
    /// - `DOCDB_POLL_INTERVAL_MS`
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let account = std::env::var("DOCDB_ACCOUNT").unwrap_or(defaults.account);

        let channel_capacity = std::env::var("DOCDB_CHANNEL_CAPACITY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.channel_capacity);

        let default_timeout = std::env::var("DOCDB_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.default_timeout);

        let poll_interval = std::env::var("DOCDB_POLL_INTERVAL_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.poll_interval);

        let config = Self {
            account,
            channel_capacity,
            default_timeout,
            poll_interval,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = account.into();
        self
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.account.trim().is_empty() {
            return Err(ConfigError::EmptyAccount);
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.default_timeout.is_zero() {
            return Err(ConfigError::ZeroDuration {
                name: "default_timeout",
            });
        }
        if self.poll_interval.is_zero() {
            return Err(ConfigError::ZeroDuration {
                name: "poll_interval",
            });
        }
        if self.poll_interval > self.default_timeout {
            return Err(ConfigError::PollExceedsTimeout {
                poll: self.poll_interval,
                timeout: self.default_timeout,
            });
        }
        Ok(())
    }
}
