//! Lock and endpoint configuration.
//!
//! Configuration is plain data that can be deserialized from JSON and then
//! overridden from environment-style variables:
//!
//! - `FRONTEND_LOCK_LEASE_SECONDS`
//! - `FRONTEND_LOCK_BASE_URL`
//! - `FRONTEND_LOCK_ROUTE_PREFIX`
//!
//! A config only becomes usable after [`LockConfig::lease`] has validated the
//! lease, which guarantees a positive renewal interval.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default lease length in seconds.
pub const DEFAULT_LEASE_SECONDS: u64 = 120;

/// How long before expiry the client renews its lease.
pub const RENEWAL_MARGIN_SECONDS: u64 = 10;

/// Upper bound on the lease, keeps expiry arithmetic in range.
pub const MAX_LEASE_SECONDS: u64 = 365 * 24 * 60 * 60;

pub const ENV_LEASE_SECONDS: &str = "FRONTEND_LOCK_LEASE_SECONDS";
pub const ENV_BASE_URL: &str = "FRONTEND_LOCK_BASE_URL";
pub const ENV_ROUTE_PREFIX: &str = "FRONTEND_LOCK_ROUTE_PREFIX";

/// Error type for configuration loading and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The lease is not longer than the renewal margin.
    LeaseTooShort { seconds: u64 },
    /// The lease exceeds [`MAX_LEASE_SECONDS`].
    LeaseTooLong { seconds: u64 },
    /// A config source could not be parsed.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LeaseTooShort { seconds } => write!(
                f,
                "lease of {}s must be longer than the {}s renewal margin",
                seconds, RENEWAL_MARGIN_SECONDS
            ),
            ConfigError::LeaseTooLong { seconds } => write!(
                f,
                "lease of {}s exceeds the maximum of {}s",
                seconds, MAX_LEASE_SECONDS
            ),
            ConfigError::Parse(msg) => write!(f, "invalid lock configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// A validated lease length, always longer than [`RENEWAL_MARGIN_SECONDS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LeaseDuration {
    seconds: u64,
}

impl LeaseDuration {
    pub fn from_secs(seconds: u64) -> Result<Self, ConfigError> {
        if seconds <= RENEWAL_MARGIN_SECONDS {
            return Err(ConfigError::LeaseTooShort { seconds });
        }
        if seconds > MAX_LEASE_SECONDS {
            return Err(ConfigError::LeaseTooLong { seconds });
        }
        Ok(Self { seconds })
    }

    pub fn as_secs(&self) -> u64 {
        self.seconds
    }

    /// The lease as a signed offset for timestamp arithmetic.
    pub fn as_time_delta(&self) -> chrono::TimeDelta {
        chrono::TimeDelta::seconds(self.seconds as i64)
    }

    /// How often a client must renew to keep the lease alive.
    pub fn renewal_interval(&self) -> Duration {
        Duration::from_secs(self.seconds - RENEWAL_MARGIN_SECONDS)
    }
}

impl Default for LeaseDuration {
    fn default() -> Self {
        Self {
            seconds: DEFAULT_LEASE_SECONDS,
        }
    }
}

/// Configuration for the lock manager and the update-lock endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    /// Lease length in seconds.
    pub lease_seconds: u64,
    /// Base URL of the site, prepended to endpoint paths. Must end with `/`.
    pub base_url: String,
    /// Path segment the lock endpoints are mounted under.
    pub route_prefix: String,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            lease_seconds: DEFAULT_LEASE_SECONDS,
            base_url: "/".to_string(),
            route_prefix: "frontend-lock".to_string(),
        }
    }
}

impl LockConfig {
    /// Parse a config from JSON. Missing keys fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply overrides from a variable lookup (usually `std::env::var`).
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_LEASE_SECONDS) {
            self.lease_seconds = raw.trim().parse().map_err(|_| {
                ConfigError::Parse(format!("{} is not a number: {:?}", ENV_LEASE_SECONDS, raw))
            })?;
        }
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(prefix) = lookup(ENV_ROUTE_PREFIX) {
            self.route_prefix = prefix;
        }
        Ok(self)
    }

    /// Defaults overridden from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Validate and return the lease.
    pub fn lease(&self) -> Result<LeaseDuration, ConfigError> {
        LeaseDuration::from_secs(self.lease_seconds)
    }

    fn trimmed_prefix(&self) -> &str {
        self.route_prefix.trim_matches('/')
    }

    /// Route pattern (relative to the site root) for the update-lock endpoint.
    pub fn update_lock_route(&self) -> String {
        format!("/{}/updatelock/:id", self.trimmed_prefix())
    }

    /// Route pattern for the lock inspection endpoint.
    pub fn inspect_lock_route(&self) -> String {
        format!("/{}/lock/:id", self.trimmed_prefix())
    }

    /// URL a client posts to in order to renew the lock on `document_id`.
    pub fn update_lock_path(&self, document_id: &str) -> String {
        let base = if self.base_url.ends_with('/') {
            self.base_url.clone()
        } else {
            format!("{}/", self.base_url)
        };
        format!("{}{}/updatelock/{}", base, self.trimmed_prefix(), document_id)
    }
}
