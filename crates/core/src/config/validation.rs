//! Configuration validation rules.
//!
//! Checks `AppConfig` values after they have been loaded from environment,
//! files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `origin` is not an absolute http(s) URL, or carries a path, query or fragment
    /// - `max_bytes` is set to 0 or above 256MB
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        let origin = self.origin_url()?;
        if origin.path() != "/" || origin.query().is_some() || self.origin.contains('#') {
            return Err(ConfigError::Invalid {
                field: "origin".into(),
                reason: "must be scheme://host[:port] without path or query".into(),
            });
        }

        match self.max_bytes {
            Some(0) => {
                return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must be greater than 0".into() });
            }
            Some(n) if n > 256 * 1024 * 1024 => {
                return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must not exceed 256MB".into() });
            }
            _ => {}
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.reject_non_ok {
            tracing::debug!("reject_non_ok set; install fails on any non-2xx manifest response");
        }

        Ok(())
    }
}
