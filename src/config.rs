//! Configuration management with environment variable support.
//!
//! This module provides centralized configuration for the login oracle, supporting:
//! - Environment variables for every reference credential and timing value
//! - Sensible defaults matching the public demo storefront the suite targets
//! - Builder-style overrides for programmatic configuration
//!
//! # Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `LOGIN_ORACLE_BASE_URL` | Login page URL each scenario starts from | `https://www.saucedemo.com/` |
//! | `LOGIN_ORACLE_VALID_USERNAME` | Canonical valid username | `standard_user` |
//! | `LOGIN_ORACLE_VALID_PASSWORD` | Canonical valid password | `secret_sauce` |
//! | `LOGIN_ORACLE_LOCKED_USERNAME` | Username of the locked account | `locked_out_user` |
//! | `LOGIN_ORACLE_DEGRADED_USERNAME` | Username of the slow-rendering account | `performance_glitch_user` |
//! | `LOGIN_ORACLE_IDLE_MS` | Idle threshold before the session reload check (ms) | `60000` |
//! | `LOGIN_ORACLE_REPORT_DIR` | Base directory for run reports | `/tmp/login-oracle` |
//!
//! # Example
//!
//! ```bash
//! # Point the suite at a staging deployment with a shorter idle window
//! export LOGIN_ORACLE_BASE_URL="https://staging.example.test/"
//! export LOGIN_ORACLE_IDLE_MS=5000
//! ```

use std::env;
use std::sync::OnceLock;
use std::time::Duration;

// ============================================================================
// Default Values
// ============================================================================

/// Default login page URL
pub const DEFAULT_BASE_URL: &str = "https://www.saucedemo.com/";

/// Default canonical valid username
pub const DEFAULT_VALID_USERNAME: &str = "standard_user";

/// Default canonical valid password
pub const DEFAULT_VALID_PASSWORD: &str = "secret_sauce";

/// Default locked account username
pub const DEFAULT_LOCKED_USERNAME: &str = "locked_out_user";

/// Default degraded-performance account username
pub const DEFAULT_DEGRADED_USERNAME: &str = "performance_glitch_user";

/// Default idle threshold for the session persistence check (milliseconds)
pub const DEFAULT_IDLE_MS: u64 = 60_000;

/// Default report base directory
pub const DEFAULT_REPORT_DIR: &str = "/tmp/login-oracle";

// ============================================================================
// Environment Variable Names
// ============================================================================

/// Environment variable for the login page URL
pub const ENV_BASE_URL: &str = "LOGIN_ORACLE_BASE_URL";

/// Environment variable for the valid username
pub const ENV_VALID_USERNAME: &str = "LOGIN_ORACLE_VALID_USERNAME";

/// Environment variable for the valid password
pub const ENV_VALID_PASSWORD: &str = "LOGIN_ORACLE_VALID_PASSWORD";

/// Environment variable for the locked username
pub const ENV_LOCKED_USERNAME: &str = "LOGIN_ORACLE_LOCKED_USERNAME";

/// Environment variable for the degraded-performance username
pub const ENV_DEGRADED_USERNAME: &str = "LOGIN_ORACLE_DEGRADED_USERNAME";

/// Environment variable for the idle threshold
pub const ENV_IDLE_MS: &str = "LOGIN_ORACLE_IDLE_MS";

/// Environment variable for the report directory
pub const ENV_REPORT_DIR: &str = "LOGIN_ORACLE_REPORT_DIR";

// ============================================================================
// Configuration Getters (with caching)
// ============================================================================

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration (initialized from environment on first access)
pub fn get() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

/// Centralized configuration for the login oracle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Reference accounts known to the application under test
    pub accounts: AccountSettings,
    /// Target application settings
    pub target: TargetSettings,
    /// Report output settings
    pub report: ReportSettings,
}

/// Reference account strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSettings {
    pub valid_username: String,
    pub valid_password: String,
    pub locked_username: String,
    pub degraded_username: String,
}

/// Target application settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSettings {
    /// Login page URL
    pub base_url: String,
    /// Idle threshold for the session persistence scenario (milliseconds)
    pub idle_ms: u64,
}

/// Report-related settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSettings {
    /// Base directory for report sessions
    pub base_dir: String,
}

impl Config {
    /// Create configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration with all defaults (ignoring environment)
    pub fn defaults() -> Self {
        Self::from_lookup(|_| None)
    }

    /// Create configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let string = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Self {
            accounts: AccountSettings {
                valid_username: string(ENV_VALID_USERNAME, DEFAULT_VALID_USERNAME),
                valid_password: string(ENV_VALID_PASSWORD, DEFAULT_VALID_PASSWORD),
                locked_username: string(ENV_LOCKED_USERNAME, DEFAULT_LOCKED_USERNAME),
                degraded_username: string(ENV_DEGRADED_USERNAME, DEFAULT_DEGRADED_USERNAME),
            },
            target: TargetSettings {
                base_url: string(ENV_BASE_URL, DEFAULT_BASE_URL),
                idle_ms: lookup(ENV_IDLE_MS)
                    .and_then(|s| s.trim().parse().ok())
                    .unwrap_or(DEFAULT_IDLE_MS),
            },
            report: ReportSettings {
                base_dir: string(ENV_REPORT_DIR, DEFAULT_REPORT_DIR),
            },
        }
    }

    /// Override the idle threshold
    pub fn idle_ms(mut self, idle_ms: u64) -> Self {
        self.target.idle_ms = idle_ms;
        self
    }

    /// Override the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.target.base_url = url.into();
        self
    }

    /// Idle threshold as a duration
    pub fn idle_threshold(&self) -> Duration {
        Duration::from_millis(self.target.idle_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Get the report base directory (convenience function)
pub fn report_base_dir() -> String {
    get().report.base_dir.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_config_defaults() {
        let config = Config::defaults();
        assert_eq!(config.accounts.valid_username, DEFAULT_VALID_USERNAME);
        assert_eq!(config.accounts.valid_password, DEFAULT_VALID_PASSWORD);
        assert_eq!(config.target.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.idle_threshold(), Duration::from_secs(60));
        assert_eq!(config.report.base_dir, DEFAULT_REPORT_DIR);
    }

    #[test]
    fn test_config_from_lookup_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_VALID_USERNAME, "alice"),
            (ENV_IDLE_MS, "1500"),
            (ENV_BASE_URL, "http://localhost:3000/"),
        ]
        .into_iter()
        .collect();

        let config = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.accounts.valid_username, "alice");
        assert_eq!(config.accounts.locked_username, DEFAULT_LOCKED_USERNAME);
        assert_eq!(config.target.idle_ms, 1500);
        assert_eq!(config.target.base_url, "http://localhost:3000/");
    }

    #[test]
    fn test_config_invalid_idle_falls_back() {
        let config = Config::from_lookup(|k| (k == ENV_IDLE_MS).then(|| "soon".to_string()));
        assert_eq!(config.target.idle_ms, DEFAULT_IDLE_MS);
    }

    #[test]
    fn test_config_builder_overrides() {
        let config = Config::defaults().idle_ms(10).base_url("http://app/");
        assert_eq!(config.idle_threshold(), Duration::from_millis(10));
        assert_eq!(config.target.base_url, "http://app/");
    }
}
