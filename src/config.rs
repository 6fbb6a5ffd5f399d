//! Configuration constants and utilities for phishline
//!
//! Settings are layered: compiled defaults, then environment variables,
//! then command line arguments.

use crate::cmd_args::CommandLineArgs;
use anyhow::{anyhow, Context, Result};
use reqwest::Url;
use std::time::Duration;

/// Default base URL of the analysis/chat service
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable name for overriding the service base URL
pub const BASE_URL_ENV_VAR: &str = "PHISHLINE_BASE_URL";

/// Environment variable name for overriding the request timeout
pub const TIMEOUT_ENV_VAR: &str = "PHISHLINE_TIMEOUT_SECS";

/// Environment variable holding the tracing filter directives
pub const LOG_LEVEL_ENV_VAR: &str = "PHISHLINE_LOG_LEVEL";

/// Get the base URL, checking environment variable first, then falling back to default
pub fn get_base_url() -> String {
    std::env::var_os(BASE_URL_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

/// Get the timeout in seconds from the environment, falling back to default
pub fn get_timeout_secs() -> Result<u64> {
    match std::env::var_os(TIMEOUT_ENV_VAR).and_then(|val| val.into_string().ok()) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{TIMEOUT_ENV_VAR} must be a whole number of seconds")),
        None => Ok(DEFAULT_TIMEOUT_SECS),
    }
}

/// Resolved application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    base_url: Url,
    request_timeout: Duration,
    discard_stale_results: bool,
}

impl AppConfig {
    /// Build a configuration from explicit values
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("invalid base URL '{base_url}'"))?;
        if timeout_secs == 0 {
            return Err(anyhow!("request timeout must be at least one second"));
        }

        Ok(Self {
            base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            discard_stale_results: true,
        })
    }

    /// Resolve configuration from environment and command line arguments
    pub fn from_args(args: &CommandLineArgs) -> Result<Self> {
        let base_url = args.base_url().cloned().unwrap_or_else(get_base_url);
        let timeout_secs = match args.timeout_secs() {
            Some(secs) => secs,
            None => get_timeout_secs()?,
        };

        let mut config = Self::new(&base_url, timeout_secs)?;
        config.discard_stale_results = !args.keep_stale_results();

        tracing::debug!(
            "Resolved config: base_url={}, timeout={:?}, discard_stale={}",
            config.base_url,
            config.request_timeout,
            config.discard_stale_results
        );
        Ok(config)
    }

    pub fn with_discard_stale_results(mut self, discard: bool) -> Self {
        self.discard_stale_results = discard;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Whether analysis results that arrive after `clear` are dropped
    pub fn discard_stale_results(&self) -> bool {
        self.discard_stale_results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        assert_eq!(DEFAULT_BASE_URL, "http://127.0.0.1:5000");
        assert_eq!(DEFAULT_TIMEOUT_SECS, 30);
    }

    #[test]
    fn test_env_var_names() {
        assert_eq!(BASE_URL_ENV_VAR, "PHISHLINE_BASE_URL");
        assert_eq!(TIMEOUT_ENV_VAR, "PHISHLINE_TIMEOUT_SECS");
    }

    #[test]
    fn app_config_should_reject_invalid_url() {
        let result = AppConfig::new("not a url", 10);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("invalid base URL"));
    }

    #[test]
    fn app_config_should_reject_zero_timeout() {
        assert!(AppConfig::new(DEFAULT_BASE_URL, 0).is_err());
    }

    #[test]
    fn app_config_should_prefer_command_line_values() {
        let args = CommandLineArgs::parse_from([
            "program",
            "--base-url",
            "http://localhost:8080",
            "--timeout",
            "5",
            "--keep-stale-results",
        ]);
        let config = AppConfig::from_args(&args).unwrap();

        assert_eq!(config.base_url().as_str(), "http://localhost:8080/");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert!(!config.discard_stale_results());
    }

    #[test]
    fn app_config_should_discard_stale_results_by_default() {
        let config = AppConfig::new(DEFAULT_BASE_URL, 1).unwrap();
        assert!(config.discard_stale_results());
        assert!(!config.with_discard_stale_results(false).discard_stale_results());
    }
}
