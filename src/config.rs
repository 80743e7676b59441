//! Configuration module for Respira.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;
use std::time::Duration;

/// Default inference server address.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Initial inference server URL (default: "http://localhost:5000")
    pub server_url: String,
    /// Whole-request timeout for the HTTP client (default: none)
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `RESPIRA_SERVER_URL`: inference server URL (default: "http://localhost:5000")
    /// - `RESPIRA_REQUEST_TIMEOUT_SECS`: request timeout in seconds (default: unset)
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(url) = lookup("RESPIRA_SERVER_URL") {
            let url = url.trim();
            if !url.is_empty() {
                cfg.server_url = url.to_string();
            }
        }

        if let Some(secs) = lookup("RESPIRA_REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = secs.trim().parse::<f64>() {
                if secs.is_finite() && secs > 0.0 {
                    cfg.request_timeout = Some(Duration::from_secs_f64(secs));
                }
            }
        }

        cfg
    }

    /// Build the shared HTTP client used for probes and analyses.
    pub fn http_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.server_url, "http://localhost:5000");
        assert!(cfg.request_timeout.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let cfg = ClientConfig::from_lookup(lookup_from(&[
            ("RESPIRA_SERVER_URL", "http://10.0.0.5:8000"),
            ("RESPIRA_REQUEST_TIMEOUT_SECS", "2.5"),
        ]));
        assert_eq!(cfg.server_url, "http://10.0.0.5:8000");
        assert_eq!(cfg.request_timeout, Some(Duration::from_millis(2500)));
    }

    #[test]
    fn test_bad_values_keep_defaults() {
        let cfg = ClientConfig::from_lookup(lookup_from(&[
            ("RESPIRA_SERVER_URL", "   "),
            ("RESPIRA_REQUEST_TIMEOUT_SECS", "soon"),
        ]));
        assert_eq!(cfg.server_url, DEFAULT_SERVER_URL);
        assert!(cfg.request_timeout.is_none());

        let cfg = ClientConfig::from_lookup(lookup_from(&[("RESPIRA_REQUEST_TIMEOUT_SECS", "-1")]));
        assert!(cfg.request_timeout.is_none());
    }

    #[test]
    fn test_http_client_builds() {
        let cfg = ClientConfig {
            request_timeout: Some(Duration::from_secs(1)),
            ..Default::default()
        };
        assert!(cfg.http_client().is_ok());
    }
}
