//! Configuration module for the gazette backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::errors::AppError;
use crate::service::LatencyProfile;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Base URL of a real gazette backend; the in-memory mock is used when unset
    pub api_base_url: Option<String>,
    /// Artificial delay of the in-memory mock
    pub mock_latency: LatencyProfile,
    /// Request timeout for the remote backend
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            log_level: "info".to_string(),
            api_base_url: None,
            mock_latency: LatencyProfile::default(),
            http_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let bind_addr = match env::var("GAZETTE_BIND_ADDR") {
            Ok(addr) => addr.parse().map_err(|_| {
                AppError::Config(format!("Invalid GAZETTE_BIND_ADDR format: {}", addr))
            })?,
            Err(_) => defaults.bind_addr,
        };

        let log_level = env::var("GAZETTE_LOG_LEVEL").unwrap_or(defaults.log_level);

        let api_base_url = env::var("GAZETTE_API_BASE_URL")
            .ok()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        let mock_latency = match env::var("GAZETTE_MOCK_LATENCY_MS") {
            Ok(ms) => LatencyProfile::uniform(Duration::from_millis(parse_u64(
                "GAZETTE_MOCK_LATENCY_MS",
                &ms,
            )?)),
            Err(_) => defaults.mock_latency,
        };

        let http_timeout = match env::var("GAZETTE_HTTP_TIMEOUT_SECS") {
            Ok(secs) => Duration::from_secs(parse_u64("GAZETTE_HTTP_TIMEOUT_SECS", &secs)?),
            Err(_) => defaults.http_timeout,
        };

        Ok(Self {
            bind_addr,
            log_level,
            api_base_url,
            mock_latency,
            http_timeout,
        })
    }
}

fn parse_u64(name: &str, value: &str) -> Result<u64, AppError> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::Config(format!("Invalid {} value: {}", name, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 5] = [
        "GAZETTE_BIND_ADDR",
        "GAZETTE_LOG_LEVEL",
        "GAZETTE_API_BASE_URL",
        "GAZETTE_MOCK_LATENCY_MS",
        "GAZETTE_HTTP_TIMEOUT_SECS",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_default_config() {
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert!(config.api_base_url.is_none());
        assert_eq!(config.mock_latency, LatencyProfile::default());
        assert_eq!(config.http_timeout, Duration::from_secs(10));
    }

    #[test]
    #[serial]
    fn test_config_overrides() {
        clear_env();
        env::set_var("GAZETTE_BIND_ADDR", "0.0.0.0:9000");
        env::set_var("GAZETTE_API_BASE_URL", " http://localhost:8000/api ");
        env::set_var("GAZETTE_MOCK_LATENCY_MS", "0");
        env::set_var("GAZETTE_HTTP_TIMEOUT_SECS", "3");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:9000");
        assert_eq!(config.api_base_url.as_deref(), Some("http://localhost:8000/api"));
        assert_eq!(config.mock_latency, LatencyProfile::none());
        assert_eq!(config.http_timeout, Duration::from_secs(3));
    }

    #[test]
    #[serial]
    fn test_invalid_values_are_rejected() {
        clear_env();
        env::set_var("GAZETTE_MOCK_LATENCY_MS", "fast");
        let err = Config::from_env().unwrap_err();
        clear_env();
        assert!(matches!(err, AppError::Config(_)));

        env::set_var("GAZETTE_BIND_ADDR", "not-an-address");
        let err = Config::from_env().unwrap_err();
        clear_env();
        assert!(matches!(err, AppError::Config(_)));
    }
}
