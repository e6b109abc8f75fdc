//! Configuration module for the gVote backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors raised while reading the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Credentials for the WeVote API. Enrichment runs only when both are set.
#[derive(Debug, Clone)]
pub struct WeVoteCredentials {
    pub token: String,
    pub voter_device_id: String,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Google Civic Information API key
    pub civic_api_key: Option<String>,
    pub civic_base_url: String,
    /// FVAP state deadlines endpoint; `/{STATE}/deadlines` is appended
    pub fvap_base_url: String,
    pub wevote_base_url: String,
    pub wevote: Option<WeVoteCredentials>,
    /// Timeout applied to every outbound request
    pub http_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let db_path = env::var("GVOTE_DB_PATH")
            .unwrap_or_else(|_| "./data/gvote.sqlite".to_string())
            .into();

        let bind_addr_raw =
            env::var("GVOTE_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let bind_addr = bind_addr_raw.parse().map_err(|_| ConfigError::Invalid {
            var: "GVOTE_BIND_ADDR",
            value: bind_addr_raw.clone(),
        })?;

        let log_level = env::var("GVOTE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let civic_api_key = non_empty_var("GVOTE_CIVIC_API_KEY");
        let civic_base_url = env::var("GVOTE_CIVIC_BASE_URL")
            .unwrap_or_else(|_| "https://www.googleapis.com/civicinfo/v2".to_string());
        let fvap_base_url = env::var("GVOTE_FVAP_BASE_URL")
            .unwrap_or_else(|_| "https://www.fvap.gov/xml-api/states".to_string());
        let wevote_base_url = env::var("GVOTE_WEVOTE_BASE_URL")
            .unwrap_or_else(|_| "https://api.wevoteusa.org/apis/v1".to_string());

        let wevote = match (
            non_empty_var("GVOTE_WEVOTE_TOKEN"),
            non_empty_var("GVOTE_WEVOTE_VOTER_DEVICE_ID"),
        ) {
            (Some(token), Some(voter_device_id)) => Some(WeVoteCredentials {
                token,
                voter_device_id,
            }),
            _ => None,
        };

        let timeout_raw = env::var("GVOTE_HTTP_TIMEOUT_SECS").unwrap_or_else(|_| "10".to_string());
        let http_timeout = timeout_raw
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::Invalid {
                var: "GVOTE_HTTP_TIMEOUT_SECS",
                value: timeout_raw.clone(),
            })?;

        Ok(Self {
            db_path,
            bind_addr,
            log_level,
            civic_api_key,
            civic_base_url,
            fvap_base_url,
            wevote_base_url,
            wevote,
            http_timeout,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
