//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Quota API used when `QUOTA_API_URL` is not set.
pub const DEFAULT_API_BASE_URL: &str = "https://elsayedghoonaim-internet-quota.hf.space";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote quota API (no trailing slash)
    pub api_base_url: String,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Address to bind
    pub host: String,
    /// Server port
    pub port: u16,
    /// File holding the persisted credential
    pub credential_path: PathBuf,
}

impl Config {
    /// Config for tests (no environment access).
    pub fn test_default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:9".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8080,
            credential_path: PathBuf::from("target/test-credential.json"),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_base_url = normalize_base_url(
            &env::var("QUOTA_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
        )?;

        Ok(Self {
            api_base_url,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            credential_path: env::var("CREDENTIAL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".netquota/credential.json")),
        })
    }
}

/// Trim and validate an API base URL, dropping any trailing slashes.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let url = raw.trim().trim_end_matches('/');
    if url.is_empty() {
        return Err(ConfigError::Invalid("QUOTA_API_URL", "must not be empty".into()));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Invalid(
            "QUOTA_API_URL",
            format!("{} must start with http:// or https://", url),
        ));
    }
    Ok(url.to_string())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
