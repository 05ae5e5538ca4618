//! Configuration loaded from the environment (and a `.env` file, if present).

use crate::error::ConfigError;
use reqwest::Url;
use std::path::PathBuf;

pub const BACKEND_BASE_URL: &str = "BACKEND_BASE_URL";
pub const AUTH_BASE_URL: &str = "AUTH_BASE_URL";
pub const STATE_PATH: &str = "CAMPUSFLOW_STATE_PATH";

/// Auth server used when `AUTH_BASE_URL` is not set
pub const DEFAULT_AUTH_BASE_URL: &str = "http://localhost:8000";
/// Where the persistent session state lives when `CAMPUSFLOW_STATE_PATH` is not set
pub const DEFAULT_STATE_PATH: &str = ".campusflow/state.json";

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    /// Root of the REST backend. Always ends with `/` so endpoints join under it.
    pub backend_base_url: Url,
    pub auth_base_url: Url,
    pub state_path: PathBuf,
}

impl ProviderConfig {
    /// Loads `.env` and then reads the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = lookup(BACKEND_BASE_URL)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingBaseUrl)?;
        let auth = lookup(AUTH_BASE_URL).unwrap_or_else(|| DEFAULT_AUTH_BASE_URL.to_string());
        let state_path = lookup(STATE_PATH).unwrap_or_else(|| DEFAULT_STATE_PATH.to_string());

        Ok(Self {
            backend_base_url: parse_base_url(BACKEND_BASE_URL, &backend)?,
            auth_base_url: parse_base_url(AUTH_BASE_URL, &auth)?,
            state_path: PathBuf::from(state_path),
        })
    }
}

/// Parses a base URL and makes sure its path ends with a slash
pub fn parse_base_url(name: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let raw = raw.trim();
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };

    Url::parse(&normalized).map_err(|e| ConfigError::InvalidUrl {
        name,
        reason: e.to_string(),
    })
}
