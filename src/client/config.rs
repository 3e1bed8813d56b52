//! Client configuration with environment fallbacks.

use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_ROOT_PATH: &str = "/api";
pub const DEFAULT_API_KEY_HEADER: &str = "X-Api-Key";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for reaching the server root document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Server base URL, e.g. `https://deploy.example.com`.
    pub base_url: Option<String>,
    /// Path of the root document relative to `base_url`.
    pub root_path: String,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub api_key_header: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            root_path: DEFAULT_ROOT_PATH.to_string(),
            api_key: None,
            api_key_header: DEFAULT_API_KEY_HEADER.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with environment variables:
    /// - `SERVER_CAPS_URL`
    /// - `SERVER_CAPS_API_KEY`
    /// - `SERVER_CAPS_HTTP_TIMEOUT_SECS` (default 30)
    pub fn from_env() -> Self {
        Self {
            base_url: non_empty_var("SERVER_CAPS_URL"),
            api_key: non_empty_var("SERVER_CAPS_API_KEY"),
            timeout_secs: env::var("SERVER_CAPS_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ..Self::default()
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}
