//! Client configuration: where the server lives and how patient we are.
//!
//! Loaded from an optional TOML file and overridden by CLI flags. Defaults
//! point at a local dev server.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ClientError;

/// Default server address (the dev server listens on 8888).
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8888";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL of the game server's HTTP API.
    pub base_url: String,
    /// Websocket URL of the event socket. Derived from `base_url` when unset.
    pub socket_url: Option<String>,
    /// TCP connection timeout, seconds.
    pub connect_timeout_secs: u64,
    /// Per-request read timeout, seconds.
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            socket_url: None,
            connect_timeout_secs: 3,
            request_timeout_secs: 10,
        }
    }
}

impl ClientConfig {
    /// Load from a TOML file, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ClientError> {
        let Some(path) = path else {
            return Ok(ClientConfig::default());
        };
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ClientError::Config(format!("{}: {}", path.display(), e)))?;
        toml::from_str(&raw)
            .map_err(|e| ClientError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The event socket endpoint, derived from `base_url` unless overridden.
    pub fn socket_url(&self) -> String {
        if let Some(url) = &self.socket_url {
            return url.clone();
        }
        let base = self.base_url.trim_end_matches('/');
        let ws_base = if let Some(rest) = base.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = base.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            base.to_string()
        };
        format!("{}/socket", ws_base)
    }
}
