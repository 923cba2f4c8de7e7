//! Client configuration and endpoint derivation.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use yard_map::MapConfig;

/// Where the game server lives and how long to wait for it.
///
/// Start from `ClientConfig::default()` and override what you need:
///
/// ```
/// let config = yard::ClientConfig::default().server_url("https://yard.example.com");
/// assert_eq!(config.ws_url(), "wss://yard.example.com/game/ws");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base HTTP(S) URL of the server, e.g. `http://localhost:8081`.
    /// A bare `host:port` is treated as plain HTTP.
    pub server_url: String,

    /// How long [`GameClient::request`](crate::GameClient::request) waits
    /// for an answer.
    ///
    /// Default: 10 seconds.
    pub request_timeout_secs: u64,

    /// Map view settings.
    pub map: MapConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8081".to_string(),
            request_timeout_secs: 10,
            map: MapConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Sets the server base URL.
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = url.into();
        self
    }

    /// Sets the request timeout in seconds.
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Sets the map view settings.
    pub fn map(mut self, map: MapConfig) -> Self {
        self.map = map;
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The game socket endpoint: `ws://host/game/ws`, or `wss://` when
    /// the server URL is `https://`.
    pub fn ws_url(&self) -> String {
        let (secure, host) = self.split();
        let scheme = if secure { "wss" } else { "ws" };
        format!("{scheme}://{host}/game/ws")
    }

    /// Endpoint serving the station list.
    pub fn stations_url(&self) -> String {
        self.http_url("/map/stations")
    }

    /// Endpoint serving the connection list.
    pub fn connections_url(&self) -> String {
        self.http_url("/map/connections")
    }

    fn http_url(&self, path: &str) -> String {
        let (secure, host) = self.split();
        let scheme = if secure { "https" } else { "http" };
        format!("{scheme}://{host}{path}")
    }

    /// Returns `(is_https, host[:port])` with any trailing slash dropped.
    fn split(&self) -> (bool, &str) {
        let url = self.server_url.trim();
        let (secure, rest) = if let Some(rest) = url.strip_prefix("https://") {
            (true, rest)
        } else if let Some(rest) = url.strip_prefix("http://") {
            (false, rest)
        } else {
            (false, url)
        };
        (secure, rest.trim_end_matches('/'))
    }
}
