use outage_monitor::config::{LocationSettings, UpstreamSettings, DEFAULT_UPSTREAM_HOST};
use serde::Deserialize;
use shared_kernel::configuration::ConfigError;
use shared_kernel::http_client::HttpClientSettings;

/// Only `location.place` has to be supplied.
const DEFAULTS: &[(&str, &str)] = &[
    ("upstream.host", DEFAULT_UPSTREAM_HOST),
    ("http.timeout_secs", "10"),
    ("server.host", "0.0.0.0"),
    ("server.port", "8080"),
];

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub location: LocationSettings,
    pub upstream: UpstreamSettings,
    pub http: HttpClientSettings,
    pub server: ServerSettings,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        shared_kernel::configuration::config(DEFAULTS)
    }
}
