use notifications::config::{WebhookConfig, DEFAULT_WEBHOOK_URL};
use outage_monitor::config::{LocationSettings, UpstreamSettings, DEFAULT_UPSTREAM_HOST};
use redis_client::config::RedisConfig;
use serde::Deserialize;
use shared_kernel::configuration::ConfigError;
use shared_kernel::http_client::HttpClientSettings;

/// Only `location.place`, `redis.url` and `webhook.api_key` have to be supplied.
const DEFAULTS: &[(&str, &str)] = &[
    ("upstream.host", DEFAULT_UPSTREAM_HOST),
    ("http.timeout_secs", "10"),
    ("webhook.url", DEFAULT_WEBHOOK_URL),
];

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub location: LocationSettings,
    pub upstream: UpstreamSettings,
    pub http: HttpClientSettings,
    pub redis: RedisConfig,
    pub webhook: WebhookConfig,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        shared_kernel::configuration::config(DEFAULTS)
    }
}
