use secrecy::Secret;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize, Clone)]
pub struct WebhookConfig {
    pub url: Url,
    pub api_key: Secret<String>,
}

pub const DEFAULT_WEBHOOK_URL: &str = "https://poke.com/api/v1/inbound-sms/webhook";
