use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize, Clone)]
pub struct LocationSettings {
    pub place: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamSettings {
    pub host: Url,
}

pub const DEFAULT_UPSTREAM_HOST: &str = "https://power-outage.gkpge.pl";
