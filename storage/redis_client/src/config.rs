use secrecy::Secret;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct RedisConfig {
    /// May embed credentials, e.g. `redis://:password@host:6379`.
    pub url: Secret<String>,
}
