use crate::client::Client;
use anyhow::Context;
use async_trait::async_trait;
use outage_monitor::contracts::StatusStore;
use outage_monitor::data::PersistedStatus;
use outage_monitor::place::StatusKey;

/// Persists the last status as a JSON string under its key, without expiry.
pub struct RedisStatusStore {
    client: Client,
}

impl RedisStatusStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

fn decode(key: &StatusKey, raw: Option<String>) -> anyhow::Result<Option<PersistedStatus>> {
    raw.map(|raw| {
        serde_json::from_str::<PersistedStatus>(&raw)
            .with_context(|| format!("Stored status for key {key} is not valid"))
    })
    .transpose()
}

#[async_trait]
impl StatusStore for RedisStatusStore {
    #[tracing::instrument(err, skip(self), level = "debug")]
    async fn get(&self, key: &StatusKey) -> anyhow::Result<Option<PersistedStatus>> {
        let mut conn = self.client.connection();
        let raw: Option<String> = redis::Cmd::get(key.as_ref())
            .query_async(&mut conn)
            .await
            .with_context(|| format!("Failed to get status for key {key}"))?;
        decode(key, raw)
    }

    #[tracing::instrument(err, skip(self, status), level = "debug")]
    async fn set(&self, key: &StatusKey, status: &PersistedStatus) -> anyhow::Result<()> {
        let value = serde_json::to_string(status).context("Failed to serialize status")?;
        let mut conn = self.client.connection();
        redis::Cmd::set(key.as_ref(), value)
            .query_async::<_, ()>(&mut conn)
            .await
            .with_context(|| format!("Failed to set status for key {key}"))
    }
}
