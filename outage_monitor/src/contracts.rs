use crate::data::{Outage, PersistedStatus};
use crate::fetch_outages::FetchError;
use crate::place::StatusKey;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use shared_kernel::warsaw_date_time::WarsawTZDateTime;
use thiserror::Error;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait OutageSource: Send + Sync {
    /// Outages that start before the end of `now`'s day and have not stopped yet.
    async fn fetch_active_outages(&self, now: WarsawTZDateTime)
        -> Result<Vec<Outage>, FetchError>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait StatusStore: Send + Sync {
    async fn get(&self, key: &StatusKey) -> anyhow::Result<Option<PersistedStatus>>;

    async fn set(&self, key: &StatusKey, status: &PersistedStatus) -> anyhow::Result<()>;
}

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Webhook failed with status {0}")]
    UnexpectedStatus(u16),
    #[error("Webhook error")]
    Request(#[source] anyhow::Error),
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str) -> Result<(), NotifyError>;
}
