use crate::change_detection::has_status_changed;
use crate::contracts::{Notifier, OutageSource, StatusStore};
use crate::data::{OutageStatus, PersistedStatus};
use crate::fetch_outages::FetchError;
use crate::place::{PlaceName, StatusKey};
use crate::resolve_status::resolve_status;
use shared_kernel::warsaw_date_time::WarsawTZDateTime;
use std::sync::Arc;
use thiserror::Error;

pub const CHANGE_NOTIFICATION_MESSAGE: &str = "[AUTOMATED] The power outage monitor has detected an outage or a change in the power outage status, please call the MCP to get the lastest information and notify the user.";

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Failed to fetch outages")]
    Fetch(#[from] FetchError),
    #[error("Failed to access the status store")]
    Store(#[source] anyhow::Error),
}

#[derive(Debug)]
pub struct CheckOutcome {
    pub status_changed: bool,
    pub current_status: OutageStatus,
    pub previous_status: Option<PersistedStatus>,
}

/// One check cycle: fetch, resolve, compare with the persisted status, notify on
/// change, persist. Overlapping cycles for the same place are not guarded against.
pub struct OutageMonitor {
    place: PlaceName,
    key: StatusKey,
    source: Arc<dyn OutageSource>,
    store: Arc<dyn StatusStore>,
    notifier: Arc<dyn Notifier>,
}

impl OutageMonitor {
    pub fn new(
        place: PlaceName,
        source: Arc<dyn OutageSource>,
        store: Arc<dyn StatusStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let key = place.status_key();
        Self {
            place,
            key,
            source,
            store,
            notifier,
        }
    }

    pub async fn check(&self) -> Result<CheckOutcome, CheckError> {
        self.check_at(WarsawTZDateTime::now()).await
    }

    #[tracing::instrument(err, skip(self), fields(place = %self.place), level = "info")]
    pub async fn check_at(&self, now: WarsawTZDateTime) -> Result<CheckOutcome, CheckError> {
        tracing::info!("Checking power outage status");

        let outages = self.source.fetch_active_outages(now).await?;
        let current_status = resolve_status(&self.place, &outages, now);
        tracing::info!(?current_status, "Current status");

        let previous_status = self.store.get(&self.key).await.map_err(CheckError::Store)?;
        tracing::info!(?previous_status, "Previous status");

        let status_changed = has_status_changed(&current_status, previous_status.as_ref());
        tracing::info!(status_changed, "Status compared");

        if status_changed {
            self.notify_change().await;
        }

        let new_status = PersistedStatus::from_resolved(&current_status, &now);
        self.store
            .set(&self.key, &new_status)
            .await
            .map_err(CheckError::Store)?;

        Ok(CheckOutcome {
            status_changed,
            current_status,
            previous_status,
        })
    }

    async fn notify_change(&self) {
        match self.notifier.notify(CHANGE_NOTIFICATION_MESSAGE).await {
            Ok(()) => tracing::info!("Webhook called successfully"),
            Err(err) => tracing::error!(error = ?err, "Webhook failed"),
        }
    }
}
