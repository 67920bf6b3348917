use crate::contracts::OutageSource;
use crate::data::OutageStatus;
use crate::fetch_outages::FetchError;
use crate::place::PlaceName;
use crate::resolve_status::resolve_status;
use shared_kernel::warsaw_date_time::WarsawTZDateTime;
use std::sync::Arc;

/// Read-only lookup of the current status. Never touches the status store or the notifier.
#[derive(Clone)]
pub struct OutageStatusQuery {
    place: PlaceName,
    source: Arc<dyn OutageSource>,
}

impl OutageStatusQuery {
    pub fn new(place: PlaceName, source: Arc<dyn OutageSource>) -> Self {
        Self { place, source }
    }

    pub fn place(&self) -> &PlaceName {
        &self.place
    }

    pub async fn current_status(&self) -> Result<OutageStatus, FetchError> {
        self.current_status_at(WarsawTZDateTime::now()).await
    }

    #[tracing::instrument(err, skip(self), fields(place = %self.place), level = "info")]
    pub async fn current_status_at(
        &self,
        now: WarsawTZDateTime,
    ) -> Result<OutageStatus, FetchError> {
        let outages = self.source.fetch_active_outages(now).await?;
        Ok(resolve_status(&self.place, &outages, now))
    }
}
