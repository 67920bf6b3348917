mod config;

use crate::config::Settings;
use anyhow::{anyhow, Context};
use notifications::notify::WebhookNotifier;
use outage_monitor::check::OutageMonitor;
use outage_monitor::fetch_outages::PgeOutageSource;
use outage_monitor::place::PlaceName;
use redis_client::client::Client;
use redis_client::status_store::RedisStatusStore;
use shared_kernel::http_client::HttpClient;
use std::sync::Arc;

/// Runs a single check cycle. Scheduling is left to whatever invokes the binary.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shared_kernel::tracing::config_telemetry("power-outage-check")?;
    let result = start().await;
    if let Err(err) = &result {
        tracing::error!(error = ?err, "Error checking power outage");
    }
    shared_kernel::tracing::shutdown_global_tracer_provider();
    result
}

async fn start() -> anyhow::Result<()> {
    let settings = Settings::load()
        .context("Failed to load configuration")?;
    let place = PlaceName::try_from(settings.location.place).map_err(|err| anyhow!(err))?;

    let http_client = HttpClient::new(&settings.http)?;
    let redis = Client::connect(&settings.redis).await?;

    let source = PgeOutageSource::new(http_client.clone(), &settings.upstream)?;
    let store = RedisStatusStore::new(redis);
    let notifier = WebhookNotifier::new(http_client, settings.webhook);
    let monitor = OutageMonitor::new(place, Arc::new(source), Arc::new(store), Arc::new(notifier));

    let outcome = monitor.check().await?;

    tracing::info!(
        status_changed = outcome.status_changed,
        has_outage = outcome.current_status.has_outage,
        outage_count = outcome.current_status.outages.len(),
        "Check complete"
    );
    Ok(())
}
