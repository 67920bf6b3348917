use crate::app_container::Application;
use crate::config::Settings;
use actix_web::{web, App, HttpServer};
use anyhow::{anyhow, Context};
use outage_monitor::fetch_outages::PgeOutageSource;
use outage_monitor::place::PlaceName;
use outage_monitor::query::OutageStatusQuery;
use shared_kernel::http_client::HttpClient;
use std::sync::Arc;
use std::time::Duration;
use tracing_actix_web::TracingLogger;

mod app_container;
mod config;
mod errors;
mod routes;
mod sessions;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shared_kernel::tracing::config_telemetry("power-outage-mcp")?;
    let result = start().await;
    if let Err(err) = &result {
        tracing::error!(error = ?err, "Server stopped with an error");
    }
    shared_kernel::tracing::shutdown_global_tracer_provider();
    result
}

async fn start() -> anyhow::Result<()> {
    let settings = Settings::load()
        .context("Failed to load configuration")?;
    let place = PlaceName::try_from(settings.location.place).map_err(|err| anyhow!(err))?;

    let http_client = HttpClient::new(&settings.http)?;
    let source = PgeOutageSource::new(http_client, &settings.upstream)?;
    let application = web::Data::new(Application::new(OutageStatusQuery::new(
        place,
        Arc::new(source),
    )));

    tracing::info!(
        place = %application.query.place(),
        host = %settings.server.host,
        port = settings.server.port,
        "MCP server listening"
    );

    HttpServer::new(move || {
        App::new()
            .wrap(routes::cors())
            .wrap(TracingLogger::default())
            .app_data(application.clone())
            .configure(routes::config)
    })
    .keep_alive(Duration::from_secs(10))
    .bind((settings.server.host.as_str(), settings.server.port))?
    .run()
    .await
    .context("Server failed to run")
}
