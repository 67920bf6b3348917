use crate::config::UpstreamSettings;
use crate::contracts::OutageSource;
use crate::data::Outage;
use async_trait::async_trait;
use shared_kernel::http_client::{HttpClient, HttpClientError};
use shared_kernel::warsaw_date_time::WarsawTZDateTime;
use thiserror::Error;
use url::Url;

const OUTAGES_PATH: &str = "/api/power-outage";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("API error: {0}")]
    UnexpectedStatus(u16),
    #[error("Failed to reach the outage API")]
    Request(#[source] HttpClientError),
    #[error("Failed to decode the outage API response")]
    Decode(#[source] HttpClientError),
    #[error("Invalid outage API url")]
    InvalidUrl(#[from] url::ParseError),
}

impl From<HttpClientError> for FetchError {
    fn from(err: HttpClientError) -> Self {
        match err {
            HttpClientError::UnexpectedStatus(status) => FetchError::UnexpectedStatus(status.as_u16()),
            HttpClientError::Decode(_) => FetchError::Decode(err),
            err => FetchError::Request(err),
        }
    }
}

/// Bounds sent to the outage API, both in Warsaw wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryWindow {
    /// Outages that start before the end of the current day.
    pub start_at_to: String,
    /// Outages that have not stopped yet.
    pub stop_at_from: String,
}

impl QueryWindow {
    pub fn for_instant(now: &WarsawTZDateTime) -> Self {
        Self {
            start_at_to: now.end_of_day().format_query(),
            stop_at_from: now.format_query(),
        }
    }

    fn apply(&self, url: &mut Url) {
        url.query_pairs_mut()
            .append_pair("startAtTo", &self.start_at_to)
            .append_pair("stopAtFrom", &self.stop_at_from);
    }
}

pub struct PgeOutageSource {
    client: HttpClient,
    url: Url,
}

impl PgeOutageSource {
    pub fn new(client: HttpClient, settings: &UpstreamSettings) -> Result<Self, FetchError> {
        let url = settings.host.join(OUTAGES_PATH)?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl OutageSource for PgeOutageSource {
    #[tracing::instrument(err, skip(self), level = "info")]
    async fn fetch_active_outages(
        &self,
        now: WarsawTZDateTime,
    ) -> Result<Vec<Outage>, FetchError> {
        let window = QueryWindow::for_instant(&now);
        let mut url = self.url.clone();
        window.apply(&mut url);

        let outages = self.client.get_json::<Vec<Outage>>(url).await?;
        tracing::debug!(count = outages.len(), "Fetched outages");
        Ok(outages)
    }
}

#[cfg(test)]
mod tests {
    use super::{FetchError, PgeOutageSource, QueryWindow};
    use crate::config::UpstreamSettings;
    use crate::contracts::OutageSource;
    use chrono::NaiveDate;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::time::Duration;
    use shared_kernel::http_client::{HttpClient, HttpClientSettings};
    use shared_kernel::warsaw_date_time::WarsawTZDateTime;
    use url::Url;

    fn warsaw(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> WarsawTZDateTime {
        let naive = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .unwrap();
        WarsawTZDateTime::try_from(naive).unwrap()
    }

    fn source(server: &MockServer) -> PgeOutageSource {
        source_with_timeout(server, 5)
    }

    fn source_with_timeout(server: &MockServer, timeout_secs: u64) -> PgeOutageSource {
        let client = HttpClient::new(&HttpClientSettings { timeout_secs }).unwrap();
        let settings = UpstreamSettings {
            host: Url::parse(&server.base_url()).unwrap(),
        };
        PgeOutageSource::new(client, &settings).unwrap()
    }

    #[test]
    fn test_query_window_spans_now_until_the_end_of_the_warsaw_day() {
        let window = QueryWindow::for_instant(&warsaw(2024, 1, 10, 10, 5));
        assert_eq!(
            window,
            QueryWindow {
                start_at_to: "2024-01-10 23:59:59".to_string(),
                stop_at_from: "2024-01-10 10:05:00".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_outages_are_requested_with_the_query_window() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/power-outage")
                    .query_param("startAtTo", "2024-01-10 23:59:59")
                    .query_param("stopAtFrom", "2024-01-10 10:05:00");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!([{
                        "id": 42,
                        "regionName": "Warszawa Centrum",
                        "description": "Planowane prace",
                        "startAt": "2024-01-10 08:00:00",
                        "stopAt": "2024-01-10 14:00:00",
                        "revoked": false,
                        "addresses": []
                    }]));
            })
            .await;

        let outages = source(&server)
            .fetch_active_outages(warsaw(2024, 1, 10, 10, 5))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(outages.len(), 1);
        assert_eq!(outages[0].id, 42);
    }

    #[tokio::test]
    async fn test_non_success_status_is_a_fetch_error_carrying_the_status() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/power-outage");
                then.status(500);
            })
            .await;

        let result = source(&server)
            .fetch_active_outages(warsaw(2024, 1, 10, 10, 5))
            .await;

        mock.assert_async().await;
        assert!(matches!(result, Err(FetchError::UnexpectedStatus(500))));
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_decode_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/power-outage");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({ "message": "not a list" }));
            })
            .await;

        let result = source(&server)
            .fetch_active_outages(warsaw(2024, 1, 10, 10, 5))
            .await;

        assert!(matches!(result, Err(FetchError::Decode(_))));
    }

    #[tokio::test]
    async fn test_hung_upstream_times_out_as_a_request_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/power-outage");
                then.status(200)
                    .delay(Duration::from_secs(3))
                    .json_body(json!([]));
            })
            .await;

        let result = source_with_timeout(&server, 1)
            .fetch_active_outages(warsaw(2024, 1, 10, 10, 5))
            .await;

        assert!(matches!(result, Err(FetchError::Request(_))));
    }
}
