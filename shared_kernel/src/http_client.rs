use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error as ThisError;
use url::Url;

#[derive(Debug, Deserialize, Clone)]
pub struct HttpClientSettings {
    pub timeout_secs: u64,
}

impl HttpClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Shared outbound client. Requests are traced and bounded by the configured timeout.
/// Nothing is retried.
#[derive(Clone)]
pub struct HttpClient {
    client: ClientWithMiddleware,
}

#[derive(ThisError, Debug)]
pub enum HttpClientError {
    #[error("Unexpected response status {0}")]
    UnexpectedStatus(StatusCode),
    #[error("Failed to send request")]
    Request(#[source] reqwest_middleware::Error),
    #[error("Failed to deserialize response")]
    Decode(#[source] reqwest::Error),
    #[error("Failed to serialize request body")]
    Encode(#[source] serde_json::Error),
    #[error("httpBuilderError {0}")]
    HTTPBuilderError(String),
}

struct HeadersMapGenerator(HeaderMap);

impl HeadersMapGenerator {
    fn into_inner(self) -> HeaderMap {
        self.0
    }
}

impl TryFrom<HashMap<&'static str, String>> for HeadersMapGenerator {
    type Error = HttpClientError;

    fn try_from(value: HashMap<&'static str, String>) -> Result<Self, Self::Error> {
        let mut header_map = HeaderMap::new();

        for (key, value) in value.into_iter() {
            // Header values may carry credentials, so only the key is reported.
            let value = HeaderValue::from_str(&value)
                .map_err(|err| HttpClientError::HTTPBuilderError(format!("{err} for {key}")))?;
            header_map.insert(key, value);
        }
        Ok(Self(header_map))
    }
}

impl HttpClient {
    pub fn new(settings: &HttpClientSettings) -> Result<Self, HttpClientError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|err| HttpClientError::HTTPBuilderError(err.to_string()))?;
        let client = ClientBuilder::new(client)
            .with(TracingMiddleware::default())
            .build();
        Ok(Self { client })
    }

    fn ensure_success(response: Response) -> Result<Response, HttpClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(HttpClientError::UnexpectedStatus(status))
        }
    }

    pub async fn get_json<DTO: DeserializeOwned>(&self, url: Url) -> Result<DTO, HttpClientError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(HttpClientError::Request)?;
        Self::ensure_success(response)?
            .json::<DTO>()
            .await
            .map_err(HttpClientError::Decode)
    }

    /// Posts `body` as JSON. Only the status of the response is inspected.
    pub async fn post_json(
        &self,
        url: Url,
        headers: HashMap<&'static str, String>,
        body: &Value,
    ) -> Result<(), HttpClientError> {
        let generator = HeadersMapGenerator::try_from(headers)?;
        let mut header_map = generator.into_inner();
        header_map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let body = serde_json::to_vec(body).map_err(HttpClientError::Encode)?;
        let response = self
            .client
            .post(url)
            .headers(header_map)
            .body(body)
            .send()
            .await
            .map_err(HttpClientError::Request)?;
        Self::ensure_success(response).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::{HttpClient, HttpClientError, HttpClientSettings};
    use httpmock::prelude::*;
    use serde_json::json;
    use std::collections::HashMap;
    use url::Url;

    fn client() -> HttpClient {
        HttpClient::new(&HttpClientSettings { timeout_secs: 5 }).unwrap()
    }

    #[tokio::test]
    async fn test_non_success_status_is_reported_with_the_status_code() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/items");
                then.status(503);
            })
            .await;

        let url = Url::parse(&server.url("/items")).unwrap();
        let result = client().get_json::<Vec<u32>>(url).await;

        mock.assert_async().await;
        match result {
            Err(HttpClientError::UnexpectedStatus(status)) => assert_eq!(status.as_u16(), 503),
            other => panic!("expected an unexpected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_post_json_sends_headers_and_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/hook")
                    .header("Authorization", "Bearer secret")
                    .header("content-type", "application/json")
                    .json_body(json!({ "message": "hello" }));
                then.status(200);
            })
            .await;

        let url = Url::parse(&server.url("/hook")).unwrap();
        let headers = HashMap::from([("Authorization", "Bearer secret".to_string())]);
        let result = client()
            .post_json(url, headers, &json!({ "message": "hello" }))
            .await;

        mock.assert_async().await;
        assert!(result.is_ok());
    }
}
