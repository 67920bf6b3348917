use crate::config::WebhookConfig;
use async_trait::async_trait;
use outage_monitor::contracts::{Notifier, NotifyError};
use secrecy::ExposeSecret;
use serde::Serialize;
use shared_kernel::http_client::{HttpClient, HttpClientError};
use std::collections::HashMap;

#[derive(Serialize)]
struct WebhookMessage<'a> {
    message: &'a str,
}

/// Delivers notifications to an inbound webhook authenticated with a bearer token.
pub struct WebhookNotifier {
    client: HttpClient,
    config: WebhookConfig,
}

impl WebhookNotifier {
    pub fn new(client: HttpClient, config: WebhookConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    #[tracing::instrument(err, skip(self), level = "info")]
    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        let auth_token = self.config.api_key.expose_secret();
        let bearer_token = format!("Bearer {auth_token}");
        let headers = HashMap::from([("Authorization", bearer_token)]);

        let body = serde_json::to_value(WebhookMessage { message })
            .map_err(|err| NotifyError::Request(err.into()))?;

        self.client
            .post_json(self.config.url.clone(), headers, &body)
            .await
            .map_err(|err| match err {
                HttpClientError::UnexpectedStatus(status) => {
                    NotifyError::UnexpectedStatus(status.as_u16())
                }
                err => NotifyError::Request(err.into()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::WebhookNotifier;
    use crate::config::WebhookConfig;
    use httpmock::prelude::*;
    use outage_monitor::contracts::{Notifier, NotifyError};
    use secrecy::Secret;
    use serde_json::json;
    use std::time::Duration;
    use shared_kernel::http_client::{HttpClient, HttpClientSettings};
    use url::Url;

    fn notifier(server: &MockServer) -> WebhookNotifier {
        notifier_with_timeout(server, 5)
    }

    fn notifier_with_timeout(server: &MockServer, timeout_secs: u64) -> WebhookNotifier {
        let client = HttpClient::new(&HttpClientSettings { timeout_secs }).unwrap();
        WebhookNotifier::new(
            client,
            WebhookConfig {
                url: Url::parse(&server.url("/api/v1/inbound-sms/webhook")).unwrap(),
                api_key: Secret::new("poke-key".to_string()),
            },
        )
    }

    #[tokio::test]
    async fn test_message_is_posted_with_the_bearer_credential() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/v1/inbound-sms/webhook")
                    .header("Authorization", "Bearer poke-key")
                    .header("content-type", "application/json")
                    .json_body(json!({ "message": "status changed" }));
                then.status(200).json_body(json!({ "success": true }));
            })
            .await;

        let result = notifier(&server).notify("status changed").await;

        mock.assert_async().await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_non_success_status_is_a_notify_error() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/v1/inbound-sms/webhook");
                then.status(401);
            })
            .await;

        let result = notifier(&server).notify("status changed").await;

        mock.assert_async().await;
        assert!(matches!(result, Err(NotifyError::UnexpectedStatus(401))));
    }

    #[tokio::test]
    async fn test_unreachable_webhook_is_a_notify_error() {
        let client = HttpClient::new(&HttpClientSettings { timeout_secs: 1 }).unwrap();
        let notifier = WebhookNotifier::new(
            client,
            WebhookConfig {
                url: Url::parse("http://127.0.0.1:9/webhook").unwrap(),
                api_key: Secret::new("poke-key".to_string()),
            },
        );

        let result = notifier.notify("status changed").await;

        assert!(matches!(result, Err(NotifyError::Request(_))));
    }

    #[tokio::test]
    async fn test_hung_webhook_times_out_as_a_request_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/v1/inbound-sms/webhook");
                then.status(200).delay(Duration::from_secs(3));
            })
            .await;

        let result = notifier_with_timeout(&server, 1)
            .notify("status changed")
            .await;

        assert!(matches!(result, Err(NotifyError::Request(_))));
    }
}
