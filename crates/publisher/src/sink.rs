use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use storage::services::publication::{BroadcastSink, DeliveryError};

/// Posts the leaderboard text to the chat gateway, one request per
/// destination. Requests are time-bounded and never retried here; the
/// publication cycle records the failure and moves on.
pub struct HttpBroadcastSink {
    client: Client,
    endpoint: String,
}

impl HttpBroadcastSink {
    pub fn new(endpoint: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl BroadcastSink for HttpBroadcastSink {
    async fn send(&self, destination: &str, text: &str) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({
                "destination": destination,
                "text": text,
            }))
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    DeliveryError::Timeout
                } else {
                    DeliveryError::Transport(err.to_string())
                }
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(DeliveryError::Rejected(format!(
                "HTTP {}",
                response.status()
            )))
        }
    }
}
