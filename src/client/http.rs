use crate::client::{FetchError, SensorEnvelope, SensorSource};
use crate::models::SensorBatch;
use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;
use std::error::Error as StdError;
use std::time::{Duration, Instant};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Polls `GET {base}/sensors`. One request per call, no retries.
#[derive(Debug, Clone)]
pub struct HttpSensorClient {
    client: Client,
    endpoint: String,
}

impl HttpSensorClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(format!("sensordash/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn get(&self) -> Result<SensorBatch, FetchError> {
        let start = Instant::now();

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| FetchError::Network(error_chain(&e)))?;

        let status = response.status();
        debug!("GET {} -> {}", self.endpoint, status);

        if !status.is_success() {
            return Err(FetchError::Transport {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(error_chain(&e)))?;

        let envelope: SensorEnvelope =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

        debug!("fetch_sensors took: {} ms", start.elapsed().as_millis());

        envelope.into_batch()
    }
}

impl SensorSource for HttpSensorClient {
    async fn fetch_sensors(&self) -> Result<SensorBatch, FetchError> {
        self.get().await
    }
}

// reqwest keeps the useful part ("connection refused", "dns error") in the source chain.
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
