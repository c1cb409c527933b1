use crate::models::SensorBatch;
use std::future::Future;
use thiserror::Error;

mod envelope;
mod http;

pub use envelope::SensorEnvelope;
pub use http::HttpSensorClient;

/// Everything that can go wrong in one fetch. All variants are recoverable:
/// the next cycle simply tries again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("HTTP {status}: {reason}")]
    Transport { status: u16, reason: String },

    #[error("{0}")]
    Network(String),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("{0}")]
    Application(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Transport,
    Decode,
    Application,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Transport { .. } | FetchError::Network(_) => FetchErrorKind::Transport,
            FetchError::Decode(_) => FetchErrorKind::Decode,
            FetchError::Application(_) => FetchErrorKind::Application,
        }
    }

    /// Banner text shown to the user.
    pub fn user_message(&self) -> String {
        format!("Failed to load sensor data: {}", self)
    }
}

/// Source of sensor readings polled once per cycle.
pub trait SensorSource: Send + Sync + 'static {
    fn fetch_sensors(&self) -> impl Future<Output = Result<SensorBatch, FetchError>> + Send;
}
