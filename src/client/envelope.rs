use crate::client::FetchError;
use crate::models::{Sensor, SensorBatch};
use log::warn;
use serde::Deserialize;
use std::collections::HashSet;

const SUCCESS: &str = "success";

/// Top-level JSON object wrapping the sensor list.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorEnvelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub sensors: Option<Vec<Sensor>>,
    #[serde(default)]
    pub message: Option<String>,
}

impl SensorEnvelope {
    pub fn into_batch(self) -> Result<SensorBatch, FetchError> {
        if self.status.as_deref() != Some(SUCCESS) {
            let message = self
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Unknown API error".to_string());
            return Err(FetchError::Application(message));
        }

        let sensors = self.sensors.ok_or_else(|| {
            FetchError::Application("response did not include a sensor list".to_string())
        })?;

        let mut seen = HashSet::with_capacity(sensors.len());
        for sensor in &sensors {
            if !seen.insert(sensor.id.as_str()) {
                warn!("Duplicate sensor id {} in response", sensor.id);
            }
        }

        Ok(SensorBatch {
            sensors,
            count: self.count,
        })
    }
}
