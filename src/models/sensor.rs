use serde::{Deserialize, Deserializer};
use std::fmt;

/// Reported health of a single sensor. Anything the API sends outside the
/// four known tags is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum SensorStatus {
    Normal,
    Warning,
    Critical,
    Error,
    Other(String),
}

impl From<String> for SensorStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "normal" => SensorStatus::Normal,
            "warning" => SensorStatus::Warning,
            "critical" => SensorStatus::Critical,
            "error" => SensorStatus::Error,
            _ => SensorStatus::Other(value),
        }
    }
}

impl From<&str> for SensorStatus {
    fn from(value: &str) -> Self {
        SensorStatus::from(value.to_string())
    }
}

impl Default for SensorStatus {
    fn default() -> Self {
        SensorStatus::Other("unknown".to_string())
    }
}

impl SensorStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SensorStatus::Normal => "normal",
            SensorStatus::Warning => "warning",
            SensorStatus::Critical => "critical",
            SensorStatus::Error => "error",
            SensorStatus::Other(raw) => raw,
        }
    }
}

impl fmt::Display for SensorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// A key sent as `null` gets the same fallback as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One reading as returned by `GET {base}/sensors`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Sensor {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: SensorStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: String,
}

/// The sensor list of one successful cycle, plus the count the server
/// reported alongside it (informational only).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorBatch {
    pub sensors: Vec<Sensor>,
    pub count: Option<u64>,
}

impl SensorBatch {
    pub fn reported_count(&self) -> u64 {
        self.count.unwrap_or(self.sensors.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_full_sensor() {
        let sensor: Sensor = serde_json::from_value(json!({
            "id": "TEMP_001",
            "name": "Living Room Temperature",
            "type": "temperature",
            "value": 21.5,
            "unit": "°C",
            "status": "normal",
            "location": "Living Room",
            "timestamp": "2024-05-01T12:30:00.123456"
        }))
        .unwrap();

        assert_eq!(sensor.id, "TEMP_001");
        assert_eq!(sensor.kind, "temperature");
        assert_eq!(sensor.value, Some(21.5));
        assert_eq!(sensor.status, SensorStatus::Normal);
    }

    #[test]
    fn test_null_and_missing_fields() {
        let sensor: Sensor = serde_json::from_value(json!({
            "id": "AQ_001",
            "value": null
        }))
        .unwrap();

        assert_eq!(sensor.value, None);
        assert_eq!(sensor.name, "");
        assert_eq!(sensor.status.as_str(), "unknown");
    }

    #[test]
    fn test_null_display_fields_fall_back() {
        let sensor: Sensor = serde_json::from_value(json!({
            "id": "HUM_002",
            "name": null,
            "type": null,
            "value": 48.0,
            "unit": null,
            "status": null,
            "location": null,
            "timestamp": null
        }))
        .unwrap();

        assert_eq!(sensor.name, "");
        assert_eq!(sensor.kind, "");
        assert_eq!(sensor.unit, "");
        assert_eq!(sensor.location, "");
        assert_eq!(sensor.timestamp, "");
        assert_eq!(sensor.status, SensorStatus::default());
        assert_eq!(sensor.value, Some(48.0));
    }

    #[test]
    fn test_unrecognized_status_is_preserved() {
        let sensor: Sensor = serde_json::from_value(json!({
            "id": "PRES_001",
            "status": "offline"
        }))
        .unwrap();

        assert_eq!(sensor.status, SensorStatus::Other("offline".to_string()));
        assert_eq!(sensor.status.to_string(), "offline");
    }

    #[test]
    fn test_reported_count_falls_back_to_len() {
        let batch = SensorBatch {
            sensors: Vec::new(),
            count: None,
        };
        assert_eq!(batch.reported_count(), 0);

        let batch = SensorBatch {
            sensors: Vec::new(),
            count: Some(6),
        };
        assert_eq!(batch.reported_count(), 6);
    }
}
