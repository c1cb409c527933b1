//! Projection of a sensor list into the card grid and the table.
//!
//! Both views are rebuilt from scratch on every render, in input order.
//! Every field has a display fallback so a render never fails.

use chrono::{DateTime, Local, NaiveDateTime};

use crate::models::Sensor;
use crate::renderer::colours::{status_colours, StatusColours};

pub const MISSING_VALUE: &str = "N/A";

#[derive(Debug, Clone, PartialEq)]
pub struct SensorCard {
    pub id: String,
    pub name: String,
    pub status: String,
    pub value: String,
    pub unit: String,
    pub kind: String,
    pub location: String,
    pub time: String,
    pub colours: StatusColours,
}

impl From<&Sensor> for SensorCard {
    fn from(sensor: &Sensor) -> Self {
        Self {
            id: sensor.id.clone(),
            name: sensor.name.clone(),
            status: sensor.status.to_string(),
            value: display_value(sensor.value),
            unit: sensor.unit.clone(),
            kind: display_type(&sensor.kind).to_uppercase(),
            location: sensor.location.clone(),
            time: display_timestamp(&sensor.timestamp),
            colours: status_colours(&sensor.status),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SensorRow {
    pub id: String,
    pub kind: String,
    pub value: String,
    pub unit: String,
    pub time: String,
    pub status: String,
    pub colours: StatusColours,
}

impl From<&Sensor> for SensorRow {
    fn from(sensor: &Sensor) -> Self {
        Self {
            id: sensor.id.clone(),
            kind: display_type(&sensor.kind),
            value: display_value(sensor.value),
            unit: sensor.unit.clone(),
            time: display_timestamp(&sensor.timestamp),
            status: sensor.status.to_string(),
            colours: status_colours(&sensor.status),
        }
    }
}

/// The two synchronized views of the latest successful cycle.
#[derive(Debug, Clone, Default)]
pub struct SensorViews {
    grid: Vec<SensorCard>,
    table: Vec<SensorRow>,
}

impl SensorViews {
    pub fn render(&mut self, sensors: &[Sensor]) {
        self.grid.clear();
        self.table.clear();
        self.grid.extend(sensors.iter().map(SensorCard::from));
        self.table.extend(sensors.iter().map(SensorRow::from));
    }

    pub fn grid(&self) -> &[SensorCard] {
        &self.grid
    }

    pub fn table(&self) -> &[SensorRow] {
        &self.table
    }
}

/// Formats a reading the way a browser prints a JSON number: plain digits
/// for 1e-6 <= |v| < 1e21, shortest exponent form (`1e+21`, `1.5e-7`) outside.
pub fn display_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v == 0.0 => "0".to_string(),
        Some(v) if v.is_finite() => {
            let magnitude = v.abs();
            if (1e-6..1e21).contains(&magnitude) {
                v.to_string()
            } else {
                exponent_form(v)
            }
        }
        _ => MISSING_VALUE.to_string(),
    }
}

fn exponent_form(v: f64) -> String {
    let formatted = format!("{:e}", v);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

/// `air_quality` -> `air quality`. Only the first underscore is replaced.
pub fn display_type(kind: &str) -> String {
    kind.replacen('_', " ", 1)
}

pub fn display_timestamp(timestamp: &str) -> String {
    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    if let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) {
        return parsed.with_timezone(&Local).format(FORMAT).to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format(FORMAT).to_string();
    }
    timestamp.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SensorStatus;
    use crate::renderer::colours::NEUTRAL;

    fn sensor(id: &str, value: Option<f64>, status: &str) -> Sensor {
        Sensor {
            id: id.to_string(),
            name: format!("{} name", id),
            kind: "air_quality".to_string(),
            value,
            unit: "AQI".to_string(),
            status: SensorStatus::from(status),
            location: "Kitchen".to_string(),
            timestamp: "2024-05-01T12:30:45.123456".to_string(),
        }
    }

    #[test]
    fn test_one_entry_per_sensor_in_order() {
        let sensors = vec![
            sensor("c", Some(1.0), "normal"),
            sensor("a", Some(2.0), "warning"),
            sensor("b", Some(3.0), "critical"),
        ];
        let mut views = SensorViews::default();
        views.render(&sensors);

        let grid_ids: Vec<&str> = views.grid().iter().map(|c| c.id.as_str()).collect();
        let table_ids: Vec<&str> = views.table().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(grid_ids, vec!["c", "a", "b"]);
        assert_eq!(table_ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_empty_list_clears_views() {
        let mut views = SensorViews::default();
        views.render(&[sensor("s1", Some(1.0), "normal")]);
        views.render(&[]);
        assert!(views.grid().is_empty());
        assert!(views.table().is_empty());
    }

    #[test]
    fn test_render_is_idempotent() {
        let sensors = vec![sensor("s1", Some(1.0), "normal"), sensor("s2", None, "error")];
        let mut once = SensorViews::default();
        once.render(&sensors);

        let mut twice = SensorViews::default();
        twice.render(&sensors);
        twice.render(&sensors);

        assert_eq!(once.grid(), twice.grid());
        assert_eq!(once.table(), twice.table());
    }

    #[test]
    fn test_missing_value_fallback() {
        let mut views = SensorViews::default();
        views.render(&[sensor("s1", Some(21.5), "normal"), sensor("s2", None, "error")]);

        assert_eq!(views.grid()[0].value, "21.5");
        assert_eq!(views.grid()[1].value, "N/A");
        assert_eq!(views.table()[1].value, "N/A");
        assert_eq!(display_value(Some(f64::NAN)), "N/A");
    }

    #[test]
    fn test_whole_numbers_have_no_trailing_zero() {
        assert_eq!(display_value(Some(22.0)), "22");
        assert_eq!(display_value(Some(-3.25)), "-3.25");
        assert_eq!(display_value(Some(-0.0)), "0");
    }

    #[test]
    fn test_extreme_magnitudes_use_exponent_form() {
        assert_eq!(display_value(Some(1e21)), "1e+21");
        assert_eq!(display_value(Some(1.25e22)), "1.25e+22");
        assert_eq!(display_value(Some(-1e21)), "-1e+21");
        assert_eq!(display_value(Some(1e-7)), "1e-7");
        assert_eq!(display_value(Some(1.5e-7)), "1.5e-7");
        assert_eq!(display_value(Some(0.000001)), "0.000001");
        assert_eq!(display_value(Some(1e20)), "100000000000000000000");
    }

    #[test]
    fn test_unknown_status_uses_neutral_colours_in_both_views() {
        let mut views = SensorViews::default();
        views.render(&[sensor("s1", Some(1.0), "rebooting")]);

        assert_eq!(views.grid()[0].colours, NEUTRAL);
        assert_eq!(views.table()[0].colours, NEUTRAL);
        assert_eq!(views.grid()[0].status, "rebooting");
    }

    #[test]
    fn test_type_labels() {
        let mut views = SensorViews::default();
        views.render(&[sensor("s1", Some(1.0), "normal")]);

        assert_eq!(views.grid()[0].kind, "AIR QUALITY");
        assert_eq!(views.table()[0].kind, "air quality");
        assert_eq!(display_type("a_b_c"), "a b_c");
    }

    #[test]
    fn test_timestamp_formatting() {
        assert_eq!(
            display_timestamp("2024-05-01T12:30:45.123456"),
            "2024-05-01 12:30:45"
        );
        assert_eq!(display_timestamp("2024-05-01T08:00:00"), "2024-05-01 08:00:00");
        assert_eq!(display_timestamp("yesterday"), "yesterday");
        assert_eq!(display_timestamp(""), "");
    }
}
