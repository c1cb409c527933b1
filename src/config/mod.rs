use anyhow::{bail, Context, Result};
use config::{Config, File};
use log::{debug, info, LevelFilter};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_interval_ms() -> u64 {
    5000
}

fn default_snapshot_file() -> String {
    "dashboard.png".to_string()
}

fn default_snapshot_width() -> u32 {
    800
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "sensordash.log".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl ApiConfig {
    /// The single endpoint polled on every cycle.
    pub fn sensors_endpoint(&self) -> String {
        format!("{}/sensors", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default)]
    pub auto_start: bool,
}

impl RefreshConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default = "default_snapshot_file")]
    pub file: String,
    #[serde(default)]
    pub save_to_file: bool,
    #[serde(default = "default_snapshot_width")]
    pub width: u32,
    #[serde(default)]
    pub font: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_file")]
    pub file: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(rename = "API", alias = "api", default)]
    pub api: ApiConfig,
    #[serde(rename = "REFRESH", alias = "refresh", default)]
    pub refresh: RefreshConfig,
    #[serde(rename = "DASHBOARD", alias = "dashboard", default)]
    pub dashboard: DashboardConfig,
    #[serde(rename = "LOGGING", alias = "logging", default)]
    pub logging: LoggingConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            auto_start: false,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            file: default_snapshot_file(),
            save_to_file: false,
            width: default_snapshot_width(),
            font: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            refresh: RefreshConfig::default(),
            dashboard: DashboardConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        Self::from_file("config.ini")
    }

    pub fn get_log_level(&self) -> LevelFilter {
        match self.logging.level.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Info, // Default to Info if invalid
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_path = path.as_ref();
        debug!("Loading configuration from {}", config_path.display());

        let config = Config::builder()
            .add_source(File::from(config_path).format(config::FileFormat::Ini))
            .build()
            .context(format!("Failed to load config from {}", config_path.display()))?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize config")?;

        if app_config.refresh.interval_ms == 0 {
            bail!("REFRESH.interval_ms must be greater than zero");
        }

        Ok(app_config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config_path = path.as_ref();

        let mut config_str = String::new();

        config_str.push_str(&format!("[API]\nbase_url = {}\n\n", self.api.base_url));

        config_str.push_str(&format!(
            "[REFRESH]\ninterval_ms = {}\nauto_start = {}\n\n",
            self.refresh.interval_ms, self.refresh.auto_start
        ));

        config_str.push_str(&format!(
            "[DASHBOARD]\nfile = {}\nsave_to_file = {}\nwidth = {}\n",
            self.dashboard.file, self.dashboard.save_to_file, self.dashboard.width
        ));
        if let Some(font) = &self.dashboard.font {
            config_str.push_str(&format!("font = {}\n", font));
        }
        config_str.push('\n');

        config_str.push_str(&format!(
            "[LOGGING]\nlevel = {}\nfile = {}\n",
            self.logging.level, self.logging.file
        ));

        fs::write(config_path, config_str)
            .context(format!("Failed to save config to {}", config_path.display()))?;

        info!("Configuration saved to {}", config_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert_eq!(config.refresh.interval_ms, 5000);
        assert!(!config.refresh.auto_start);
        assert_eq!(config.dashboard.file, "dashboard.png");
        assert!(!config.dashboard.save_to_file);
        assert_eq!(config.dashboard.width, 800);
        assert!(config.dashboard.font.is_none());
        assert_eq!(config.logging.file, "sensordash.log");
        assert_eq!(config.get_log_level(), LevelFilter::Info);
    }

    #[test]
    fn test_from_file() {
        let temp_file = write_config(
            "[API]\nbase_url = http://sensors.local:8080/api/\n\n[REFRESH]\ninterval_ms = 2500\nauto_start = true\n\n[DASHBOARD]\nfile = snapshot.png\nsave_to_file = true\nwidth = 640\n\n[LOGGING]\nlevel = debug\nfile = test.log\n",
        );

        let config = AppConfig::from_file(temp_file.path()).unwrap();

        assert_eq!(config.api.base_url, "http://sensors.local:8080/api/");
        assert_eq!(
            config.api.sensors_endpoint(),
            "http://sensors.local:8080/api/sensors"
        );
        assert_eq!(config.refresh.interval(), Duration::from_millis(2500));
        assert!(config.refresh.auto_start);
        assert_eq!(config.dashboard.file, "snapshot.png");
        assert!(config.dashboard.save_to_file);
        assert_eq!(config.dashboard.width, 640);
        assert_eq!(config.logging.file, "test.log");
        assert_eq!(config.get_log_level(), LevelFilter::Debug);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let temp_file = write_config("[API]\nbase_url = http://10.0.0.2:5000/api\n");

        let config = AppConfig::from_file(temp_file.path()).unwrap();

        assert_eq!(config.api.sensors_endpoint(), "http://10.0.0.2:5000/api/sensors");
        assert_eq!(config.refresh.interval_ms, 5000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let temp_file = write_config("[REFRESH]\ninterval_ms = 0\n");

        assert!(AppConfig::from_file(temp_file.path()).is_err());
    }

    #[test]
    fn test_unknown_log_level_falls_back_to_info() {
        let mut config = AppConfig::default();
        config.logging.level = "chatty".to_string();
        assert_eq!(config.get_log_level(), LevelFilter::Info);
    }

    #[test]
    fn test_save_config() {
        let mut config = AppConfig::default();
        config.api.base_url = "http://127.0.0.1:9000/api".to_string();
        config.refresh.interval_ms = 1000;
        config.refresh.auto_start = true;
        config.dashboard.file = "saved.png".to_string();
        config.dashboard.save_to_file = true;
        config.dashboard.font = Some("/usr/share/fonts/DejaVuSansMono.ttf".to_string());
        config.logging.level = "warn".to_string();

        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        config.save(config_path).unwrap();

        let loaded_config = AppConfig::from_file(config_path).unwrap();

        assert_eq!(loaded_config.api.base_url, "http://127.0.0.1:9000/api");
        assert_eq!(loaded_config.refresh.interval_ms, 1000);
        assert!(loaded_config.refresh.auto_start);
        assert_eq!(loaded_config.dashboard.file, "saved.png");
        assert!(loaded_config.dashboard.save_to_file);
        assert_eq!(
            loaded_config.dashboard.font.as_deref(),
            Some("/usr/share/fonts/DejaVuSansMono.ttf")
        );
        assert_eq!(loaded_config.get_log_level(), LevelFilter::Warn);
    }
}
