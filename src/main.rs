use anyhow::Context;
use env_logger::{Builder, Target, WriteStyle};
use log::error;
use sensordash::config::AppConfig;
use std::fs::OpenOptions;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load configuration first (without logging)
    let config = AppConfig::new().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {:#}", e);
        // Fall back to default configuration
        AppConfig::default()
    });

    // The terminal belongs to the dashboard, so logs go to a file.
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.logging.file)
        .context(format!("Failed to open log file {}", config.logging.file))?;

    Builder::new()
        .filter_level(config.get_log_level())
        .write_style(WriteStyle::Never)
        .format_timestamp_secs()
        .target(Target::Pipe(Box::new(log_file)))
        .init();

    if let Err(e) = sensordash::run(config).await {
        error!("Application error: {:#}", e);
        return Err(e);
    }
    Ok(())
}
