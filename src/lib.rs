pub mod client;
pub mod config;
pub mod dashboard;
pub mod models;
pub mod renderer;
pub mod tui;

use anyhow::Context;
use log::{error, info};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::client::HttpSensorClient;
use crate::config::AppConfig;
use crate::dashboard::{Command, Dashboard};
use crate::renderer::SnapshotWriter;
use crate::tui::{widgets, InputReader, TerminalManager};

const INPUT_POLL_RATE: Duration = Duration::from_millis(100);

pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    info!("Starting application");

    let result = main_loop(&config).await;
    match result {
        Ok(_) => info!("Application completed successfully"),
        Err(e) => {
            error!("Application error: {e:#}");
            // Print chain of error causes
            let mut source = e.source();
            while let Some(e) = source {
                error!("Caused by: {e}");
                source = e.source();
            }
            return Err(e).context("Application failed to run");
        }
    }

    Ok(())
}

async fn main_loop(config: &AppConfig) -> anyhow::Result<()> {
    let source = HttpSensorClient::new(config.api.sensors_endpoint())?;
    info!(
        "Polling {} every {} ms",
        source.endpoint(),
        config.refresh.interval_ms
    );

    let snapshot = SnapshotWriter::from_config(&config.dashboard)
        .context("Failed to prepare dashboard snapshots")?;
    let dashboard = Dashboard::new(source, config.refresh.interval()).with_snapshot(snapshot);

    let (commands_tx, commands_rx) = mpsc::channel(32);
    if config.refresh.auto_start {
        commands_tx.send(Command::ToggleAutoRefresh).await?;
    }

    let mut terminal = TerminalManager::new().context("Failed to initialise terminal")?;
    let input = InputReader::spawn(commands_tx, INPUT_POLL_RATE);

    let result = dashboard::runtime::run(dashboard, commands_rx, |dashboard| {
        terminal
            .terminal_mut()
            .draw(|frame| widgets::draw(frame, dashboard))?;
        Ok(())
    })
    .await;

    // Stop reading input before handing the terminal back.
    drop(input);
    drop(terminal);

    result.map(|_| ())
}
