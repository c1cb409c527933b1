use chrono::Local;
use log::{debug, error, info};
use std::sync::Arc;
use std::time::Duration;

use crate::client::{FetchError, SensorSource};
use crate::models::SensorBatch;
use crate::renderer::SnapshotWriter;

mod presenter;
pub mod runtime;
mod scheduler;
pub mod view;

pub use presenter::{ConnectionStatus, StatusPresenter};
pub use runtime::Command;
pub use scheduler::{RefreshScheduler, SchedulerState, TimerAction};
pub use view::{SensorCard, SensorRow, SensorViews};

/// Snapshot of the controller's state for display and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerState {
    pub connection_status: ConnectionStatus,
    pub auto_refresh_enabled: bool,
    pub timer_armed: bool,
    pub refresh_interval: Duration,
}

/// The single dashboard instance. Built once at startup and handed to
/// [`runtime::run`], which returns it after teardown.
pub struct Dashboard<S> {
    source: Arc<S>,
    scheduler: RefreshScheduler,
    presenter: StatusPresenter,
    views: SensorViews,
    snapshot: Option<SnapshotWriter>,
    in_flight: usize,
}

impl<S: SensorSource> Dashboard<S> {
    pub fn new(source: S, refresh_interval: Duration) -> Self {
        Self {
            source: Arc::new(source),
            scheduler: RefreshScheduler::new(refresh_interval),
            presenter: StatusPresenter::default(),
            views: SensorViews::default(),
            snapshot: None,
            in_flight: 0,
        }
    }

    pub fn with_snapshot(mut self, snapshot: Option<SnapshotWriter>) -> Self {
        if let Some(writer) = &snapshot {
            info!("Dashboard snapshots enabled: {:?}", writer);
        }
        self.snapshot = snapshot;
        self
    }

    pub(crate) fn source(&self) -> Arc<S> {
        Arc::clone(&self.source)
    }

    /// Start of a cycle, before the request goes out.
    pub fn begin_cycle(&mut self) {
        self.in_flight += 1;
        debug!("Fetching sensor data ({} in flight)", self.in_flight);
        self.presenter.set_loading(true);
        self.presenter.set_error(None);
    }

    /// Applies the outcome of one cycle. Cycles are applied in completion
    /// order, so the last one to finish decides what is shown.
    pub fn complete_cycle(&mut self, result: Result<SensorBatch, FetchError>) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match result {
            Ok(batch) => {
                self.views.render(&batch.sensors);
                self.presenter
                    .set_connection_status(ConnectionStatus::Connected);
                self.presenter.mark_updated(Local::now());
                info!("Loaded {} sensors successfully", batch.reported_count());

                if let Some(writer) = &self.snapshot {
                    if let Err(e) = writer.write(self.views.grid()) {
                        error!("Failed to write dashboard snapshot: {e:#}");
                    }
                }
            }
            Err(e) => {
                error!("Error loading sensor data: {}", e);
                self.presenter.set_error(Some(e.user_message()));
                self.presenter
                    .set_connection_status(ConnectionStatus::Disconnected);
            }
        }

        self.presenter.set_loading(self.in_flight > 0);
    }

    pub fn toggle_auto_refresh(&mut self) -> TimerAction {
        self.scheduler.toggle()
    }

    pub fn hide(&mut self) -> TimerAction {
        self.scheduler.pause()
    }

    pub fn show(&mut self) -> TimerAction {
        self.scheduler.resume()
    }

    pub fn teardown(&mut self) -> TimerAction {
        self.scheduler.teardown()
    }

    pub fn state(&self) -> ControllerState {
        ControllerState {
            connection_status: self.presenter.connection(),
            auto_refresh_enabled: self.scheduler.is_enabled(),
            timer_armed: self.scheduler.is_armed(),
            refresh_interval: self.scheduler.interval(),
        }
    }

    pub fn auto_refresh_label(&self) -> &'static str {
        if self.scheduler.is_enabled() {
            "Auto Refresh: ON"
        } else {
            "Auto Refresh: OFF"
        }
    }

    pub fn scheduler(&self) -> &RefreshScheduler {
        &self.scheduler
    }

    pub fn presenter(&self) -> &StatusPresenter {
        &self.presenter
    }

    pub fn views(&self) -> &SensorViews {
        &self.views
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}
