//! Host loop binding the dashboard to tokio: commands, the refresh timer
//! and completed cycles are the only event sources.

use anyhow::Result;
use log::{debug, info};
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use crate::client::{FetchError, SensorSource};
use crate::dashboard::{Dashboard, TimerAction};
use crate::models::SensorBatch;

type CycleResult = Result<SensorBatch, FetchError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Refresh,
    ToggleAutoRefresh,
    Hide,
    Show,
    /// Nothing changed but the screen must be drawn again (e.g. resize).
    Redraw,
    Quit,
}

/// The armed timer, if any. Only touched through [`TimerAction`]s.
#[derive(Default)]
struct RefreshTimer {
    interval: Option<Interval>,
}

impl RefreshTimer {
    fn apply(&mut self, action: TimerAction) {
        match action {
            TimerAction::Arm(period) => {
                // First tick one full period after arming.
                let mut interval = interval_at(Instant::now() + period, period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                self.interval = Some(interval);
            }
            TimerAction::Disarm => self.interval = None,
            TimerAction::None => {}
        }
    }

    fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

/// Runs until `Quit` arrives or the command channel closes. One manual
/// cycle is started immediately. `redraw` is called before every wait.
pub async fn run<S, F>(
    mut dashboard: Dashboard<S>,
    mut commands: mpsc::Receiver<Command>,
    mut redraw: F,
) -> Result<Dashboard<S>>
where
    S: SensorSource,
    F: FnMut(&Dashboard<S>) -> Result<()>,
{
    let (cycle_tx, mut cycle_rx) = mpsc::unbounded_channel::<CycleResult>();
    let mut timer = RefreshTimer::default();

    start_cycle(&mut dashboard, &cycle_tx);

    loop {
        redraw(&dashboard)?;

        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Refresh) => start_cycle(&mut dashboard, &cycle_tx),
                Some(Command::ToggleAutoRefresh) => timer.apply(dashboard.toggle_auto_refresh()),
                Some(Command::Hide) => timer.apply(dashboard.hide()),
                Some(Command::Show) => timer.apply(dashboard.show()),
                Some(Command::Redraw) => {}
                Some(Command::Quit) | None => break,
            },
            _ = timer.tick() => {
                debug!("Auto-refresh tick");
                start_cycle(&mut dashboard, &cycle_tx);
            }
            Some(result) = cycle_rx.recv() => dashboard.complete_cycle(result),
        }

        debug_assert_eq!(timer.is_armed(), dashboard.scheduler().is_armed());
    }

    // In-flight fetches are not aborted; their results land in a dropped channel.
    timer.apply(dashboard.teardown());
    info!("Dashboard stopped");
    Ok(dashboard)
}

fn start_cycle<S: SensorSource>(
    dashboard: &mut Dashboard<S>,
    cycle_tx: &mpsc::UnboundedSender<CycleResult>,
) {
    dashboard.begin_cycle();
    let source = dashboard.source();
    let cycle_tx = cycle_tx.clone();
    tokio::spawn(async move {
        let result = source.fetch_sensors().await;
        let _ = cycle_tx.send(result);
    });
}
