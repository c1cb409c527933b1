//! Auto-refresh state machine.
//!
//! The scheduler owns no timer. Each transition returns the [`TimerAction`]
//! the host loop must apply, so the logic runs the same with a real
//! `tokio` interval or in a unit test.

use log::info;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Stopped,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    Arm(Duration),
    Disarm,
    None,
}

/// `enabled` is the user's intent; `armed` is whether a timer exists.
/// Hiding the view disarms without touching intent.
#[derive(Debug, Clone)]
pub struct RefreshScheduler {
    interval: Duration,
    enabled: bool,
    visible: bool,
    armed: bool,
}

impl RefreshScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            enabled: false,
            visible: true,
            armed: false,
        }
    }

    pub fn state(&self) -> SchedulerState {
        if self.armed {
            SchedulerState::Running
        } else {
            SchedulerState::Stopped
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn enable(&mut self) -> TimerAction {
        self.enabled = true;
        info!("Auto-refresh started");
        self.arm_if_wanted()
    }

    pub fn disable(&mut self) -> TimerAction {
        self.enabled = false;
        info!("Auto-refresh stopped");
        self.disarm()
    }

    pub fn toggle(&mut self) -> TimerAction {
        if self.enabled {
            self.disable()
        } else {
            self.enable()
        }
    }

    /// View hidden.
    pub fn pause(&mut self) -> TimerAction {
        self.visible = false;
        if self.armed {
            info!("Auto-refresh paused");
        }
        self.disarm()
    }

    /// View visible again.
    pub fn resume(&mut self) -> TimerAction {
        self.visible = true;
        let action = self.arm_if_wanted();
        if action != TimerAction::None {
            info!("Auto-refresh resumed");
        }
        action
    }

    pub fn teardown(&mut self) -> TimerAction {
        self.disarm()
    }

    fn arm_if_wanted(&mut self) -> TimerAction {
        if self.enabled && self.visible && !self.armed {
            self.armed = true;
            TimerAction::Arm(self.interval)
        } else {
            TimerAction::None
        }
    }

    fn disarm(&mut self) -> TimerAction {
        if self.armed {
            self.armed = false;
            TimerAction::Disarm
        } else {
            TimerAction::None
        }
    }
}
