use chrono::{DateTime, Local};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting,
    Connected,
    Disconnected,
}

impl ConnectionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::Connecting => "Connecting...",
            ConnectionStatus::Connected => "Connected",
            ConnectionStatus::Disconnected => "Disconnected",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Indicator state: connection badge, loading line, error banner and the
/// last-updated stamp. Setters never touch each other's fields.
#[derive(Debug, Clone)]
pub struct StatusPresenter {
    connection: ConnectionStatus,
    loading: bool,
    error: Option<String>,
    last_updated: Option<DateTime<Local>>,
}

impl Default for StatusPresenter {
    fn default() -> Self {
        Self {
            connection: ConnectionStatus::Connecting,
            loading: false,
            error: None,
            last_updated: None,
        }
    }
}

impl StatusPresenter {
    pub fn set_connection_status(&mut self, status: ConnectionStatus) {
        self.connection = status;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_error(&mut self, message: Option<String>) {
        self.error = message;
    }

    pub fn mark_updated(&mut self, at: DateTime<Local>) {
        self.last_updated = Some(at);
    }

    pub fn connection(&self) -> ConnectionStatus {
        self.connection
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    pub fn last_updated_display(&self) -> String {
        self.last_updated
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "Never".to_string())
    }
}
