//! Keyboard and focus input mapped to dashboard commands

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, error};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::dashboard::Command;

pub fn map_event(event: &Event) -> Option<Command> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => map_key(key),
        Event::FocusLost => Some(Command::Hide),
        Event::FocusGained => Some(Command::Show),
        Event::Resize(_, _) => Some(Command::Redraw),
        _ => None,
    }
}

fn map_key(key: &KeyEvent) -> Option<Command> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Command::Quit),
        (KeyCode::Char('q') | KeyCode::Esc, _) => Some(Command::Quit),
        (KeyCode::Char('r') | KeyCode::F(5), _) => Some(Command::Refresh),
        (KeyCode::Char('a'), _) => Some(Command::ToggleAutoRefresh),
        _ => None,
    }
}

/// Blocking crossterm reader on its own thread, feeding the command channel.
pub struct InputReader {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputReader {
    pub fn spawn(commands: mpsc::Sender<Command>, poll_rate: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let handle = thread::spawn(move || {
            while !stop_flag.load(Ordering::Relaxed) {
                match event::poll(poll_rate) {
                    Ok(true) => {}
                    Ok(false) => continue,
                    Err(e) => {
                        error!("Failed to poll terminal events: {}", e);
                        break;
                    }
                }

                let event = match event::read() {
                    Ok(event) => event,
                    Err(e) => {
                        error!("Failed to read terminal event: {}", e);
                        break;
                    }
                };

                if let Some(command) = map_event(&event) {
                    debug!("Input command: {:?}", command);
                    if commands.blocking_send(command).is_err() {
                        break;
                    }
                }
            }
        });

        Self {
            stop,
            handle: Some(handle),
        }
    }
}

impl Drop for InputReader {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
