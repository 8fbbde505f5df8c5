//! Event handling for the TUI
//!
//! Provides an async event stream that combines terminal input with render
//! ticks, so every tracker operation runs on one task in input order.

use std::time::Duration;

use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;
use tracing::debug;

/// Application events
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Terminal input event
    Input(InputEvent),
    /// Render tick
    Tick,
}

/// Input events from the terminal
#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(KeyEvent),
    Resize(u16, u16),
}

/// User commands triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    /// Navigate up in the topic list
    NavigateUp,
    /// Navigate down in the topic list
    NavigateDown,
    /// Jump to the first topic
    First,
    /// Jump to the last topic
    Last,
    /// Toggle completion of the selected topic
    Toggle,
    /// Reveal the selected topic's solution
    ShowSolution,
    /// Forget all progress (asks first)
    Reset,
    /// Show help
    ShowHelp,
    /// Quit application
    Quit,
    /// Close the current modal
    Cancel,
    /// Confirm the current modal
    Confirm,
}

impl UserCommand {
    /// Convert a key event to a user command
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        match (key.code, key.modifiers) {
            // Navigation
            (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => {
                Some(UserCommand::NavigateUp)
            }
            (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => {
                Some(UserCommand::NavigateDown)
            }
            (KeyCode::Home, _) | (KeyCode::Char('g'), KeyModifiers::NONE) => {
                Some(UserCommand::First)
            }
            (KeyCode::End, _) | (KeyCode::Char('G'), _) => Some(UserCommand::Last),

            // Progress
            (KeyCode::Enter, _) => Some(UserCommand::Confirm),
            (KeyCode::Char(' ') | KeyCode::Char('c'), KeyModifiers::NONE) => {
                Some(UserCommand::Toggle)
            }
            (KeyCode::Char('s'), KeyModifiers::NONE) => Some(UserCommand::ShowSolution),
            (KeyCode::Char('R'), _) => Some(UserCommand::Reset),

            // Help and quit
            (KeyCode::Char('?'), _) => Some(UserCommand::ShowHelp),
            (KeyCode::Char('q'), KeyModifiers::NONE) => Some(UserCommand::Quit),
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(UserCommand::Quit),

            (KeyCode::Esc, _) => Some(UserCommand::Cancel),

            _ => None,
        }
    }
}

/// Event loop handle
pub struct EventLoop {
    tx: mpsc::Sender<AppEvent>,
    rx: mpsc::Receiver<AppEvent>,
}

impl EventLoop {
    /// Create a new event loop
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(256);
        Self { tx, rx }
    }

    /// Get a sender for posting events
    pub fn sender(&self) -> mpsc::Sender<AppEvent> {
        self.tx.clone()
    }

    /// Spawn the terminal input reader and the render tick tasks
    pub fn start(&mut self, tick_rate: Duration) {
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let mut reader = EventStream::new();

            loop {
                let event = reader.next().fuse().await;

                match event {
                    Some(Ok(event)) => {
                        let app_event = match event {
                            // Ignore key releases/repeats reported by some platforms
                            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                                AppEvent::Input(InputEvent::Key(key))
                            }
                            CrosstermEvent::Resize(w, h) => {
                                AppEvent::Input(InputEvent::Resize(w, h))
                            }
                            _ => continue,
                        };

                        if tx.send(app_event).await.is_err() {
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        debug!("Error reading terminal event: {}", e);
                        continue;
                    }
                    None => break,
                }
            }
        });

        let tx = self.tx.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick_rate);

            loop {
                interval.tick().await;
                if tx.send(AppEvent::Tick).await.is_err() {
                    break;
                }
            }
        });
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}
