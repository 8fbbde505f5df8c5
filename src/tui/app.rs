//! Main TUI application
//!
//! Draws the tracker's page (sidebar, toggle button, solution panel) and
//! turns key presses into tracker operations.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::KeyEvent,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use tracing::{debug, info};

use super::event::{AppEvent, EventLoop, InputEvent, UserCommand};
use super::theme::Theme;
use super::widgets::{ToggleButton, TopicList, TopicListState};
use crate::bootstrap::PageTracker;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::{Result, TuiError};
use crate::progress::TopicId;

/// Modal dialog state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    None,
    Confirm {
        title: String,
        message: String,
        on_confirm: ConfirmAction,
    },
    Help,
    Error { message: String },
}

/// Action to perform when confirm modal is confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    ResetProgress,
}

/// Application UI state
#[derive(Debug)]
pub struct AppUiState {
    pub list_state: TopicListState,
    pub modal: Modal,
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl Default for AppUiState {
    fn default() -> Self {
        Self {
            list_state: TopicListState::new(),
            modal: Modal::None,
            status_message: None,
            should_quit: false,
        }
    }
}

/// Main TUI application
pub struct App {
    tracker: PageTracker,
    catalog: Catalog,
    theme: Theme,
    tick_rate: Duration,
    ui_state: AppUiState,
    event_loop: EventLoop,
}

impl App {
    /// Create the application around an initialized tracker
    pub fn new(config: &Config, catalog: Catalog, tracker: PageTracker) -> Self {
        let mut ui_state = AppUiState::default();
        ui_state
            .list_state
            .set_item_count(tracker.view().sidebar().len());
        ui_state.list_state.first();

        Self {
            tracker,
            catalog,
            theme: Theme::default(),
            tick_rate: config.tick_rate(),
            ui_state,
            event_loop: EventLoop::new(),
        }
    }

    /// Override the detected theme
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn tracker(&self) -> &PageTracker {
        &self.tracker
    }

    pub fn ui_state(&self) -> &AppUiState {
        &self.ui_state
    }

    /// Run the application until the user quits
    pub async fn run(&mut self) -> Result<()> {
        self.event_loop.start(self.tick_rate);

        let mut terminal = self.setup_terminal()?;
        info!("Entering main loop");
        let result = self.main_loop(&mut terminal).await;

        self.restore_terminal(&mut terminal)?;
        info!("Terminal restored");
        result
    }

    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode().map_err(|e| TuiError::InitFailed(e.to_string()))?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|e| TuiError::InitFailed(e.to_string()))?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).map_err(|e| TuiError::InitFailed(e.to_string()))?;

        Ok(terminal)
    }

    fn restore_terminal(&self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode().map_err(|e| TuiError::RestoreFailed(e.to_string()))?;

        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .map_err(|e| TuiError::RestoreFailed(e.to_string()))?;

        terminal
            .show_cursor()
            .map_err(|e| TuiError::RestoreFailed(e.to_string()))?;

        Ok(())
    }

    async fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(|e| TuiError::RenderError(e.to_string()))?;

            match self.event_loop.next().await {
                Some(AppEvent::Input(InputEvent::Key(key))) => self.handle_key(key),
                // Resizes and ticks only need a redraw
                Some(AppEvent::Input(InputEvent::Resize(..)) | AppEvent::Tick) => {}
                None => break,
            }

            if self.ui_state.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(rows[0]);

        self.render_sidebar(frame, columns[0]);
        self.render_topic(frame, columns[1]);
        self.render_status_bar(frame, rows[1]);
        self.render_modal(frame, size);
    }

    fn render_sidebar(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Topics ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border));

        let list = TopicList::new(self.tracker.view().sidebar(), &self.theme).block(block);
        frame.render_stateful_widget(list, area, &mut self.ui_state.list_state.list_state);
    }

    fn render_topic(&self, frame: &mut Frame, area: Rect) {
        let Some(topic_id) = self.selected_topic() else {
            let block = Block::default().borders(Borders::ALL);
            frame.render_widget(Paragraph::new("No topics in the catalog").block(block), area);
            return;
        };

        let page = self.tracker.view();
        let title = page
            .sidebar_entry(topic_id.as_str())
            .map_or_else(|| topic_id.to_string(), |e| e.title.clone());

        let block = Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let summary = self
            .catalog
            .get(topic_id.as_str())
            .and_then(|t| t.summary.clone())
            .unwrap_or_default();
        frame.render_widget(
            Paragraph::new(summary)
                .style(Style::default().fg(self.theme.text_secondary))
                .wrap(Wrap { trim: true }),
            chunks[0],
        );

        if let Some(button) = page.button(topic_id.as_str()) {
            frame.render_widget(ToggleButton::new(button, &self.theme), chunks[1]);
        }

        let solution = match page.solution(topic_id.as_str()) {
            Some(panel) if panel.is_revealed() => Paragraph::new(panel.text.as_str())
                .style(Style::default().fg(self.theme.solution))
                .block(Block::default().title(" Solution ").borders(Borders::TOP)),
            Some(_) => Paragraph::new(Line::from(vec![
                Span::styled("[s] ", Style::default().fg(self.theme.text_accent)),
                Span::raw("Show solution"),
            ])),
            None => Paragraph::new("No exercise for this topic.")
                .style(Style::default().fg(self.theme.text_secondary)),
        };
        frame.render_widget(solution, chunks[3]);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let status = if let Some(ref msg) = self.ui_state.status_message {
            msg.clone()
        } else if !self.tracker.is_storage_available() {
            "Storage unavailable: progress is not saved | ?: help | q: quit".to_string()
        } else {
            let sidebar = self.tracker.view().sidebar();
            let done = sidebar.iter().filter(|e| e.is_completed()).count();
            format!(
                "Completed: {}/{} | Space: toggle | s: solution | ?: help | q: quit",
                done,
                sidebar.len()
            )
        };

        frame.render_widget(Paragraph::new(status).style(self.theme.status_bar()), area);
    }

    fn render_modal(&self, frame: &mut Frame, area: Rect) {
        let (title, text, color) = match &self.ui_state.modal {
            Modal::None => return,
            Modal::Confirm { title, message, .. } => (
                title.as_str(),
                format!("{}\n\n[Enter] Confirm  [Esc] Cancel", message),
                self.theme.modal_warning,
            ),
            Modal::Error { message } => (
                "Error",
                format!("{}\n\nPress any key to close.", message),
                self.theme.modal_error,
            ),
            Modal::Help => ("Help", HELP_TEXT.to_string(), self.theme.modal_info),
        };

        let modal_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, modal_area);

        let block = Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));

        frame.render_widget(
            Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
            modal_area,
        );
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        let cmd = UserCommand::from_key(key);

        match &self.ui_state.modal {
            Modal::None => {
                if let Some(cmd) = cmd {
                    self.handle_command(cmd);
                }
            }
            Modal::Confirm { on_confirm, .. } => match cmd {
                Some(UserCommand::Confirm) => {
                    let action = *on_confirm;
                    self.ui_state.modal = Modal::None;
                    self.handle_confirm(action);
                }
                Some(UserCommand::Cancel) => self.ui_state.modal = Modal::None,
                _ => {}
            },
            // Any key closes help/error
            Modal::Help | Modal::Error { .. } => self.ui_state.modal = Modal::None,
        }
    }

    /// Handle a user command while no modal is open
    pub fn handle_command(&mut self, cmd: UserCommand) {
        self.ui_state.status_message = None;

        match cmd {
            UserCommand::NavigateUp => self.ui_state.list_state.previous(),
            UserCommand::NavigateDown => self.ui_state.list_state.next(),
            UserCommand::First => self.ui_state.list_state.first(),
            UserCommand::Last => self.ui_state.list_state.last(),
            UserCommand::Toggle | UserCommand::Confirm => self.toggle_selected(),
            UserCommand::ShowSolution => self.show_selected_solution(),
            UserCommand::Reset => self.request_reset(),
            UserCommand::ShowHelp => self.ui_state.modal = Modal::Help,
            UserCommand::Quit => self.ui_state.should_quit = true,
            UserCommand::Cancel => {}
        }
    }

    /// Topic under the sidebar cursor
    pub fn selected_topic(&self) -> Option<TopicId> {
        let idx = self.ui_state.list_state.selected()?;
        self.tracker
            .view()
            .sidebar()
            .get(idx)
            .map(|entry| entry.topic.clone())
    }

    fn toggle_selected(&mut self) {
        let Some(topic) = self.selected_topic() else {
            return;
        };

        if !self.tracker.is_storage_available() {
            self.ui_state.status_message =
                Some("Storage unavailable: progress is not saved".to_string());
            return;
        }

        match self.tracker.toggle(&topic) {
            Ok(state) => {
                debug!("Toggled {} to {}", topic, state);
                self.ui_state.status_message = Some(format!("'{}' is now {}", topic, state));
            }
            Err(e) => {
                self.ui_state.modal = Modal::Error {
                    message: format!("Failed to save progress: {}", e),
                };
            }
        }
    }

    fn show_selected_solution(&mut self) {
        let Some(topic) = self.selected_topic() else {
            return;
        };

        if !self.tracker.view_mut().show_solution(topic.as_str()) {
            self.ui_state.status_message = Some("This topic has no solution".to_string());
        }
    }

    fn request_reset(&mut self) {
        if !self.tracker.is_storage_available() {
            self.ui_state.status_message =
                Some("Storage unavailable: nothing to reset".to_string());
            return;
        }

        self.ui_state.modal = Modal::Confirm {
            title: "Reset Progress".to_string(),
            message: "Forget every completed topic?".to_string(),
            on_confirm: ConfirmAction::ResetProgress,
        };
    }

    fn handle_confirm(&mut self, action: ConfirmAction) {
        match action {
            ConfirmAction::ResetProgress => match self.tracker.reset() {
                Ok(()) => self.ui_state.status_message = Some("Progress reset".to_string()),
                Err(e) => {
                    self.ui_state.modal = Modal::Error {
                        message: format!("Failed to reset: {}", e),
                    };
                }
            },
        }
    }
}

const HELP_TEXT: &str = r#"
Navigation:
  j/k, Up/Down    Move through topics
  g/G, Home/End   First / last topic

Progress:
  Space, c, Enter Toggle completed
  s               Show solution
  R               Reset all progress

Other:
  ?               Show this help
  q               Quit

Press any key to close this help.
"#;

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
