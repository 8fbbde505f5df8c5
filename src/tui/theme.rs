//! TUI Theme configuration
//!
//! Palettes for the sidebar, toggle button and modals at three color depths.

use ratatui::style::{Color, Modifier, Style};

/// Terminal color capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Basic 16 ANSI colors
    Basic,
    /// 256 color palette
    #[default]
    Indexed,
    /// True color (24-bit RGB)
    TrueColor,
}

impl ColorMode {
    /// Detect the best color mode for the current terminal
    pub fn detect() -> Self {
        if let Ok(colorterm) = std::env::var("COLORTERM") {
            if colorterm == "truecolor" || colorterm == "24bit" {
                return Self::TrueColor;
            }
        }

        match std::env::var("TERM") {
            Ok(term) if term.contains("kitty") || term.contains("alacritty") => Self::TrueColor,
            Ok(term) if term.contains("256color") => Self::Indexed,
            _ => Self::Basic,
        }
    }
}

/// Theme configuration for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub border: Color,

    pub selection_bg: Color,
    pub selection_fg: Option<Color>,

    // Completion markers
    pub completed: Color,
    pub pending: Color,

    pub text_secondary: Color,
    pub text_accent: Color,
    pub solution: Color,

    pub modal_info: Color,
    pub modal_warning: Color,
    pub modal_error: Color,

    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_color_mode(ColorMode::detect())
    }
}

impl Theme {
    /// Create a theme for the specified color mode
    pub fn for_color_mode(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Basic => Self::basic(),
            ColorMode::Indexed => Self::indexed(),
            ColorMode::TrueColor => Self::truecolor(),
        }
    }

    pub fn basic() -> Self {
        Self {
            border: Color::Cyan,
            selection_bg: Color::Blue,
            selection_fg: Some(Color::White),
            completed: Color::Green,
            pending: Color::Yellow,
            text_secondary: Color::DarkGray,
            text_accent: Color::Blue,
            solution: Color::Magenta,
            modal_info: Color::Cyan,
            modal_warning: Color::Yellow,
            modal_error: Color::Red,
            status_bar_bg: Color::Blue,
            status_bar_fg: Color::White,
        }
    }

    pub fn indexed() -> Self {
        Self {
            border: Color::Indexed(117),
            selection_bg: Color::Indexed(60),
            selection_fg: Some(Color::Indexed(255)),
            completed: Color::Indexed(156), // mint
            pending: Color::Indexed(222),   // peach
            text_secondary: Color::Indexed(250),
            text_accent: Color::Indexed(147),
            solution: Color::Indexed(183),
            modal_info: Color::Indexed(117),
            modal_warning: Color::Indexed(222),
            modal_error: Color::Indexed(210),
            status_bar_bg: Color::Indexed(236),
            status_bar_fg: Color::Indexed(252),
        }
    }

    pub fn truecolor() -> Self {
        Self {
            border: Color::Rgb(137, 180, 250),
            selection_bg: Color::Rgb(69, 71, 90),
            selection_fg: Some(Color::Rgb(245, 245, 250)),
            completed: Color::Rgb(166, 227, 161),
            pending: Color::Rgb(249, 226, 175),
            text_secondary: Color::Rgb(166, 173, 200),
            text_accent: Color::Rgb(180, 190, 254),
            solution: Color::Rgb(203, 166, 247),
            modal_info: Color::Rgb(137, 180, 250),
            modal_warning: Color::Rgb(249, 226, 175),
            modal_error: Color::Rgb(243, 139, 168),
            status_bar_bg: Color::Rgb(49, 50, 68),
            status_bar_fg: Color::Rgb(205, 214, 244),
        }
    }

    /// Style for selected items
    pub fn selection(&self) -> Style {
        let style = Style::default().bg(self.selection_bg);
        match self.selection_fg {
            Some(fg) => style.fg(fg),
            None => style,
        }
    }

    /// Style for a toggle button in the given state
    pub fn button(&self, completed: bool) -> Style {
        let color = if completed { self.completed } else { self.pending };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    pub fn status_bar(&self) -> Style {
        Style::default().bg(self.status_bar_bg).fg(self.status_bar_fg)
    }
}
