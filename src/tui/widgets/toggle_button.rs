//! Toggle button widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::page::TopicButton;
use crate::tui::theme::Theme;

/// Renders a [`TopicButton`] as `[ label ]`, colored by its completed class
pub struct ToggleButton<'a> {
    button: &'a TopicButton,
    theme: &'a Theme,
}

impl<'a> ToggleButton<'a> {
    pub fn new(button: &'a TopicButton, theme: &'a Theme) -> Self {
        Self { button, theme }
    }
}

impl<'a> Widget for ToggleButton<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = self.theme.button(self.button.is_completed());
        let line = Line::from(vec![
            Span::styled("[ ", style),
            Span::styled(self.button.label.as_str(), style),
            Span::styled(" ]", style),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}
