//! Sidebar topic list widget
//!
//! Draws one line per sidebar entry; the completion marker and color come
//! from the entry's class set, never from the tracker directly.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, StatefulWidget},
};

use crate::page::SidebarEntry;
use crate::tui::theme::Theme;

/// Sidebar list widget
pub struct TopicList<'a> {
    entries: &'a [SidebarEntry],
    theme: &'a Theme,
    block: Option<Block<'a>>,
    highlight_style: Style,
}

impl<'a> TopicList<'a> {
    pub fn new(entries: &'a [SidebarEntry], theme: &'a Theme) -> Self {
        Self {
            entries,
            theme,
            block: None,
            highlight_style: theme.selection().add_modifier(Modifier::BOLD),
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn to_list_items(&self) -> Vec<ListItem<'a>> {
        self.entries
            .iter()
            .map(|entry| {
                let (marker, color) = if entry.is_completed() {
                    ("✓", self.theme.completed)
                } else {
                    ("·", self.theme.text_secondary)
                };

                let title_style = if entry.is_completed() {
                    Style::default().fg(self.theme.completed)
                } else {
                    Style::default()
                };

                ListItem::new(Line::from(vec![
                    Span::styled(format!(" {} ", marker), Style::default().fg(color)),
                    Span::styled(entry.title.clone(), title_style),
                ]))
            })
            .collect()
    }
}

impl<'a> StatefulWidget for TopicList<'a> {
    type State = ListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let items = self.to_list_items();
        let list = List::new(items).highlight_style(self.highlight_style);
        let list = match self.block {
            Some(block) => list.block(block),
            None => list,
        };

        StatefulWidget::render(list, area, buf, state);
    }
}

/// Selection state for the sidebar
#[derive(Debug, Default)]
pub struct TopicListState {
    pub list_state: ListState,
    pub item_count: usize,
}

impl TopicListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.list_state.select(index);
    }

    /// Select the next item, wrapping to the top
    pub fn next(&mut self) {
        if self.item_count == 0 {
            return;
        }

        let i = match self.list_state.selected() {
            Some(i) if i + 1 < self.item_count => i + 1,
            Some(_) => 0,
            None => 0,
        };

        self.list_state.select(Some(i));
    }

    /// Select the previous item, wrapping to the bottom
    pub fn previous(&mut self) {
        if self.item_count == 0 {
            return;
        }

        let i = match self.list_state.selected() {
            Some(0) => self.item_count - 1,
            Some(i) => i - 1,
            None => 0,
        };

        self.list_state.select(Some(i));
    }

    pub fn first(&mut self) {
        if self.item_count > 0 {
            self.list_state.select(Some(0));
        }
    }

    pub fn last(&mut self) {
        if self.item_count > 0 {
            self.list_state.select(Some(self.item_count - 1));
        }
    }

    /// Update item count and ensure selection is valid
    pub fn set_item_count(&mut self, count: usize) {
        self.item_count = count;

        match self.list_state.selected() {
            _ if count == 0 => self.list_state.select(None),
            Some(selected) if selected >= count => self.list_state.select(Some(count - 1)),
            _ => {}
        }
    }
}
