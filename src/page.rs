//! Page document model
//!
//! The presentation side of the tracker: toggle buttons, the sidebar topic
//! list and the per-topic solution panels, each carrying the class set a
//! stylesheet (or the terminal UI) keys off.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::progress::{ProgressView, TopicId};

/// Class present on a completed button or sidebar entry
pub const COMPLETED_CLASS: &str = "completed";
/// Marker class carried by every toggle button
pub const BUTTON_MARKER_CLASS: &str = "completed-button";
/// Class on a solution panel that has not been revealed
pub const HIDDEN_CLASS: &str = "hidden";
/// Class on the show-solution control once it has been used
pub const REMOVED_CLASS: &str = "removed";

/// Button texts for the two completion states
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonLabels {
    pub completed: String,
    pub not_completed: String,
}

impl Default for ButtonLabels {
    fn default() -> Self {
        Self {
            completed: "Completed!".to_string(),
            not_completed: "Mark as completed".to_string(),
        }
    }
}

impl ButtonLabels {
    pub fn for_state(&self, completed: bool) -> &str {
        if completed {
            &self.completed
        } else {
            &self.not_completed
        }
    }
}

/// Toggle control bound to one topic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicButton {
    pub topic: TopicId,
    pub classes: BTreeSet<String>,
    pub label: String,
}

impl TopicButton {
    fn new(topic: TopicId, label: &str) -> Self {
        Self {
            topic,
            classes: BTreeSet::from([BUTTON_MARKER_CLASS.to_string()]),
            label: label.to_string(),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn is_completed(&self) -> bool {
        self.has_class(COMPLETED_CLASS)
    }
}

/// Passive sidebar list item mirroring one topic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    pub topic: TopicId,
    pub title: String,
    pub classes: BTreeSet<String>,
}

impl SidebarEntry {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn is_completed(&self) -> bool {
        self.has_class(COMPLETED_CLASS)
    }
}

/// Hidden exercise solution plus the control that reveals it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionPanel {
    pub topic: TopicId,
    pub text: String,
    pub button_classes: BTreeSet<String>,
    pub panel_classes: BTreeSet<String>,
}

impl SolutionPanel {
    fn new(topic: TopicId, text: String) -> Self {
        Self {
            topic,
            text,
            button_classes: BTreeSet::from(["show-solution".to_string()]),
            panel_classes: BTreeSet::from(["solution".to_string(), HIDDEN_CLASS.to_string()]),
        }
    }

    pub fn is_revealed(&self) -> bool {
        !self.panel_classes.contains(HIDDEN_CLASS)
    }
}

/// In-memory page: every topic gets a button, a sidebar entry and, if it has
/// one, a solution panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    labels: ButtonLabels,
    buttons: Vec<TopicButton>,
    sidebar: Vec<SidebarEntry>,
    solutions: Vec<SolutionPanel>,
}

impl Page {
    /// Lay out a page for every topic in `catalog`
    pub fn from_catalog(catalog: &Catalog, labels: ButtonLabels) -> Self {
        let buttons = catalog
            .topics
            .iter()
            .map(|t| TopicButton::new(t.id.clone(), &labels.not_completed))
            .collect();

        let sidebar = catalog
            .topics
            .iter()
            .map(|t| SidebarEntry {
                topic: t.id.clone(),
                title: t.title.clone(),
                classes: BTreeSet::new(),
            })
            .collect();

        let solutions = catalog
            .topics
            .iter()
            .filter_map(|t| {
                t.solution
                    .as_ref()
                    .map(|s| SolutionPanel::new(t.id.clone(), s.clone()))
            })
            .collect();

        Self {
            labels,
            buttons,
            sidebar,
            solutions,
        }
    }

    pub fn labels(&self) -> &ButtonLabels {
        &self.labels
    }

    pub fn buttons(&self) -> &[TopicButton] {
        &self.buttons
    }

    pub fn sidebar(&self) -> &[SidebarEntry] {
        &self.sidebar
    }

    pub fn button(&self, topic: &str) -> Option<&TopicButton> {
        self.buttons.iter().find(|b| b.topic.as_str() == topic)
    }

    pub fn sidebar_entry(&self, topic: &str) -> Option<&SidebarEntry> {
        self.sidebar.iter().find(|e| e.topic.as_str() == topic)
    }

    pub fn solution(&self, topic: &str) -> Option<&SolutionPanel> {
        self.solutions.iter().find(|s| s.topic.as_str() == topic)
    }

    /// Reveal the solution for `topic` and retire its show-solution control.
    /// Returns false if the topic has no solution.
    pub fn show_solution(&mut self, topic: &str) -> bool {
        let Some(panel) = self.solutions.iter_mut().find(|s| s.topic.as_str() == topic) else {
            return false;
        };
        panel.button_classes.insert(REMOVED_CLASS.to_string());
        panel.panel_classes.remove(HIDDEN_CLASS);
        true
    }
}

impl ProgressView for Page {
    fn button_topics(&self) -> Vec<TopicId> {
        self.buttons.iter().map(|b| b.topic.clone()).collect()
    }

    fn sidebar_topics(&self) -> Vec<TopicId> {
        self.sidebar.iter().map(|e| e.topic.clone()).collect()
    }

    fn render_button(&mut self, topic: &TopicId, completed: bool) {
        let label = self.labels.for_state(completed).to_string();
        for button in self.buttons.iter_mut().filter(|b| &b.topic == topic) {
            if completed {
                button.classes.insert(COMPLETED_CLASS.to_string());
            } else {
                button.classes.remove(COMPLETED_CLASS);
            }
            button.label.clone_from(&label);
        }
    }

    fn render_sidebar_entry(&mut self, topic: &TopicId, completed: bool) {
        for entry in self.sidebar.iter_mut().filter(|e| &e.topic == topic) {
            if completed {
                entry.classes.insert(COMPLETED_CLASS.to_string());
            } else {
                entry.classes.remove(COMPLETED_CLASS);
            }
        }
    }
}
