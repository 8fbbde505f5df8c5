//! Progress tracker - owns the completed set and keeps the views in sync
//!
//! Every mutation goes through [`ProgressTracker::toggle`] (or `reset`),
//! is written to the store, and is followed by a full re-render of every
//! toggle button and sidebar entry the view exposes.

use tracing::{debug, info, instrument, warn};

use super::{CompletedTopicSet, TopicId, TopicState};
use crate::error::{Error, Result, StorageError};
use crate::store::TopicStore;

/// Presentation capability the tracker renders into
pub trait ProgressView {
    /// Topics that currently have a toggle button
    fn button_topics(&self) -> Vec<TopicId>;

    /// Topics that currently have a sidebar entry
    fn sidebar_topics(&self) -> Vec<TopicId>;

    /// Put a toggle button into its completed / not completed presentation
    fn render_button(&mut self, topic: &TopicId, completed: bool);

    /// Put a sidebar entry into its completed / not completed presentation
    fn render_sidebar_entry(&mut self, topic: &TopicId, completed: bool);
}

/// In-memory mirror of the persisted set
///
/// `completed` is `None` until storage has been read. An uninitialized
/// state answers "not completed" for every topic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressState {
    completed: Option<CompletedTopicSet>,
}

impl ProgressState {
    /// State that has not been loaded from storage
    pub fn uninitialized() -> Self {
        Self::default()
    }

    /// State seeded with an already-known set
    pub fn with_completed(completed: CompletedTopicSet) -> Self {
        Self {
            completed: Some(completed),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.completed.is_some()
    }

    pub fn completed(&self) -> Option<&CompletedTopicSet> {
        self.completed.as_ref()
    }

    pub fn is_completed(&self, topic: &str) -> bool {
        self.completed
            .as_ref()
            .is_some_and(|set| set.contains(topic))
    }
}

/// Tracks which topics are completed and keeps a view consistent with it
pub struct ProgressTracker<S, V> {
    state: ProgressState,
    /// None when the storage capability is absent
    store: Option<S>,
    view: V,
}

impl<S: TopicStore, V: ProgressView> ProgressTracker<S, V> {
    /// Create a tracker. Pass `None` for `store` when storage is unavailable.
    pub fn new(state: ProgressState, store: Option<S>, view: V) -> Self {
        Self { state, store, view }
    }

    /// Load the persisted set and render the view
    ///
    /// Returns whether storage was available. Without storage the state stays
    /// uninitialized and nothing is rendered. A malformed stored value is
    /// treated as an empty set.
    pub fn initialize(&mut self) -> bool {
        let Some(store) = &self.store else {
            info!("Storage unavailable; progress will not be tracked");
            return false;
        };

        let completed = match store.load() {
            Ok(topics) => topics.into_iter().collect(),
            Err(e) => {
                warn!("Ignoring unreadable progress value: {}", e);
                CompletedTopicSet::new()
            }
        };

        info!("Loaded {} completed topic(s)", completed.len());
        self.state = ProgressState::with_completed(completed);
        self.refresh_ui();
        true
    }

    /// Check whether `topic` is completed
    pub fn is_completed(&self, topic: &str) -> bool {
        self.state.is_completed(topic)
    }

    /// Completion state of `topic`
    pub fn topic_state(&self, topic: &str) -> TopicState {
        TopicState::from_completed(self.is_completed(topic))
    }

    /// Flip the completion state of `topic`, persist, and re-render
    ///
    /// Without storage this is a no-op that reports `NotCompleted`. If the
    /// write fails the in-memory state is left as it was.
    #[instrument(skip(self))]
    pub fn toggle(&mut self, topic: &TopicId) -> Result<TopicState> {
        if self.store.is_none() {
            warn!("Toggle ignored: storage unavailable");
            return Ok(TopicState::NotCompleted);
        }

        let current = self.state.completed.clone().unwrap_or_default();
        let next_state = self.topic_state(topic.as_str()).toggled();

        let next = match next_state {
            TopicState::Completed => current.with(topic.clone()),
            TopicState::NotCompleted => current.without(topic.as_str()),
        };

        self.persist(next)?;
        debug!("Topic is now {}", next_state);
        self.refresh_ui();

        Ok(next_state)
    }

    /// Re-derive every button and sidebar entry from the current set
    pub fn refresh_ui(&mut self) {
        let buttons = self.view.button_topics();
        for topic in &buttons {
            let completed = self.state.is_completed(topic.as_str());
            self.view.render_button(topic, completed);
        }

        let entries = self.view.sidebar_topics();
        for topic in &entries {
            let completed = self.state.is_completed(topic.as_str());
            self.view.render_sidebar_entry(topic, completed);
        }

        debug!(
            "Refreshed {} button(s) and {} sidebar entr(ies)",
            buttons.len(),
            entries.len()
        );
    }

    /// Overwrite the persisted set and the in-memory copy with `set`
    pub fn persist(&mut self, set: CompletedTopicSet) -> Result<()> {
        let store = self
            .store
            .as_mut()
            .ok_or(Error::Storage(StorageError::Unavailable))?;

        store.save(&set.to_strings())?;
        self.state = ProgressState::with_completed(set);
        Ok(())
    }

    /// Forget every completed topic: drop the stored value and re-render
    pub fn reset(&mut self) -> Result<()> {
        let store = self
            .store
            .as_mut()
            .ok_or(Error::Storage(StorageError::Unavailable))?;

        store.clear()?;
        self.state = ProgressState::with_completed(CompletedTopicSet::new());
        info!("Progress reset");
        self.refresh_ui();
        Ok(())
    }

    /// Whether a store was supplied
    pub fn is_storage_available(&self) -> bool {
        self.store.is_some()
    }

    /// Completed topics in completion order (empty when uninitialized)
    pub fn completed_topics(&self) -> Vec<TopicId> {
        self.state
            .completed()
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn completed_count(&self) -> usize {
        self.state.completed().map_or(0, CompletedTopicSet::len)
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn store(&self) -> Option<&S> {
        self.store.as_ref()
    }
}
