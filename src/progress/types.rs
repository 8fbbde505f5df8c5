//! Core progress types
//!
//! Defines the completion model:
//! - `TopicId` identifies one unit of tutorial content
//! - `TopicState` is the two-state machine for a single topic
//! - `CompletedTopicSet` is the ordered set of completed topics

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for a tutorial topic (e.g. `"loops"`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicId(String);

impl TopicId {
    /// Create a topic id from anything string-like
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for TopicId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TopicId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for TopicId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Completion state of a single topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicState {
    #[default]
    NotCompleted,
    Completed,
}

impl TopicState {
    /// Map a membership check onto a state
    pub fn from_completed(completed: bool) -> Self {
        if completed {
            Self::Completed
        } else {
            Self::NotCompleted
        }
    }

    /// Check if the topic is completed
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// The state after a toggle
    pub fn toggled(&self) -> Self {
        match self {
            Self::NotCompleted => Self::Completed,
            Self::Completed => Self::NotCompleted,
        }
    }
}

impl fmt::Display for TopicState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotCompleted => write!(f, "not completed"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// Ordered set of completed topic identifiers
///
/// Insertion order is kept so the persisted array reads in the order the
/// reader completed things. Duplicates are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CompletedTopicSet {
    topics: Vec<TopicId>,
}

impl CompletedTopicSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Check membership
    pub fn contains(&self, topic: &str) -> bool {
        self.topics.iter().any(|t| t.as_str() == topic)
    }

    /// Append a topic, returning false if it was already present
    pub fn insert(&mut self, topic: TopicId) -> bool {
        if self.contains(topic.as_str()) {
            return false;
        }
        self.topics.push(topic);
        true
    }

    /// Remove a topic, returning false if it was not present
    pub fn remove(&mut self, topic: &str) -> bool {
        let before = self.topics.len();
        self.topics.retain(|t| t.as_str() != topic);
        self.topics.len() != before
    }

    /// A copy of this set without `topic`
    pub fn without(&self, topic: &str) -> Self {
        Self {
            topics: self
                .topics
                .iter()
                .filter(|t| t.as_str() != topic)
                .cloned()
                .collect(),
        }
    }

    /// A copy of this set with `topic` appended
    pub fn with(&self, topic: TopicId) -> Self {
        let mut next = self.clone();
        next.insert(topic);
        next
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &TopicId> {
        self.topics.iter()
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// The identifiers as plain strings, in order
    pub fn to_strings(&self) -> Vec<String> {
        self.topics.iter().map(|t| t.as_str().to_string()).collect()
    }
}

impl<T: Into<TopicId>> FromIterator<T> for CompletedTopicSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for topic in iter {
            set.insert(topic.into());
        }
        set
    }
}

impl<'de> Deserialize<'de> for CompletedTopicSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<String>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}
