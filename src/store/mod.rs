//! Persistence for the completed topic set
//!
//! Handles:
//! - A browser-style key/value store backed by a JSON file (`LocalStorage`)
//! - A single key of that store exposed as a list of topic ids (`TopicSlot`)
//! - The narrow `TopicStore` capability the tracker depends on

mod local;
mod slot;

pub use local::*;
pub use slot::*;

use crate::error::Result;

/// Default key the completed topics live under
pub const DEFAULT_STORAGE_KEY: &str = "topicsCompleted";

/// Load/save capability for the persisted list of completed topics
pub trait TopicStore {
    /// Read the persisted list. An absent value is an empty list.
    fn load(&self) -> Result<Vec<String>>;

    /// Overwrite the persisted list
    fn save(&mut self, topics: &[String]) -> Result<()>;

    /// Drop the persisted value entirely
    fn clear(&mut self) -> Result<()>;
}

impl<T: TopicStore + ?Sized> TopicStore for Box<T> {
    fn load(&self) -> Result<Vec<String>> {
        (**self).load()
    }

    fn save(&mut self, topics: &[String]) -> Result<()> {
        (**self).save(topics)
    }

    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }
}
