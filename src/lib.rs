//! Topic Tracker - remember which tutorial topics you have completed
//!
//! A reader marks topics as done; the set of completed topics is kept in a
//! browser-style local storage file and every view of it (toggle buttons,
//! the sidebar list) is re-derived from that set after each change.
//!
//! # Modules
//!
//! - [`progress`] - Completion model and the `ProgressTracker`
//! - [`store`] - Local storage and the `TopicStore` capability
//! - [`page`] - Page document model implementing `ProgressView`
//! - [`catalog`] - Topic catalog loaded from TOML
//! - [`tui`] - Terminal UI with ratatui
//! - [`config`] - Layered configuration
//! - [`error`] - Error types

pub mod bootstrap;
pub mod catalog;
pub mod config;
pub mod error;
pub mod page;
pub mod progress;
pub mod store;
pub mod tui;

pub use bootstrap::{PageTracker, open_tracker};
pub use catalog::{Catalog, Topic};
pub use config::Config;
pub use error::{Error, Result};
pub use progress::{
    CompletedTopicSet, ProgressState, ProgressTracker, ProgressView, TopicId, TopicState,
};
pub use store::{LocalStorage, TopicSlot, TopicStore};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
