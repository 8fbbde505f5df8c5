//! Wiring: configuration + catalog → an initialized tracker over a page

use tracing::warn;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::page::Page;
use crate::progress::{ProgressState, ProgressTracker};
use crate::store::{LocalStorage, TopicSlot};

/// Tracker persisting to local storage and rendering into a [`Page`]
pub type PageTracker = ProgressTracker<TopicSlot, Page>;

/// Open the configured storage, lay out the page and run the initial load.
///
/// Storage that is disabled, has no resolvable path, or cannot be read leaves
/// the tracker without a store; nothing is reported as completed. A storage
/// file holding something other than a JSON object of strings is moved aside
/// and progress starts over.
pub fn open_tracker(config: &Config, catalog: &Catalog) -> PageTracker {
    let page = Page::from_catalog(catalog, config.labels.clone());
    let store = open_slot(config);

    let mut tracker = ProgressTracker::new(ProgressState::uninitialized(), store, page);
    tracker.initialize();
    tracker
}

fn open_slot(config: &Config) -> Option<TopicSlot> {
    if !config.storage_enabled {
        return None;
    }

    let storage = config
        .storage_file()
        .and_then(LocalStorage::open_or_recover)
        .inspect_err(|e| warn!("Local storage unavailable: {}", e))
        .ok()?;

    Some(TopicSlot::new(storage, config.storage_key.clone()))
}
