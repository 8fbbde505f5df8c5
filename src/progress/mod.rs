//! Topic completion tracking
//!
//! - `CompletedTopicSet` is the single source of truth
//! - `ProgressTracker` mutates it through a `TopicStore` and re-renders a `ProgressView`

mod tracker;
mod types;

pub use tracker::*;
pub use types::*;
