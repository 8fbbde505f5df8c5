//! TUI widgets
//!
//! - `TopicList` - Sidebar of topics with completion markers
//! - `ToggleButton` - The completion toggle for one topic

mod toggle_button;
mod topic_list;

pub use toggle_button::*;
pub use topic_list::*;
