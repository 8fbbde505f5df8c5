//! Terminal UI module using ratatui
//!
//! Event-driven TUI with:
//! - Sidebar of topics mirroring completion
//! - Topic pane with the completion toggle and the solution panel
//! - Modal overlays for help, confirmation and errors

mod app;
mod event;
mod theme;
mod widgets;

pub use app::*;
pub use event::*;
pub use theme::*;
