//! Configuration module
//!
//! Handles user configuration (`config.toml` in the platform config
//! directory) layered under `TOPIC_TRACKER_*` environment variables.

mod settings;

pub use settings::*;
