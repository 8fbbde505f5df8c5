//! Error types for topic-tracker
//!
//! Uses `thiserror` for ergonomic error definitions with automatic `Display` and `Error` impls.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for topic-tracker
#[derive(Error, Debug)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("TUI error: {0}")]
    Tui(#[from] TuiError),
}

/// Local storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage is not available")]
    Unavailable,

    #[error("Failed to read storage file {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("Storage file {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("Failed to write storage file {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("Stored value under '{key}' is malformed: {reason}")]
    Malformed { key: String, reason: String },

    #[error("Failed to serialize value for '{key}': {reason}")]
    SerializeFailed { key: String, reason: String },
}

/// Topic catalog errors
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("Failed to parse catalog: {0}")]
    ParseFailed(String),

    #[error("Duplicate topic id: {0}")]
    DuplicateTopic(String),

    #[error("Topic at position {0} has an empty id")]
    EmptyId(usize),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),

    #[error("Failed to create config directory: {0}")]
    DirectoryCreationFailed(PathBuf),
}

/// TUI-related errors
#[derive(Error, Debug)]
pub enum TuiError {
    #[error("Failed to initialize terminal: {0}")]
    InitFailed(String),

    #[error("Failed to restore terminal: {0}")]
    RestoreFailed(String),

    #[error("Render error: {0}")]
    RenderError(String),
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::Malformed {
            key: "topicsCompleted".to_string(),
            reason: "expected value".to_string(),
        };
        assert!(err.to_string().contains("topicsCompleted"));

        let err = CatalogError::DuplicateTopic("loops".to_string());
        assert!(err.to_string().contains("loops"));

        let err = StorageError::WriteFailed {
            path: PathBuf::from("/tmp/foo.json"),
            reason: "read-only".to_string(),
        };
        assert!(err.to_string().contains("/tmp/foo.json"));
    }

    #[test]
    fn test_error_conversion() {
        let storage_err = StorageError::Unavailable;
        let top_err: Error = storage_err.into();
        assert!(matches!(top_err, Error::Storage(StorageError::Unavailable)));

        let catalog_err = CatalogError::EmptyId(2);
        let top_err: Error = catalog_err.into();
        assert!(matches!(top_err, Error::Catalog(CatalogError::EmptyId(2))));

        let config_err = ConfigError::LoadFailed("bad".to_string());
        let top_err: Error = config_err.into();
        assert!(top_err.to_string().starts_with("Configuration error"));
    }
}
