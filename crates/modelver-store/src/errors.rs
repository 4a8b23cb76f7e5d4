//! Error handling for modelver-store
//!
//! Wraps modelver-core ExError with store-specific helpers

use modelver_core::errors::{ExError, ExErrorKind};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error that names the path involved
pub fn io_error_at(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(format!("{}: {}", path.display(), err))
}

/// Create a serialization error
pub fn serialization_error(operation: &str, err: impl std::fmt::Display) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a snapshot-not-found error
pub fn snapshot_not_found(operation: &str, snapshot_id: &str) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op(operation.to_string())
        .with_snapshot_id(snapshot_id)
        .with_message(format!("Snapshot {} not found", snapshot_id))
}

/// Create an error for a snapshot directory that already exists
pub fn snapshot_exists(snapshot_id: &str) -> ExError {
    ExError::new(ExErrorKind::AlreadyExists)
        .with_op("write_snapshot")
        .with_snapshot_id(snapshot_id)
        .with_message(format!("Snapshot directory {} already exists", snapshot_id))
}

/// Create a configuration error
pub fn config_error(reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("load_config")
        .with_message(reason)
}
