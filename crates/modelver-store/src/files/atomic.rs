//! Atomic write primitives
//!
//! Uses temp→rename pattern to ensure no partial artifact files

use crate::errors::{io_error_at, Result};
use std::fs;
use std::path::Path;

/// Atomically write bytes to a file
///
/// Writes a sibling `.tmp` file and renames it over the target.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error_at("create_artifact_dir", parent, e))?;
    }

    let temp_path = target_path.with_extension("tmp");

    fs::write(&temp_path, content).map_err(|e| io_error_at("write_artifact_temp", &temp_path, e))?;

    fs::rename(&temp_path, target_path)
        .map_err(|e| io_error_at("rename_artifact_temp", target_path, e))?;

    Ok(())
}
