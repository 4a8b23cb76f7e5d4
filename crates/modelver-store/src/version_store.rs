//! Snapshot discovery and loading
//!
//! Discovery lists the model directory and keeps only entries that parse as
//! snapshot ids for the requested model kind; anything else (notes, another
//! kind's snapshots, hidden staging directories) is not a version.
//!
//! Loading degrades toward an empty baseline: a missing directory or artifact
//! yields empty collections and malformed artifact lines are dropped. Only
//! genuine I/O failures (permissions, unreadable files) are errors.

use crate::artifact;
use crate::config::StoreConfig;
use crate::errors::{io_error_at, snapshot_not_found, Result};
use crate::snapshot_id::{SnapshotId, SnapshotRef};
use modelver_core::grammar::DroppedLine;
use modelver_core::{log_op_end, log_op_error, log_op_start};
use modelver_core::{ModelContents, ModelKind};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// A snapshot read back into memory
#[derive(Debug, Clone)]
pub struct LoadedSnapshot {
    pub snapshot: SnapshotRef,
    pub contents: ModelContents,
    /// Artifact lines that failed the grammar
    pub dropped: Vec<DroppedLine>,
}

/// All snapshots of `model` in `model_dir`, oldest first
///
/// A missing directory has no snapshots.
///
/// # Errors
///
/// `Io` when the directory exists but cannot be listed.
pub fn list_snapshots(model_dir: &Path, model: ModelKind) -> Result<Vec<SnapshotRef>> {
    let entries = match fs::read_dir(model_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(io_error_at("list_snapshots", model_dir, e)),
    };

    let mut snapshots = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| io_error_at("list_snapshots", model_dir, e))?;
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if !is_dir {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        if let Ok(id) = SnapshotId::parse(&name, model) {
            snapshots.push(SnapshotRef::new(model, id, entry.path()));
        }
    }

    snapshots.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.path.cmp(&b.path)));
    Ok(snapshots)
}

/// The latest snapshot in `model_dir` by `(date, sequence)`
///
/// # Errors
///
/// As [`list_snapshots`].
pub fn find_latest_in(model_dir: &Path, model: ModelKind) -> Result<Option<SnapshotRef>> {
    Ok(list_snapshots(model_dir, model)?.pop())
}

/// The latest snapshot of `model`, or `None` when there is no baseline
///
/// # Errors
///
/// As [`list_snapshots`].
pub fn find_latest(config: &StoreConfig, model: ModelKind) -> Result<Option<SnapshotRef>> {
    let latest = find_latest_in(&config.model_dir(model), model)?;
    tracing::debug!(
        model_kind = %model,
        snapshot_id = %latest.as_ref().map(|s| s.dir_name()).unwrap_or_default(),
        "resolved latest snapshot"
    );
    Ok(latest)
}

/// Locate a snapshot by id text, bare or prefixed
///
/// # Errors
///
/// `InvalidSnapshotId` for unparseable text, `NotFound` when no directory
/// carries that id.
pub fn resolve(config: &StoreConfig, model: ModelKind, id_text: &str) -> Result<SnapshotRef> {
    let wanted = SnapshotId::parse(id_text, model)?;
    list_snapshots(&config.model_dir(model), model)?
        .into_iter()
        .find(|s| s.id == wanted)
        .ok_or_else(|| snapshot_not_found("resolve_snapshot", id_text))
}

/// Load every collection of a snapshot
///
/// # Errors
///
/// `Io` when an artifact exists but cannot be read.
pub fn load(snapshot: &SnapshotRef) -> Result<LoadedSnapshot> {
    let dir_name = snapshot.dir_name();
    log_op_start!("load_snapshot", snapshot_id = %dir_name, model_kind = %snapshot.model);
    let start = std::time::Instant::now();

    let result = load_impl(snapshot).map_err(|e| {
        log_op_error!(
            "load_snapshot",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e.with_snapshot_id(dir_name.clone())
    })?;

    log_op_end!(
        "load_snapshot",
        duration_ms = start.elapsed().as_millis() as u64,
        elements = result.contents.total_elements(),
        dropped = result.dropped.len()
    );

    Ok(result)
}

/// Read collections from any directory laid out like a snapshot
///
/// Used for hand-curated reference models that were never written by the
/// store. Same tolerance as [`load`].
///
/// # Errors
///
/// `Io` when an artifact exists but cannot be read.
pub fn load_dir(model: ModelKind, dir: &Path) -> Result<(ModelContents, Vec<DroppedLine>)> {
    let mut contents = ModelContents::empty(model);
    let mut dropped = Vec::new();

    for kind in model.element_kinds() {
        let path = dir.join(kind.artifact_file());
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(artifact = kind.artifact_file(), "artifact missing, empty collection");
                continue;
            }
            Err(e) => return Err(io_error_at("load_snapshot", &path, e)),
        };
        let (elements, bad) = artifact::parse(*kind, &text);
        contents.replace(*kind, elements)?;
        dropped.extend(bad);
    }

    Ok((contents, dropped))
}

fn load_impl(snapshot: &SnapshotRef) -> Result<LoadedSnapshot> {
    let (contents, dropped) = load_dir(snapshot.model, &snapshot.path)?;

    if !dropped.is_empty() {
        tracing::warn!(
            snapshot_id = %snapshot.dir_name(),
            dropped = dropped.len(),
            "ignored malformed artifact lines"
        );
    }

    Ok(LoadedSnapshot {
        snapshot: snapshot.clone(),
        contents,
        dropped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelver_core::ElementKind;
    use tempfile::TempDir;

    #[test]
    fn test_missing_dir_has_no_snapshots() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(find_latest_in(&missing, ModelKind::Class).unwrap().is_none());
    }

    #[test]
    fn test_non_versions_ignored() {
        let dir = TempDir::new().unwrap();
        for name in [
            "2025-01-01-1",
            "class-2025-01-01-2",
            "usecase-2025-06-01-1",
            ".2025-09-09-1.partial",
            "drafts",
        ] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }
        fs::write(dir.path().join("2025-12-31-1"), "a file, not a dir").unwrap();

        let found = list_snapshots(dir.path(), ModelKind::Class).unwrap();
        let names: Vec<_> = found.iter().map(SnapshotRef::dir_name).collect();
        assert_eq!(names, vec!["2025-01-01-1", "class-2025-01-01-2"]);
    }

    #[test]
    fn test_load_missing_artifacts_is_empty() {
        let dir = TempDir::new().unwrap();
        let snap_dir = dir.path().join("2025-01-01-1");
        fs::create_dir(&snap_dir).unwrap();
        fs::write(snap_dir.join("actors.md"), "# Actor List\n\n* Customer\n").unwrap();

        let id = SnapshotId::parse("2025-01-01-1", ModelKind::UseCase).unwrap();
        let loaded = load(&SnapshotRef::new(ModelKind::UseCase, id, &snap_dir)).unwrap();
        assert_eq!(loaded.contents.len(ElementKind::Actor), 1);
        assert_eq!(loaded.contents.len(ElementKind::UseCase), 0);
    }
}
