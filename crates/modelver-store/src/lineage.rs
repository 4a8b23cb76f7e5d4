//! Lineage walks over parent links

use crate::change_record;
use crate::config::StoreConfig;
use crate::errors::Result;
use crate::snapshot_id::{SnapshotId, SnapshotRef};
use crate::version_store::list_snapshots;
use modelver_core::ModelKind;
use std::collections::HashSet;

/// One step of a lineage walk
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub snapshot: SnapshotRef,
    /// `None` for snapshots written without a change record
    pub change_request: Option<String>,
    pub created_at: Option<String>,
}

/// Follow parent links from `from`, newest first
///
/// The walk stops at a snapshot without a parent, a parent that is not on
/// disk, or a parent already visited (a corrupted record forming a cycle).
///
/// # Errors
///
/// `Io` or `Serialization` when a change record cannot be read.
pub fn history(
    config: &StoreConfig,
    model: ModelKind,
    from: &SnapshotRef,
) -> Result<Vec<HistoryEntry>> {
    let available = list_snapshots(&config.model_dir(model), model)?;
    let mut visited: HashSet<SnapshotId> = HashSet::new();
    let mut entries = Vec::new();
    let mut current = Some(from.clone());

    while let Some(snapshot) = current.take() {
        if !visited.insert(snapshot.id) {
            tracing::warn!(snapshot_id = %snapshot.dir_name(), "lineage cycle cut");
            break;
        }

        let record = change_record::read(&snapshot.path)?;
        current = record
            .as_ref()
            .and_then(|r| r.parent_snapshot_id.as_deref())
            .and_then(|parent| SnapshotId::parse(parent, model).ok())
            .and_then(|id| available.iter().find(|s| s.id == id).cloned());

        entries.push(HistoryEntry {
            snapshot,
            change_request: record.as_ref().map(|r| r.change_request.clone()),
            created_at: record.map(|r| r.created_at),
        });
    }

    Ok(entries)
}
