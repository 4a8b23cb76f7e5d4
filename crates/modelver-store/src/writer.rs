//! Snapshot writer
//!
//! Writing a snapshot:
//! 1. Render every artifact in memory (the flow is validated here, so an
//!    unbalanced flow fails before anything touches the disk)
//! 2. Allocate the next id for today
//! 3. Write artifacts and the change record into `.<name>.partial`, each
//!    file via temp→rename
//! 4. Rename the staging directory into place
//!
//! A crash before step 4 leaves only a hidden staging directory, which
//! discovery ignores and the next write for the same id replaces.

use crate::artifact;
use crate::change_record::{
    ChangeRecord, CollectionSummary, CHANGE_JSON, CHANGE_MD, RECORD_SCHEMA_VERSION,
};
use crate::config::StoreConfig;
use crate::errors::{io_error_at, snapshot_exists, Result};
use crate::files::{atomic_write, sha256_hex};
use crate::snapshot_id::{SnapshotId, SnapshotRef};
use crate::version_store::list_snapshots;
use chrono::{Local, NaiveDate, Utc};
use modelver_core::{log_op_end, log_op_error, log_op_start};
use modelver_core::ModelContents;
use modelver_core_types::CycleId;
use std::collections::BTreeMap;
use std::fs;

/// Everything recorded in one snapshot
#[derive(Debug, Clone, Copy)]
pub struct WriteRequest<'a> {
    pub contents: &'a ModelContents,
    pub change_request: &'a str,
    pub parent: Option<&'a SnapshotRef>,
    pub cycle_id: Option<&'a CycleId>,
}

pub struct SnapshotWriter<'a> {
    config: &'a StoreConfig,
}

impl<'a> SnapshotWriter<'a> {
    pub fn new(config: &'a StoreConfig) -> Self {
        Self { config }
    }

    /// Write a new snapshot dated today (local time)
    ///
    /// # Errors
    ///
    /// See [`Self::write_on`].
    pub fn write(&self, request: WriteRequest<'_>) -> Result<SnapshotRef> {
        self.write_on(Local::now().date_naive(), request)
    }

    /// Write a new snapshot dated `today`
    ///
    /// # Errors
    ///
    /// - `FlowStructure` when the flow is unbalanced (nothing is written)
    /// - `Io` for filesystem failures
    /// - `AlreadyExists` when the allocated directory appeared concurrently
    pub fn write_on(&self, today: NaiveDate, request: WriteRequest<'_>) -> Result<SnapshotRef> {
        let model = request.contents.model();
        log_op_start!("write_snapshot", model_kind = %model);
        let start = std::time::Instant::now();

        let result = self.write_impl(today, request).map_err(|e| {
            log_op_error!(
                "write_snapshot",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e.with_model_kind(model.to_string())
        })?;

        log_op_end!(
            "write_snapshot",
            duration_ms = start.elapsed().as_millis() as u64,
            snapshot_id = %result.dir_name(),
            elements = request.contents.total_elements()
        );

        Ok(result)
    }

    fn write_impl(&self, today: NaiveDate, request: WriteRequest<'_>) -> Result<SnapshotRef> {
        let contents = request.contents;
        let model = contents.model();

        let mut artifacts = Vec::new();
        let mut collections = BTreeMap::new();
        for kind in model.element_kinds() {
            let text = artifact::render(*kind, &contents.elements(*kind))?;
            collections.insert(
                kind.collection_name().to_string(),
                CollectionSummary {
                    count: contents.len(*kind),
                    sha256: sha256_hex(text.as_bytes()),
                },
            );
            artifacts.push((kind.artifact_file(), text));
        }

        let model_dir = self.config.model_dir(model);
        fs::create_dir_all(&model_dir)
            .map_err(|e| io_error_at("create_model_dir", &model_dir, e))?;

        let existing = list_snapshots(&model_dir, model)?;
        let id = SnapshotId::next_for(today, existing.iter().map(|s| s.id))?;
        let dir_name = id.dir_name(model, self.config.naming);
        let final_dir = model_dir.join(&dir_name);
        if final_dir.exists() {
            return Err(snapshot_exists(&dir_name));
        }

        let record = ChangeRecord {
            record_schema_version: RECORD_SCHEMA_VERSION,
            snapshot_id: dir_name.clone(),
            model_kind: model,
            parent_snapshot_id: request.parent.map(SnapshotRef::dir_name),
            change_request: request.change_request.to_string(),
            cycle_id: request.cycle_id.cloned(),
            created_at: Utc::now().to_rfc3339(),
            collections,
        };

        let staging = model_dir.join(format!(".{}.partial", dir_name));
        if staging.exists() {
            tracing::warn!(path = %staging.display(), "removing stale staging directory");
            fs::remove_dir_all(&staging)
                .map_err(|e| io_error_at("clear_staging_dir", &staging, e))?;
        }
        fs::create_dir(&staging).map_err(|e| io_error_at("create_staging_dir", &staging, e))?;

        for (file, text) in &artifacts {
            atomic_write(&staging.join(file), text.as_bytes())?;
        }
        atomic_write(&staging.join(CHANGE_JSON), record.to_json()?.as_bytes())?;
        atomic_write(&staging.join(CHANGE_MD), record.render_markdown().as_bytes())?;

        fs::rename(&staging, &final_dir)
            .map_err(|e| io_error_at("publish_snapshot", &final_dir, e))?;

        tracing::debug!(
            snapshot_id = %dir_name,
            parent = %record.parent_snapshot_id.as_deref().unwrap_or("none"),
            "published snapshot"
        );

        Ok(SnapshotRef::new(model, id, final_dir))
    }
}
