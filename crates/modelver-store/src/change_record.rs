//! Change record written alongside every snapshot
//!
//! `change.json` is the machine-readable record used for lineage walks;
//! `CHANGE.md` is the same information for people.

use crate::errors::{io_error_at, serialization_error, Result};
use modelver_core::ModelKind;
use modelver_core_types::CycleId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const RECORD_SCHEMA_VERSION: u32 = 1;
pub const CHANGE_JSON: &str = "change.json";
pub const CHANGE_MD: &str = "CHANGE.md";

/// Size and digest of one written artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub count: usize,
    pub sha256: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub record_schema_version: u32,
    pub snapshot_id: String,
    pub model_kind: ModelKind,
    /// Directory name of the baseline snapshot
    pub parent_snapshot_id: Option<String>,
    pub change_request: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle_id: Option<CycleId>,
    /// RFC 3339
    pub created_at: String,
    /// Keyed by collection name
    pub collections: BTreeMap<String, CollectionSummary>,
}

impl ChangeRecord {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| serialization_error("write_change_record", e))
    }

    pub fn render_markdown(&self) -> String {
        let mut out = format!("# {} Change Record\n\n", self.model_kind.title());
        out.push_str(&format!("## Change Request\n{}\n\n", self.change_request.trim()));
        out.push_str("## Collections\n");
        for (name, summary) in &self.collections {
            out.push_str(&format!("- {}: {} elements\n", name, summary.count));
        }
        match &self.parent_snapshot_id {
            Some(parent) => out.push_str(&format!("\n**Baseline Version**: {}\n", parent)),
            None => out.push_str("\n**Baseline Version**: none\n"),
        }
        out
    }
}

/// Read `change.json` from a snapshot directory
///
/// Returns `None` when the snapshot has no record.
///
/// # Errors
///
/// `Io` for unreadable files, `Serialization` for malformed records.
pub fn read(snapshot_dir: &Path) -> Result<Option<ChangeRecord>> {
    let path = snapshot_dir.join(CHANGE_JSON);
    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_error_at("read_change_record", &path, e)),
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|e| serialization_error("read_change_record", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ChangeRecord {
        let mut collections = BTreeMap::new();
        collections.insert(
            "classes".to_string(),
            CollectionSummary {
                count: 2,
                sha256: "00".repeat(32),
            },
        );
        ChangeRecord {
            record_schema_version: RECORD_SCHEMA_VERSION,
            snapshot_id: "2025-01-02-1".to_string(),
            model_kind: ModelKind::Class,
            parent_snapshot_id: Some("2025-01-01-3".to_string()),
            change_request: "Split Payment".to_string(),
            cycle_id: None,
            created_at: "2025-01-02T10:00:00+00:00".to_string(),
            collections,
        }
    }

    #[test]
    fn test_json_field_names() {
        let json = sample().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["model_kind"], "class");
        assert_eq!(value["parent_snapshot_id"], "2025-01-01-3");
        assert_eq!(value["collections"]["classes"]["count"], 2);
        assert!(value.get("cycle_id").is_none());
    }

    #[test]
    fn test_markdown_mentions_request_and_baseline() {
        let md = sample().render_markdown();
        assert!(md.contains("Split Payment"));
        assert!(md.contains("**Baseline Version**: 2025-01-01-3"));
    }

    #[test]
    fn test_read_missing_is_none() {
        let dir = tempfile::TempDir::new().unwrap();
        assert_eq!(read(dir.path()).unwrap(), None);
    }
}
