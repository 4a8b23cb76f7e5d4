//! Snapshot identifiers and directory naming
//!
//! A snapshot is identified by its calendar date and a per-day sequence
//! number starting at 1. On disk the directory is named `YYYY-MM-DD-N`, or
//! `<prefix>-YYYY-MM-DD-N` when the store uses prefixed naming.

use chrono::NaiveDate;
use modelver_core::errors::ModelError;
use modelver_core::ModelKind;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

static SNAPSHOT_DIR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:([a-z_]+)-)?(\d{4}-\d{2}-\d{2})-(\d+)$").expect("valid snapshot dir regex")
});

/// How snapshot directories are named
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStyle {
    /// `YYYY-MM-DD-N`
    #[default]
    Bare,
    /// `<prefix>-YYYY-MM-DD-N`
    Prefixed,
}

/// `(date, sequence)`; ordering is chronological
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnapshotId {
    date: NaiveDate,
    sequence: u32,
}

impl SnapshotId {
    pub fn new(date: NaiveDate, sequence: u32) -> Self {
        Self { date, sequence }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// The id following every existing snapshot dated `today`
    ///
    /// Sequence numbers restart at 1 on a new day.
    ///
    /// # Errors
    ///
    /// `InvalidSnapshotId` when today's sequence numbers are exhausted.
    pub fn next_for<I>(today: NaiveDate, existing: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = SnapshotId>,
    {
        let max = existing
            .into_iter()
            .filter(|id| id.date == today)
            .map(|id| id.sequence)
            .max()
            .unwrap_or(0);
        let sequence = max
            .checked_add(1)
            .ok_or_else(|| ModelError::InvalidSnapshotId {
                value: Self::new(today, max).to_string(),
                reason: "no sequence numbers left for this day".to_string(),
            })?;
        Ok(Self::new(today, sequence))
    }

    /// Directory name for this id under `style`
    pub fn dir_name(&self, model: ModelKind, style: NamingStyle) -> String {
        match style {
            NamingStyle::Bare => self.to_string(),
            NamingStyle::Prefixed => format!("{}-{}", model.prefix(), self),
        }
    }

    /// Parse a directory name or id text for `model`
    ///
    /// Both the bare and the prefixed form are accepted.
    ///
    /// # Errors
    ///
    /// `InvalidSnapshotId` when the text is not an id, names an impossible
    /// date or a zero sequence, or carries another model kind's prefix.
    pub fn parse(text: &str, model: ModelKind) -> Result<Self, ModelError> {
        let invalid = |reason: &str| ModelError::InvalidSnapshotId {
            value: text.to_string(),
            reason: reason.to_string(),
        };

        let caps = SNAPSHOT_DIR_RE
            .captures(text.trim())
            .ok_or_else(|| invalid("expected YYYY-MM-DD-N"))?;

        if let Some(prefix) = caps.get(1) {
            if prefix.as_str() != model.prefix() {
                return Err(invalid("prefix belongs to another model kind"));
            }
        }

        let date = NaiveDate::parse_from_str(&caps[2], "%Y-%m-%d")
            .map_err(|_| invalid("not a calendar date"))?;
        let sequence: u32 = caps[3]
            .parse()
            .map_err(|_| invalid("sequence number out of range"))?;
        if sequence == 0 {
            return Err(invalid("sequence numbers start at 1"));
        }

        Ok(Self::new(date, sequence))
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.date.format("%Y-%m-%d"), self.sequence)
    }
}

/// A located snapshot directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRef {
    pub model: ModelKind,
    pub id: SnapshotId,
    pub path: PathBuf,
}

impl SnapshotRef {
    pub fn new(model: ModelKind, id: SnapshotId, path: impl Into<PathBuf>) -> Self {
        Self {
            model,
            id,
            path: path.into(),
        }
    }

    /// The directory name as found on disk
    pub fn dir_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.id.to_string())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for SnapshotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dir_name())
    }
}
