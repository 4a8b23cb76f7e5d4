//! modelver store - filesystem persistence for model snapshots
//!
//! Provides:
//! - Snapshot id parsing and allocation (`YYYY-MM-DD-N`, optionally kind-prefixed)
//! - Discovery of the latest snapshot and tolerant loading into `ModelContents`
//! - Staged, atomic snapshot writes with a change record
//! - Lineage walks over parent links
//! - Store configuration from TOML

pub mod artifact;
pub mod change_record;
pub mod config;
pub mod errors;
pub mod files;
pub mod lineage;
pub mod snapshot_id;
pub mod version_store;
pub mod writer;

// Re-export key types
pub use config::StoreConfig;
pub use errors::Result;
pub use snapshot_id::{NamingStyle, SnapshotId, SnapshotRef};
pub use version_store::{find_latest, load, LoadedSnapshot};
pub use writer::{SnapshotWriter, WriteRequest};
