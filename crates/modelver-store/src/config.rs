//! Store configuration
//!
//! ```toml
//! base_dir = "models"
//! naming = "prefixed"   # or "bare" (default)
//! ```
//!
//! Each model kind keeps its snapshots in its own subdirectory of
//! `base_dir`: `class_model/`, `usecase_model/`, `sequence_model/`.

use crate::errors::{config_error, io_error_at, Result};
use crate::snapshot_id::NamingStyle;
use modelver_core::ModelKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub base_dir: PathBuf,
    #[serde(default)]
    pub naming: NamingStyle,
}

impl StoreConfig {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            naming: NamingStyle::default(),
        }
    }

    pub fn with_naming(mut self, naming: NamingStyle) -> Self {
        self.naming = naming;
        self
    }

    /// Parse a TOML document
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the document is not valid TOML or lacks `base_dir`.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| config_error(format!("invalid store config: {}", e)))
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    ///
    /// `Io` when the file cannot be read, otherwise as [`Self::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self> {
        let text =
            std::fs::read_to_string(path).map_err(|e| io_error_at("load_config", path, e))?;
        Self::from_toml_str(&text)
    }

    /// Directory holding the snapshots of `model`
    pub fn model_dir(&self, model: ModelKind) -> PathBuf {
        self.base_dir.join(format!("{}_model", model.prefix()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_default_naming() {
        let config = StoreConfig::from_toml_str("base_dir = \"models\"").unwrap();
        assert_eq!(config.base_dir, PathBuf::from("models"));
        assert_eq!(config.naming, NamingStyle::Bare);
    }

    #[test]
    fn test_parse_prefixed() {
        let config =
            StoreConfig::from_toml_str("base_dir = \"/srv/m\"\nnaming = \"prefixed\"").unwrap();
        assert_eq!(config.naming, NamingStyle::Prefixed);
        assert_eq!(
            config.model_dir(ModelKind::Sequence),
            PathBuf::from("/srv/m/sequence_model")
        );
    }

    #[test]
    fn test_missing_base_dir_rejected() {
        let err = StoreConfig::from_toml_str("naming = \"bare\"").unwrap_err();
        assert_eq!(err.code(), "ERR_INVALID_INPUT");
    }
}
