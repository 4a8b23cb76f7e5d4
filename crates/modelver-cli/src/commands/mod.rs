//! CLI commands
//!
//! Each command takes its clap args plus the resolved [`StoreConfig`].

pub mod apply;
pub mod diff;
pub mod eval;
pub mod history;
pub mod latest;
pub mod show;

use clap::{Args, ValueEnum};
use modelver_core::ModelKind;
use modelver_store::version_store::{find_latest, resolve};
use modelver_store::{NamingStyle, SnapshotRef, StoreConfig};
use std::error::Error;
use std::path::PathBuf;

const DEFAULT_BASE_DIR: &str = "models";

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Naming {
    /// `YYYY-MM-DD-N`
    Bare,
    /// `<model>-YYYY-MM-DD-N`
    Prefixed,
}

impl From<Naming> for NamingStyle {
    fn from(naming: Naming) -> Self {
        match naming {
            Naming::Bare => NamingStyle::Bare,
            Naming::Prefixed => NamingStyle::Prefixed,
        }
    }
}

/// Store location flags shared by every command
#[derive(Debug, Args)]
pub struct StoreArgs {
    /// Store configuration file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the per-model snapshot directories (overrides the config file)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// Directory naming for new snapshots (overrides the config file)
    #[arg(long, global = true, value_enum)]
    pub naming: Option<Naming>,
}

impl StoreArgs {
    /// Config file first, then flag overrides
    pub fn resolve(&self) -> Result<StoreConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => StoreConfig::load(path)?,
            None => StoreConfig::new(DEFAULT_BASE_DIR),
        };
        if let Some(base_dir) = &self.base_dir {
            config.base_dir = base_dir.clone();
        }
        if let Some(naming) = self.naming {
            config.naming = naming.into();
        }
        Ok(config)
    }
}

/// The snapshot named by `id`, or the latest one
pub(crate) fn resolve_snapshot(
    config: &StoreConfig,
    model: ModelKind,
    id: Option<&str>,
) -> Result<SnapshotRef, Box<dyn Error>> {
    match id {
        Some(id) => Ok(resolve(config, model, id)?),
        None => find_latest(config, model)?.ok_or_else(|| -> Box<dyn Error> {
            format!(
                "no {} snapshots under {}",
                model,
                config.model_dir(model).display()
            )
            .into()
        }),
    }
}
