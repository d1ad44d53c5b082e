//! Miner configuration stored in `tunneler.toml`.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::core::catalog::Catalog;
use crate::core::fuel::DEFAULT_LOW_FUEL_THRESHOLD;

/// Miner configuration (TOML).
///
/// Built once before mining starts and read-only afterwards. Missing fields
/// default to values suitable for a short exploratory strip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MinerConfig {
    /// Rows to advance from the mouth.
    pub depth: u32,

    /// Tunnel height in cells (at least 2).
    pub height: u32,

    /// Top up fuel from inventory before each row.
    pub auto_refuel: bool,

    /// Fuel level that triggers a top-up.
    pub low_fuel_threshold: u32,

    /// Digs allowed while clearing collapsing fill from one cell.
    pub clear_retry_limit: u32,

    pub catalog: Catalog,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            depth: 16,
            height: 3,
            auto_refuel: true,
            low_fuel_threshold: DEFAULT_LOW_FUEL_THRESHOLD,
            clear_retry_limit: 64,
            catalog: Catalog::default(),
        }
    }
}

impl MinerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.depth == 0 {
            return Err(anyhow!("depth must be > 0"));
        }
        if self.height < 2 {
            return Err(anyhow!("height must be >= 2"));
        }
        if self.clear_retry_limit == 0 {
            return Err(anyhow!("clear_retry_limit must be > 0"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// A missing file yields the validated defaults; any other read error is
/// reported.
pub fn load_config(path: &Path) -> Result<MinerConfig> {
    let cfg = match fs::read_to_string(path) {
        Ok(contents) => toml::from_str::<MinerConfig>(&contents)
            .with_context(|| format!("parse {}", path.display()))?,
        Err(err) if err.kind() == ErrorKind::NotFound => MinerConfig::default(),
        Err(err) => return Err(err).with_context(|| format!("read {}", path.display())),
    };
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

/// Replace the config at `path` in one rename.
///
/// The TOML is staged in a temp file next to `path` and renamed over it.
pub fn write_config(path: &Path, cfg: &MinerConfig) -> Result<()> {
    cfg.validate()?;
    let mut body = toml::to_string_pretty(cfg).context("serialize config toml")?;
    body.push('\n');

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).with_context(|| format!("create directory {}", dir.display()))?;
    let mut staged = NamedTempFile::new_in(dir)
        .with_context(|| format!("stage config in {}", dir.display()))?;
    staged.write_all(body.as_bytes()).context("write staged config")?;
    staged
        .persist(path)
        .with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
