//! Harness configuration stored in `harness.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

/// Default config location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "harness.toml";

/// Harness configuration (TOML).
///
/// Every field is optional; a missing file is the same as an empty one.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HarnessConfig {
    /// Directory holding `day<N>.txt` input files.
    pub inputs_dir: PathBuf,

    /// Directory the naming convention resolves unit sources against.
    pub source_root: PathBuf,

    /// Exit with a nonzero code when compilation, loading or any sub-problem fails.
    pub strict_exit: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            inputs_dir: PathBuf::from("inputs"),
            source_root: PathBuf::from("solutions/src"),
            strict_exit: false,
        }
    }
}

impl HarnessConfig {
    pub fn validate(&self) -> Result<()> {
        if self.inputs_dir.as_os_str().is_empty() {
            return Err(anyhow!("inputs_dir must be non-empty"));
        }
        if self.source_root.as_os_str().is_empty() {
            return Err(anyhow!("source_root must be non-empty"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `HarnessConfig::default()`.
pub fn load_config(path: &Path) -> Result<HarnessConfig> {
    if !path.exists() {
        let cfg = HarnessConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: HarnessConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
