use std::path::{Path, PathBuf};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use crate::types::TranslateOptions;

/// How the generated C program is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// Compiler binary, looked up on the PATH.
    pub compiler: String,
    /// Flags placed before `-o`.
    pub flags: Vec<String>,
    /// Libraries placed after the source file.
    pub libs: Vec<String>,
    /// Where `ml-<pid>.c` and its binary are written. Defaults to the system temp dir.
    pub artifact_dir: Option<PathBuf>,
    pub keep_artifacts: bool,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        ToolchainConfig {
            compiler: "gcc".to_string(),
            flags: vec!["-std=c11".into(), "-Wall".into(), "-Werror".into()],
            libs: vec!["-lm".into()],
            artifact_dir: None,
            keep_artifacts: false,
        }
    }
}

/// Everything that can be set from a `--config` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub toolchain: ToolchainConfig,
    pub translate: TranslateOptions,
}

impl Config {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid configuration")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("could not read config {}", path.display()))?;
        let config = Self::from_json(&json)?;
        log::debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}
