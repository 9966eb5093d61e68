use std::path::{Path, PathBuf};

use anyhow::Context;
use fileadmin_core::{Capabilities, CaseSensitivity};
use serde::Deserialize;
type Result<T> = anyhow::Result<T>;

#[derive(Debug, Clone, Deserialize)]
pub struct FileManagerConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,
    #[serde(default)]
    pub capabilities: Capabilities,
    #[serde(default)]
    pub case_sensitivity: CaseSensitivity,
    #[serde(default = "default_show_hidden")]
    pub show_hidden: bool,
    /// Glob patterns an uploaded file name must match; empty allows any safe name.
    #[serde(default)]
    pub upload_patterns: Vec<String>,
}

impl FileManagerConfig {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("failed to deserialize file manager config")
    }
}

impl Default for FileManagerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            capabilities: Capabilities::default(),
            case_sensitivity: CaseSensitivity::default(),
            show_hidden: default_show_hidden(),
            upload_patterns: Vec::new(),
        }
    }
}

fn default_root() -> PathBuf {
    dirs::home_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("/"))
}

fn default_show_hidden() -> bool {
    true
}
