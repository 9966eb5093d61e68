use std::path::Path;

use anyhow::Context;
use file_manager::FileManagerConfig;
use serde::Deserialize;
type Result<T> = anyhow::Result<T>;

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default)]
    pub file_manager: FileManagerConfig,
}

impl ServerConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("failed to deserialize server config")
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            file_manager: FileManagerConfig::default(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}
