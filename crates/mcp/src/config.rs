use anyhow::{Context, Result};
use docscout_core::ResolverConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,

    #[serde(default)]
    pub resolver: ResolverConfig,
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from("./docs")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            docs_dir: default_docs_dir(),
            resolver: ResolverConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load the config file if it exists, otherwise use defaults.
    ///
    /// `docs_dir_override` (from the command line) wins over the file.
    pub fn load(config_path: &Path, docs_dir_override: Option<PathBuf>) -> Result<Self> {
        let mut config: Self = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .context("Failed to read configuration file")?;
            toml::from_str(&content).context("Failed to parse configuration file")?
        } else {
            tracing::info!("Configuration file not found, using defaults");
            Self::default()
        };

        if let Some(docs_dir) = docs_dir_override {
            config.docs_dir = docs_dir;
        }

        config
            .resolver
            .validate()
            .context("Invalid resolver configuration")?;

        Ok(config)
    }
}
