use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::infra::{
    config::{self, AppConfig},
    contracts::ConfigAdapter,
};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Resolves configuration from `config.toml` in the working directory,
/// or from the path given on the command line.
#[derive(Debug, Clone)]
pub struct FileConfigAdapter {
    path: PathBuf,
}

impl FileConfigAdapter {
    pub fn new(path: Option<&Path>) -> Self {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        Self { path }
    }
}

impl ConfigAdapter for FileConfigAdapter {
    fn load(&self) -> Result<AppConfig> {
        let config = config::load(&self.path)?;
        tracing::debug!(path = %self.path.display(), "configuration resolved");
        Ok(config)
    }
}
