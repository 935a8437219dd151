use std::{fs, io, path::Path};

use crate::infra::{
    config::{file_config::ConfigOverlay, AppConfig},
    error::AppError,
};

/// Reads and resolves the config file. A missing file is not an error;
/// it resolves to the built-in defaults.
pub fn load(path: &Path) -> Result<AppConfig, AppError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(AppError::ConfigRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let overlay: ConfigOverlay = toml::from_str(&raw).map_err(|source| AppError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(overlay.into_config())
}
