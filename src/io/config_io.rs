use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Parse config.toml. A missing file yields `Ok(None)`.
pub fn read_config(path: &Path) -> Result<Option<AppConfig>, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    toml::from_str(&text)
        .map(Some)
        .map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Load config.toml, falling back to defaults when it is missing or broken.
pub fn load_config(path: &Path) -> AppConfig {
    match read_config(path) {
        Ok(Some(config)) => config,
        Ok(None) => AppConfig::default(),
        Err(e) => {
            tracing::warn!(error = %e, "using default config");
            AppConfig::default()
        }
    }
}
