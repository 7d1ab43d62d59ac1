use std::path::{Path, PathBuf};

use log::debug;

use crate::config::types::Config;
use crate::config::validation;
use crate::utils::error::{BoxResult, QuillError};
use crate::utils::fs;

/// Configuration file names to look for, in priority order
const CONFIG_FILES: [&str; 3] = ["_config.yml", "_config.yaml", "_config.toml"];

/// Load the site configuration.
///
/// Uses the explicitly named file when given, otherwise the first of
/// `_config.yml` / `_config.yaml` / `_config.toml` found in the source
/// directory. A site without a config file builds with defaults.
pub fn load_config<P: AsRef<Path>>(
    source_dir: P,
    config_file: Option<&PathBuf>,
) -> BoxResult<Config> {
    let config_path = match config_file {
        Some(path) => {
            if !path.exists() {
                return Err(QuillError::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                ))
                .into());
            }
            Some(path.clone())
        }
        None => find_default_config_file(&source_dir),
    };

    let mut config = match config_path {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            parse_config_file(&path)?
        }
        None => {
            debug!("No configuration file found, using defaults");
            Config::default()
        }
    };

    // The config file's source setting is relative to where it lives
    if config.source == PathBuf::from(".") {
        config.source = source_dir.as_ref().to_path_buf();
    }

    validation::validate_config(&config)?;

    Ok(config)
}

/// Find the first default configuration file in the source directory
fn find_default_config_file<P: AsRef<Path>>(source_dir: P) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| source_dir.as_ref().join(name))
        .find(|path| path.exists())
}

/// Parse a configuration file based on its extension
fn parse_config_file(path: &Path) -> BoxResult<Config> {
    let content = fs::read_file(path).map_err(|e| {
        QuillError::Config(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "yml" | "yaml" | "" => serde_yaml::from_str(&content).map_err(|e| {
            QuillError::Config(format!(
                "Failed to parse YAML configuration ({}): {}",
                path.display(),
                e
            ))
            .into()
        }),
        "toml" => toml::from_str(&content).map_err(|e| {
            QuillError::Config(format!(
                "Failed to parse TOML configuration ({}): {}",
                path.display(),
                e
            ))
            .into()
        }),
        other => Err(QuillError::Config(format!(
            "Unsupported configuration file format: {}",
            other
        ))
        .into()),
    }
}
