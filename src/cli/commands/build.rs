use std::path::PathBuf;

use log::{error, info};

use crate::builder;
use crate::collections::LoadOptions;
use crate::config::{self, Config};

/// Load configuration with CLI overrides applied
pub fn load_config_with_overrides(
    source: Option<&PathBuf>,
    destination: Option<&PathBuf>,
    config_file: Option<&PathBuf>,
) -> Option<Config> {
    let source_dir = source.cloned().unwrap_or_else(|| PathBuf::from("."));

    let mut config = match config::load_config(&source_dir, config_file) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config: {}", e);
            return None;
        }
    };

    if let Some(destination) = destination {
        config.destination = destination.clone();
    }

    Some(config)
}

/// Handle the build command
pub fn handle_build_command(
    source: Option<&PathBuf>,
    destination: Option<&PathBuf>,
    config_file: Option<&PathBuf>,
    drafts: bool,
    unpublished: bool,
) -> bool {
    let config = match load_config_with_overrides(source, destination, config_file) {
        Some(config) => config,
        None => return false,
    };

    let options = LoadOptions {
        drafts,
        unpublished,
    };

    match builder::build_site(&config, options) {
        Ok(stats) => {
            info!(
                "Site built successfully at {} ({} documents, {} pages)",
                builder::destination_dir(&config).display(),
                stats.documents,
                stats.pages
            );
            true
        }
        Err(e) => {
            error!("Failed to build site: {}", e);
            false
        }
    }
}
