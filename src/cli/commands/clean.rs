use std::path::PathBuf;

use log::{error, info};

use crate::builder;
use crate::cli::commands::build::load_config_with_overrides;

/// Handle the clean command
pub fn handle_clean_command(
    source: Option<&PathBuf>,
    destination: Option<&PathBuf>,
    config_file: Option<&PathBuf>,
) {
    let config = match load_config_with_overrides(source, destination, config_file) {
        Some(config) => config,
        None => return,
    };

    match builder::clean_destination(&config) {
        Ok(()) => info!(
            "Cleaned {}",
            builder::destination_dir(&config).display()
        ),
        Err(e) => error!("Failed to clean site: {}", e),
    }
}
