use std::path::PathBuf;

use log::error;

use crate::builder;
use crate::cli::commands::build::{handle_build_command, load_config_with_overrides};
use crate::server;

/// Handle the serve command: build, then serve the destination directory
#[allow(clippy::too_many_arguments)]
pub async fn handle_serve_command(
    source: Option<&PathBuf>,
    destination: Option<&PathBuf>,
    config_file: Option<&PathBuf>,
    host: &str,
    port: u16,
    drafts: bool,
    unpublished: bool,
    skip_initial_build: bool,
) {
    if !skip_initial_build
        && !handle_build_command(source, destination, config_file, drafts, unpublished)
    {
        return;
    }

    let config = match load_config_with_overrides(source, destination, config_file) {
        Some(config) => config,
        None => return,
    };

    let destination = builder::destination_dir(&config);
    if let Err(e) = server::serve(&destination, host, port).await {
        error!("{}", e);
    }
}
