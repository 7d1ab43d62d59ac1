pub mod commands;
pub mod logging;
pub mod types;

use clap::Parser;

/// Run the command-line interface
pub async fn run() {
    let cli = types::Cli::parse();

    let (debug, quiet) = match &cli.command {
        Some(types::Commands::Build { verbose, quiet, .. }) => (cli.debug || *verbose, *quiet),
        _ => (cli.debug, false),
    };

    logging::init_logging(debug, quiet);
    logging::configure_backtrace(cli.trace);

    match &cli.command {
        Some(types::Commands::Build {
            drafts,
            unpublished,
            ..
        }) => {
            let ok = commands::handle_build_command(
                cli.source.as_ref(),
                cli.destination.as_ref(),
                cli.config.as_ref(),
                *drafts,
                *unpublished,
            );
            if !ok {
                std::process::exit(1);
            }
        }
        Some(types::Commands::Serve {
            host,
            port,
            drafts,
            unpublished,
            skip_initial_build,
        }) => {
            commands::handle_serve_command(
                cli.source.as_ref(),
                cli.destination.as_ref(),
                cli.config.as_ref(),
                host,
                *port,
                *drafts,
                *unpublished,
                *skip_initial_build,
            )
            .await;
        }
        Some(types::Commands::Clean {}) => {
            commands::handle_clean_command(
                cli.source.as_ref(),
                cli.destination.as_ref(),
                cli.config.as_ref(),
            );
        }
        Some(types::Commands::New { path, force }) => {
            commands::handle_new_command(path, *force);
        }
        None => {
            // Default to a plain build when no subcommand is given
            let ok = commands::handle_build_command(
                cli.source.as_ref(),
                cli.destination.as_ref(),
                cli.config.as_ref(),
                false,
                false,
            );
            if !ok {
                std::process::exit(1);
            }
        }
    }
}
