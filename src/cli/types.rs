use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI parser structure
#[derive(Parser)]
#[command(name = "quillpress")]
#[command(about = "Content-collection driven static blog generator", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Source directory (defaults to ./)
    #[arg(short, long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Destination directory (defaults to ./_site)
    #[arg(short, long, value_name = "DIR")]
    pub destination: Option<PathBuf>,

    /// Custom configuration file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Show the full backtrace when an error occurs
    #[arg(short, long, default_value_t = false)]
    pub trace: bool,

    /// Enable verbose debugging
    #[arg(short = 'g', long, default_value_t = false)]
    pub debug: bool,
}

/// Subcommands for the CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Build your site
    #[command(alias = "b")]
    Build {
        /// Render posts in the drafts folder
        #[arg(short = 'D', long, default_value_t = false)]
        drafts: bool,

        /// Render posts that were marked as unpublished
        #[arg(long, default_value_t = false)]
        unpublished: bool,

        /// Silence output
        #[arg(short, long, default_value_t = false)]
        quiet: bool,

        /// Print verbose output
        #[arg(short = 'V', long, default_value_t = false)]
        verbose: bool,
    },

    /// Build, then serve your site locally
    #[command(alias = "s", alias = "server")]
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long, value_name = "HOST", default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short = 'P', long, value_name = "PORT", default_value = "4000")]
        port: u16,

        /// Render posts in the drafts folder
        #[arg(short = 'D', long, default_value_t = false)]
        drafts: bool,

        /// Render posts that were marked as unpublished
        #[arg(long, default_value_t = false)]
        unpublished: bool,

        /// Skip the build and serve the existing destination
        #[arg(long, default_value_t = false)]
        skip_initial_build: bool,
    },

    /// Remove the site output without building
    Clean {},

    /// Scaffold a new site
    New {
        /// Directory to create the site in
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Scaffold into a non-empty directory
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}
