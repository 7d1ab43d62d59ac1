// Module declarations
mod builder;
mod cli;
mod collections;
mod config;
mod front_matter;
mod layout;
mod templating;
mod markdown;
mod server;
mod toc;
mod utils;

#[tokio::main]
async fn main() {
    // Run the CLI
    cli::run().await;
}
