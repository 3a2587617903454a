//! hubkit - CLI tool for content hubs.
//!
//! A thin wrapper over `hubkit-http`, intended for inspecting hubs and
//! editing webhooks from a terminal or a script.

mod cli;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let pretty = cli.pretty;
    match cli.command {
        Commands::Configure(args) => commands::configure::run(args),
        Commands::Config(args) => commands::configure::show(args),
        Commands::Hub(cmd) => commands::hub::handle(cmd, pretty).await,
        Commands::Repository(cmd) => commands::repository::handle(cmd, pretty).await,
        Commands::ContentType(cmd) => commands::content_type::handle(cmd, pretty).await,
        Commands::Schema(cmd) => commands::schema::handle(cmd, pretty).await,
        Commands::Folder(cmd) => commands::folder::handle(cmd, pretty).await,
        Commands::Item(cmd) => commands::item::handle(cmd, pretty).await,
        Commands::Webhook(cmd) => commands::webhook::handle(cmd, pretty).await,
        Commands::Index(cmd) => commands::index::handle(cmd, pretty).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so that stdout stays machine readable.
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
