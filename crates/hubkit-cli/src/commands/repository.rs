//! Content repository commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::commands::print_all;
use crate::{config, output};

#[derive(Args, Debug)]
pub struct RepositoryCommand {
    #[command(subcommand)]
    pub command: RepositorySubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RepositorySubcommand {
    /// List the content repositories of a hub
    List {
        /// Hub ID
        #[arg(long)]
        hub: String,
    },

    /// Fetch a single repository
    Get {
        /// Repository ID
        id: String,
    },
}

pub async fn handle(cmd: RepositoryCommand, pretty: bool) -> Result<()> {
    let client = config::client()?;

    match cmd.command {
        RepositorySubcommand::List { hub } => print_all(
            client.repository_list_all(&hub).await,
            "repositories",
            pretty,
        ),
        RepositorySubcommand::Get { id } => {
            let repository = client
                .repository_get(&id)
                .await
                .context("Failed to get repository")?;
            output::record(&repository, pretty)
        }
    }
}
