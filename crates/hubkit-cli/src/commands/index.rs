//! Search index commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::commands::print_all;
use crate::{config, output};

#[derive(Args, Debug)]
pub struct IndexCommand {
    #[command(subcommand)]
    pub command: IndexSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum IndexSubcommand {
    /// List the search indexes of a hub
    List {
        /// Hub ID
        #[arg(long)]
        hub: String,
    },

    /// Show the engine settings of an index
    Settings {
        /// Hub ID
        #[arg(long)]
        hub: String,

        /// Index ID
        id: String,
    },

    /// List the webhooks that keep an index in sync
    Webhooks {
        /// Hub ID
        #[arg(long)]
        hub: String,

        /// Index ID
        id: String,
    },
}

pub async fn handle(cmd: IndexCommand, pretty: bool) -> Result<()> {
    let client = config::client()?;

    match cmd.command {
        IndexSubcommand::List { hub } => print_all(
            client.search_index_list_all(&hub).await,
            "search indexes",
            pretty,
        ),
        IndexSubcommand::Settings { hub, id } => {
            let settings = client
                .search_index_settings_get(&hub, &id)
                .await
                .context("Failed to get index settings")?;
            output::record(&settings, pretty)
        }
        IndexSubcommand::Webhooks { hub, id } => {
            let webhooks = client
                .search_index_webhooks(&hub, &id)
                .await
                .context("Failed to get index webhooks")?;
            output::records(&webhooks, pretty)
        }
    }
}
