//! Hub commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::commands::print_all;
use crate::{config, output};

#[derive(Args, Debug)]
pub struct HubCommand {
    #[command(subcommand)]
    pub command: HubSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum HubSubcommand {
    /// List every hub the token can access
    List,

    /// Fetch a single hub
    Get {
        /// Hub ID
        id: String,
    },
}

pub async fn handle(cmd: HubCommand, pretty: bool) -> Result<()> {
    let client = config::client()?;

    match cmd.command {
        HubSubcommand::List => print_all(client.hub_list_all().await, "hubs", pretty),
        HubSubcommand::Get { id } => {
            let hub = client.hub_get(&id).await.context("Failed to get hub")?;
            output::record(&hub, pretty)
        }
    }
}
