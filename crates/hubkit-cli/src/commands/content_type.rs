//! Content type commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::commands::print_all;
use crate::{config, output};

#[derive(Args, Debug)]
pub struct ContentTypeCommand {
    #[command(subcommand)]
    pub command: ContentTypeSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ContentTypeSubcommand {
    /// List the content types registered in a hub
    List {
        /// Hub ID
        #[arg(long)]
        hub: String,
    },

    /// Fetch a single content type
    Get {
        /// Content type ID
        id: String,
    },
}

pub async fn handle(cmd: ContentTypeCommand, pretty: bool) -> Result<()> {
    let client = config::client()?;

    match cmd.command {
        ContentTypeSubcommand::List { hub } => print_all(
            client.content_type_list_all(&hub).await,
            "content types",
            pretty,
        ),
        ContentTypeSubcommand::Get { id } => {
            let content_type = client
                .content_type_get(&id)
                .await
                .context("Failed to get content type")?;
            output::record(&content_type, pretty)
        }
    }
}
