//! Content type schema commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::commands::print_all;
use crate::{config, output};

#[derive(Args, Debug)]
pub struct SchemaCommand {
    #[command(subcommand)]
    pub command: SchemaSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SchemaSubcommand {
    /// List the schemas of a hub
    List {
        /// Hub ID
        #[arg(long)]
        hub: String,
    },

    /// Fetch a single schema
    Get {
        /// Schema ID
        id: String,

        /// Print only the schema document
        #[arg(long)]
        body: bool,
    },
}

pub async fn handle(cmd: SchemaCommand, pretty: bool) -> Result<()> {
    let client = config::client()?;

    match cmd.command {
        SchemaSubcommand::List { hub } => {
            print_all(client.schema_list_all(&hub).await, "schemas", pretty)
        }
        SchemaSubcommand::Get { id, body } => {
            let schema = client.schema_get(&id).await.context("Failed to get schema")?;

            if body {
                // The body is itself a JSON document held in a string.
                let document: serde_json::Value =
                    serde_json::from_str(&schema.body).context("Schema body is not JSON")?;
                output::record(&document, pretty)
            } else {
                output::record(&schema, pretty)
            }
        }
    }
}
