//! Webhook commands.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use hubkit_core::resources::WebhookInput;
use hubkit_http::endpoints;

use crate::commands::print_all;
use crate::{config, output};

#[derive(Args, Debug)]
pub struct WebhookCommand {
    #[command(subcommand)]
    pub command: WebhookSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum WebhookSubcommand {
    /// List the webhooks of a hub
    List {
        /// Hub ID
        #[arg(long)]
        hub: String,
    },

    /// Fetch a single webhook
    Get {
        /// Hub ID
        #[arg(long)]
        hub: String,

        /// Webhook ID
        id: String,
    },

    /// Update a webhook to match a JSON document
    ///
    /// Only the fields that differ from the current webhook are sent.
    Update {
        /// Hub ID
        #[arg(long)]
        hub: String,

        /// Webhook ID
        id: String,

        /// File holding the desired webhook, or '-' for stdin
        #[arg(long)]
        json: PathBuf,
    },

    /// Delete a webhook
    Delete {
        /// Hub ID
        #[arg(long)]
        hub: String,

        /// Webhook ID
        id: String,
    },
}

pub async fn handle(cmd: WebhookCommand, pretty: bool) -> Result<()> {
    let client = config::client()?;

    match cmd.command {
        WebhookSubcommand::List { hub } => {
            print_all(client.webhook_list_all(&hub).await, "webhooks", pretty)
        }
        WebhookSubcommand::Get { hub, id } => {
            let webhook = client
                .webhook_get(&hub, &id)
                .await
                .context("Failed to get webhook")?;
            output::record(&webhook, pretty)
        }
        WebhookSubcommand::Update { hub, id, json } => {
            let desired = read_input(&json)?;
            let current = client
                .webhook_get(&hub, &id)
                .await
                .context("Failed to get webhook")?;

            let outcome = client
                .update_record(&endpoints::webhook(&hub, &current.id), &current, &desired)
                .await
                .context("Failed to update webhook")?;

            if outcome.is_unchanged() {
                output::note("unchanged");
            } else {
                output::success("Webhook updated");
            }
            output::record(&outcome.into_record(), pretty)
        }
        WebhookSubcommand::Delete { hub, id } => {
            client
                .webhook_delete(&hub, &id)
                .await
                .context("Failed to delete webhook")?;
            output::success(&format!("Deleted webhook {id}"));
            Ok(())
        }
    }
}

/// Read the desired webhook from a file, or stdin for `-`.
fn read_input(path: &Path) -> Result<WebhookInput> {
    let json = if path.as_os_str() == "-" {
        io::read_to_string(io::stdin()).context("Failed to read stdin")?
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?
    };

    serde_json::from_str(&json).context("Invalid webhook JSON")
}
