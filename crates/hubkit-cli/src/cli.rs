//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::configure::{ConfigArgs, ConfigureArgs};
use crate::commands::content_type::ContentTypeCommand;
use crate::commands::folder::FolderCommand;
use crate::commands::hub::HubCommand;
use crate::commands::index::IndexCommand;
use crate::commands::item::ItemCommand;
use crate::commands::repository::RepositoryCommand;
use crate::commands::schema::SchemaCommand;
use crate::commands::webhook::WebhookCommand;

/// Command line client for the content management API.
#[derive(Parser, Debug)]
#[command(name = "hubkit")]
#[command(author, version = env!("HUBKIT_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save the API URL and token
    Configure(ConfigureArgs),

    /// Show the active configuration
    Config(ConfigArgs),

    /// Hub operations
    Hub(HubCommand),

    /// Content repository operations
    Repository(RepositoryCommand),

    /// Content type operations
    ContentType(ContentTypeCommand),

    /// Content type schema operations
    Schema(SchemaCommand),

    /// Folder operations
    Folder(FolderCommand),

    /// Content item operations
    Item(ItemCommand),

    /// Webhook operations
    Webhook(WebhookCommand),

    /// Search index operations
    Index(IndexCommand),
}
