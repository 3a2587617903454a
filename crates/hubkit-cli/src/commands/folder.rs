//! Folder commands.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::commands::print_all;
use crate::config;

#[derive(Args, Debug)]
pub struct FolderCommand {
    #[command(subcommand)]
    pub command: FolderSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum FolderSubcommand {
    /// List the folders of a repository
    List {
        /// Repository ID
        #[arg(long)]
        repository: String,
    },
}

pub async fn handle(cmd: FolderCommand, pretty: bool) -> Result<()> {
    let client = config::client()?;

    match cmd.command {
        FolderSubcommand::List { repository } => print_all(
            client.folder_list_all(&repository).await,
            "folders",
            pretty,
        ),
    }
}
