//! Content item commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use futures_util::StreamExt;

use hubkit_core::pagination::{ContentStatus, ListQuery, Projection};
use hubkit_core::resources::ContentItem;
use hubkit_http::endpoints;

use crate::{config, output};

#[derive(Args, Debug)]
pub struct ItemCommand {
    #[command(subcommand)]
    pub command: ItemSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ItemSubcommand {
    /// List the items of a repository
    List(ListArgs),

    /// Fetch a single item
    Get {
        /// Item ID
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Repository ID
    #[arg(long)]
    pub repository: String,

    /// Only items with this status
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,

    /// Only items in this folder
    #[arg(long)]
    pub folder: Option<String>,

    /// Leave item bodies out
    #[arg(long)]
    pub basic: bool,

    /// Items per page
    #[arg(long)]
    pub size: Option<u32>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum StatusArg {
    Active,
    Archived,
}

impl From<StatusArg> for ContentStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Active => ContentStatus::Active,
            StatusArg::Archived => ContentStatus::Archived,
        }
    }
}

impl ListArgs {
    fn query(&self) -> ListQuery {
        let mut query = ListQuery::new();
        if let Some(status) = self.status {
            query = query.with_status(status.into());
        }
        if let Some(folder) = &self.folder {
            query = query.with_folder(folder.clone());
        }
        if self.basic {
            query = query.with_projection(Projection::Basic);
        }
        if let Some(size) = self.size {
            query = query.with_size(size);
        }
        query.with_item_defaults()
    }
}

pub async fn handle(cmd: ItemCommand, pretty: bool) -> Result<()> {
    let client = config::client()?;

    match cmd.command {
        ItemSubcommand::List(args) => {
            // Repositories can hold many items; print them as pages arrive.
            let mut items = client.stream_all::<ContentItem>(
                &endpoints::repository_items(&args.repository),
                args.query(),
            );

            let mut count = 0usize;
            while let Some(item) = items.next().await {
                let item =
                    item.with_context(|| format!("Failed to list items after {count} items"))?;
                output::record(&item, pretty)?;
                count += 1;
            }

            if count == 0 {
                output::note("No items found.");
            }
            Ok(())
        }
        ItemSubcommand::Get { id } => {
            let item = client.item_get(&id).await.context("Failed to get item")?;
            output::record(&item, pretty)
        }
    }
}
