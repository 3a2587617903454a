//! Configure and config command implementations.

use anyhow::{Context, Result};
use clap::Args;

use hubkit_core::ApiUrl;

use crate::config::Resolved;
use crate::config::storage::{self, StoredConfig};
use crate::output;

#[derive(Args, Debug)]
pub struct ConfigureArgs {
    /// Base URL of the content API
    #[arg(long)]
    pub url: String,

    /// Bearer token sent with every request
    #[arg(long)]
    pub token: String,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {}

pub fn run(args: ConfigureArgs) -> Result<()> {
    let api_url = ApiUrl::new(&args.url).context("Invalid API URL")?;

    let stored = StoredConfig {
        api_url: Some(api_url.to_string()),
        token: Some(args.token),
    };
    let path = storage::save_config(&stored).context("Failed to save configuration")?;

    output::success("Configuration saved");
    output::field("API URL", api_url.as_str());
    output::field("File", &path.display().to_string());

    Ok(())
}

pub fn show(_args: ConfigArgs) -> Result<()> {
    let resolved = Resolved::load().context("Failed to load configuration")?;

    match &resolved.api_url {
        Some((url, source)) => output::field("API URL", &format!("{url} ({})", source.as_str())),
        None => output::field("API URL", "(not set)"),
    }
    match &resolved.token {
        Some((_, source)) => output::field("Token", &format!("[REDACTED] ({})", source.as_str())),
        None => output::field("Token", "(not set)"),
    }

    Ok(())
}
