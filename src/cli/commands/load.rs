//! Load command - mirror labelled issues into the hub

use std::path::Path;

use anyhow::Context;
use log::info;

use codeuw::adapters::github::GitHubClient;
use codeuw::adapters::state_file::MsgpackStateStore;
use codeuw::config::Config;
use codeuw::core::services::{LoadOptions, Loader};
use codeuw::output::{LoadResult, OutputMode};

/// Run the loader once
pub fn load(
    config_path: &Path,
    state_path: &Path,
    dry_run: bool,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let config = Config::load(config_path)?;
    let options = LoadOptions {
        hub: config.hub()?,
        label: config.label.clone(),
        template_path: config.template_path.clone(),
        sources: config.sources()?,
        dry_run,
    };

    let client = GitHubClient::from_env()?;
    let store = MsgpackStateStore::new(state_path);

    info!(
        "Loading '{}' issues from {} repositories into {}{}",
        options.label,
        options.sources.len(),
        options.hub,
        if dry_run { " (dry run)" } else { "" }
    );

    // One run, sequential requests
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let report = runtime.block_on(Loader::new(&client, &store).run(&options))?;

    LoadResult::new(&report).render(mode)?;
    Ok(())
}
