//! Raw commit export command
//!
//! Dumps history as a JSON array that `clio generate --input` can replay
//! without a checkout.

use clio_core::{error::Result, CommitSource, GitLogSource};
use std::path::PathBuf;
use tracing::debug;

use super::helpers::{load_config, write_output, HistoryArgs};

/// Handle `clio export-commits`
pub fn handle(
    history: HistoryArgs,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    if let Some(ref out_path) = output {
        debug!("Exporting commits to {:?}...", out_path);
    } else {
        debug!("Exporting commits to stdout...");
    }

    let start = history.repo.clone().unwrap_or_else(|| PathBuf::from("."));
    let source = GitLogSource::discover(start)?;
    let config = load_config(config_path.as_deref(), Some(source.repo_root()))?;

    let commits = source.load(&history.query(&config))?;

    let mut json = serde_json::to_string_pretty(&commits)?;
    json.push('\n');
    write_output(&json, output.as_deref())?;

    if let Some(path) = output {
        eprintln!(" Exported {} commits to {}", commits.len(), path.display());
    }

    Ok(())
}
