//! Shared helper functions for CLI commands
//!
//! Repository and configuration resolution, history-query assembly, and
//! output writing used by more than one subcommand.

use clio_core::{
    config::resolve_config_path, error::Result, git::find_repo_root, ChangelogConfig, LogQuery,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// History selection flags shared by `generate` and `export-commits`
#[derive(clap::Args, Debug, Clone, Default)]
pub struct HistoryArgs {
    /// Repository path (defaults to the current directory)
    #[arg(long)]
    pub repo: Option<PathBuf>,

    /// Revision range, e.g. v1.0.0..HEAD
    #[arg(long)]
    pub range: Option<String>,

    /// Only commits after this date (git date syntax)
    #[arg(long)]
    pub since: Option<String>,

    /// Only commits before this date (git date syntax)
    #[arg(long)]
    pub until: Option<String>,

    /// Limit to the newest N commits
    #[arg(short = 'n', long)]
    pub max_count: Option<usize>,

    /// Keep merge commits
    #[arg(long)]
    pub include_merges: bool,
}

impl HistoryArgs {
    /// Build the history query; the merge flag overrides configuration only when set
    pub fn query(&self, config: &ChangelogConfig) -> LogQuery {
        LogQuery {
            range: self.range.clone(),
            since: self.since.clone(),
            until: self.until.clone(),
            max_count: self.max_count,
            include_merges: self.include_merges || config.filter.include_merges,
        }
    }

    /// Repository root, if the path is inside one
    pub fn repo_root(&self) -> Option<PathBuf> {
        let start = self.repo.clone().unwrap_or_else(|| PathBuf::from("."));
        match find_repo_root(&start) {
            Ok(root) => Some(root),
            Err(e) => {
                debug!("No repository found from {:?}: {}", start, e);
                None
            }
        }
    }
}

/// Load configuration from flag, env var, repository, or user config dir
pub fn load_config(explicit: Option<&Path>, repo_root: Option<&Path>) -> Result<ChangelogConfig> {
    if let Some(path) = resolve_config_path(explicit, repo_root) {
        debug!("Using configuration file {:?}", path);
        if explicit.is_some() && !path.exists() {
            warn!("Configuration file {:?} does not exist, using defaults", path);
        }
    }
    ChangelogConfig::discover(explicit, repo_root)
}

/// Write to a file or stdout
pub fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(content.as_bytes())?;
            handle.flush()?;
        }
    }
    Ok(())
}
