//! Configuration management command

use clap::Subcommand;
use clio_core::{
    config::{resolve_config_path, PROJECT_CONFIG_FILE},
    error::{ClioError, Result},
    ChangelogConfig,
};
use std::path::PathBuf;

use super::helpers::load_config;

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show {
        /// Repository whose .clio.toml should be considered
        #[arg(long)]
        repo: Option<PathBuf>,
    },

    /// Write a default configuration file
    Init {
        /// Destination (defaults to ./.clio.toml)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Handle configuration management command
pub fn handle(action: ConfigAction, config_path: Option<PathBuf>) -> Result<()> {
    match action {
        ConfigAction::Show { repo } => {
            let repo_root = repo
                .or_else(|| std::env::current_dir().ok())
                .and_then(|start| clio_core::git::find_repo_root(start).ok());

            match resolve_config_path(config_path.as_deref(), repo_root.as_deref()) {
                Some(path) => eprintln!("# Source: {}", path.display()),
                None => eprintln!("# Source: built-in defaults"),
            }

            let config = load_config(config_path.as_deref(), repo_root.as_deref())?;
            print!("{}", config.to_toml()?);
            Ok(())
        }
        ConfigAction::Init { path, force } => {
            let path = path
                .or(config_path)
                .unwrap_or_else(|| PathBuf::from(PROJECT_CONFIG_FILE));

            if path.exists() && !force {
                return Err(ClioError::Config(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }

            ChangelogConfig::default().save(&path)?;
            println!("✓ Wrote default configuration to {}", path.display());
            Ok(())
        }
    }
}
