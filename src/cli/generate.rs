//! Changelog generation command

use clio_core::{
    error::Result, render, ChangelogGenerator, CommitSource, GitLogSource, JsonFileSource,
    OutputFormat, RenderOptions,
};
use std::path::PathBuf;
use tracing::{debug, info};

use super::helpers::{load_config, write_output, HistoryArgs};

/// Arguments for `clio generate`
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub history: HistoryArgs,

    /// Read commits from an exported JSON file instead of git
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Hours between commits that start a new release
    #[arg(long)]
    pub gap_hours: Option<f64>,

    /// Version of the oldest release
    #[arg(long)]
    pub initial_version: Option<String>,

    /// Output format: markdown, json, yaml (inferred from --output when omitted)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Omit emoji from Markdown headings
    #[arg(long)]
    pub no_emoji: bool,
}

/// Handle changelog generation
pub fn handle(args: GenerateArgs, config_path: Option<PathBuf>) -> Result<()> {
    let repo_root = if args.input.is_none() {
        args.history.repo_root()
    } else {
        None
    };

    let mut config = load_config(config_path.as_deref(), repo_root.as_deref())?;
    if let Some(gap_hours) = args.gap_hours {
        config.grouping.gap_hours = gap_hours;
    }
    if let Some(initial_version) = &args.initial_version {
        config.grouping.initial_version = initial_version.clone();
    }
    if args.no_emoji {
        config.render.emoji = false;
    }

    let format = match (&args.format, &args.output) {
        (Some(format), _) => format.parse()?,
        (None, Some(path)) => match OutputFormat::from_path(path) {
            Some(format) => format,
            None => config.output_format()?,
        },
        (None, None) => config.output_format()?,
    };

    let query = args.history.query(&config);
    let options = RenderOptions::from(&config.render);
    let generator = ChangelogGenerator::new(config)?;

    let source: Box<dyn CommitSource> = match &args.input {
        Some(path) => {
            debug!("Reading commits from {:?}", path);
            Box::new(JsonFileSource::new(path))
        }
        None => match repo_root {
            Some(root) => Box::new(GitLogSource::new(root)),
            None => {
                let start = args.history.repo.clone().unwrap_or_else(|| PathBuf::from("."));
                Box::new(GitLogSource::discover(start)?)
            }
        },
    };

    let changelog = generator.generate(source.as_ref(), &query)?;
    let rendered = render::render(&changelog, format, &options)?;
    write_output(&rendered, args.output.as_deref())?;

    if let Some(path) = &args.output {
        info!(
            "Wrote {} release(s) to {}",
            changelog.groups.len(),
            path.display()
        );
        eprintln!(
            "✓ Wrote {} release(s) covering {} commit(s) to {}",
            changelog.groups.len(),
            changelog.commit_count(),
            path.display()
        );
    }

    Ok(())
}
