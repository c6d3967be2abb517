//! Commit message inspection command

use clio_core::{conventional, error::Result, ChangeCategory};
use serde::Serialize;
use std::path::PathBuf;

use super::helpers::load_config;

#[derive(Serialize)]
struct ParseReport<'a> {
    #[serde(flatten)]
    parsed: &'a clio_core::ConventionalCommit,
    category: ChangeCategory,
    category_name: &'static str,
}

/// Handle `clio parse <message>`
pub fn handle(message: String, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path.as_deref(), None)?;
    let table = config.category_table()?;

    let parsed = conventional::parse_message(&message);
    let category = table.classify(&parsed.commit_type, parsed.scope.as_deref());

    let report = ParseReport {
        parsed: &parsed,
        category,
        category_name: category.display_name(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
