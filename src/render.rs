//! Changelog rendering
//!
//! Markdown for humans, JSON and YAML for tooling.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;
use std::str::FromStr;

use crate::categories::ChangeCategory;
use crate::config::RenderSettings;
use crate::error::{ClioError, Result};
use crate::types::{Changelog, ClassifiedCommit, ReleaseGroup};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Markdown,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Infer format from an output file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "md" | "markdown" => Some(OutputFormat::Markdown),
            "json" => Some(OutputFormat::Json),
            "yaml" | "yml" => Some(OutputFormat::Yaml),
            _ => None,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ClioError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            other => Err(ClioError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Markdown presentation options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub heading: String,
    pub emoji: bool,
    pub include_hashes: bool,
    pub include_authors: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from(&RenderSettings::default())
    }
}

impl From<&RenderSettings> for RenderOptions {
    fn from(settings: &RenderSettings) -> Self {
        Self {
            heading: settings.heading.clone(),
            emoji: settings.emoji,
            include_hashes: settings.include_hashes,
            include_authors: settings.include_authors,
        }
    }
}

/// Render a changelog in the requested format
pub fn render(changelog: &Changelog, format: OutputFormat, options: &RenderOptions) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(render_markdown(changelog, options)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(changelog)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Yaml => Ok(serde_yaml::to_string(changelog)?),
    }
}

/// Render a changelog as Markdown
pub fn render_markdown(changelog: &Changelog, options: &RenderOptions) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(out, "# {}\n", options.heading);

    if changelog.is_empty() {
        let _ = writeln!(out, "No changes recorded.");
        return out;
    }

    for group in &changelog.groups {
        render_group(&mut out, group, options);
    }

    out
}

fn render_group(out: &mut String, group: &ReleaseGroup, options: &RenderOptions) {
    let _ = writeln!(
        out,
        "## {} — {}\n",
        group.version,
        group.released_at.format("%Y-%m-%d")
    );
    let _ = writeln!(out, "**{}**\n", group.title);
    let _ = writeln!(out, "{}\n", group.description);

    for category in &group.categories {
        let commits = group.commits_in(*category);
        if commits.is_empty() {
            continue;
        }

        if options.emoji {
            let _ = writeln!(out, "### {} {}\n", category.emoji(), category.display_name());
        } else {
            let _ = writeln!(out, "### {}\n", category.display_name());
        }

        for commit in commits {
            let _ = writeln!(out, "{}", render_item(commit, *category, options));
        }
        out.push('\n');
    }
}

fn render_item(commit: &ClassifiedCommit, section: ChangeCategory, options: &RenderOptions) -> String {
    let mut line = String::from("- ");

    if let Some(scope) = &commit.parsed.scope {
        let _ = write!(line, "**{}:** ", scope);
    }
    line.push_str(&commit.parsed.description);

    // Breaking commits also appear under their own category; flag them there
    if commit.is_breaking() && section != ChangeCategory::Breaking {
        line.push_str(" ⚠️ BREAKING");
    }

    if options.include_hashes {
        let _ = write!(line, " ({})", commit.commit.short_hash);
    }
    if options.include_authors && !commit.commit.author_name.is_empty() {
        let _ = write!(line, " by {}", commit.commit.author_name);
    }

    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ConventionalCommit, GitCommit};
    use chrono::{TimeZone, Utc};

    fn sample_changelog() -> Changelog {
        let timestamp = Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap();
        let commit = |hash: &str, commit_type: &str, scope: Option<&str>, desc: &str, category, breaking| {
            ClassifiedCommit {
                commit: GitCommit {
                    hash: hash.repeat(8),
                    short_hash: hash.to_string(),
                    author_name: "Ada".to_string(),
                    author_email: "ada@example.com".to_string(),
                    timestamp,
                    subject: format!("{}: {}", commit_type, desc),
                    body: String::new(),
                },
                parsed: ConventionalCommit {
                    commit_type: commit_type.to_string(),
                    scope: scope.map(str::to_string),
                    description: desc.to_string(),
                    breaking,
                    conventional: true,
                },
                category,
            }
        };

        Changelog {
            generated_at: timestamp,
            groups: vec![ReleaseGroup {
                version: "v0.2.0".to_string(),
                started_at: timestamp,
                released_at: timestamp,
                title: "New features & bug fixes".to_string(),
                description: "2 changes: 1 feature and 1 bug fix.".to_string(),
                breaking: false,
                categories: vec![ChangeCategory::Features, ChangeCategory::BugFixes],
                commits: vec![
                    commit("a1b2c3d", "feat", Some("bills"), "add sponsor filter", ChangeCategory::Features, false),
                    commit("e4f5a6b", "fix", None, "handle empty search", ChangeCategory::BugFixes, false),
                ],
            }],
        }
    }

    #[test]
    fn test_markdown_sections() {
        let markdown = render_markdown(&sample_changelog(), &RenderOptions::default());

        assert!(markdown.starts_with("# Changelog\n"));
        assert!(markdown.contains("## v0.2.0 — 2024-05-02\n"));
        assert!(markdown.contains("**New features & bug fixes**"));
        assert!(markdown.contains("### ✨ Features"));
        assert!(markdown.contains("- **bills:** add sponsor filter (a1b2c3d)"));
        assert!(markdown.contains("### 🐛 Bug Fixes"));
        assert!(markdown.contains("- handle empty search (e4f5a6b)"));
    }

    #[test]
    fn test_markdown_without_emoji_or_hashes() {
        let options = RenderOptions {
            emoji: false,
            include_hashes: false,
            include_authors: true,
            ..RenderOptions::default()
        };
        let markdown = render_markdown(&sample_changelog(), &options);

        assert!(markdown.contains("### Features\n"));
        assert!(markdown.contains("- **bills:** add sponsor filter by Ada"));
        assert!(!markdown.contains("(a1b2c3d)"));
    }

    #[test]
    fn test_breaking_listed_twice() {
        let mut changelog = sample_changelog();
        let group = &mut changelog.groups[0];
        group.commits[0].parsed.breaking = true;
        group.breaking = true;
        group.categories.insert(0, ChangeCategory::Breaking);

        let markdown = render_markdown(&changelog, &RenderOptions::default());
        assert!(markdown.contains("### 💥 Breaking Changes"));
        assert!(markdown.contains("- **bills:** add sponsor filter (a1b2c3d)\n"));
        assert!(markdown.contains("- **bills:** add sponsor filter ⚠️ BREAKING (a1b2c3d)"));
    }

    #[test]
    fn test_empty_changelog() {
        let changelog = Changelog {
            generated_at: Utc::now(),
            groups: vec![],
        };
        let markdown = render_markdown(&changelog, &RenderOptions::default());
        assert!(markdown.contains("No changes recorded."));
    }

    #[test]
    fn test_json_output_parses_back() {
        let changelog = sample_changelog();
        let json = render(&changelog, OutputFormat::Json, &RenderOptions::default()).unwrap();
        let decoded: Changelog = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, changelog);
    }

    #[test]
    fn test_yaml_output() {
        let yaml = render(&sample_changelog(), OutputFormat::Yaml, &RenderOptions::default()).unwrap();
        assert!(yaml.contains("version: v0.2.0"));
        assert!(yaml.contains("category: features"));
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!(matches!(
            "pdf".parse::<OutputFormat>(),
            Err(ClioError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            OutputFormat::from_path(Path::new("CHANGELOG.md")),
            Some(OutputFormat::Markdown)
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("out/changes.yml")),
            Some(OutputFormat::Yaml)
        );
        assert_eq!(OutputFormat::from_path(Path::new("notes.txt")), None);
        assert_eq!(OutputFormat::from_path(Path::new("CHANGELOG")), None);
    }
}
