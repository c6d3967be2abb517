//! Commit history sources
//!
//! [`CommitSource`] is the seam between history and the generator. The
//! production source shells out to `git log`; a JSON source replays a
//! previously exported commit list.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

use crate::conventional::is_merge_subject;
use crate::error::{ClioError, Result};
use crate::types::GitCommit;

const RECORD_SEPARATOR: char = '\u{1e}';
const FIELD_SEPARATOR: char = '\u{1f}';
const FIELD_COUNT: usize = 7;

/// hash, short hash, author name, author email, author date, subject, body
const PRETTY_FORMAT: &str = "--pretty=format:%H%x1f%h%x1f%an%x1f%ae%x1f%aI%x1f%s%x1f%b%x1e";

/// Which part of history to read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogQuery {
    /// Revision range such as `v1.0.0..HEAD`
    pub range: Option<String>,

    /// Lower date bound, passed to `git log --since`
    pub since: Option<String>,

    /// Upper date bound, passed to `git log --until`
    pub until: Option<String>,

    /// Limit to the newest N commits
    pub max_count: Option<usize>,

    pub include_merges: bool,
}

/// Source of raw commits
#[cfg_attr(test, mockall::automock)]
pub trait CommitSource {
    /// Load commits matching the query, in any order
    fn load(&self, query: &LogQuery) -> Result<Vec<GitCommit>>;
}

/// Reads history by running `git log` in a repository
#[derive(Debug, Clone)]
pub struct GitLogSource {
    repo_root: PathBuf,
}

impl GitLogSource {
    /// Use a known repository root
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }

    /// Locate the repository containing `path`
    pub fn discover(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(find_repo_root(path)?))
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    fn log_args(query: &LogQuery) -> Vec<String> {
        let mut args = vec![
            "log".to_string(),
            "--no-color".to_string(),
            PRETTY_FORMAT.to_string(),
        ];

        if !query.include_merges {
            args.push("--no-merges".to_string());
        }
        if let Some(since) = &query.since {
            args.push(format!("--since={}", since));
        }
        if let Some(until) = &query.until {
            args.push(format!("--until={}", until));
        }
        if let Some(max_count) = query.max_count {
            args.push(format!("--max-count={}", max_count));
        }
        if let Some(range) = &query.range {
            args.push(range.clone());
        }
        args.push("--".to_string());

        args
    }

    /// `git` in the repository root with messages forced to English
    fn git_command(&self, args: &[String]) -> Command {
        let mut command = Command::new("git");
        command
            .args(args)
            .current_dir(&self.repo_root)
            .env("LC_ALL", "C")
            .env("LANGUAGE", "C");
        command
    }
}

impl CommitSource for GitLogSource {
    fn load(&self, query: &LogQuery) -> Result<Vec<GitCommit>> {
        let args = Self::log_args(query);
        debug!("Running git {:?} in {:?}", args, self.repo_root);

        let output = self
            .git_command(&args)
            .output()
            .map_err(|e| ClioError::Git(format!("Failed to execute git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            // A repository without commits has an empty history, not a broken one
            if stderr.contains("does not have any commits") {
                debug!("Repository has no commits yet");
                return Ok(Vec::new());
            }
            return Err(ClioError::Git(format!("git log failed: {}", stderr.trim())));
        }

        let raw = String::from_utf8_lossy(&output.stdout);
        let commits = parse_log_output(&raw)?;
        debug!("Read {} commit(s) from git", commits.len());
        Ok(commits)
    }
}

/// Decode the record/field-separated output of [`PRETTY_FORMAT`]
pub fn parse_log_output(raw: &str) -> Result<Vec<GitCommit>> {
    raw.split(RECORD_SEPARATOR)
        .map(|record| record.trim_start_matches(['\n', '\r']))
        .filter(|record| !record.trim().is_empty())
        .map(parse_record)
        .collect()
}

fn parse_record(record: &str) -> Result<GitCommit> {
    let fields: Vec<&str> = record.splitn(FIELD_COUNT, FIELD_SEPARATOR).collect();
    if fields.len() != FIELD_COUNT {
        return Err(ClioError::MalformedLogRecord(format!(
            "expected {} fields, found {} in {:?}",
            FIELD_COUNT,
            fields.len(),
            record.chars().take(80).collect::<String>()
        )));
    }

    let timestamp = DateTime::parse_from_rfc3339(fields[4].trim())
        .map_err(|source| ClioError::InvalidTimestamp {
            value: fields[4].to_string(),
            source,
        })?
        .with_timezone(&Utc);

    Ok(GitCommit {
        hash: fields[0].trim().to_string(),
        short_hash: fields[1].trim().to_string(),
        author_name: fields[2].to_string(),
        author_email: fields[3].to_string(),
        timestamp,
        subject: fields[5].to_string(),
        body: fields[6].trim_end().to_string(),
    })
}

/// Find git repository root by walking up directory tree
pub fn find_repo_root(start_path: impl AsRef<Path>) -> Result<PathBuf> {
    let start_path = start_path.as_ref();
    let mut current = std::fs::canonicalize(start_path).map_err(|e| {
        ClioError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to canonicalize path {:?}: {}", start_path, e),
        ))
    })?;

    loop {
        // `.git` is a file inside worktrees and submodules
        if current.join(".git").exists() {
            return Ok(current);
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return Err(ClioError::NotARepository(start_path.to_path_buf())),
        }
    }
}

/// Replays commits exported to a JSON array
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Apply a query to an in-memory commit list
    ///
    /// Date bounds accept RFC 3339 timestamps or `YYYY-MM-DD` dates.
    pub fn filter(mut commits: Vec<GitCommit>, query: &LogQuery) -> Result<Vec<GitCommit>> {
        if query.range.is_some() {
            warn!("Revision ranges are ignored for exported commit lists");
        }

        if !query.include_merges {
            commits.retain(|c| !is_merge_subject(&c.subject));
        }
        if let Some(since) = query.since.as_deref().map(parse_date_bound).transpose()? {
            commits.retain(|c| c.timestamp >= since);
        }
        if let Some(until) = query.until.as_deref().map(parse_date_bound).transpose()? {
            commits.retain(|c| c.timestamp <= until);
        }
        if let Some(max_count) = query.max_count {
            commits.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            commits.truncate(max_count);
        }

        Ok(commits)
    }
}

impl CommitSource for JsonFileSource {
    fn load(&self, query: &LogQuery) -> Result<Vec<GitCommit>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            ClioError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read commit list {:?}: {}", self.path, e),
            ))
        })?;

        let commits: Vec<GitCommit> = serde_json::from_str(&content)?;
        debug!("Loaded {} commit(s) from {:?}", commits.len(), self.path);
        Self::filter(commits, query)
    }
}

fn parse_date_bound(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|source| {
        ClioError::InvalidTimestamp {
            value: value.to_string(),
            source,
        }
    })?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| ClioError::Other(format!("Invalid date bound: {}", value)))?;
    Ok(Utc.from_utc_datetime(&midnight))
}
