//! Common test utilities and helpers

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use clio_core::GitCommit;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Fixed reference point for synthetic histories
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()
}

/// Build a commit `hours` after [`base_time`]
pub fn commit_at(hash: &str, hours: i64, subject: &str) -> GitCommit {
    GitCommit {
        hash: hash.to_string(),
        short_hash: hash.chars().take(7).collect(),
        author_name: "Test".to_string(),
        author_email: "test@example.com".to_string(),
        timestamp: base_time() + Duration::hours(hours),
        subject: subject.to_string(),
        body: String::new(),
    }
}

fn git(repo: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Create an empty repository with a local identity configured
pub fn init_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let repo_path = temp_dir.path();

    git(repo_path, &["init", "--quiet"]);
    git(repo_path, &["config", "user.name", "Test"]);
    git(repo_path, &["config", "user.email", "test@example.com"]);
    git(repo_path, &["config", "commit.gpgsign", "false"]);

    temp_dir
}

/// Commit a file change with a fixed author/committer date
pub fn commit_with_date(repo: &Path, message: &str, date: DateTime<Utc>) {
    let file = repo.join("CHANGES.txt");
    let mut content = std::fs::read_to_string(&file).unwrap_or_default();
    content.push_str(message);
    content.push('\n');
    std::fs::write(&file, content).unwrap();

    git(repo, &["add", "CHANGES.txt"]);

    let date = date.to_rfc3339();
    let output = Command::new("git")
        .args(["commit", "--quiet", "-m", message])
        .env("GIT_AUTHOR_DATE", &date)
        .env("GIT_COMMITTER_DATE", &date)
        .current_dir(repo)
        .output()
        .expect("Failed to commit");
    assert!(
        output.status.success(),
        "git commit failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Check whether git is available in the test environment
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
