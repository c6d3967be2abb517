//! Core data types for the Clio changelog generator
//!
//! This module defines the structures that flow through the pipeline: raw
//! commits read from history, their parsed conventional-commit headers,
//! classified commits, and the release groups that make up a changelog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::categories::ChangeCategory;

/// A single commit as read from git history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitCommit {
    /// Full commit SHA
    pub hash: String,

    /// Abbreviated SHA as printed by git
    pub short_hash: String,

    pub author_name: String,

    #[serde(default)]
    pub author_email: String,

    /// Author timestamp
    pub timestamp: DateTime<Utc>,

    /// First line of the commit message
    pub subject: String,

    /// Remaining message lines (may be empty)
    #[serde(default)]
    pub body: String,
}

impl GitCommit {
    /// Full message, subject and body separated by a blank line
    pub fn message(&self) -> String {
        if self.body.trim().is_empty() {
            self.subject.clone()
        } else {
            format!("{}\n\n{}", self.subject, self.body.trim_end())
        }
    }
}

/// Parsed conventional-commit header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConventionalCommit {
    /// Lowercased commit type (`feat`, `fix`, ...); `chore` for non-conventional subjects
    pub commit_type: String,

    pub scope: Option<String>,

    pub description: String,

    /// `!` in the header or a `BREAKING CHANGE:` footer
    pub breaking: bool,

    /// False when the subject did not follow the conventional grammar
    pub conventional: bool,
}

/// A commit with its parsed header and display category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedCommit {
    pub commit: GitCommit,
    pub parsed: ConventionalCommit,
    pub category: ChangeCategory,
}

impl ClassifiedCommit {
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.commit.timestamp
    }

    pub fn is_breaking(&self) -> bool {
        self.parsed.breaking
    }
}

/// One synthetic release: commits clustered by time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseGroup {
    /// Rendered version label (e.g. `v0.3.0`)
    pub version: String,

    /// Timestamp of the oldest commit in the group
    pub started_at: DateTime<Utc>,

    /// Timestamp of the newest commit in the group
    pub released_at: DateTime<Utc>,

    pub title: String,

    pub description: String,

    /// Any commit in the group is breaking
    pub breaking: bool,

    /// Categories present, in priority order
    pub categories: Vec<ChangeCategory>,

    /// Commits, oldest first
    pub commits: Vec<ClassifiedCommit>,
}

impl ReleaseGroup {
    /// Commits belonging to a category; `Breaking` selects breaking commits
    pub fn commits_in(&self, category: ChangeCategory) -> Vec<&ClassifiedCommit> {
        self.commits
            .iter()
            .filter(|c| match category {
                ChangeCategory::Breaking => c.is_breaking(),
                other => c.category == other,
            })
            .collect()
    }
}

/// Generated changelog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changelog {
    pub generated_at: DateTime<Utc>,

    /// Release groups, newest first
    pub groups: Vec<ReleaseGroup>,
}

impl Changelog {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn commit_count(&self) -> usize {
        self.groups.iter().map(|g| g.commits.len()).sum()
    }

    /// Newest release group, if any
    pub fn latest(&self) -> Option<&ReleaseGroup> {
        self.groups.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn commit(subject: &str, body: &str) -> GitCommit {
        GitCommit {
            hash: "a".repeat(40),
            short_hash: "aaaaaaa".to_string(),
            author_name: "Test".to_string(),
            author_email: "test@example.com".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            subject: subject.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_message_without_body() {
        assert_eq!(commit("feat: add search", "").message(), "feat: add search");
        assert_eq!(commit("feat: add search", "  \n").message(), "feat: add search");
    }

    #[test]
    fn test_message_with_body() {
        assert_eq!(
            commit("feat: add search", "Adds bill search.\n").message(),
            "feat: add search\n\nAdds bill search."
        );
    }

    #[test]
    fn test_commit_deserializes_without_optional_fields() {
        let json = r#"{
            "hash": "abc123",
            "short_hash": "abc123",
            "author_name": "Test",
            "timestamp": "2024-03-01T12:00:00Z",
            "subject": "fix: typo"
        }"#;
        let commit: GitCommit = serde_json::from_str(json).unwrap();
        assert!(commit.body.is_empty());
        assert!(commit.author_email.is_empty());
    }

    #[test]
    fn test_commits_in_breaking_selects_flagged() {
        let breaking = ClassifiedCommit {
            commit: commit("feat!: drop v1 api", ""),
            parsed: ConventionalCommit {
                commit_type: "feat".to_string(),
                scope: None,
                description: "drop v1 api".to_string(),
                breaking: true,
                conventional: true,
            },
            category: ChangeCategory::Features,
        };
        let group = ReleaseGroup {
            version: "v1.0.0".to_string(),
            started_at: breaking.timestamp(),
            released_at: breaking.timestamp(),
            title: String::new(),
            description: String::new(),
            breaking: true,
            categories: vec![ChangeCategory::Breaking, ChangeCategory::Features],
            commits: vec![breaking],
        };

        assert_eq!(group.commits_in(ChangeCategory::Breaking).len(), 1);
        assert_eq!(group.commits_in(ChangeCategory::Features).len(), 1);
        assert!(group.commits_in(ChangeCategory::BugFixes).is_empty());
    }
}
