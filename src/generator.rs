//! Changelog generation pipeline
//!
//! load -> filter -> parse -> classify -> group -> version -> synthesize

use chrono::{Duration, Utc};
use tracing::{debug, info};

use crate::categories::CategoryTable;
use crate::config::ChangelogConfig;
use crate::conventional::{self, is_merge_subject};
use crate::error::Result;
use crate::git::{CommitSource, LogQuery};
use crate::grouping::group_commits;
use crate::synthesis::{release_bump, synthesize};
use crate::types::{Changelog, ClassifiedCommit, GitCommit, ReleaseGroup};
use crate::version::Version;

/// Builds changelogs from commit history
#[derive(Debug, Clone)]
pub struct ChangelogGenerator {
    config: ChangelogConfig,
    table: CategoryTable,
    initial_version: Version,
    gap: Duration,
}

impl ChangelogGenerator {
    /// Create a generator from validated configuration
    pub fn new(config: ChangelogConfig) -> Result<Self> {
        config.validate()?;
        let table = config.category_table()?;
        let initial_version = config.initial_version()?;
        let gap = config.gap()?;

        Ok(Self {
            config,
            table,
            initial_version,
            gap,
        })
    }

    pub fn config(&self) -> &ChangelogConfig {
        &self.config
    }

    /// Read history from a source and build the changelog
    pub fn generate(&self, source: &dyn CommitSource, query: &LogQuery) -> Result<Changelog> {
        let commits = source.load(query)?;
        debug!("Loaded {} commit(s)", commits.len());
        Ok(self.generate_from_commits(commits))
    }

    /// Build the changelog from already-loaded commits
    pub fn generate_from_commits(&self, commits: Vec<GitCommit>) -> Changelog {
        let classified = self.classify_all(commits);
        let buckets = group_commits(classified, self.gap);

        let mut version = self.initial_version;
        let mut groups = Vec::with_capacity(buckets.len());
        for (index, commits) in buckets.into_iter().enumerate() {
            if index > 0 {
                version = version.bump(release_bump(&commits));
            }
            groups.push(self.build_group(version, commits));
        }
        groups.reverse();

        let changelog = Changelog {
            generated_at: Utc::now(),
            groups,
        };
        info!(
            "Generated {} release(s) from {} commit(s)",
            changelog.groups.len(),
            changelog.commit_count()
        );
        changelog
    }

    /// Parse and classify commits, dropping those filtered out by configuration
    pub fn classify_all(&self, commits: Vec<GitCommit>) -> Vec<ClassifiedCommit> {
        let filter = &self.config.filter;
        let total = commits.len();

        let classified: Vec<ClassifiedCommit> = commits
            .into_iter()
            .filter(|commit| filter.include_merges || !is_merge_subject(&commit.subject))
            .map(|commit| self.classify(commit))
            .filter(|c| filter.include_non_conventional || c.parsed.conventional)
            .filter(|c| !self.config.excludes_type(&c.parsed.commit_type))
            .collect();

        if classified.len() < total {
            debug!(
                "Filtered out {} of {} commit(s)",
                total - classified.len(),
                total
            );
        }
        classified
    }

    /// Parse and classify a single commit
    pub fn classify(&self, commit: GitCommit) -> ClassifiedCommit {
        let parsed = conventional::parse(&commit.subject, &commit.body);
        let category = self
            .table
            .classify(&parsed.commit_type, parsed.scope.as_deref());

        ClassifiedCommit {
            commit,
            parsed,
            category,
        }
    }

    fn build_group(&self, version: Version, commits: Vec<ClassifiedCommit>) -> ReleaseGroup {
        let summary = synthesize(&commits);
        let started_at = commits
            .first()
            .map(|c| c.timestamp())
            .unwrap_or_else(Utc::now);
        let released_at = commits.last().map(|c| c.timestamp()).unwrap_or(started_at);

        ReleaseGroup {
            version: version.label(&self.config.grouping.version_prefix),
            started_at,
            released_at,
            title: summary.title,
            description: summary.description,
            breaking: commits.iter().any(|c| c.is_breaking()),
            categories: summary.categories,
            commits,
        }
    }
}
