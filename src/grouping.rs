//! Time-gap grouping of commits into release buckets
//!
//! Commits are ordered chronologically and split wherever two consecutive
//! commits are more than `gap` apart. The ordering is total (timestamp, then
//! hash), so the buckets depend only on the set of commits, not on the order
//! they were read in.

use chrono::Duration;

use crate::types::ClassifiedCommit;

/// Default gap that starts a new release
pub fn default_gap() -> Duration {
    Duration::hours(24)
}

/// Split commits into chronological buckets
///
/// A new bucket starts when `next - previous > gap`; a gap of exactly `gap`
/// stays in the current bucket. Buckets and the commits inside them are
/// oldest first.
pub fn group_commits(mut commits: Vec<ClassifiedCommit>, gap: Duration) -> Vec<Vec<ClassifiedCommit>> {
    commits.sort_by(|a, b| {
        a.commit
            .timestamp
            .cmp(&b.commit.timestamp)
            .then_with(|| a.commit.hash.cmp(&b.commit.hash))
    });

    let mut groups: Vec<Vec<ClassifiedCommit>> = Vec::new();
    for commit in commits {
        let starts_new = match groups.last().and_then(|g| g.last()) {
            Some(previous) => commit.timestamp() - previous.timestamp() > gap,
            None => true,
        };

        if starts_new {
            groups.push(vec![commit]);
        } else if let Some(current) = groups.last_mut() {
            current.push(commit);
        }
    }

    tracing::debug!("Grouped commits into {} release bucket(s)", groups.len());
    groups
}
