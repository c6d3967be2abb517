//! Release title and description synthesis
//!
//! Titles and descriptions are derived from the set of categories a release
//! touches, so two groups with the same category mix read the same way.

use std::collections::BTreeMap;

use crate::categories::ChangeCategory;
use crate::types::ClassifiedCommit;
use crate::version::Bump;

/// Synthesized summary of one release group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSummary {
    pub title: String,
    pub description: String,
    /// Categories present, in priority order; `Breaking` first when present
    pub categories: Vec<ChangeCategory>,
}

/// Set-union of categories, with `Breaking` added for breaking commits
pub fn categories_present(commits: &[ClassifiedCommit]) -> Vec<ChangeCategory> {
    let mut categories: Vec<ChangeCategory> = commits.iter().map(|c| c.category).collect();
    if commits.iter().any(|c| c.is_breaking()) {
        categories.push(ChangeCategory::Breaking);
    }
    categories.sort_by_key(|c| c.priority());
    categories.dedup();
    categories
}

/// Build the title and description for a release group
pub fn synthesize(commits: &[ClassifiedCommit]) -> ReleaseSummary {
    let categories = categories_present(commits);

    ReleaseSummary {
        title: synthesize_title(&categories),
        description: synthesize_description(commits),
        categories,
    }
}

/// Version bump implied by a release group's contents
pub fn release_bump(commits: &[ClassifiedCommit]) -> Bump {
    if commits.iter().any(|c| c.is_breaking()) {
        Bump::Major
    } else if commits
        .iter()
        .any(|c| c.category == ChangeCategory::Features)
    {
        Bump::Minor
    } else {
        Bump::Patch
    }
}

fn synthesize_title(categories: &[ChangeCategory]) -> String {
    let phrases: Vec<&str> = categories.iter().map(|c| c.title_phrase()).collect();

    match phrases.as_slice() {
        [] => "No notable changes".to_string(),
        [only] => only.to_string(),
        [first, second] => format!("{} & {}", first, lower_first(second)),
        [first, second, ..] => format!("{} & {} and more", first, lower_first(second)),
    }
}

/// Lowercase the leading letter unless the first word is an acronym
fn lower_first(phrase: &str) -> String {
    let mut chars = phrase.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(second)) if !second.is_uppercase() => {
            let mut out: String = first.to_lowercase().collect();
            out.push_str(&phrase[first.len_utf8()..]);
            out
        }
        _ => phrase.to_string(),
    }
}

fn synthesize_description(commits: &[ClassifiedCommit]) -> String {
    if commits.is_empty() {
        return "No changes.".to_string();
    }

    let mut counts: BTreeMap<u8, (ChangeCategory, usize)> = BTreeMap::new();
    for commit in commits {
        counts
            .entry(commit.category.priority())
            .or_insert((commit.category, 0))
            .1 += 1;
    }

    let parts: Vec<String> = counts
        .values()
        .map(|(category, count)| counted(*count, category.count_nouns()))
        .collect();

    let mut description = format!(
        "{}: {}",
        counted(commits.len(), ("change", "changes")),
        join_natural(&parts)
    );

    let breaking = commits.iter().filter(|c| c.is_breaking()).count();
    if breaking > 0 {
        description.push_str(&format!(
            ", including {}",
            counted(breaking, ChangeCategory::Breaking.count_nouns())
        ));
    }

    description.push('.');
    description
}

fn counted(count: usize, (singular, plural): (&str, &str)) -> String {
    format!("{} {}", count, if count == 1 { singular } else { plural })
}

/// "a", "a and b", "a, b and c"
fn join_natural(parts: &[String]) -> String {
    match parts {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}
