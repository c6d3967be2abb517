//! Conventional-commit header parsing
//!
//! Parses `type(scope)!: description` subjects. Parsing never fails: anything
//! that does not follow the grammar is reported as a non-conventional `chore`.

use regex::Regex;
use std::sync::OnceLock;

use crate::types::ConventionalCommit;

/// Type assigned to subjects that do not follow the grammar
pub const FALLBACK_TYPE: &str = "chore";

const EMPTY_DESCRIPTION: &str = "(no description)";

static HEADER_RE: OnceLock<Regex> = OnceLock::new();
static BREAKING_FOOTER_RE: OnceLock<Regex> = OnceLock::new();
static REVERT_RE: OnceLock<Regex> = OnceLock::new();
static MERGE_RE: OnceLock<Regex> = OnceLock::new();

fn header_re() -> &'static Regex {
    HEADER_RE.get_or_init(|| {
        Regex::new(r"^(?P<type>[A-Za-z][A-Za-z0-9-]*)(?:\((?P<scope>[^()]*)\))?(?P<bang>!)?:\s*(?P<desc>.*\S)\s*$")
            .unwrap()
    })
}

fn breaking_footer_re() -> &'static Regex {
    BREAKING_FOOTER_RE.get_or_init(|| Regex::new(r"(?m)^BREAKING[ -]CHANGE:").unwrap())
}

fn revert_re() -> &'static Regex {
    REVERT_RE.get_or_init(|| Regex::new(r#"^Revert "(?P<inner>.+)"\s*$"#).unwrap())
}

fn merge_re() -> &'static Regex {
    MERGE_RE.get_or_init(|| {
        Regex::new(r"^Merge (branch|pull request|remote-tracking branch|tag) ").unwrap()
    })
}

/// Parse a commit subject and body
pub fn parse(subject: &str, body: &str) -> ConventionalCommit {
    let subject = subject.trim();
    let footer_breaking = breaking_footer_re().is_match(body);

    if let Some(caps) = revert_re().captures(subject) {
        let inner = parse_header(caps["inner"].trim());
        let (scope, description) = match inner {
            Some(header) => (header.scope, header.description),
            None => (None, non_empty_description(&caps["inner"])),
        };
        return ConventionalCommit {
            commit_type: "revert".to_string(),
            scope,
            description,
            breaking: footer_breaking,
            conventional: true,
        };
    }

    match parse_header(subject) {
        Some(mut header) => {
            header.breaking |= footer_breaking;
            header
        }
        None => ConventionalCommit {
            commit_type: FALLBACK_TYPE.to_string(),
            scope: None,
            description: non_empty_description(subject),
            breaking: footer_breaking,
            conventional: false,
        },
    }
}

/// Parse a full message: first line is the subject, the rest the body
pub fn parse_message(message: &str) -> ConventionalCommit {
    let mut parts = message.splitn(2, '\n');
    let subject = parts.next().unwrap_or_default();
    let body = parts.next().unwrap_or_default();
    parse(subject, body)
}

/// Whether a subject is git's default merge-commit subject
pub fn is_merge_subject(subject: &str) -> bool {
    merge_re().is_match(subject.trim())
}

fn non_empty_description(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        EMPTY_DESCRIPTION.to_string()
    } else {
        text.to_string()
    }
}

fn parse_header(subject: &str) -> Option<ConventionalCommit> {
    let caps = header_re().captures(subject)?;

    let commit_type = normalize_type(&caps["type"]);
    let scope = caps
        .name("scope")
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Some(ConventionalCommit {
        commit_type,
        scope,
        description: caps["desc"].trim().to_string(),
        breaking: caps.name("bang").is_some(),
        conventional: true,
    })
}

/// Lowercase the type and fold common spelling variants
fn normalize_type(raw: &str) -> String {
    let lower = raw.to_lowercase();
    match lower.as_str() {
        "feature" | "features" => "feat".to_string(),
        "bugfix" | "hotfix" | "fixes" => "fix".to_string(),
        "doc" => "docs".to_string(),
        "tests" => "test".to_string(),
        "performance" => "perf".to_string(),
        _ => lower,
    }
}
