//! Change categories and the type/scope lookup table
//!
//! Every parsed commit lands in exactly one [`ChangeCategory`]. The mapping is
//! a plain table lookup: a recognized scope first (except for features and
//! fixes, which always stay visible as such), then the commit type, then
//! `Maintenance` for anything unknown.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{ClioError, Result};

/// Display category for a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeCategory {
    Breaking,
    Features,
    BugFixes,
    Security,
    Performance,
    UserInterface,
    Database,
    Ai,
    Documentation,
    Refactoring,
    Testing,
    Build,
    Reverts,
    Maintenance,
}

impl ChangeCategory {
    /// All categories in render order
    pub fn all() -> &'static [ChangeCategory] {
        use ChangeCategory::*;
        &[
            Breaking,
            Features,
            BugFixes,
            Security,
            Performance,
            UserInterface,
            Database,
            Ai,
            Documentation,
            Refactoring,
            Testing,
            Build,
            Reverts,
            Maintenance,
        ]
    }

    /// Stable identifier used in configuration files
    pub fn id(&self) -> &'static str {
        match self {
            ChangeCategory::Breaking => "breaking",
            ChangeCategory::Features => "features",
            ChangeCategory::BugFixes => "bug_fixes",
            ChangeCategory::Security => "security",
            ChangeCategory::Performance => "performance",
            ChangeCategory::UserInterface => "user_interface",
            ChangeCategory::Database => "database",
            ChangeCategory::Ai => "ai",
            ChangeCategory::Documentation => "documentation",
            ChangeCategory::Refactoring => "refactoring",
            ChangeCategory::Testing => "testing",
            ChangeCategory::Build => "build",
            ChangeCategory::Reverts => "reverts",
            ChangeCategory::Maintenance => "maintenance",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ChangeCategory::Breaking => "Breaking Changes",
            ChangeCategory::Features => "Features",
            ChangeCategory::BugFixes => "Bug Fixes",
            ChangeCategory::Security => "Security",
            ChangeCategory::Performance => "Performance",
            ChangeCategory::UserInterface => "User Interface",
            ChangeCategory::Database => "Database",
            ChangeCategory::Ai => "AI & Chat",
            ChangeCategory::Documentation => "Documentation",
            ChangeCategory::Refactoring => "Refactoring",
            ChangeCategory::Testing => "Testing",
            ChangeCategory::Build => "Build & CI",
            ChangeCategory::Reverts => "Reverts",
            ChangeCategory::Maintenance => "Maintenance",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            ChangeCategory::Breaking => "💥",
            ChangeCategory::Features => "✨",
            ChangeCategory::BugFixes => "🐛",
            ChangeCategory::Security => "🔒",
            ChangeCategory::Performance => "⚡",
            ChangeCategory::UserInterface => "🎨",
            ChangeCategory::Database => "🗄️",
            ChangeCategory::Ai => "🤖",
            ChangeCategory::Documentation => "📝",
            ChangeCategory::Refactoring => "♻️",
            ChangeCategory::Testing => "✅",
            ChangeCategory::Build => "📦",
            ChangeCategory::Reverts => "⏪",
            ChangeCategory::Maintenance => "🔧",
        }
    }

    /// Render order, lower first
    pub fn priority(&self) -> u8 {
        *self as u8
    }

    /// Phrase used when synthesizing a release title
    pub fn title_phrase(&self) -> &'static str {
        match self {
            ChangeCategory::Breaking => "Breaking changes",
            ChangeCategory::Features => "New features",
            ChangeCategory::BugFixes => "Bug fixes",
            ChangeCategory::Security => "Security hardening",
            ChangeCategory::Performance => "Performance improvements",
            ChangeCategory::UserInterface => "Interface polish",
            ChangeCategory::Database => "Database updates",
            ChangeCategory::Ai => "AI & chat improvements",
            ChangeCategory::Documentation => "Documentation updates",
            ChangeCategory::Refactoring => "Code refactoring",
            ChangeCategory::Testing => "Test coverage",
            ChangeCategory::Build => "Build & CI updates",
            ChangeCategory::Reverts => "Reverted changes",
            ChangeCategory::Maintenance => "Maintenance",
        }
    }

    /// Singular and plural noun for counts in release descriptions
    pub fn count_nouns(&self) -> (&'static str, &'static str) {
        match self {
            ChangeCategory::Breaking => ("breaking change", "breaking changes"),
            ChangeCategory::Features => ("feature", "features"),
            ChangeCategory::BugFixes => ("bug fix", "bug fixes"),
            ChangeCategory::Security => ("security fix", "security fixes"),
            ChangeCategory::Performance => ("performance improvement", "performance improvements"),
            ChangeCategory::UserInterface => ("UI change", "UI changes"),
            ChangeCategory::Database => ("database change", "database changes"),
            ChangeCategory::Ai => ("AI change", "AI changes"),
            ChangeCategory::Documentation => ("documentation update", "documentation updates"),
            ChangeCategory::Refactoring => ("refactor", "refactors"),
            ChangeCategory::Testing => ("test update", "test updates"),
            ChangeCategory::Build => ("build change", "build changes"),
            ChangeCategory::Reverts => ("revert", "reverts"),
            ChangeCategory::Maintenance => ("maintenance task", "maintenance tasks"),
        }
    }
}

impl fmt::Display for ChangeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ChangeCategory {
    type Err = ClioError;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().to_lowercase();
        ChangeCategory::all()
            .iter()
            .copied()
            .find(|c| c.id() == needle)
            .ok_or_else(|| ClioError::Config(format!("Unknown change category: {}", s)))
    }
}

/// Lookup table from commit type and scope to category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    types: HashMap<String, ChangeCategory>,
    scopes: HashMap<String, ChangeCategory>,
}

static DEFAULT_TABLE: Lazy<CategoryTable> = Lazy::new(|| {
    use ChangeCategory::*;

    let types = [
        ("feat", Features),
        ("fix", BugFixes),
        ("perf", Performance),
        ("security", Security),
        ("docs", Documentation),
        ("style", UserInterface),
        ("refactor", Refactoring),
        ("test", Testing),
        ("build", Build),
        ("ci", Build),
        ("revert", Reverts),
        ("chore", Maintenance),
    ];

    let scopes = [
        ("ui", UserInterface),
        ("components", UserInterface),
        ("layout", UserInterface),
        ("design", UserInterface),
        ("css", UserInterface),
        ("db", Database),
        ("database", Database),
        ("supabase", Database),
        ("migration", Database),
        ("migrations", Database),
        ("schema", Database),
        ("auth", Security),
        ("security", Security),
        ("ai", Ai),
        ("chat", Ai),
        ("llm", Ai),
        ("openai", Ai),
        ("claude", Ai),
        ("perplexity", Ai),
    ];

    CategoryTable {
        types: types.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        scopes: scopes.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
    }
});

impl CategoryTable {
    /// Built-in table
    pub fn standard() -> Self {
        DEFAULT_TABLE.clone()
    }

    /// Standard table extended with configured overrides
    pub fn with_overrides(
        types: &HashMap<String, String>,
        scopes: &HashMap<String, String>,
    ) -> Result<Self> {
        let mut table = Self::standard();
        for (commit_type, category) in types {
            let category = override_target(commit_type, category)?;
            table.types.insert(commit_type.trim().to_lowercase(), category);
        }
        for (scope, category) in scopes {
            let category = override_target(scope, category)?;
            table.scopes.insert(scope.trim().to_lowercase(), category);
        }
        Ok(table)
    }

    /// Map a commit type and optional scope to its display category
    ///
    /// Features and fixes keep their own category regardless of scope.
    /// `Breaking` is never returned here; it is layered on during synthesis.
    pub fn classify(&self, commit_type: &str, scope: Option<&str>) -> ChangeCategory {
        let commit_type = commit_type.to_lowercase();
        let by_type = self.types.get(&commit_type).copied();

        if let Some(category @ (ChangeCategory::Features | ChangeCategory::BugFixes)) = by_type {
            return category;
        }

        if let Some(scope) = scope {
            if let Some(category) = self.scope_category(scope) {
                return category;
            }
        }

        match by_type {
            Some(ChangeCategory::Breaking) | None => ChangeCategory::Maintenance,
            Some(category) => category,
        }
    }

    fn scope_category(&self, scope: &str) -> Option<ChangeCategory> {
        let scope = scope.trim().to_lowercase();
        if let Some(category) = self.scopes.get(&scope) {
            return Some(*category);
        }
        // "ui/sidebar" or "db,auth": first recognized segment wins
        scope
            .split(|c: char| c == '/' || c == ',' || c == ' ')
            .filter(|s| !s.is_empty())
            .find_map(|segment| self.scopes.get(segment).copied())
    }
}

/// Parse an override's category, refusing `breaking`
fn override_target(key: &str, category: &str) -> Result<ChangeCategory> {
    match category.parse::<ChangeCategory>()? {
        ChangeCategory::Breaking => Err(ClioError::Config(format!(
            "cannot map '{}' to breaking: breaking changes come from '!' headers and BREAKING CHANGE footers",
            key
        ))),
        category => Ok(category),
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::standard()
    }
}
