//! Clio - changelog generation from conventional-commit history
//!
//! Turns a repository's commit log into release notes:
//! - Conventional-commit header parsing (total: anything else is a `chore`)
//! - Time-gap grouping of commits into synthetic releases
//! - Type/scope lookup into display categories
//! - Release titles and descriptions synthesized from the categories present
//!
//! # Architecture
//!
//! - **Types**: Core data structures (GitCommit, ReleaseGroup, Changelog)
//! - **Git**: History sources (`git log`, exported JSON)
//! - **Pipeline**: parsing, classification, grouping, versioning, synthesis
//! - **Render**: Markdown, JSON and YAML output
//!
//! # Example
//!
//! ```ignore
//! use clio_core::{ChangelogConfig, ChangelogGenerator, GitLogSource, LogQuery};
//!
//! fn main() -> clio_core::Result<()> {
//!     let source = GitLogSource::discover(".")?;
//!     let config = ChangelogConfig::discover(None, Some(source.repo_root()))?;
//!     let generator = ChangelogGenerator::new(config)?;
//!
//!     let changelog = generator.generate(&source, &LogQuery::default())?;
//!     println!("{} releases", changelog.groups.len());
//!     Ok(())
//! }
//! ```

pub mod categories;
pub mod config;
pub mod conventional;
pub mod error;
pub mod generator;
pub mod git;
pub mod grouping;
pub mod render;
pub mod synthesis;
pub mod types;
pub mod version;

// Re-export commonly used types
pub use categories::{CategoryTable, ChangeCategory};
pub use config::ChangelogConfig;
pub use error::{ClioError, Result};
pub use generator::ChangelogGenerator;
pub use git::{CommitSource, GitLogSource, JsonFileSource, LogQuery};
pub use render::{OutputFormat, RenderOptions};
pub use types::{Changelog, ClassifiedCommit, ConventionalCommit, GitCommit, ReleaseGroup};
pub use version::{Bump, Version};
