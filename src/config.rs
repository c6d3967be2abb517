//! Configuration for changelog generation
//!
//! # Configuration File Format
//!
//! TOML format in `.clio.toml` at the repository root:
//!
//! ```toml
//! [grouping]
//! gap_hours = 24
//! initial_version = "0.1.0"
//! version_prefix = "v"
//!
//! [filter]
//! include_merges = false
//! include_non_conventional = true
//! exclude_types = ["wip"]
//!
//! [categories.types]
//! deps = "build"
//!
//! [categories.scopes]
//! bills = "features"
//!
//! [render]
//! format = "markdown"
//! heading = "Changelog"
//! emoji = true
//! include_hashes = true
//! include_authors = false
//! ```

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::categories::CategoryTable;
use crate::error::{ClioError, Result};
use crate::render::OutputFormat;
use crate::version::Version;

/// File name looked up at the repository root
pub const PROJECT_CONFIG_FILE: &str = ".clio.toml";

/// Environment variable pointing at a config file
pub const CONFIG_ENV_VAR: &str = "CLIO_CONFIG";

/// Complete changelog configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangelogConfig {
    #[serde(default)]
    pub grouping: GroupingSettings,

    #[serde(default)]
    pub filter: FilterSettings,

    #[serde(default)]
    pub categories: CategorySettings,

    #[serde(default)]
    pub render: RenderSettings,
}

/// Release bucketing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupingSettings {
    /// Hours between consecutive commits that start a new release
    #[serde(default = "default_gap_hours")]
    pub gap_hours: f64,

    /// Version given to the oldest release
    #[serde(default = "default_initial_version")]
    pub initial_version: String,

    #[serde(default = "default_version_prefix")]
    pub version_prefix: String,
}

impl Default for GroupingSettings {
    fn default() -> Self {
        Self {
            gap_hours: default_gap_hours(),
            initial_version: default_initial_version(),
            version_prefix: default_version_prefix(),
        }
    }
}

/// Commit filtering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSettings {
    /// Keep git's "Merge branch ..." commits
    #[serde(default)]
    pub include_merges: bool,

    /// Keep commits whose subject is not a conventional header
    #[serde(default = "default_true")]
    pub include_non_conventional: bool,

    /// Commit types dropped entirely
    #[serde(default)]
    pub exclude_types: Vec<String>,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            include_merges: false,
            include_non_conventional: true,
            exclude_types: Vec::new(),
        }
    }
}

/// Additions to the built-in type/scope category table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorySettings {
    /// commit type -> category id
    #[serde(default)]
    pub types: HashMap<String, String>,

    /// scope -> category id
    #[serde(default)]
    pub scopes: HashMap<String, String>,
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    #[serde(default = "default_format")]
    pub format: String,

    /// Top-level Markdown heading
    #[serde(default = "default_heading")]
    pub heading: String,

    #[serde(default = "default_true")]
    pub emoji: bool,

    #[serde(default = "default_true")]
    pub include_hashes: bool,

    #[serde(default)]
    pub include_authors: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            format: default_format(),
            heading: default_heading(),
            emoji: true,
            include_hashes: true,
            include_authors: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_gap_hours() -> f64 {
    24.0
}

fn default_initial_version() -> String {
    "0.1.0".to_string()
}

fn default_version_prefix() -> String {
    "v".to_string()
}

fn default_format() -> String {
    "markdown".to_string()
}

fn default_heading() -> String {
    "Changelog".to_string()
}

impl ChangelogConfig {
    /// Load configuration from file, falling back to defaults when absent
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("Config file not found, using defaults: {:?}", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            ClioError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config file: {}", e),
            ))
        })?;

        let config = Self::from_toml(&content)?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ChangelogConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the config file from flag, env var, repository, or user config dir
    ///
    /// Returns defaults when no file is found anywhere.
    pub fn discover(explicit: Option<&Path>, repo_root: Option<&Path>) -> Result<Self> {
        match resolve_config_path(explicit, repo_root) {
            Some(path) => Self::load(&path),
            None => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                ClioError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create config directory: {}", e),
                ))
            })?;
        }

        std::fs::write(path, content).map_err(|e| {
            ClioError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config file: {}", e),
            ))
        })?;

        info!("Saved configuration to {:?}", path);
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !self.grouping.gap_hours.is_finite() || self.grouping.gap_hours <= 0.0 {
            return Err(ClioError::Config(format!(
                "grouping.gap_hours must be positive, got {}",
                self.grouping.gap_hours
            )));
        }

        self.gap()?;
        self.initial_version()?;
        self.output_format()?;
        self.category_table()?;

        Ok(())
    }

    /// Gap that starts a new release, rounded to whole seconds
    pub fn gap(&self) -> Result<Duration> {
        // f64 -> i64 saturates, so out-of-range hours land on try_seconds' None
        Duration::try_seconds((self.grouping.gap_hours * 3600.0).round() as i64).ok_or_else(|| {
            ClioError::Config(format!(
                "grouping.gap_hours is too large, got {}",
                self.grouping.gap_hours
            ))
        })
    }

    pub fn initial_version(&self) -> Result<Version> {
        self.grouping.initial_version.parse()
    }

    pub fn output_format(&self) -> Result<OutputFormat> {
        self.render.format.parse()
    }

    /// Built-in category table with configured overrides applied
    pub fn category_table(&self) -> Result<CategoryTable> {
        CategoryTable::with_overrides(&self.categories.types, &self.categories.scopes)
    }

    /// Whether a commit type was excluded in configuration
    pub fn excludes_type(&self, commit_type: &str) -> bool {
        self.filter
            .exclude_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(commit_type))
    }
}

/// User-level config path using the platform config directory
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("clio").join("config.toml"))
}

/// Get the config path from CLI arg, env var, repository, or user config dir
pub fn resolve_config_path(explicit: Option<&Path>, repo_root: Option<&Path>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| {
            std::env::var(CONFIG_ENV_VAR)
                .ok()
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        })
        .or_else(|| {
            repo_root
                .map(|root| root.join(PROJECT_CONFIG_FILE))
                .filter(|path| path.exists())
        })
        .or_else(|| user_config_path().filter(|path| path.exists()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::ChangeCategory;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ChangelogConfig::default();
        assert_eq!(config.grouping.gap_hours, 24.0);
        assert_eq!(config.gap().unwrap(), Duration::hours(24));
        assert_eq!(config.initial_version().unwrap(), Version::new(0, 1, 0));
        assert_eq!(config.output_format().unwrap(), OutputFormat::Markdown);
        assert!(!config.filter.include_merges);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ChangelogConfig::from_toml(
            r#"
            [grouping]
            gap_hours = 6
            "#,
        )
        .unwrap();

        assert_eq!(config.gap().unwrap(), Duration::hours(6));
        assert_eq!(config.grouping.version_prefix, "v");
        assert!(config.render.emoji);
    }

    #[test]
    fn test_category_overrides() {
        let config = ChangelogConfig::from_toml(
            r#"
            [categories.types]
            deps = "build"

            [categories.scopes]
            bills = "database"
            "#,
        )
        .unwrap();

        let table = config.category_table().unwrap();
        assert_eq!(table.classify("deps", None), ChangeCategory::Build);
        assert_eq!(table.classify("chore", Some("bills")), ChangeCategory::Database);
    }

    #[test]
    fn test_validation_failures() {
        assert!(ChangelogConfig::from_toml("[grouping]\ngap_hours = 0").is_err());
        assert!(ChangelogConfig::from_toml("[grouping]\ngap_hours = -3").is_err());
        assert!(ChangelogConfig::from_toml("[grouping]\ninitial_version = \"one\"").is_err());
        assert!(ChangelogConfig::from_toml("[render]\nformat = \"pdf\"").is_err());
        assert!(ChangelogConfig::from_toml("[categories.types]\ndeps = \"nope\"").is_err());
        assert!(ChangelogConfig::from_toml("[categories.scopes]\nlegacy = \"breaking\"").is_err());
    }

    #[test]
    fn test_huge_gap_is_rejected() {
        use crate::generator::ChangelogGenerator;

        let err = ChangelogConfig::from_toml("[grouping]\ngap_hours = 1e16").unwrap_err();
        assert!(matches!(err, ClioError::Config(_)));

        let mut config = ChangelogConfig::default();
        config.grouping.gap_hours = f64::MAX;
        assert!(config.validate().is_err());
        assert!(ChangelogGenerator::new(config).is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let err = ChangelogConfig::from_toml("[grouping").unwrap_err();
        assert!(matches!(err, ClioError::ConfigParse(_)));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = ChangelogConfig::default();
        config.grouping.gap_hours = 12.0;
        config.filter.exclude_types = vec!["wip".to_string()];
        config.save(&path).unwrap();

        let loaded = ChangelogConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = ChangelogConfig::load(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, ChangelogConfig::default());
    }

    #[test]
    fn test_explicit_path_wins() {
        let temp_dir = TempDir::new().unwrap();
        let repo_config = temp_dir.path().join(PROJECT_CONFIG_FILE);
        std::fs::write(&repo_config, "").unwrap();
        let explicit = temp_dir.path().join("other.toml");

        let resolved = resolve_config_path(Some(&explicit), Some(temp_dir.path()));
        assert_eq!(resolved, Some(explicit));
    }

    #[test]
    fn test_excludes_type_case_insensitive() {
        let mut config = ChangelogConfig::default();
        config.filter.exclude_types = vec!["WIP".to_string()];
        assert!(config.excludes_type("wip"));
        assert!(!config.excludes_type("feat"));
    }
}
