//! Synthetic semantic versions for release groups
//!
//! Histories without tags still get version labels: the oldest group takes the
//! configured initial version and every later group is bumped according to
//! what it contains.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ClioError, Result};

/// Which component of a version to bump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bump {
    Major,
    Minor,
    Patch,
}

/// `major.minor.patch`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Apply a bump
    ///
    /// While the major version is 0, a breaking bump only moves the minor
    /// component. Components saturate at `u64::MAX`.
    pub fn bump(&self, bump: Bump) -> Self {
        match bump {
            Bump::Major if self.major == 0 => Self::new(0, self.minor.saturating_add(1), 0),
            Bump::Major => Self::new(self.major.saturating_add(1), 0, 0),
            Bump::Minor => Self::new(self.major, self.minor.saturating_add(1), 0),
            Bump::Patch => Self::new(self.major, self.minor, self.patch.saturating_add(1)),
        }
    }

    /// Version with a display prefix such as `v`
    pub fn label(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self)
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::new(0, 1, 0)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = ClioError;

    /// Accepts `1.2.3`, `v1.2.3`, `1.2` and `1.2.3-beta.1` (suffix dropped)
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let normalized = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);
        let core = normalized
            .split(|c: char| c == '-' || c == '+')
            .next()
            .unwrap_or_default();

        let parts = core
            .split('.')
            .map(|part| part.parse::<u64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| ClioError::InvalidVersion(s.to_string()))?;

        match parts.as_slice() {
            [major, minor] => Ok(Self::new(*major, *minor, 0)),
            [major, minor, patch] => Ok(Self::new(*major, *minor, *patch)),
            _ => Err(ClioError::InvalidVersion(s.to_string())),
        }
    }
}
