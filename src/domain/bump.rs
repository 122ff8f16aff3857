//! Bump policy: how the next version is derived from the current one

use crate::domain::SemanticVersion;
use crate::error::VersionError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which component of the version to increment
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum BumpKind {
    /// `x.y.z` -> `x.y.(z+1)`
    #[default]
    Patch,
    /// `x.y.z` -> `x.(y+1).0`
    Minor,
    /// `x.y.z` -> `(x+1).0.0`
    Major,
}

impl BumpKind {
    /// Lowercase name used on the command line and in output
    pub fn as_str(&self) -> &'static str {
        match self {
            BumpKind::Patch => "patch",
            BumpKind::Minor => "minor",
            BumpKind::Major => "major",
        }
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SemanticVersion {
    /// Compute the next version for the given bump kind
    ///
    /// Components below the incremented one are reset to zero. An
    /// increment past `u64::MAX` is reported as an error rather than
    /// wrapping.
    pub fn bump(&self, kind: BumpKind) -> Result<SemanticVersion, VersionError> {
        let overflow = |component: &'static str| VersionError::ComponentOverflow {
            version: self.to_string(),
            component,
        };

        let next = match kind {
            BumpKind::Patch => SemanticVersion::new(
                self.major,
                self.minor,
                self.patch.checked_add(1).ok_or_else(|| overflow("patch"))?,
            ),
            BumpKind::Minor => SemanticVersion::new(
                self.major,
                self.minor.checked_add(1).ok_or_else(|| overflow("minor"))?,
                0,
            ),
            BumpKind::Major => SemanticVersion::new(
                self.major.checked_add(1).ok_or_else(|| overflow("major"))?,
                0,
                0,
            ),
        };

        Ok(next)
    }
}
