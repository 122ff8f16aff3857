//! Result of a single version increment run

use crate::domain::{BumpKind, VersionSourceKind};
use serde::Serialize;
use std::path::PathBuf;

/// Name under which the computed version is published to later pipeline steps
pub const VERSION_NUMBER: &str = "VERSION_NUMBER";

/// The version computed by one invocation, plus how it was obtained
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionIncrementResult {
    /// The new version, as written to the manifest
    pub version: String,
    /// Version the bump started from (absent for an explicit override)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    /// Where the previous version came from (absent for an explicit override)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<VersionSourceKind>,
    /// Bump applied (absent for an explicit override)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bump: Option<BumpKind>,
    /// Info.plist that received the version
    pub manifest: PathBuf,
    /// Whether the manifest content actually changed on disk
    pub written: bool,
    /// Whether this was a dry-run
    pub dry_run: bool,
}

impl VersionIncrementResult {
    /// Whether the version was given explicitly rather than computed
    pub fn is_explicit(&self) -> bool {
        self.previous.is_none()
    }

    /// `VERSION_NUMBER=<version>` line for env-style consumers
    pub fn env_line(&self) -> String {
        format!("{}={}", VERSION_NUMBER, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VersionIncrementResult {
        VersionIncrementResult {
            version: "1.2.4".to_string(),
            previous: Some("1.2.3".to_string()),
            source: Some(VersionSourceKind::Plist),
            bump: Some(BumpKind::Patch),
            manifest: PathBuf::from("App/Info.plist"),
            written: true,
            dry_run: false,
        }
    }

    #[test]
    fn test_env_line() {
        assert_eq!(sample().env_line(), "VERSION_NUMBER=1.2.4");
    }

    #[test]
    fn test_is_explicit() {
        assert!(!sample().is_explicit());

        let explicit = VersionIncrementResult {
            previous: None,
            source: None,
            bump: None,
            ..sample()
        };
        assert!(explicit.is_explicit());
    }

    #[test]
    fn test_serialize_skips_missing_fields() {
        let explicit = VersionIncrementResult {
            version: "9.9.9".to_string(),
            previous: None,
            source: None,
            bump: None,
            ..sample()
        };
        let json = serde_json::to_value(&explicit).unwrap();
        assert_eq!(json["version"], "9.9.9");
        assert!(json.get("previous").is_none());
        assert!(json.get("source").is_none());
        assert!(json.get("bump").is_none());
    }

    #[test]
    fn test_serialize_source_and_bump() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["source"], "plist");
        assert_eq!(json["bump"], "patch");
        assert_eq!(json["written"], true);
    }
}
