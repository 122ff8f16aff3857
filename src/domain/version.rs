//! Three-component version numbers
//!
//! Only the `major.minor.patch` form is accepted. Pre-release and build
//! metadata are not modelled: anything other than three dot-separated
//! runs of ASCII digits is rejected.

use crate::error::VersionError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Number of components in a marketing version
const COMPONENT_COUNT: usize = 3;

/// A parsed `major.minor.patch` version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SemanticVersion {
    /// Create a version from its components
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a dotted version string such as `1.2.3`
    ///
    /// Surrounding whitespace is ignored. Leading zeros inside a component
    /// are accepted and dropped on display (`01.2.3` becomes `1.2.3`).
    pub fn parse(raw: &str) -> Result<Self, VersionError> {
        let trimmed = raw.trim();
        let parts: Vec<&str> = trimmed.split('.').collect();

        if parts.len() != COMPONENT_COUNT {
            return Err(VersionError::WrongComponentCount {
                raw: raw.to_string(),
                found: parts.len(),
            });
        }

        let mut components = [0u64; COMPONENT_COUNT];
        for (slot, part) in components.iter_mut().zip(&parts) {
            *slot = parse_component(raw, part)?;
        }

        let [major, minor, patch] = components;
        Ok(Self::new(major, minor, patch))
    }
}

fn parse_component(raw: &str, part: &str) -> Result<u64, VersionError> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VersionError::NonNumericComponent {
            raw: raw.to_string(),
            component: part.to_string(),
        });
    }

    // Digits only, so the sole failure left is a value beyond u64
    part.parse::<u64>()
        .map_err(|_| VersionError::ComponentOutOfRange {
            raw: raw.to_string(),
            component: part.to_string(),
        })
}

impl FromStr for SemanticVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let version = SemanticVersion::parse("1.2.3").unwrap();
        assert_eq!(version, SemanticVersion::new(1, 2, 3));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let version = SemanticVersion::parse("  4.0.10\n").unwrap();
        assert_eq!(version, SemanticVersion::new(4, 0, 10));
    }

    #[test]
    fn test_parse_leading_zeros() {
        let version = SemanticVersion::parse("01.02.003").unwrap();
        assert_eq!(version.to_string(), "1.2.3");
    }

    #[test]
    fn test_parse_two_components() {
        let err = SemanticVersion::parse("1.2").unwrap_err();
        assert!(matches!(
            err,
            VersionError::WrongComponentCount { found: 2, .. }
        ));
    }

    #[test]
    fn test_parse_four_components() {
        let err = SemanticVersion::parse("1.2.3.4").unwrap_err();
        assert!(matches!(
            err,
            VersionError::WrongComponentCount { found: 4, .. }
        ));
    }

    #[test]
    fn test_parse_non_numeric() {
        let err = SemanticVersion::parse("1.a.3").unwrap_err();
        match err {
            VersionError::NonNumericComponent { component, .. } => assert_eq!(component, "a"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_sign_and_empty() {
        assert!(SemanticVersion::parse("-1.2.3").is_err());
        assert!(SemanticVersion::parse("+1.2.3").is_err());
        assert!(SemanticVersion::parse("1..3").is_err());
        assert!(SemanticVersion::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_prerelease() {
        assert!(SemanticVersion::parse("1.2.3-beta").is_err());
        assert!(SemanticVersion::parse("1.2.3+42").is_err());
    }

    #[test]
    fn test_parse_placeholder_build_setting() {
        let err = SemanticVersion::parse("$(MARKETING_VERSION)").unwrap_err();
        assert!(matches!(err, VersionError::WrongComponentCount { .. }));
    }

    #[test]
    fn test_parse_out_of_range() {
        let err = SemanticVersion::parse("1.2.99999999999999999999").unwrap_err();
        assert!(matches!(err, VersionError::ComponentOutOfRange { .. }));
    }

    #[test]
    fn test_from_str() {
        let version: SemanticVersion = "10.20.30".parse().unwrap();
        assert_eq!(version, SemanticVersion::new(10, 20, 30));
    }

    #[test]
    fn test_display() {
        assert_eq!(SemanticVersion::new(2, 0, 0).to_string(), "2.0.0");
    }

    #[test]
    fn test_ordering() {
        assert!(SemanticVersion::new(1, 9, 9) < SemanticVersion::new(2, 0, 0));
        assert!(SemanticVersion::new(1, 2, 3) < SemanticVersion::new(1, 2, 4));
    }
}
