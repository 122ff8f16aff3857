//! Where the current version is read from

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source of the current version
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum VersionSourceKind {
    /// The project's own Info.plist
    #[default]
    #[value(name = "plist", alias = "local-manifest")]
    Plist,
    /// The version currently published on the App Store
    #[value(name = "appstore", alias = "remote-catalog")]
    AppStore,
}

impl VersionSourceKind {
    /// Name used on the command line and in output
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionSourceKind::Plist => "plist",
            VersionSourceKind::AppStore => "appstore",
        }
    }

    /// Human readable description
    pub fn display_name(&self) -> &'static str {
        match self {
            VersionSourceKind::Plist => "Info.plist",
            VersionSourceKind::AppStore => "App Store",
        }
    }

    /// Whether the source performs network I/O
    pub fn is_remote(&self) -> bool {
        matches!(self, VersionSourceKind::AppStore)
    }
}

impl fmt::Display for VersionSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
