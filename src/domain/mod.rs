//! Core domain models for verbump
//!
//! This module contains the fundamental types used throughout the application:
//! - Three-component versions and their parser
//! - Bump kinds and the bump policy
//! - Version source kinds
//! - Manifest selection and resolved locations
//! - The per-run result

mod bump;
mod result;
mod selector;
mod source_kind;
mod version;

pub use bump::BumpKind;
pub use result::{VersionIncrementResult, VERSION_NUMBER};
pub use selector::{ManifestField, ManifestLocation, ManifestSelector};
pub use source_kind::VersionSourceKind;
pub use version::SemanticVersion;
