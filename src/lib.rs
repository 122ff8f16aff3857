//! verbump - version number increment library
//!
//! This library provides the core functionality for bumping the marketing
//! version of an Xcode project:
//! - Reading the current version from Info.plist or the App Store
//! - Parsing and bumping `major.minor.patch` versions
//! - Writing the new version back to Info.plist
//! - Publishing it as `VERSION_NUMBER` for later pipeline steps

pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod output;
pub mod progress;
pub mod registry;
pub mod source;
