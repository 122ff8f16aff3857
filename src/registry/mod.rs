//! Registry adapters for fetching published version information
//!
//! This module provides:
//! - HTTP client shared foundation with optional retry logic
//! - App Store lookup adapter

mod app_store;
mod client;

pub use app_store::{AppStoreAdapter, APP_STORE_LOOKUP_URL};
pub use client::{HttpClient, DEFAULT_TIMEOUT};

use crate::error::RegistryError;

/// Trait for registry adapters
pub trait RegistryAdapter {
    /// Get the registry name
    fn registry_name(&self) -> &'static str;

    /// Fetch the version currently published for a package
    fn fetch_version(&self, package: &str) -> Result<String, RegistryError>;
}
