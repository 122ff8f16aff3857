//! App Store lookup adapter
//!
//! Fetches the version currently published for a bundle identifier.
//! API endpoint: https://itunes.apple.com/lookup?bundleId={id}[&country={cc}]

use crate::error::RegistryError;
use crate::registry::{HttpClient, RegistryAdapter};
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

/// App Store lookup API URL
pub const APP_STORE_LOOKUP_URL: &str = "https://itunes.apple.com/lookup";

/// Registry name used in messages
const REGISTRY_NAME: &str = "App Store";

/// App Store adapter
pub struct AppStoreAdapter {
    client: HttpClient,
    base_url: String,
    country: Option<String>,
}

/// Lookup response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupResponse {
    /// Number of matching apps
    result_count: usize,
    /// Matching apps
    #[serde(default)]
    results: Vec<LookupResult>,
}

/// A single app entry
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupResult {
    /// Bundle identifier of the app
    #[serde(default)]
    bundle_id: Option<String>,
    /// Currently published version
    #[serde(default)]
    version: Option<String>,
}

impl AppStoreAdapter {
    /// Create a new App Store adapter
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            base_url: APP_STORE_LOOKUP_URL.to_string(),
            country: None,
        }
    }

    /// Restrict the lookup to a storefront country (two-letter code)
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Use a different lookup endpoint
    #[cfg(test)]
    fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the lookup URL for a bundle identifier
    fn build_url(&self, bundle_identifier: &str) -> Result<String, RegistryError> {
        let mut params = vec![("bundleId", bundle_identifier)];
        if let Some(country) = &self.country {
            params.push(("country", country.as_str()));
        }

        Url::parse_with_params(&self.base_url, &params)
            .map(String::from)
            .map_err(|e| {
                RegistryError::network_error(
                    bundle_identifier,
                    REGISTRY_NAME,
                    format!("invalid lookup URL '{}': {}", self.base_url, e),
                )
            })
    }
}

/// Pick the published version out of a lookup response
fn published_version(
    response: LookupResponse,
    bundle_identifier: &str,
) -> Result<String, RegistryError> {
    if response.result_count == 0 || response.results.is_empty() {
        return Err(RegistryError::package_not_found(
            bundle_identifier,
            REGISTRY_NAME,
        ));
    }

    // Prefer the entry for this exact bundle; the API can return neighbours
    let index = response
        .results
        .iter()
        .position(|r| r.bundle_id.as_deref() == Some(bundle_identifier))
        .unwrap_or(0);

    response
        .results
        .into_iter()
        .nth(index)
        .and_then(|r| r.version)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| {
            RegistryError::invalid_response(
                bundle_identifier,
                REGISTRY_NAME,
                "lookup result has no version",
            )
        })
}

impl RegistryAdapter for AppStoreAdapter {
    fn registry_name(&self) -> &'static str {
        REGISTRY_NAME
    }

    fn fetch_version(&self, bundle_identifier: &str) -> Result<String, RegistryError> {
        let url = self.build_url(bundle_identifier)?;
        let response: LookupResponse =
            self.client
                .get_json(&url, bundle_identifier, self.registry_name())?;

        let version = published_version(response, bundle_identifier)?;
        debug!(bundle = bundle_identifier, %version, "published version");
        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> AppStoreAdapter {
        AppStoreAdapter::new(HttpClient::new().unwrap())
    }

    fn parse(json: &str) -> LookupResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_registry_name() {
        assert_eq!(adapter().registry_name(), "App Store");
    }

    #[test]
    fn test_build_url() {
        assert_eq!(
            adapter().build_url("com.example.app").unwrap(),
            "https://itunes.apple.com/lookup?bundleId=com.example.app"
        );
    }

    #[test]
    fn test_build_url_with_country() {
        assert_eq!(
            adapter()
                .with_country("de")
                .build_url("com.example.app")
                .unwrap(),
            "https://itunes.apple.com/lookup?bundleId=com.example.app&country=de"
        );
    }

    #[test]
    fn test_build_url_invalid_base() {
        let err = adapter()
            .with_base_url("not a url")
            .build_url("com.example.app")
            .unwrap_err();
        assert!(matches!(err, RegistryError::NetworkError { .. }));
    }

    #[test]
    fn test_published_version() {
        let response = parse(
            r#"{"resultCount":1,"results":[{"bundleId":"com.example.app","version":"2.4.1","trackName":"Example"}]}"#,
        );
        assert_eq!(
            published_version(response, "com.example.app").unwrap(),
            "2.4.1"
        );
    }

    #[test]
    fn test_published_version_prefers_exact_bundle() {
        let response = parse(
            r#"{"resultCount":2,"results":[
                {"bundleId":"com.example.app.lite","version":"1.0.0"},
                {"bundleId":"com.example.app","version":"3.0.0"}
            ]}"#,
        );
        assert_eq!(
            published_version(response, "com.example.app").unwrap(),
            "3.0.0"
        );
    }

    #[test]
    fn test_published_version_not_found() {
        let response = parse(r#"{"resultCount":0,"results":[]}"#);
        let err = published_version(response, "com.example.missing").unwrap_err();
        assert!(matches!(err, RegistryError::PackageNotFound { .. }));
    }

    #[test]
    fn test_published_version_missing_field() {
        let response = parse(r#"{"resultCount":1,"results":[{"bundleId":"com.example.app"}]}"#);
        let err = published_version(response, "com.example.app").unwrap_err();
        assert!(matches!(err, RegistryError::InvalidResponse { .. }));
    }

    #[test]
    fn test_fetch_version_unreachable_endpoint() {
        let adapter = adapter().with_base_url("http://127.0.0.1:9/lookup");
        let err = adapter.fetch_version("com.example.app").unwrap_err();
        assert!(matches!(
            err,
            RegistryError::NetworkError { .. } | RegistryError::Timeout { .. }
        ));
    }
}
