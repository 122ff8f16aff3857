//! HTTP client shared foundation
//!
//! This module provides a shared blocking HTTP client with:
//! - Configurable timeout and User-Agent
//! - Optional exponential backoff retry logic (off by default)
//! - Rate limit error handling

use crate::error::RegistryError;
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("verbump/", env!("CARGO_PKG_VERSION"));

/// Default number of retry attempts; a failed lookup is final unless the caller opts in
const DEFAULT_MAX_RETRIES: u32 = 0;

/// Base delay for exponential backoff (in milliseconds)
const BASE_DELAY_MS: u64 = 100;

/// Upper bound for a single backoff delay (in milliseconds)
const MAX_DELAY_MS: u64 = 10_000;

/// HTTP client wrapper with retry logic
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    max_retries: u32,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with a custom timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, RegistryError> {
        Self::with_config(timeout, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| RegistryError::NetworkError {
                package: String::new(),
                registry: "HTTP client".to_string(),
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Set the maximum number of retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Maximum number of retries
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Perform a GET request with retry logic and error context
    pub fn get_with_context(
        &self,
        url: &str,
        package: &str,
        registry: &str,
    ) -> Result<Response, RegistryError> {
        let mut last_error = None;
        let mut delay = BASE_DELAY_MS;

        for attempt in 0..=self.max_retries {
            debug!(url, attempt, "GET");

            match self.client.get(url).send() {
                Ok(response) => {
                    if response.status() == StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(RegistryError::rate_limit_exceeded(registry));

                        if attempt < self.max_retries {
                            warn!(registry, delay_ms = delay, "rate limited, backing off");
                            thread::sleep(Duration::from_millis(delay));
                            delay = next_delay(delay);
                            continue;
                        }
                        break;
                    }

                    if response.status() == StatusCode::NOT_FOUND {
                        return Err(RegistryError::package_not_found(package, registry));
                    }

                    if !response.status().is_success() {
                        let status = response.status();
                        return Err(RegistryError::network_error(
                            package,
                            registry,
                            format!("HTTP {}", status),
                        ));
                    }

                    return Ok(response);
                }
                Err(e) => {
                    if e.is_timeout() {
                        last_error = Some(RegistryError::timeout(package, registry));
                    } else {
                        last_error = Some(RegistryError::network_error(
                            package,
                            registry,
                            e.to_string(),
                        ));
                    }

                    if attempt < self.max_retries {
                        warn!(registry, delay_ms = delay, error = %e, "request failed, retrying");
                        thread::sleep(Duration::from_millis(delay));
                        delay = next_delay(delay);
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            RegistryError::network_error(package, registry, "unknown error")
        }))
    }

    /// Perform a GET request and parse the JSON response
    pub fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        package: &str,
        registry: &str,
    ) -> Result<T, RegistryError> {
        let response = self.get_with_context(url, package, registry)?;
        response.json::<T>().map_err(|e| {
            RegistryError::invalid_response(package, registry, format!("failed to parse JSON: {}", e))
        })
    }
}

/// Double a backoff delay without overflowing, capped at `MAX_DELAY_MS`
fn next_delay(delay: u64) -> u64 {
    delay.saturating_mul(2).min(MAX_DELAY_MS)
}
