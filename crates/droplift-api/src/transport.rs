//! HTTP transport seam.
//!
//! The client talks to the wire through the [`Transport`] trait so tests
//! and embedders can substitute their own HTTP stack for the default
//! reqwest-backed one.

use std::time::Duration;

use crate::error::TransportError;

/// One synchronous GET per call. Implementations must be shareable across
/// threads; the client itself holds no mutable state between calls.
pub trait Transport: Send + Sync {
    /// Issue a blocking GET and return the response body.
    fn get(&self, url: &str) -> Result<String, TransportError>;
}

/// Production transport backed by a blocking reqwest client.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(None)
    }

    /// Build a transport with an optional request timeout. `None` means no
    /// timeout at all, matching the wire behavior the provider integration
    /// was built against.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<String, TransportError> {
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.text()?)
    }
}
