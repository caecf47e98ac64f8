//! Driven port for issuing GET requests against the upstream catalogue.
//!
//! The port carries raw status codes and bodies only. Interpreting statuses
//! (404 as an empty listing, 404 as a missing entity) and decoding JSON is
//! the catalogue service's job, so every adapter behaves identically.

use async_trait::async_trait;
use url::Url;

use super::define_port_error;

/// Raw upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Build a response from a status and body.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

define_port_error! {
    /// Errors raised before an upstream response was received.
    pub enum CatalogueTransportError {
        /// Connection or protocol failure.
        Transport { message: String } =>
            "catalogue transport failed: {message}",
        /// The request exceeded the configured timeout.
        Timeout { message: String } =>
            "catalogue request timed out: {message}",
    }
}

/// Port for one-shot GET requests. Implementations must not retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueTransport: Send + Sync {
    /// Issue a GET request and return the raw response, whatever its status.
    async fn get(&self, url: &Url) -> Result<TransportResponse, CatalogueTransportError>;
}
