//! Reqwest-backed catalogue transport.
//!
//! This adapter owns transport details only: the request timeout, headers and
//! mapping of connection failures. Status interpretation and JSON decoding
//! stay in the catalogue service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::domain::ports::{CatalogueTransport, CatalogueTransportError, TransportResponse};

/// Request timeout used when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("multiverse/", env!("CARGO_PKG_VERSION"));

/// Catalogue transport issuing one GET per call, without retries.
#[derive(Debug, Clone)]
pub struct ReqwestCatalogueTransport {
    client: Client,
}

impl ReqwestCatalogueTransport {
    /// Build a transport using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl CatalogueTransport for ReqwestCatalogueTransport {
    async fn get(&self, url: &Url) -> Result<TransportResponse, CatalogueTransportError> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_transport_error)?;
        Ok(TransportResponse::new(status, body.to_vec()))
    }
}

fn map_transport_error(error: reqwest::Error) -> CatalogueTransportError {
    if error.is_timeout() {
        CatalogueTransportError::timeout(error.to_string())
    } else {
        CatalogueTransportError::transport(error.to_string())
    }
}
