//! Rick and Morty API outbound adapters.
//!
//! This module provides a thin HTTP implementation of the
//! `CatalogueTransport` port.

mod http_transport;

pub use http_transport::{DEFAULT_REQUEST_TIMEOUT, ReqwestCatalogueTransport};
