//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and services and remain testable without I/O.

use std::sync::Arc;

use crate::domain::catalogue::CatalogueService;
use crate::domain::ports::LoginService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential check behind `POST /api/auth/login`.
    pub login: Arc<dyn LoginService>,
    /// Upstream catalogue reads behind `/api/v1/*`.
    pub catalogue: CatalogueService,
}

impl HttpState {
    /// Construct state from the login port and the catalogue service.
    pub fn new(login: Arc<dyn LoginService>, catalogue: CatalogueService) -> Self {
        Self { login, catalogue }
    }
}
