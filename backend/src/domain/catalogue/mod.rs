//! Typed access to the upstream catalogue.
//!
//! [`CatalogueService`] owns the three read operations every view is built
//! from:
//! - [`CatalogueService::fetch_page`] for listings;
//! - [`CatalogueService::fetch_one`] for a single entity;
//! - [`CatalogueService::resolve_many`] for cross-reference URL lists.
//!
//! Each call issues at most one GET through the [`CatalogueTransport`] port
//! and never retries.

mod detail;
mod query;

use std::sync::Arc;

use pagination::{Page, PageNumber};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::domain::ports::{
    CatalogueTransport, CatalogueTransportError, TransportResponse, define_port_error,
};
use crate::domain::{EntityId, Resource, ResourceKind};

pub use detail::{
    CharacterDetail, CrossReferences, EPISODE_CHARACTER_CAP, EpisodeDetail,
    LOCATION_RESIDENT_CAP, LocationDetail, SectionStatus,
};
pub use query::{
    CatalogueBaseUrl, CatalogueBaseUrlError, DEFAULT_API_BASE_URL, batch_url, build_url,
    entity_url,
};

const NOT_FOUND: u16 = 404;

define_port_error! {
    /// Failures surfaced by catalogue reads.
    pub enum CatalogueError {
        /// The requested entity does not exist.
        NotFound { kind: ResourceKind, id: EntityId } => "{kind} {id} not found",
        /// The upstream answered with an unexpected status.
        Status { status: u16 } => "catalogue responded with status {status}",
        /// The upstream body did not match the expected shape.
        Decode { message: String } => "catalogue payload is malformed: {message}",
        /// The request never produced a response.
        Transport { message: String } => "catalogue unreachable: {message}",
        /// The request exceeded the configured timeout.
        Timeout { message: String } => "catalogue request timed out: {message}",
    }
}

impl From<CatalogueTransportError> for CatalogueError {
    fn from(value: CatalogueTransportError) -> Self {
        match value {
            CatalogueTransportError::Transport { message } => Self::Transport { message },
            CatalogueTransportError::Timeout { message } => Self::Timeout { message },
        }
    }
}

/// A batch response: the upstream returns a bare object for one id.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

fn decode<T: DeserializeOwned>(url: &Url, body: &[u8]) -> Result<T, CatalogueError> {
    serde_json::from_slice(body).map_err(|err| {
        warn!(%url, error = %err, "failed to decode catalogue payload");
        CatalogueError::decode(err.to_string())
    })
}

fn unexpected_status(url: &Url, status: u16) -> CatalogueError {
    warn!(%url, status, "catalogue responded with unexpected status");
    CatalogueError::status(status)
}

/// Read-side service over the upstream catalogue.
#[derive(Clone)]
pub struct CatalogueService {
    transport: Arc<dyn CatalogueTransport>,
    base: CatalogueBaseUrl,
}

impl CatalogueService {
    /// Create a service issuing requests relative to `base`.
    pub fn new(transport: Arc<dyn CatalogueTransport>, base: CatalogueBaseUrl) -> Self {
        Self { transport, base }
    }

    async fn get(&self, url: &Url) -> Result<TransportResponse, CatalogueError> {
        debug!(%url, "catalogue request");
        self.transport.get(url).await.map_err(|err| {
            warn!(%url, error = %err, "catalogue request failed");
            CatalogueError::from(err)
        })
    }

    /// Fetch one listing page.
    ///
    /// An upstream 404 means the filters matched nothing and yields
    /// [`Page::empty`] rather than an error.
    pub async fn fetch_page<R: Resource>(
        &self,
        page: PageNumber,
        filters: &R::Filters,
    ) -> Result<Page<R>, CatalogueError> {
        let url = build_url(&self.base, R::KIND, page, filters);
        let response = self.get(&url).await?;
        if response.status == NOT_FOUND {
            debug!(kind = %R::KIND, page = page.get(), "listing matched nothing");
            return Ok(Page::empty());
        }
        if !response.is_success() {
            return Err(unexpected_status(&url, response.status));
        }
        decode(&url, &response.body)
    }

    /// Fetch a single entity by id.
    pub async fn fetch_one<R: Resource>(&self, id: EntityId) -> Result<R, CatalogueError> {
        let url = entity_url(&self.base, R::KIND, id);
        let response = self.get(&url).await?;
        if response.status == NOT_FOUND {
            debug!(kind = %R::KIND, %id, "entity not found");
            return Err(CatalogueError::not_found(R::KIND, id));
        }
        if !response.is_success() {
            return Err(unexpected_status(&url, response.status));
        }
        decode(&url, &response.body)
    }

    /// Resolve entity URLs with one batch request.
    ///
    /// URLs whose trailing segment is not a numeric id are skipped. When no
    /// id remains, no request is made. Upstream ordering is kept and nothing
    /// is capped here.
    pub async fn resolve_many<R: Resource>(&self, urls: &[String]) -> Result<Vec<R>, CatalogueError> {
        let ids: Vec<EntityId> = urls
            .iter()
            .filter_map(|raw| {
                let id = EntityId::from_url(raw);
                if id.is_none() {
                    debug!(url = %raw, "skipping cross-reference without numeric id");
                }
                id
            })
            .collect();

        let Some(url) = batch_url(&self.base, R::KIND, &ids) else {
            return Ok(Vec::new());
        };
        let response = self.get(&url).await?;
        if !response.is_success() {
            return Err(unexpected_status(&url, response.status));
        }
        let resolved: OneOrMany<R> = decode(&url, &response.body)?;
        Ok(resolved.into())
    }
}
