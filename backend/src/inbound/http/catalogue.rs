//! Session-gated catalogue endpoints.
//!
//! ```text
//! GET /api/v1/characters?page=2&status=alive
//! GET /api/v1/characters/{id}
//! GET /api/v1/locations?page=1&dimension=C-137
//! GET /api/v1/locations/{id}
//! GET /api/v1/episodes?episode=S01
//! GET /api/v1/episodes/{id}
//! ```
//!
//! Listings return the upstream envelope; a filter that matches nothing
//! yields an empty page rather than `404`. Detail routes return the entity
//! with its resolved cross-references.

use actix_web::{get, web};
use pagination::{Page, PageNumber};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::domain::catalogue::{CatalogueError, CharacterDetail, EpisodeDetail, LocationDetail};
use crate::domain::{
    ApiResult, Character, CharacterFilters, EntityId, Episode, EpisodeFilters, Error, Location,
    LocationFilters, Resource,
};
use crate::inbound::http::schemas::{
    CharacterDetailSchema, EpisodeDetailSchema, ErrorSchema, LocationDetailSchema, PageSchema,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Page selector shared by every listing route.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// One-based page number; defaults to 1.
    #[param(example = "2")]
    pub page: Option<String>,
}

impl PageQuery {
    fn page_number(&self) -> Result<PageNumber, Error> {
        self.page.as_deref().map_or(Ok(PageNumber::FIRST), |raw| {
            raw.trim().parse::<PageNumber>().map_err(|err| {
                Error::invalid_request(err.to_string())
                    .with_details(json!({ "field": "page", "code": "invalid_page" }))
            })
        })
    }
}

fn parse_id(raw: &str) -> Result<EntityId, Error> {
    raw.parse::<EntityId>().map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "id", "code": "invalid_id" }))
    })
}

/// Map catalogue failures onto the HTTP error envelope.
///
/// Only a missing entity is the client's problem; every other failure is
/// reported as the upstream being unavailable.
pub fn map_catalogue_error(err: CatalogueError) -> Error {
    match err {
        CatalogueError::NotFound { kind, id } => {
            Error::not_found(format!("{kind} {id} does not exist"))
        }
        other => {
            warn!(error = %other, "catalogue request failed");
            Error::service_unavailable("the catalogue is unavailable, try again")
                .with_details(json!({ "reason": other.to_string() }))
        }
    }
}

async fn list<R: Resource>(
    state: &HttpState,
    session: &SessionContext,
    query: &PageQuery,
    filters: &R::Filters,
) -> ApiResult<web::Json<Page<R>>> {
    session.require_user_id()?;
    let page = query.page_number()?;
    let listing = state
        .catalogue
        .fetch_page::<R>(page, filters)
        .await
        .map_err(map_catalogue_error)?;
    Ok(web::Json(listing))
}

/// List characters, filtered by name, status, species, type and gender.
#[utoipa::path(
    get,
    path = "/api/v1/characters",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of characters", body = PageSchema),
        (status = 400, description = "Invalid page", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 503, description = "Catalogue unavailable", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "listCharacters"
)]
#[get("/characters")]
pub async fn list_characters(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<PageQuery>,
    filters: web::Query<CharacterFilters>,
) -> ApiResult<web::Json<Page<Character>>> {
    list::<Character>(&state, &session, &query, &filters).await
}

/// List locations, filtered by name, type and dimension.
#[utoipa::path(
    get,
    path = "/api/v1/locations",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of locations", body = PageSchema),
        (status = 400, description = "Invalid page", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 503, description = "Catalogue unavailable", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "listLocations"
)]
#[get("/locations")]
pub async fn list_locations(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<PageQuery>,
    filters: web::Query<LocationFilters>,
) -> ApiResult<web::Json<Page<Location>>> {
    list::<Location>(&state, &session, &query, &filters).await
}

/// List episodes, filtered by name and episode code.
#[utoipa::path(
    get,
    path = "/api/v1/episodes",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of episodes", body = PageSchema),
        (status = 400, description = "Invalid page", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 503, description = "Catalogue unavailable", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "listEpisodes"
)]
#[get("/episodes")]
pub async fn list_episodes(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<PageQuery>,
    filters: web::Query<EpisodeFilters>,
) -> ApiResult<web::Json<Page<Episode>>> {
    list::<Episode>(&state, &session, &query, &filters).await
}

/// Character with every episode it appears in.
#[utoipa::path(
    get,
    path = "/api/v1/characters/{id}",
    params(("id" = u32, Path, description = "Character id")),
    responses(
        (status = 200, description = "Character detail", body = CharacterDetailSchema),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such character", body = ErrorSchema),
        (status = 503, description = "Catalogue unavailable", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "getCharacter"
)]
#[get("/characters/{id}")]
pub async fn get_character(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<CharacterDetail>> {
    session.require_user_id()?;
    let id = parse_id(&path)?;
    let detail = state
        .catalogue
        .character_detail(id)
        .await
        .map_err(map_catalogue_error)?;
    Ok(web::Json(detail))
}

/// Location with up to twenty residents.
#[utoipa::path(
    get,
    path = "/api/v1/locations/{id}",
    params(("id" = u32, Path, description = "Location id")),
    responses(
        (status = 200, description = "Location detail", body = LocationDetailSchema),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such location", body = ErrorSchema),
        (status = 503, description = "Catalogue unavailable", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "getLocation"
)]
#[get("/locations/{id}")]
pub async fn get_location(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<LocationDetail>> {
    session.require_user_id()?;
    let id = parse_id(&path)?;
    let detail = state
        .catalogue
        .location_detail(id)
        .await
        .map_err(map_catalogue_error)?;
    Ok(web::Json(detail))
}

/// Episode with up to forty characters and its parsed season code.
#[utoipa::path(
    get,
    path = "/api/v1/episodes/{id}",
    params(("id" = u32, Path, description = "Episode id")),
    responses(
        (status = 200, description = "Episode detail", body = EpisodeDetailSchema),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such episode", body = ErrorSchema),
        (status = 503, description = "Catalogue unavailable", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "getEpisode"
)]
#[get("/episodes/{id}")]
pub async fn get_episode(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<EpisodeDetail>> {
    session.require_user_id()?;
    let id = parse_id(&path)?;
    let detail = state
        .catalogue
        .episode_detail(id)
        .await
        .map_err(map_catalogue_error)?;
    Ok(web::Json(detail))
}

/// Register every catalogue route on a scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_characters)
        .service(get_character)
        .service(list_locations)
        .service(get_location)
        .service(list_episodes)
        .service(get_episode);
}
