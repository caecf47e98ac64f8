//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their wire shapes and live in the inbound adapter
//! where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The upstream catalogue could not serve the request.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "email must not be empty")]
    message: String,
    /// Correlation identifier, mirrored in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::AuthUser`].
#[derive(ToSchema)]
#[schema(as = crate::domain::AuthUser)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AuthUserSchema {
    /// Stable user identifier.
    #[schema(example = "1")]
    id: String,
    /// Display name.
    #[schema(example = "Demo User")]
    name: String,
    /// Email supplied at login.
    #[schema(example = "rick@citadel.test")]
    email: String,
}

/// OpenAPI schema for [`crate::domain::LoginGrant`].
#[derive(ToSchema)]
#[schema(as = crate::domain::LoginGrant)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct LoginGrantSchema {
    /// Authenticated user.
    user: AuthUserSchema,
    /// Opaque bearer token.
    #[schema(example = "demo-token")]
    token: String,
}

/// OpenAPI schema for [`pagination::PageInfo`].
#[derive(ToSchema)]
#[schema(as = pagination::PageInfo)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PageInfoSchema {
    /// Total number of matching records.
    #[schema(example = 826)]
    count: u32,
    /// Total number of pages.
    #[schema(example = 42)]
    pages: u32,
    /// Link to the next page.
    #[schema(example = "https://rickandmortyapi.com/api/character?page=2")]
    next: Option<String>,
    /// Link to the previous page.
    prev: Option<String>,
}

/// OpenAPI schema for a listing page of any entity kind.
#[derive(ToSchema)]
#[schema(as = pagination::Page)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PageSchema {
    /// Paging metadata; all zero when the filters matched nothing.
    info: PageInfoSchema,
    /// Entities in upstream order, shaped as the upstream returns them.
    results: Vec<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::catalogue::SectionStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::catalogue::SectionStatus)]
pub enum SectionStatusSchema {
    /// The batch request succeeded.
    #[schema(rename = "loaded")]
    Loaded,
    /// The batch request failed; `items` is empty.
    #[schema(rename = "unavailable")]
    Unavailable,
}

/// OpenAPI schema for [`crate::domain::catalogue::CrossReferences`].
#[derive(ToSchema)]
#[schema(as = crate::domain::catalogue::CrossReferences)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CrossReferencesSchema {
    /// Number of references on the parent before capping.
    #[schema(example = 45)]
    total: usize,
    /// Number of references asked for after capping.
    #[schema(example = 40)]
    requested: usize,
    /// Resolved entities in upstream order.
    items: Vec<serde_json::Value>,
    /// Resolution outcome.
    status: SectionStatusSchema,
}

/// OpenAPI schema for [`crate::domain::catalogue::CharacterDetail`].
#[derive(ToSchema)]
#[schema(as = crate::domain::catalogue::CharacterDetail)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CharacterDetailSchema {
    /// The character as returned upstream.
    character: serde_json::Value,
    /// Every episode the character appears in.
    episodes: CrossReferencesSchema,
}

/// OpenAPI schema for [`crate::domain::catalogue::LocationDetail`].
#[derive(ToSchema)]
#[schema(as = crate::domain::catalogue::LocationDetail)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct LocationDetailSchema {
    /// The location as returned upstream.
    location: serde_json::Value,
    /// Up to twenty residents.
    residents: CrossReferencesSchema,
}

/// OpenAPI schema for [`crate::domain::catalogue::EpisodeDetail`].
#[derive(ToSchema)]
#[schema(as = crate::domain::catalogue::EpisodeDetail)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EpisodeDetailSchema {
    /// The episode as returned upstream.
    episode: serde_json::Value,
    /// Parsed `SxxEyy` code, when it matches.
    season_episode: Option<serde_json::Value>,
    /// Up to forty characters.
    characters: CrossReferencesSchema,
}
