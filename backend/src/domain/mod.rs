//! Domain primitives, ports and services.
//!
//! Purpose: model the upstream catalogue (characters, locations, episodes),
//! the listing and detail views built on it, and the mock authentication
//! gate. Types are immutable records whose serde shapes match the upstream
//! JSON; invariants are documented on each type.
//!
//! Public surface:
//! - `Error`/`ErrorCode`: API error payload and stable identifier.
//! - `Character`, `Location`, `Episode`: upstream entities.
//! - `catalogue::CatalogueService`: listing, entity and batch reads.
//! - `listing::ListingController`: debounced listing state.
//! - `AuthGate`: client-side session state and route guard.

pub mod auth;
pub mod auth_gate;
pub mod catalogue;
pub mod character;
pub mod episode;
pub mod error;
pub mod filters;
pub mod listing;
pub mod location;
pub mod ports;
pub mod resource;
pub mod trace_id;

pub use self::auth::{
    AuthUser, DEMO_PASSWORD, DEMO_TOKEN, LoginCredentials, LoginGrant, LoginValidationError,
    demo_grant,
};
pub use self::auth_gate::{
    AUTH_STORAGE_KEY, AuthError, AuthGate, AuthSession, AuthState, GuardDecision, LOGIN_ROUTE,
};
pub use self::character::{Character, CharacterStatus, Gender, LocationLink};
pub use self::episode::{Episode, SeasonEpisode};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::filters::{CharacterFilters, EpisodeFilters, FilterSet, LocationFilters};
pub use self::location::Location;
pub use self::resource::{EntityId, EntityIdError, Resource, ResourceKind};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use multiverse::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("login required"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
