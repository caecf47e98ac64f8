//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the auth, catalogue and health paths together with
//! the schema wrappers from [`crate::inbound::http::schemas`]. The document
//! backs Swagger UI in debug builds and `cargo run --bin openapi-dump`.

use crate::inbound::http::schemas::{
    AuthUserSchema, CharacterDetailSchema, CrossReferencesSchema, EpisodeDetailSchema,
    ErrorCodeSchema, ErrorSchema, LocationDetailSchema, LoginGrantSchema, PageInfoSchema,
    PageSchema, SectionStatusSchema,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Multiverse catalogue API",
        description = "Session-gated access to Rick and Morty characters, locations and episodes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::catalogue::list_characters,
        crate::inbound::http::catalogue::get_character,
        crate::inbound::http::catalogue::list_locations,
        crate::inbound::http::catalogue::get_location,
        crate::inbound::http::catalogue::list_episodes,
        crate::inbound::http::catalogue::get_episode,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        AuthUserSchema,
        LoginGrantSchema,
        PageInfoSchema,
        PageSchema,
        SectionStatusSchema,
        CrossReferencesSchema,
        CharacterDetailSchema,
        LocationDetailSchema,
        EpisodeDetailSchema,
        crate::inbound::http::auth::LoginRequest,
    )),
    tags(
        (name = "auth", description = "Mock login and logout"),
        (name = "catalogue", description = "Characters, locations and episodes"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
