//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use multiverse::Trace;
#[cfg(debug_assertions)]
use multiverse::doc::ApiDoc;
use multiverse::domain::catalogue::CatalogueService;
use multiverse::domain::ports::FixtureLoginService;
use multiverse::inbound::http::auth::{login, logout};
use multiverse::inbound::http::catalogue;
use multiverse::inbound::http::error::{json_config, query_config};
use multiverse::inbound::http::health::{HealthState, live, ready};
use multiverse::inbound::http::state::HttpState;
use multiverse::outbound::rick_and_morty::ReqwestCatalogueTransport;
use multiverse::settings::{AppSettings, SettingsError};

/// Handler state wired to the live upstream and the fixture login.
pub fn build_http_state(settings: &AppSettings) -> std::io::Result<HttpState> {
    let base = settings
        .api_base_url()
        .map_err(|err: SettingsError| std::io::Error::other(err.to_string()))?;
    let transport = ReqwestCatalogueTransport::new(settings.request_timeout())
        .map_err(|err| std::io::Error::other(format!("http client: {err}")))?;
    Ok(HttpState::new(
        Arc::new(FixtureLoginService),
        CatalogueService::new(Arc::new(transport), base),
    ))
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api")
        .wrap(session)
        .service(web::scope("/auth").service(login).service(logout))
        .service(web::scope("/v1").configure(catalogue::configure));

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .app_data(query_config())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the listener and return the running server.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(http_state);
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
