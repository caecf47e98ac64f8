//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

use super::state::HttpState;
use crate::domain::catalogue::{CatalogueBaseUrl, CatalogueService, DEFAULT_API_BASE_URL};
use crate::domain::ports::{CatalogueTransport, FixtureLoginService};

/// Name of the cookie used by [`test_session_middleware`].
pub const TEST_SESSION_COOKIE: &str = "session";

/// Build a session middleware configured for tests.
///
/// Generates a fresh key per invocation and disables the `Secure` flag for
/// local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(TEST_SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by a response, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == TEST_SESSION_COOKIE)
        .map(Cookie::into_owned)
}

/// Handler state backed by the fixture login and the given transport.
pub fn http_state(transport: Arc<dyn CatalogueTransport>) -> HttpState {
    let base = CatalogueBaseUrl::parse(DEFAULT_API_BASE_URL).expect("default base url");
    HttpState::new(
        Arc::new(FixtureLoginService),
        CatalogueService::new(transport, base),
    )
}
