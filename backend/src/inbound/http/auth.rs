//! Mock authentication endpoints.
//!
//! ```text
//! POST /api/auth/login {"email":"rick@citadel.test","password":"password"}
//! POST /api/auth/logout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::{ApiResult, Error, LoginCredentials, LoginGrant, LoginValidationError};
use crate::inbound::http::schemas::{ErrorSchema, LoginGrantSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/auth/login`.
///
/// Both fields are optional on the wire so a missing field is reported with
/// the same validation envelope as a blank one.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    /// Account email; any non-blank value is accepted.
    #[schema(example = "rick@citadel.test")]
    #[serde(default)]
    pub email: Option<String>,
    /// Account password.
    #[schema(example = "password")]
    #[serde(default)]
    pub password: Option<String>,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.email.as_deref().unwrap_or_default(),
            value.password.as_deref().unwrap_or_default(),
        )
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => Error::invalid_request("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Authenticate and establish a session.
///
/// The response body carries the user and token so clients can persist
/// them; the session cookie authorises later catalogue requests.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginGrantSchema,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Missing email or password", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginGrant>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let grant = state.login.authenticate(&credentials).await?;
    session.persist_user(&grant.user)?;
    info!(user_id = %grant.user.id, "login succeeded");
    Ok(web::Json(grant))
}

/// Drop the session. Succeeds whether or not one existed.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 204, description = "Session cleared")
    ),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockCatalogueTransport, MockLoginService};
    use crate::inbound::http::error::json_config;
    use crate::inbound::http::test_utils::{http_state, session_cookie, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;
    use std::sync::Arc;

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .app_data(json_config())
            .wrap(test_session_middleware())
            .service(web::scope("/api/auth").service(login).service(logout))
    }

    fn fixture_state() -> HttpState {
        http_state(Arc::new(MockCatalogueTransport::new()))
    }

    #[rstest]
    #[actix_web::test]
    async fn valid_login_returns_grant_and_sets_cookie() {
        let app = actix_test::init_service(test_app(fixture_state())).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": "morty@smith.test", "password": "password" }))
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(session_cookie(&response).is_some());
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["token"], "demo-token");
        assert_eq!(body["user"]["id"], "1");
        assert_eq!(body["user"]["email"], "morty@smith.test");
    }

    #[rstest]
    #[case(json!({ "email": "   ", "password": "password" }), "email", "empty_email")]
    #[case(json!({ "password": "password" }), "email", "empty_email")]
    #[case(json!({ "email": "rick@citadel.test", "password": "" }), "password", "empty_password")]
    #[case(json!({ "email": "rick@citadel.test" }), "password", "empty_password")]
    #[actix_web::test]
    async fn missing_fields_are_rejected(
        #[case] payload: Value,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let app = actix_test::init_service(test_app(fixture_state())).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(payload)
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["field"], field);
        assert_eq!(body["details"]["code"], code);
    }

    #[rstest]
    #[actix_web::test]
    async fn wrong_password_is_unauthorised_without_cookie() {
        let app = actix_test::init_service(test_app(fixture_state())).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": "rick@citadel.test", "password": "wubba" }))
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(session_cookie(&response).is_none());
    }

    #[rstest]
    #[actix_web::test]
    async fn login_service_failures_are_redacted() {
        let mut login_service = MockLoginService::new();
        login_service
            .expect_authenticate()
            .times(1)
            .returning(|_| Err(Error::internal("identity provider exploded")));
        let mut state = fixture_state();
        state.login = Arc::new(login_service);
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": "rick@citadel.test", "password": "password" }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Error = actix_test::read_body_json(response).await;
        assert_eq!(body.code(), ErrorCode::InternalError);
        assert_eq!(body.message(), "Internal server error");
    }

    #[rstest]
    #[actix_web::test]
    async fn logout_is_idempotent() {
        let app = actix_test::init_service(test_app(fixture_state())).await;
        for _ in 0..2 {
            let response = actix_test::call_service(
                &app,
                actix_test::TestRequest::post()
                    .uri("/api/auth/logout")
                    .to_request(),
            )
            .await;
            assert_eq!(response.status(), StatusCode::NO_CONTENT);
        }
    }
}
