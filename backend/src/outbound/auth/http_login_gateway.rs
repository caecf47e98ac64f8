//! Reqwest-backed login gateway calling the mock login endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use tracing::warn;

use crate::domain::ports::{LoginGateway, LoginGatewayError};
use crate::domain::{LoginCredentials, LoginGrant};

#[derive(Serialize)]
struct LoginRequestBody<'a> {
    email: &'a str,
    password: &'a str,
}

/// Login gateway posting credentials as JSON to one endpoint.
#[derive(Debug, Clone)]
pub struct HttpLoginGateway {
    client: Client,
    endpoint: Url,
}

impl HttpLoginGateway {
    /// Build a gateway for `endpoint` (e.g. `http://host/api/auth/login`).
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl LoginGateway for HttpLoginGateway {
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginGrant, LoginGatewayError> {
        let body = LoginRequestBody {
            email: credentials.email(),
            password: credentials.password(),
        };
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(|err| LoginGatewayError::unavailable(err.to_string()))?;

        match response.status() {
            StatusCode::OK => response.json::<LoginGrant>().await.map_err(|err| {
                warn!(error = %err, "login response could not be decoded");
                LoginGatewayError::unavailable(err.to_string())
            }),
            status => Err(map_status(status)),
        }
    }
}

fn map_status(status: StatusCode) -> LoginGatewayError {
    match status {
        StatusCode::BAD_REQUEST => LoginGatewayError::missing_credentials(),
        StatusCode::UNAUTHORIZED => LoginGatewayError::invalid_credentials(),
        other => LoginGatewayError::unavailable(format!("status {}", other.as_u16())),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for status mapping.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::bad_request(StatusCode::BAD_REQUEST, LoginGatewayError::MissingCredentials)]
    #[case::unauthorized(StatusCode::UNAUTHORIZED, LoginGatewayError::InvalidCredentials)]
    #[case::server_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        LoginGatewayError::unavailable("status 500")
    )]
    #[case::redirect(StatusCode::FOUND, LoginGatewayError::unavailable("status 302"))]
    fn maps_statuses_to_gateway_errors(
        #[case] status: StatusCode,
        #[case] expected: LoginGatewayError,
    ) {
        assert_eq!(map_status(status), expected);
    }

    #[test]
    fn request_body_matches_endpoint_contract() {
        let body = LoginRequestBody {
            email: "a@b.com",
            password: "password",
        };
        assert_eq!(
            serde_json::to_value(&body).expect("serialise"),
            serde_json::json!({ "email": "a@b.com", "password": "password" })
        );
    }
}
