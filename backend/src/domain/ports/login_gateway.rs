//! Driven port used by the auth gate to exchange credentials for a grant.
//!
//! Production talks to the mock login endpoint over HTTP; tests and offline
//! runs use [`FixtureLoginGateway`], which applies the demo check in-process.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{LoginCredentials, LoginGrant, demo_grant};

define_port_error! {
    /// Errors a login gateway can report.
    pub enum LoginGatewayError {
        /// The endpoint rejected the request as incomplete.
        MissingCredentials => "email and password are required",
        /// The credentials were well formed but wrong.
        InvalidCredentials => "invalid credentials",
        /// Any other failure: transport, unexpected status or bad payload.
        Unavailable { message: String } => "login unavailable: {message}",
    }
}

/// Port for credential exchange.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginGateway: Send + Sync {
    /// Exchange credentials for a user and token.
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginGrant, LoginGatewayError>;
}

/// In-process gateway accepting the demo password.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginGateway;

#[async_trait]
impl LoginGateway for FixtureLoginGateway {
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginGrant, LoginGatewayError> {
        demo_grant(credentials).ok_or_else(LoginGatewayError::invalid_credentials)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("password", true)]
    #[case("hunter2", false)]
    #[tokio::test]
    async fn fixture_gateway_accepts_only_demo_password(
        #[case] password: &str,
        #[case] should_succeed: bool,
    ) {
        let creds =
            LoginCredentials::try_from_parts("a@b.com", password).expect("credentials shape");
        let result = FixtureLoginGateway.login(&creds).await;
        match (should_succeed, result) {
            (true, Ok(grant)) => assert_eq!(grant.user.email, "a@b.com"),
            (false, Err(err)) => assert_eq!(err, LoginGatewayError::InvalidCredentials),
            (true, Err(err)) => panic!("expected success, got error: {err:?}"),
            (false, Ok(grant)) => panic!("expected failure, got success: {grant:?}"),
        }
    }
}
