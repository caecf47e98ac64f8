//! Driving port for the mock login endpoint.
//!
//! In hexagonal terms this is a *driving* port: the HTTP login handler calls
//! it to authenticate credentials without knowing how they are checked. This
//! keeps handler tests deterministic because they can substitute a double.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, LoginGrant, demo_grant};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the granted user and token.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<LoginGrant, Error>;
}

/// Demo authenticator: any email with the password `password`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<LoginGrant, Error> {
        demo_grant(credentials).ok_or_else(|| Error::unauthorized("invalid credentials"))
    }
}
