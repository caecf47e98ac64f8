//! Authentication primitives: login credentials and the demo grant.
//!
//! Authentication is a mock. Any non-blank email paired with the password
//! [`DEMO_PASSWORD`] is accepted and receives a fixed user and token; nothing
//! is verified against a credential store.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// The only password the demo login accepts.
pub const DEMO_PASSWORD: &str = "password";
/// Token issued to every successful demo login.
pub const DEMO_TOKEN: &str = "demo-token";
const DEMO_USER_ID: &str = "1";
const DEMO_USER_NAME: &str = "Demo User";

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was empty.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` must be non-empty but keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use multiverse::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" a@b.com ", "password").unwrap();
/// assert_eq!(creds.email(), "a@b.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    ///
    /// Whitespace-only emails are rejected here rather than forwarded, so
    /// `"   "` never reaches a login gateway.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used as the login identity.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Identity of the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Opaque user identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email the user logged in with.
    pub email: String,
}

/// User and token returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginGrant {
    /// Logged-in user.
    pub user: AuthUser,
    /// Bearer token; any non-empty value counts as proof of login.
    pub token: String,
}

/// Apply the demo credential check.
///
/// Returns `None` when the password is not [`DEMO_PASSWORD`].
#[must_use]
pub fn demo_grant(credentials: &LoginCredentials) -> Option<LoginGrant> {
    (credentials.password() == DEMO_PASSWORD).then(|| LoginGrant {
        user: AuthUser {
            id: DEMO_USER_ID.to_owned(),
            name: DEMO_USER_NAME.to_owned(),
            email: credentials.email().to_owned(),
        },
        token: DEMO_TOKEN.to_owned(),
    })
}
