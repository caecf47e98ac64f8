//! Client-side authentication state and route guard.
//!
//! The gate starts in [`AuthState::Rehydrating`] and answers
//! [`GuardDecision::Wait`] for protected routes until [`AuthGate::rehydrate`]
//! has read the persisted session. The stored session is trusted as-is; it is
//! never re-validated against a server.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::ports::{LoginGateway, LoginGatewayError, SessionStore};
use super::{AuthUser, LoginCredentials, LoginGrant};

/// Durable-storage key holding the serialised session.
pub const AUTH_STORAGE_KEY: &str = "auth-storage";
/// Route prefix that is always rendered.
pub const LOGIN_ROUTE: &str = "/login";

/// Persisted session record.
///
/// The JSON shape is `{ user, token, isAuthenticated }` with `user` and
/// `token` nullable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    /// Logged-in user, if any.
    pub user: Option<AuthUser>,
    /// Bearer token, if any.
    pub token: Option<String>,
    /// Authentication flag as stored.
    pub is_authenticated: bool,
}

impl AuthSession {
    /// Session for a successful login.
    #[must_use]
    pub fn from_grant(grant: LoginGrant) -> Self {
        Self {
            user: Some(grant.user),
            token: Some(grant.token),
            is_authenticated: true,
        }
    }

    /// Whether the record proves a login: flag set, non-empty token, user present.
    ///
    /// A non-empty token alone is deliberately not enough: records missing
    /// the user or the flag are treated as anonymous, even with a token.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_authenticated
            && self.user.is_some()
            && self.token.as_deref().is_some_and(|token| !token.is_empty())
    }
}

/// Observable authentication state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// Persisted session not yet read.
    Rehydrating,
    /// No valid session.
    Anonymous,
    /// A valid session is active.
    Authenticated(AuthSession),
}

/// Route guard answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render nothing yet.
    Wait,
    /// Render the route.
    Render,
    /// Send the user to the login route.
    RedirectToLogin,
}

/// Errors surfaced by [`AuthGate::login`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Email or password was blank; nothing was sent.
    #[error("email and password are required")]
    MissingCredentials,
    /// The password was wrong.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// Anything else went wrong.
    #[error("login failed, please try again")]
    Unavailable,
}

impl From<LoginGatewayError> for AuthError {
    fn from(value: LoginGatewayError) -> Self {
        match value {
            LoginGatewayError::MissingCredentials => Self::MissingCredentials,
            LoginGatewayError::InvalidCredentials => Self::InvalidCredentials,
            LoginGatewayError::Unavailable { .. } => Self::Unavailable,
        }
    }
}

/// Owner of the authentication state.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use multiverse::domain::ports::{FixtureLoginGateway, InMemorySessionStore};
/// use multiverse::domain::{AuthGate, GuardDecision};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let gate = AuthGate::new(
///     Arc::new(FixtureLoginGateway),
///     Arc::new(InMemorySessionStore::default()),
/// );
/// assert_eq!(gate.guard("/characters"), GuardDecision::Wait);
/// gate.rehydrate().await;
/// assert_eq!(gate.guard("/characters"), GuardDecision::RedirectToLogin);
/// gate.login("a@b.com", "password").await.unwrap();
/// assert_eq!(gate.guard("/characters"), GuardDecision::Render);
/// # });
/// ```
pub struct AuthGate {
    gateway: Arc<dyn LoginGateway>,
    store: Arc<dyn SessionStore>,
    state: RwLock<AuthState>,
}

impl AuthGate {
    /// Create a gate in the rehydrating state.
    pub fn new(gateway: Arc<dyn LoginGateway>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            gateway,
            store,
            state: RwLock::new(AuthState::Rehydrating),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> AuthState {
        match self.state.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn set_state(&self, next: AuthState) {
        match self.state.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }

    /// Whether a valid session is active.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.state(), AuthState::Authenticated(_))
    }

    /// The logged-in user, if any.
    pub fn user(&self) -> Option<AuthUser> {
        match self.state() {
            AuthState::Authenticated(session) => session.user,
            AuthState::Rehydrating | AuthState::Anonymous => None,
        }
    }

    /// Restore the persisted session.
    ///
    /// Only leaves [`AuthState::Rehydrating`]; a login or logout that already
    /// happened wins over whatever storage holds.
    pub async fn rehydrate(&self) {
        let restored = match self.store.load(AUTH_STORAGE_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<AuthSession>(&raw) {
                Ok(session) if session.is_valid() => AuthState::Authenticated(session),
                Ok(_) => AuthState::Anonymous,
                Err(err) => {
                    warn!(error = %err, "stored auth session is unreadable");
                    AuthState::Anonymous
                }
            },
            Ok(None) => AuthState::Anonymous,
            Err(err) => {
                warn!(error = %err, "failed to read auth session storage");
                AuthState::Anonymous
            }
        };

        let mut guard = match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if *guard == AuthState::Rehydrating {
            debug!(authenticated = matches!(restored, AuthState::Authenticated(_)), "auth rehydrated");
            *guard = restored;
        }
    }

    /// Exchange credentials for a session and persist it.
    ///
    /// Blank inputs fail with [`AuthError::MissingCredentials`] without
    /// contacting the gateway. A failed login leaves the state unchanged.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let credentials = LoginCredentials::try_from_parts(email, password)
            .map_err(|_| AuthError::MissingCredentials)?;

        let grant = self.gateway.login(&credentials).await.map_err(|err| {
            warn!(error = %err, "login rejected");
            AuthError::from(err)
        })?;

        let user = grant.user.clone();
        let session = AuthSession::from_grant(grant);
        self.persist(&session).await;
        self.set_state(AuthState::Authenticated(session));
        info!(user_id = %user.id, "logged in");
        Ok(user)
    }

    async fn persist(&self, session: &AuthSession) {
        let raw = match serde_json::to_string(session) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "failed to serialise auth session");
                return;
            }
        };
        if let Err(err) = self.store.save(AUTH_STORAGE_KEY, &raw).await {
            warn!(error = %err, "failed to persist auth session");
        }
    }

    /// Drop the session from memory and storage.
    pub async fn logout(&self) {
        self.set_state(AuthState::Anonymous);
        if let Err(err) = self.store.remove(AUTH_STORAGE_KEY).await {
            warn!(error = %err, "failed to clear auth session storage");
        }
        info!("logged out");
    }

    /// Decide how to treat navigation to `route`.
    pub fn guard(&self, route: &str) -> GuardDecision {
        if route.starts_with(LOGIN_ROUTE) {
            return GuardDecision::Render;
        }
        match self.state() {
            AuthState::Rehydrating => GuardDecision::Wait,
            AuthState::Anonymous => GuardDecision::RedirectToLogin,
            AuthState::Authenticated(_) => GuardDecision::Render,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{
        FixtureLoginGateway, InMemorySessionStore, MockLoginGateway, MockSessionStore,
        SessionStoreError,
    };
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> Arc<InMemorySessionStore> {
        Arc::new(InMemorySessionStore::default())
    }

    fn gate_with(store: Arc<InMemorySessionStore>) -> AuthGate {
        AuthGate::new(Arc::new(FixtureLoginGateway), store)
    }

    fn stored_session(token: &str, flag: bool) -> String {
        serde_json::json!({
            "user": { "id": "1", "name": "Demo User", "email": "a@b.com" },
            "token": token,
            "isAuthenticated": flag,
        })
        .to_string()
    }

    #[rstest]
    #[case("/login", GuardDecision::Render)]
    #[case("/login?next=/episodes", GuardDecision::Render)]
    #[case("/characters", GuardDecision::Wait)]
    #[case("/", GuardDecision::Wait)]
    fn guard_waits_while_rehydrating(
        store: Arc<InMemorySessionStore>,
        #[case] route: &str,
        #[case] expected: GuardDecision,
    ) {
        let gate = gate_with(store);
        assert_eq!(gate.guard(route), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn empty_storage_rehydrates_as_anonymous(store: Arc<InMemorySessionStore>) {
        let gate = gate_with(store);
        gate.rehydrate().await;
        assert_eq!(gate.state(), AuthState::Anonymous);
        assert_eq!(gate.guard("/episodes"), GuardDecision::RedirectToLogin);
        assert_eq!(gate.guard("/login"), GuardDecision::Render);
    }

    #[rstest]
    #[case(stored_session("demo-token", true), true)]
    #[case(stored_session("", true), false)]
    #[case(stored_session("demo-token", false), false)]
    #[case(serde_json::json!({ "token": "demo-token", "isAuthenticated": true }).to_string(), false)]
    #[case("not json".to_owned(), false)]
    #[tokio::test]
    async fn rehydrate_trusts_only_valid_sessions(
        store: Arc<InMemorySessionStore>,
        #[case] raw: String,
        #[case] authenticated: bool,
    ) {
        store.save(AUTH_STORAGE_KEY, &raw).await.expect("seed");
        let gate = gate_with(store);
        gate.rehydrate().await;
        assert_eq!(gate.is_authenticated(), authenticated);
    }

    #[rstest]
    #[tokio::test]
    async fn unreadable_storage_rehydrates_as_anonymous() {
        let mut store = MockSessionStore::new();
        store
            .expect_load()
            .returning(|_| Err(SessionStoreError::io("disk gone")));
        let gate = AuthGate::new(Arc::new(FixtureLoginGateway), Arc::new(store));
        gate.rehydrate().await;
        assert_eq!(gate.state(), AuthState::Anonymous);
    }

    #[rstest]
    #[tokio::test]
    async fn login_persists_session(store: Arc<InMemorySessionStore>) {
        let gate = gate_with(store.clone());
        gate.rehydrate().await;

        let user = gate.login("a@b.com", "password").await.expect("login");
        assert_eq!(user.email, "a@b.com");
        assert!(gate.is_authenticated());

        let raw = store
            .load(AUTH_STORAGE_KEY)
            .await
            .expect("load")
            .expect("persisted");
        let session: AuthSession = serde_json::from_str(&raw).expect("decode");
        assert!(session.is_valid());
        assert_eq!(session.token.as_deref(), Some("demo-token"));
    }

    #[rstest]
    #[tokio::test]
    async fn wrong_password_stays_anonymous(store: Arc<InMemorySessionStore>) {
        let gate = gate_with(store.clone());
        gate.rehydrate().await;

        let err = gate.login("a@b.com", "nope").await.expect_err("must fail");
        assert_eq!(err, AuthError::InvalidCredentials);
        assert_eq!(gate.state(), AuthState::Anonymous);
        assert_eq!(store.load(AUTH_STORAGE_KEY).await.expect("load"), None);
    }

    #[rstest]
    #[case("", "password")]
    #[case("   ", "password")]
    #[case("a@b.com", "")]
    #[tokio::test]
    async fn blank_inputs_never_reach_gateway(#[case] email: &str, #[case] password: &str) {
        let mut gateway = MockLoginGateway::new();
        gateway.expect_login().times(0);
        let gate = AuthGate::new(Arc::new(gateway), Arc::new(InMemorySessionStore::default()));

        let err = gate.login(email, password).await.expect_err("must fail");
        assert_eq!(err, AuthError::MissingCredentials);
    }

    #[rstest]
    #[tokio::test]
    async fn gateway_outage_is_generic() {
        let mut gateway = MockLoginGateway::new();
        gateway
            .expect_login()
            .returning(|_| Err(LoginGatewayError::unavailable("connection refused")));
        let gate = AuthGate::new(Arc::new(gateway), Arc::new(InMemorySessionStore::default()));

        let err = gate.login("a@b.com", "password").await.expect_err("must fail");
        assert_eq!(err, AuthError::Unavailable);
    }

    #[rstest]
    #[tokio::test]
    async fn failed_persist_keeps_memory_session() {
        let mut store = MockSessionStore::new();
        store
            .expect_save()
            .returning(|_, _| Err(SessionStoreError::io("read-only")));
        let gate = AuthGate::new(Arc::new(FixtureLoginGateway), Arc::new(store));

        gate.login("a@b.com", "password").await.expect("login");
        assert!(gate.is_authenticated());
    }

    #[rstest]
    #[tokio::test]
    async fn logout_clears_memory_and_storage(store: Arc<InMemorySessionStore>) {
        let gate = gate_with(store.clone());
        gate.rehydrate().await;
        gate.login("a@b.com", "password").await.expect("login");

        gate.logout().await;
        assert_eq!(gate.state(), AuthState::Anonymous);
        assert_eq!(gate.user(), None);
        assert_eq!(store.load(AUTH_STORAGE_KEY).await.expect("load"), None);
    }

    #[rstest]
    #[tokio::test]
    async fn late_rehydrate_does_not_override_login(store: Arc<InMemorySessionStore>) {
        let gate = gate_with(store.clone());
        gate.login("a@b.com", "password").await.expect("login");
        store.remove(AUTH_STORAGE_KEY).await.expect("clear");

        gate.rehydrate().await;
        assert!(gate.is_authenticated());
    }
}
