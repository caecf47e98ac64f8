//! Behavioural tests for the client-side authentication gate backed by a
//! session directory.

use std::cell::RefCell;
use std::sync::Arc;

use multiverse::domain::ports::FixtureLoginGateway;
use multiverse::domain::{AUTH_STORAGE_KEY, AuthError, AuthGate, DEMO_PASSWORD, GuardDecision};
use multiverse::outbound::storage::DirSessionStore;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

struct AuthGateWorld {
    dir: RefCell<Option<TempDir>>,
    gate: RefCell<Option<AuthGate>>,
    login_error: RefCell<Option<AuthError>>,
}

impl AuthGateWorld {
    fn new() -> Self {
        Self {
            dir: RefCell::new(None),
            gate: RefCell::new(None),
            login_error: RefCell::new(None),
        }
    }

    fn use_dir(&self, dir: TempDir) {
        self.dir.replace(Some(dir));
    }

    /// Build a fresh gate over the session directory, as a new process would.
    fn start_gate(&self) {
        let dir = self.dir.borrow();
        let path = dir.as_ref().expect("session directory").path();
        let store = DirSessionStore::open(path).expect("open session store");
        let gate = AuthGate::new(Arc::new(FixtureLoginGateway), Arc::new(store));
        self.gate.replace(Some(gate));
    }

    fn with_gate<R>(&self, action: impl FnOnce(&AuthGate) -> R) -> R {
        let gate = self.gate.borrow();
        action(gate.as_ref().expect("gate started"))
    }

    fn ensure_rehydrated(&self) {
        if self.gate.borrow().is_none() {
            self.start_gate();
            self.with_gate(|gate| run_async(gate.rehydrate()));
        }
    }
}

#[fixture]
fn world() -> AuthGateWorld {
    AuthGateWorld::new()
}

fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::runtime::Runtime::new()
        .expect("runtime")
        .block_on(future)
}

#[given("an empty session directory")]
fn an_empty_session_directory(world: &AuthGateWorld) {
    world.use_dir(TempDir::new().expect("temp dir"));
}

#[given("a session directory holding a corrupt session")]
fn a_session_directory_holding_a_corrupt_session(world: &AuthGateWorld) {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(
        dir.path().join(format!("{AUTH_STORAGE_KEY}.json")),
        "{\"user\": ",
    )
    .expect("write corrupt session");
    world.use_dir(dir);
}

#[when("the gate starts")]
fn the_gate_starts(world: &AuthGateWorld) {
    world.start_gate();
}

#[when("the gate restarts and rehydrates")]
fn the_gate_restarts_and_rehydrates(world: &AuthGateWorld) {
    world.start_gate();
    world.with_gate(|gate| run_async(gate.rehydrate()));
}

#[when("the user logs in as {email}")]
fn the_user_logs_in_as(world: &AuthGateWorld, email: String) {
    world.ensure_rehydrated();
    world
        .with_gate(|gate| run_async(gate.login(&email, DEMO_PASSWORD)))
        .expect("demo login succeeds");
}

#[when("the user logs in with a wrong password")]
fn the_user_logs_in_with_a_wrong_password(world: &AuthGateWorld) {
    world.ensure_rehydrated();
    let result = world.with_gate(|gate| run_async(gate.login("rick@citadel.test", "wubba")));
    world.login_error.replace(result.err());
}

#[when("the user logs out")]
fn the_user_logs_out(world: &AuthGateWorld) {
    world.with_gate(|gate| run_async(gate.logout()));
}

#[then("the gate is authenticated as {email}")]
fn the_gate_is_authenticated_as(world: &AuthGateWorld, email: String) {
    world.with_gate(|gate| {
        assert!(gate.is_authenticated());
        assert_eq!(gate.user().map(|user| user.email), Some(email));
    });
}

#[then("the login fails with invalid credentials")]
fn the_login_fails_with_invalid_credentials(world: &AuthGateWorld) {
    assert_eq!(
        world.login_error.borrow().clone(),
        Some(AuthError::InvalidCredentials)
    );
}

#[then("navigation to {route} waits")]
fn navigation_waits(world: &AuthGateWorld, route: String) {
    world.with_gate(|gate| assert_eq!(gate.guard(&route), GuardDecision::Wait));
}

#[then("navigation to {route} renders")]
fn navigation_renders(world: &AuthGateWorld, route: String) {
    world.with_gate(|gate| assert_eq!(gate.guard(&route), GuardDecision::Render));
}

#[then("navigation to {route} redirects to login")]
fn navigation_redirects_to_login(world: &AuthGateWorld, route: String) {
    world.with_gate(|gate| assert_eq!(gate.guard(&route), GuardDecision::RedirectToLogin));
}

#[scenario(
    path = "tests/features/auth_gate.feature",
    name = "Protected routes wait until storage is read"
)]
fn protected_routes_wait(world: AuthGateWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/auth_gate.feature",
    name = "A login survives a restart"
)]
fn login_survives_restart(world: AuthGateWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/auth_gate.feature",
    name = "Logging out forgets the session"
)]
fn logout_forgets_session(world: AuthGateWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/auth_gate.feature",
    name = "A corrupt stored session is treated as anonymous"
)]
fn corrupt_session_is_anonymous(world: AuthGateWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/auth_gate.feature",
    name = "A wrong password keeps the user anonymous"
)]
fn wrong_password_keeps_anonymous(world: AuthGateWorld) {
    drop(world);
}
