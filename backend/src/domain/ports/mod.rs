//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod catalogue_transport;
mod login_gateway;
mod login_service;
mod session_store;

#[cfg(test)]
pub use catalogue_transport::MockCatalogueTransport;
pub use catalogue_transport::{CatalogueTransport, CatalogueTransportError, TransportResponse};
#[cfg(test)]
pub use login_gateway::MockLoginGateway;
pub use login_gateway::{FixtureLoginGateway, LoginGateway, LoginGatewayError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use session_store::MockSessionStore;
pub use session_store::{InMemorySessionStore, SessionStore, SessionStoreError};
