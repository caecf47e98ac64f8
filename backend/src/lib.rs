//! Rick and Morty catalogue backend.
//!
//! The domain layer models the upstream catalogue, the listing and detail
//! views built on it and a mock authentication gate. Inbound adapters expose
//! these over HTTP; outbound adapters talk to the upstream API, the login
//! endpoint and the local session store.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
