//! Authentication outbound adapters.

mod http_login_gateway;

pub use http_login_gateway::HttpLoginGateway;
