//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! This module follows the hexagonal architecture pattern, providing concrete
//! implementations of domain port traits:
//!
//! - **rick_and_morty**: reqwest transport for the upstream catalogue
//! - **auth**: reqwest client for the mock login endpoint
//! - **storage**: `cap_std` directory-backed session storage
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod auth;
pub mod rick_and_morty;
pub mod storage;
