//! Durable storage adapters.

mod dir_session_store;

pub use dir_session_store::DirSessionStore;
