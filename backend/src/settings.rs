//! Application settings loaded via OrthoConfig.
//!
//! Only the request timeout carries a loader default, which keeps the merged
//! layer an object when nothing is configured. The remaining values are
//! optional and their accessors fall back to defaults, so an empty
//! environment yields a working local setup. Environment variables use the
//! `MULTIVERSE_` prefix, e.g. `MULTIVERSE_API_BASE_URL`.

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::catalogue::{CatalogueBaseUrl, CatalogueBaseUrlError, DEFAULT_API_BASE_URL};
use crate::domain::listing::DEFAULT_DEBOUNCE;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_LOGIN_URL: &str = "http://127.0.0.1:8080/api/auth/login";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SESSION_STORE_DIR: &str = ".multiverse";

/// Errors raised when a configured value cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `api_base_url` is not a usable base URL.
    #[error(transparent)]
    ApiBaseUrl(#[from] CatalogueBaseUrlError),
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address {raw:?}: {source}")]
    BindAddr {
        /// Configured value.
        raw: String,
        /// Parser error.
        #[source]
        source: AddrParseError,
    },
    /// `login_url` is not a URL.
    #[error("invalid login url {raw:?}: {source}")]
    LoginUrl {
        /// Configured value.
        raw: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
}

/// Configuration shared by the server and the command-line browser.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MULTIVERSE")]
#[serde(default)]
pub struct AppSettings {
    /// Root of the upstream catalogue API.
    pub api_base_url: Option<String>,
    /// Per-request timeout for outbound HTTP calls, in seconds.
    #[ortho_config(default = 10)]
    pub request_timeout_secs: u64,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Quiet period before a listing change triggers a fetch, in milliseconds.
    pub debounce_ms: Option<u64>,
    /// Directory holding the persisted auth session.
    pub session_store_dir: Option<PathBuf>,
    /// Login endpoint used by clients of the mock login API.
    pub login_url: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base_url: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            bind_addr: None,
            debounce_ms: None,
            session_store_dir: None,
            login_url: None,
        }
    }
}

impl AppSettings {
    /// Validated upstream base URL.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ApiBaseUrl`] when the value is unusable.
    pub fn api_base_url(&self) -> Result<CatalogueBaseUrl, SettingsError> {
        let raw = self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL);
        Ok(CatalogueBaseUrl::parse(raw)?)
    }

    /// Outbound request timeout; zero is raised to one second.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Server bind address.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.trim()
            .parse()
            .map_err(|source| SettingsError::BindAddr {
                raw: raw.to_owned(),
                source,
            })
    }

    /// Listing debounce delay.
    pub fn debounce(&self) -> Duration {
        self.debounce_ms
            .map_or(DEFAULT_DEBOUNCE, Duration::from_millis)
    }

    /// Directory for the persisted auth session.
    pub fn session_store_dir(&self) -> PathBuf {
        self.session_store_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_STORE_DIR))
    }

    /// Mock login endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::LoginUrl`] when the value does not parse.
    pub fn login_url(&self) -> Result<Url, SettingsError> {
        let raw = self.login_url.as_deref().unwrap_or(DEFAULT_LOGIN_URL);
        Url::parse(raw.trim()).map_err(|source| SettingsError::LoginUrl {
            raw: raw.to_owned(),
            source,
        })
    }
}
