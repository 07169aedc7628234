//! Session state for a Kast backend.

use std::collections::BTreeSet;

use crate::api::ApiClient;
use crate::error::{KastError, Result};

/// Environment variable consulted by [`Config::from_env`].
pub const BACKEND_HOST_ENV: &str = "KAST_BACKEND_HOST";

/// Backend connection configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend host, e.g. `https://files.example.com`.
    pub base_url: String,
    /// Optional HTTP/SOCKS proxy URL.
    pub proxy: Option<String>,
}

impl Config {
    /// Configuration for the given backend host.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            proxy: None,
        }
    }

    /// Route requests through a proxy.
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Read the backend host from `KAST_BACKEND_HOST`.
    pub fn from_env() -> Result<Self> {
        match std::env::var(BACKEND_HOST_ENV) {
            Ok(host) if !host.is_empty() => Ok(Self::new(host)),
            _ => Err(KastError::Custom(format!(
                "{} is not set",
                BACKEND_HOST_ENV
            ))),
        }
    }

    pub(crate) fn build_api(&self) -> Result<ApiClient> {
        match &self.proxy {
            Some(proxy) => ApiClient::with_proxy(&self.base_url, proxy),
            None => ApiClient::new(&self.base_url),
        }
    }
}

/// Account flags reported by `/check-auth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthStatus {
    pub authenticated: bool,
    pub is_admin: bool,
}

/// Application session for one Kast backend.
///
/// This is the explicit context object every operation hangs off: the
/// cookie-credentialed API client, the account flags from `/check-auth`,
/// and the per-session group catalog cache. Created by
/// [`Session::login`] or [`Session::connect`]; torn down by
/// [`Session::logout`].
pub struct Session {
    pub(crate) api: ApiClient,
    pub(crate) status: AuthStatus,
    pub(crate) group_catalog: Option<BTreeSet<String>>,
}

impl Session {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self {
            api,
            status: AuthStatus::default(),
            group_catalog: None,
        }
    }

    /// The configured backend host.
    pub fn base_url(&self) -> &str {
        self.api.base_url()
    }

    /// Account flags from the last `/check-auth`.
    pub fn auth_status(&self) -> AuthStatus {
        self.status
    }

    pub fn is_authenticated(&self) -> bool {
        self.status.authenticated
    }

    pub fn is_admin(&self) -> bool {
        self.status.is_admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = Config::new("http://localhost:3001").with_proxy("http://127.0.0.1:8080");
        assert_eq!(config.base_url, "http://localhost:3001");
        assert_eq!(config.proxy.as_deref(), Some("http://127.0.0.1:8080"));
    }

    #[test]
    fn test_fresh_session_is_unauthenticated() {
        let session = Session::new(ApiClient::new("http://localhost:3001").expect("client"));
        assert!(!session.is_authenticated());
        assert!(!session.is_admin());
        assert_eq!(session.base_url(), "http://localhost:3001");
    }
}
