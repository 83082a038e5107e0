//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use hr_backend::settings::{ProxySettings, SettingsError};
use url::Url;

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) upstream: Url,
    pub(crate) request_timeout: Duration,
    pub(crate) user_agent: String,
}

impl ServerConfig {
    /// Construct a server configuration from explicit values.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, upstream: Url, request_timeout: Duration) -> Self {
        Self {
            bind_addr,
            upstream,
            request_timeout,
            user_agent: hr_backend::outbound::hr_api::DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Validate loaded settings into a server configuration.
    ///
    /// # Errors
    /// Returns [`SettingsError`] when any configured value is invalid.
    pub fn from_settings(settings: &ProxySettings) -> Result<Self, SettingsError> {
        Ok(Self::new(
            settings.bind_addr()?,
            settings.upstream_url()?,
            settings.request_timeout()?,
        )
        .with_user_agent(settings.user_agent()))
    }

    /// Override the user agent sent upstream.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
