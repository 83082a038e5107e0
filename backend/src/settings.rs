//! Proxy configuration loaded via OrthoConfig.
//!
//! Values come from `HR_PROXY_*` environment variables, configuration files,
//! or command-line flags. Every field is optional and falls back to a
//! development default.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::hr_api::DEFAULT_USER_AGENT;

/// Upstream HR API used when none is configured.
pub const DEFAULT_UPSTREAM_URL: &str = "http://localhost:8000/api/";
/// Listen address used when none is configured.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
/// Outbound request timeout used when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The upstream URL did not parse or is not HTTP(S).
    #[error("upstream url {value} is invalid: {reason}")]
    InvalidUpstreamUrl { value: String, reason: String },
    /// The bind address did not parse.
    #[error("bind address {value} is invalid: {reason}")]
    InvalidBindAddr { value: String, reason: String },
    /// Timeouts must be positive.
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
}

/// Configuration values controlling the proxy server.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HR_PROXY")]
pub struct ProxySettings {
    /// Base URL of the remote HR API.
    pub upstream_url: Option<String>,
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Timeout applied to every outbound request, in seconds.
    pub request_timeout_secs: Option<u64>,
    /// User agent sent upstream.
    pub user_agent: Option<String>,
}

impl ProxySettings {
    /// Parsed upstream base URL.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidUpstreamUrl`] for unparseable or
    /// non-HTTP URLs.
    pub fn upstream_url(&self) -> Result<Url, SettingsError> {
        let raw = self.upstream_url.as_deref().unwrap_or(DEFAULT_UPSTREAM_URL);
        let invalid = |reason: String| SettingsError::InvalidUpstreamUrl {
            value: raw.to_owned(),
            reason,
        };
        let url = Url::parse(raw).map_err(|error| invalid(error.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", url.scheme())));
        }
        Ok(url)
    }

    /// Parsed listen address.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|error: std::net::AddrParseError| {
            SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                reason: error.to_string(),
            }
        })
    }

    /// Outbound request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ZeroTimeout`] for a zero timeout.
    pub fn request_timeout(&self) -> Result<Duration, SettingsError> {
        match self.request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS) {
            0 => Err(SettingsError::ZeroTimeout),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    /// User agent sent upstream.
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}
