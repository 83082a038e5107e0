//! Raw pass-through of inbound requests to the HR API.
//!
//! The caller's `Authorization` header travels unchanged and a `401` is
//! returned as-is; token refresh stays with the caller.

use reqwest::{Client, Method, Url};

use super::http_client::{map_transport_error, with_trailing_slash};
use crate::domain::ports::HrApiError;
use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Request to replay against the HR API.
#[derive(Debug, Clone, Default)]
pub struct ForwardRequest {
    /// HTTP method name, e.g. `GET`.
    pub method: String,
    /// Path below the API base, with an optional query string.
    pub path_and_query: String,
    /// Caller `Authorization` header value.
    pub authorization: Option<String>,
    /// Caller `Content-Type` header value.
    pub content_type: Option<String>,
    /// Raw request body.
    pub body: Vec<u8>,
}

/// Upstream answer relayed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardedResponse {
    /// Upstream status code.
    pub status: u16,
    /// Upstream `Content-Type`, when present.
    pub content_type: Option<String>,
    /// Raw upstream body.
    pub body: Vec<u8>,
}

/// Forwards arbitrary API calls below one base URL.
#[derive(Clone)]
pub struct UpstreamForwarder {
    client: Client,
    base: Url,
}

impl UpstreamForwarder {
    /// Build a forwarder over a shared client.
    pub fn new(client: Client, base: Url) -> Self {
        Self {
            client,
            base: with_trailing_slash(base),
        }
    }

    /// Join `path_and_query` onto the base, refusing anything that would
    /// leave it.
    ///
    /// Absolute URLs, backslashes, and `.`/`..` segments (percent-encoded or
    /// not) are rejected before joining; the joined URL must keep the base's
    /// origin and path prefix.
    fn resolve(&self, path_and_query: &str) -> Result<Url, HrApiError> {
        let tail = path_and_query.trim_start_matches('/');
        let path = tail.split(['?', '#']).next().unwrap_or_default();
        if Url::parse(path).is_ok()
            || path.contains('\\')
            || path.split('/').any(is_dot_segment)
        {
            return Err(escaping_path(path_and_query));
        }
        let url = self
            .base
            .join(tail)
            .map_err(|error| HrApiError::rejected(400_u16, format!("invalid path: {error}")))?;
        let same_origin = url.scheme() == self.base.scheme()
            && url.host_str() == self.base.host_str()
            && url.port_or_known_default() == self.base.port_or_known_default();
        if !same_origin || !url.path().starts_with(self.base.path()) {
            return Err(escaping_path(path_and_query));
        }
        Ok(url)
    }

    /// Replay `request` upstream and relay whatever comes back.
    ///
    /// # Errors
    ///
    /// Transport failures and malformed requests surface as [`HrApiError`];
    /// upstream error statuses do not.
    pub async fn forward(&self, request: ForwardRequest) -> Result<ForwardedResponse, HrApiError> {
        let method = Method::from_bytes(request.method.as_bytes()).map_err(|_| {
            HrApiError::rejected(405_u16, format!("unsupported method {}", request.method))
        })?;
        let url = self.resolve(&request.path_and_query)?;

        let mut outbound = self.client.request(method, url);
        if let Some(authorization) = request.authorization {
            outbound = outbound.header(reqwest::header::AUTHORIZATION, authorization);
        }
        if let Some(content_type) = request.content_type {
            outbound = outbound.header(reqwest::header::CONTENT_TYPE, content_type);
        }
        if let Some(trace_id) = TraceId::current() {
            outbound = outbound.header(TRACE_ID_HEADER, trace_id.to_string());
        }

        let response = outbound
            .body(request.body)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes().await.map_err(map_transport_error)?;
        Ok(ForwardedResponse {
            status,
            content_type,
            body: body.to_vec(),
        })
    }
}

fn is_dot_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}

fn escaping_path(path_and_query: &str) -> HrApiError {
    HrApiError::rejected(
        400_u16,
        format!("path {path_and_query} resolves outside the API base"),
    )
}
