//! Verbatim pass-through for every `/api` call without a guarded handler.

use actix_web::http::StatusCode;
use actix_web::http::header::{AUTHORIZATION, CONTENT_TYPE};
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::debug;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::outbound::hr_api::ForwardRequest;

/// Largest request body relayed upstream, sized for résumé uploads.
pub const MAX_FORWARD_BODY_BYTES: usize = 8 * 1024 * 1024;

const API_PREFIX: &str = "/api/";

fn header(req: &HttpRequest, name: actix_web::http::header::HeaderName) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Path below `/api/` with the query string re-attached.
fn upstream_path(req: &HttpRequest) -> Result<String, Error> {
    let tail = req
        .path()
        .strip_prefix(API_PREFIX)
        .ok_or_else(|| Error::not_found(format!("no route for {}", req.path())))?;
    let query = req.query_string();
    Ok(if query.is_empty() {
        tail.to_owned()
    } else {
        format!("{tail}?{query}")
    })
}

/// Forward the request upstream and relay status, content type, and body.
///
/// Upstream error statuses are relayed unchanged; only transport failures
/// become a `502` with the JSON error body.
pub async fn forward(
    state: web::Data<HttpState>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    relay(&state, &req, body).await
}

/// Shared by [`forward`] and guarded handlers that pass the body through.
pub(crate) async fn relay(
    state: &HttpState,
    req: &HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let request = ForwardRequest {
        method: req.method().as_str().to_owned(),
        path_and_query: upstream_path(req)?,
        authorization: header(req, AUTHORIZATION),
        content_type: header(req, CONTENT_TYPE),
        body: body.to_vec(),
    };
    debug!(method = %request.method, path = %request.path_and_query, "forwarding");
    let response = state.forwarder.forward(request).await?;

    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_GATEWAY);
    let mut builder = HttpResponse::build(status);
    if let Some(content_type) = response.content_type {
        builder.insert_header((CONTENT_TYPE, content_type));
    }
    Ok(builder.body(response.body))
}
