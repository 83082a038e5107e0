//! Guarded job application creation.
//!
//! `POST /api/job-applications/` carries the résumé as the `cv_file` part of
//! a multipart body. The part's size and declared media type are checked
//! before anything reaches the HR API; accepted bodies are relayed byte for
//! byte through the pass-through proxy.

use actix_multipart::{Multipart, MultipartError};
use actix_web::error::PayloadError;
use actix_web::http::header::HeaderMap;
use actix_web::{HttpRequest, HttpResponse, post, web};
use futures_util::{StreamExt, stream};
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, check_resume};
use crate::inbound::http::ApiResult;
use crate::inbound::http::proxy::relay;
use crate::inbound::http::state::HttpState;

const RESUME_FIELD: &str = "cv_file";

/// What the multipart body says about the résumé.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResumePart {
    size: u64,
    media_type: String,
}

fn malformed(error: MultipartError) -> Error {
    Error::invalid_request(format!("malformed multipart body: {error}"))
}

/// Measure the `cv_file` part of a buffered multipart body.
async fn resume_part(headers: &HeaderMap, body: web::Bytes) -> Result<ResumePart, Error> {
    let chunks = stream::once(async move { Ok::<_, PayloadError>(body) });
    let mut multipart = Multipart::new(headers, chunks);
    while let Some(field) = multipart.next().await {
        let mut field = field.map_err(malformed)?;
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        let media_type = field
            .content_type()
            .map(ToString::to_string)
            .unwrap_or_default();
        let mut size = 0_u64;
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(malformed)?;
            size = size.saturating_add(u64::try_from(chunk.len()).unwrap_or(u64::MAX));
        }
        return Ok(ResumePart { size, media_type });
    }
    Err(Error::invalid_request("a résumé is required")
        .with_details(json!({ "field": RESUME_FIELD })))
}

/// Submit a job application with its résumé.
#[utoipa::path(
    post,
    path = "/api/job-applications/",
    request_body(
        content = String,
        content_type = "multipart/form-data",
        description = "Application fields plus the résumé as the `cv_file` part"
    ),
    responses(
        (status = 201, description = "Application created upstream", body = crate::inbound::http::schemas::JobApplicationSchema),
        (status = 400, description = "Malformed body or missing résumé", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 413, description = "Résumé larger than 5 MiB", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 415, description = "Résumé is not PDF or Word", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 502, description = "HR API unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    security(()),
    tags = ["job-applications"],
    operation_id = "createJobApplication"
)]
#[post("/job-applications/")]
pub async fn create_job_application(
    state: web::Data<HttpState>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let resume = resume_part(req.headers(), body.clone()).await?;
    check_resume(resume.size, &resume.media_type).map_err(Error::from)?;
    debug!(size = resume.size, media_type = %resume.media_type, "résumé accepted");
    relay(&state, &req, body).await
}
