//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the wire shape of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The status change is not allowed from the current status.
    #[schema(rename = "invalid_transition")]
    InvalidTransition,
    /// No valid token.
    #[schema(rename = "unauthenticated")]
    Unauthenticated,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// Uploaded résumé is too large.
    #[schema(rename = "size_exceeded")]
    SizeExceeded,
    /// Uploaded résumé has an unaccepted media type.
    #[schema(rename = "unsupported_type")]
    UnsupportedType,
    /// The HR API could not be reached.
    #[schema(rename = "network_error")]
    NetworkError,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_transition")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "leave cannot approve from approved")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "6f1c2f55-4c0a-4f43-9f34-0e1c5b7a9d10")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Leave`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Leave)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct LeaveSchema {
    #[schema(example = 10)]
    id: u64,
    /// Requesting user.
    #[schema(example = 2)]
    user: u64,
    user_name: Option<String>,
    #[schema(value_type = String, format = Date, example = "2024-01-10")]
    start_date: String,
    #[schema(value_type = String, format = Date, example = "2024-01-12")]
    end_date: String,
    reason: String,
    /// One of `pending`, `approved`, `rejected`.
    #[schema(example = "approved")]
    status: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::Mission`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Mission)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MissionSchema {
    #[schema(example = 20)]
    id: u64,
    title: String,
    description: String,
    assigned_to: u64,
    assigned_to_name: Option<String>,
    supervisor: u64,
    supervisor_name: Option<String>,
    #[schema(value_type = String, format = Date, example = "2024-03-31")]
    deadline: String,
    completed: bool,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::Internship`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Internship)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct InternshipSchema {
    #[schema(example = 30)]
    id: u64,
    intern: u64,
    intern_name: Option<String>,
    supervisor: u64,
    supervisor_name: Option<String>,
    #[schema(value_type = String, format = Date)]
    start_date: String,
    #[schema(value_type = String, format = Date)]
    end_date: String,
    /// One of `pending`, `active`, `completed`, `terminated`.
    #[schema(example = "active")]
    status: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::JobApplication`].
#[derive(ToSchema)]
#[schema(as = crate::domain::JobApplication)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct JobApplicationSchema {
    #[schema(example = 40)]
    id: u64,
    user: Option<u64>,
    /// `employee` or `intern`.
    #[schema(example = "employee")]
    application_type: String,
    position: String,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    education: String,
    experience: String,
    motivation: String,
    /// Stored résumé location.
    cv_file: String,
    /// One of `pending`, `approved`, `rejected`.
    #[schema(example = "pending")]
    status: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}
