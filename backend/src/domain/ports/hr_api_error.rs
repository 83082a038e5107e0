//! Errors shared by every remote HR API port.

use serde_json::json;

use crate::domain::Error;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while calling the remote HR API.
    pub enum HrApiError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "HR API transport failed: {message}",
        /// The request exceeded the configured timeout.
        Timeout { message: String } =>
            "HR API request timed out: {message}",
        /// No valid token, and refreshing did not help.
        Unauthenticated { message: String } =>
            "HR API rejected credentials: {message}",
        /// The remote API refused the caller.
        Forbidden { message: String } =>
            "HR API denied access: {message}",
        /// The entity does not exist.
        NotFound { message: String } =>
            "HR API resource not found: {message}",
        /// The remote API refused the request content.
        Rejected { status: u16, message: String } =>
            "HR API rejected request with status {status}: {message}",
        /// The remote API failed unexpectedly.
        Upstream { status: u16, message: String } =>
            "HR API failed with status {status}: {message}",
        /// A response body could not be decoded.
        Decode { message: String } =>
            "HR API response could not be decoded: {message}",
    }
}

impl From<HrApiError> for Error {
    fn from(value: HrApiError) -> Self {
        let message = value.to_string();
        match value {
            HrApiError::Transport { .. } | HrApiError::Timeout { .. } => Self::network(message),
            HrApiError::Unauthenticated { .. } => Self::unauthenticated(message),
            HrApiError::Forbidden { .. } => Self::forbidden(message),
            HrApiError::NotFound { .. } => Self::not_found(message),
            HrApiError::Rejected { status, .. } => {
                Self::invalid_request(message).with_details(json!({ "upstreamStatus": status }))
            }
            HrApiError::Upstream { status, .. } => {
                Self::network(message).with_details(json!({ "upstreamStatus": status }))
            }
            HrApiError::Decode { .. } => Self::internal(message),
        }
    }
}
