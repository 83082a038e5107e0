//! Validation shared by the creation drafts.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde_json::json;

use crate::domain::{Error, ResumeValidationError, Role};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex")
});

/// Reasons a creation draft is rejected before it reaches the remote API.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DraftError {
    /// A required text field was blank.
    #[error("{field} must not be empty")]
    Empty {
        /// Offending field.
        field: &'static str,
    },
    /// A text field was shorter than its minimum once trimmed.
    #[error("{field} must be at least {min} characters")]
    TooShort {
        /// Offending field.
        field: &'static str,
        /// Minimum number of characters.
        min: usize,
    },
    /// The end date falls before the start date.
    #[error("end date {end} must not be before start date {start}")]
    EndBeforeStart {
        /// First day of the range.
        start: NaiveDate,
        /// Last day of the range.
        end: NaiveDate,
    },
    /// The end date does not fall strictly after the start date.
    #[error("end date {end} must be after start date {start}")]
    EndNotAfterStart {
        /// First day of the range.
        start: NaiveDate,
        /// Last day of the range.
        end: NaiveDate,
    },
    /// An e-mail address failed the syntax check.
    #[error("email {value} is not a valid address")]
    InvalidEmail {
        /// Rejected address.
        value: String,
    },
    /// Logged hours fall outside the accepted range.
    #[error("hours worked must be between {min} and {max}, got {value}")]
    HoursOutOfRange {
        /// Rejected value.
        value: f64,
        /// Lower bound, inclusive.
        min: f64,
        /// Upper bound, inclusive.
        max: f64,
    },
    /// Two user references that must differ were equal.
    #[error("{first} and {second} must be different users")]
    SameUser {
        /// First field.
        first: &'static str,
        /// Second field.
        second: &'static str,
    },
    /// Access was requested for a role that is only granted by an
    /// administrator.
    #[error("{role} accounts cannot be requested")]
    UnrequestableRole {
        /// Requested role.
        role: Role,
    },
    /// The attached résumé failed validation.
    #[error(transparent)]
    Resume(#[from] ResumeValidationError),
}

impl DraftError {
    fn field(&self) -> Option<&'static str> {
        match self {
            Self::Empty { field } | Self::TooShort { field, .. } => Some(*field),
            Self::EndBeforeStart { .. } | Self::EndNotAfterStart { .. } => Some("end_date"),
            Self::InvalidEmail { .. } => Some("email"),
            Self::HoursOutOfRange { .. } => Some("hours_worked"),
            Self::SameUser { second, .. } => Some(*second),
            Self::UnrequestableRole { .. } => Some("user_type"),
            Self::Resume(_) => Some("cv_file"),
        }
    }
}

impl From<DraftError> for Error {
    fn from(value: DraftError) -> Self {
        let field = value.field();
        let error = match value {
            DraftError::Resume(inner) => return inner.into(),
            other => Self::invalid_request(other.to_string()),
        };
        match field {
            Some(field) => error.with_details(json!({ "field": field })),
            None => error,
        }
    }
}

pub(crate) fn require_non_empty(field: &'static str, value: &str) -> Result<(), DraftError> {
    if value.trim().is_empty() {
        return Err(DraftError::Empty { field });
    }
    Ok(())
}

pub(crate) fn require_min_chars(
    field: &'static str,
    value: &str,
    min: usize,
) -> Result<(), DraftError> {
    if value.trim().chars().count() < min {
        return Err(DraftError::TooShort { field, min });
    }
    Ok(())
}

pub(crate) fn require_email(value: &str) -> Result<(), DraftError> {
    if !EMAIL.is_match(value.trim()) {
        return Err(DraftError::InvalidEmail {
            value: value.to_owned(),
        });
    }
    Ok(())
}
