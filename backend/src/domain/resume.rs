//! Résumé artifact attached to job applications.
//!
//! Checks run at submission time only. The size check always runs first, so
//! an oversized artifact is reported as [`ResumeValidationError::SizeExceeded`]
//! whatever its declared media type.

use std::fmt;

use serde_json::json;

use crate::domain::Error;

/// Largest accepted résumé, in bytes (5 MiB).
pub const MAX_RESUME_BYTES: u64 = 5 * 1024 * 1024;

/// Media types accepted for résumés: PDF, legacy Word, and Word OOXML.
pub const ACCEPTED_RESUME_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Reasons a résumé is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResumeValidationError {
    /// The artifact is larger than [`MAX_RESUME_BYTES`].
    #[error("résumé is {size} bytes, the limit is {limit} bytes")]
    SizeExceeded {
        /// Artifact size in bytes.
        size: u64,
        /// Accepted maximum in bytes.
        limit: u64,
    },
    /// The declared media type is not accepted.
    #[error("résumé media type {media_type} is not accepted")]
    UnsupportedType {
        /// Declared media type as supplied.
        media_type: String,
    },
}

impl From<ResumeValidationError> for Error {
    fn from(value: ResumeValidationError) -> Self {
        let message = value.to_string();
        match value {
            ResumeValidationError::SizeExceeded { size, limit } => {
                Self::size_exceeded(message).with_details(json!({ "size": size, "limit": limit }))
            }
            ResumeValidationError::UnsupportedType { media_type } => {
                Self::unsupported_type(message).with_details(json!({
                    "mediaType": media_type,
                    "accepted": ACCEPTED_RESUME_TYPES,
                }))
            }
        }
    }
}

/// Check a résumé's size and declared media type.
///
/// Media type parameters (`; charset=...`) and letter case are ignored.
///
/// # Examples
/// ```
/// use hr_backend::domain::{ResumeValidationError, check_resume};
///
/// assert!(check_resume(1024, "application/pdf").is_ok());
/// assert!(matches!(
///     check_resume(6 * 1024 * 1024, "text/plain"),
///     Err(ResumeValidationError::SizeExceeded { .. })
/// ));
/// ```
pub fn check_resume(size: u64, media_type: &str) -> Result<(), ResumeValidationError> {
    if size > MAX_RESUME_BYTES {
        return Err(ResumeValidationError::SizeExceeded {
            size,
            limit: MAX_RESUME_BYTES,
        });
    }
    let essence = media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if !ACCEPTED_RESUME_TYPES.contains(&essence.as_str()) {
        return Err(ResumeValidationError::UnsupportedType {
            media_type: media_type.to_owned(),
        });
    }
    Ok(())
}

/// Uploaded résumé bytes plus the metadata sent alongside them.
#[derive(Clone, PartialEq, Eq)]
pub struct ResumeArtifact {
    file_name: String,
    media_type: String,
    content: Vec<u8>,
}

impl ResumeArtifact {
    /// Wrap an uploaded file. Nothing is checked until [`Self::validate`].
    pub fn new(file_name: impl Into<String>, media_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            content,
        }
    }

    /// Original file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Declared media type.
    #[must_use]
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Raw file content.
    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        u64::try_from(self.content.len()).unwrap_or(u64::MAX)
    }

    /// Run the submission-time checks.
    pub fn validate(&self) -> Result<(), ResumeValidationError> {
        check_resume(self.size(), &self.media_type)
    }

    pub(crate) fn into_parts(self) -> (String, String, Vec<u8>) {
        (self.file_name, self.media_type, self.content)
    }
}

impl fmt::Debug for ResumeArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResumeArtifact")
            .field("file_name", &self.file_name)
            .field("media_type", &self.media_type)
            .field("size", &self.content.len())
            .finish()
    }
}
