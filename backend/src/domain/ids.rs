//! Numeric identifiers assigned by the remote HR API.
//!
//! The remote API keys every entity by a positive integer. Each entity gets
//! its own newtype so a leave id can never be passed where a user id is
//! expected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation error raised when an identifier is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{kind} id must be a positive integer")]
pub struct InvalidId {
    kind: &'static str,
}

impl From<InvalidId> for crate::domain::Error {
    fn from(value: InvalidId) -> Self {
        Self::invalid_request(value.to_string())
            .with_details(serde_json::json!({ "field": "id" }))
    }
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "u64", into = "u64")]
        pub struct $name(u64);

        impl $name {
            /// Validate and construct the identifier.
            pub fn new(raw: u64) -> Result<Self, InvalidId> {
                if raw == 0 {
                    return Err(InvalidId { kind: $kind });
                }
                Ok(Self(raw))
            }

            /// Raw numeric value used in request paths.
            #[must_use]
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<u64> for $name {
            type Error = InvalidId;

            fn try_from(value: u64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for u64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_id!(
    /// Identifier of a user account.
    UserId,
    "user"
);
define_id!(
    /// Identifier of a leave request.
    LeaveId,
    "leave"
);
define_id!(
    /// Identifier of a mission.
    MissionId,
    "mission"
);
define_id!(
    /// Identifier of a work-hours entry.
    WorkHoursId,
    "work hours"
);
define_id!(
    /// Identifier of an internship.
    InternshipId,
    "internship"
);
define_id!(
    /// Identifier of a job application.
    JobApplicationId,
    "job application"
);
