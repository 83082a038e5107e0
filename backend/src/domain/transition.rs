//! Shared vocabulary of the status transition rules.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, Role};

/// An administrator's verdict on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Accept the request.
    Approve,
    /// Decline the request.
    Reject,
}

impl Decision {
    /// Verb used in messages and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a status transition.
///
/// Rules check authorization before the current status, so a caller without
/// the required role always sees [`TransitionError::Forbidden`] even when the
/// entity is already terminal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// The action is not allowed from the entity's current status.
    #[error("cannot {action} {entity} in status {from}")]
    InvalidTransition {
        /// Entity kind, for example `leave`.
        entity: &'static str,
        /// Current status of the entity.
        from: &'static str,
        /// Attempted action.
        action: String,
    },
    /// The caller lacks the role or relationship required for the action.
    #[error("{role} caller may not {action} this {entity}")]
    Forbidden {
        /// Entity kind, for example `mission`.
        entity: &'static str,
        /// Role of the caller.
        role: Role,
        /// Attempted action.
        action: String,
    },
}

impl TransitionError {
    pub(crate) fn invalid(entity: &'static str, from: &'static str, action: impl Into<String>) -> Self {
        Self::InvalidTransition {
            entity,
            from,
            action: action.into(),
        }
    }

    pub(crate) fn forbidden(entity: &'static str, role: Role, action: impl Into<String>) -> Self {
        Self::Forbidden {
            entity,
            role,
            action: action.into(),
        }
    }
}

impl From<TransitionError> for Error {
    fn from(value: TransitionError) -> Self {
        let message = value.to_string();
        match value {
            TransitionError::InvalidTransition { entity, from, action } => {
                Self::invalid_transition(message).with_details(json!({
                    "entity": entity,
                    "status": from,
                    "action": action,
                }))
            }
            TransitionError::Forbidden { entity, action, .. } => {
                Self::forbidden(message).with_details(json!({
                    "entity": entity,
                    "action": action,
                }))
            }
        }
    }
}
