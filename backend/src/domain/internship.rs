//! Internships and their status table.
//!
//! | From | Allowed to |
//! |---|---|
//! | pending | active, terminated |
//! | active | completed, terminated |
//! | completed | none |
//! | terminated | none |

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::draft::DraftError;
use crate::domain::{Actor, InternshipId, TransitionError, UserId};

const ENTITY: &str = "internship";

/// Lifecycle state of an internship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InternshipStatus {
    /// Agreed but not started.
    Pending,
    /// In progress.
    Active,
    /// Finished normally; terminal.
    Completed,
    /// Ended early; terminal.
    Terminated,
}

impl InternshipStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [Self::Pending, Self::Active, Self::Completed, Self::Terminated];

    /// Wire representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Terminated => "terminated",
        }
    }

    /// Statuses reachable from `self` in one step.
    #[must_use]
    pub fn allowed_targets(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Active, Self::Terminated],
            Self::Active => &[Self::Completed, Self::Terminated],
            Self::Completed | Self::Terminated => &[],
        }
    }

    /// Whether `target` is reachable from `self` in one step.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        self.allowed_targets().contains(&target)
    }

    /// Whether no further transition is possible.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self.allowed_targets().is_empty()
    }
}

impl fmt::Display for InternshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown internship status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown internship status: {0}")]
pub struct UnknownInternshipStatus(String);

impl FromStr for InternshipStatus {
    type Err = UnknownInternshipStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownInternshipStatus(s.to_owned()))
    }
}

/// A supervised, time-boxed assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Internship {
    id: InternshipId,
    intern: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    intern_name: Option<String>,
    supervisor: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    supervisor_name: Option<String>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: InternshipStatus,
    created_at: DateTime<Utc>,
}

impl Internship {
    /// Build a freshly created, pending internship.
    pub fn pending(
        id: InternshipId,
        intern: UserId,
        supervisor: UserId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            intern,
            intern_name: None,
            supervisor,
            supervisor_name: None,
            start_date,
            end_date,
            status: InternshipStatus::Pending,
            created_at,
        }
    }

    /// Remote identifier.
    #[must_use]
    pub fn id(&self) -> InternshipId {
        self.id
    }

    /// The intern.
    #[must_use]
    pub fn intern(&self) -> UserId {
        self.intern
    }

    /// Intern's username, when provided.
    #[must_use]
    pub fn intern_name(&self) -> Option<&str> {
        self.intern_name.as_deref()
    }

    /// Supervisor.
    #[must_use]
    pub fn supervisor(&self) -> UserId {
        self.supervisor
    }

    /// Supervisor's username, when provided.
    #[must_use]
    pub fn supervisor_name(&self) -> Option<&str> {
        self.supervisor_name.as_deref()
    }

    /// First day.
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day.
    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> InternshipStatus {
        self.status
    }

    /// Creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Check that `actor` may edit the internship.
    ///
    /// Only administrators edit, and only before the internship ends.
    pub fn check_edit(&self, actor: Actor) -> Result<(), TransitionError> {
        if !actor.is_admin() {
            return Err(TransitionError::forbidden(ENTITY, actor.role(), "edit"));
        }
        if self.status.is_terminal() {
            return Err(TransitionError::invalid(ENTITY, self.status.as_str(), "edit"));
        }
        Ok(())
    }

    /// Move the internship to `target`.
    ///
    /// Allowed for an administrator or the internship's supervisor.
    pub fn change_status(
        &self,
        actor: Actor,
        target: InternshipStatus,
    ) -> Result<Self, TransitionError> {
        let action = format!("move to {target}");
        if !actor.is_admin() && actor.id() != self.supervisor {
            return Err(TransitionError::forbidden(ENTITY, actor.role(), action));
        }
        if !self.status.can_transition_to(target) {
            return Err(TransitionError::invalid(ENTITY, self.status.as_str(), action));
        }
        let mut internship = self.clone();
        internship.status = target;
        Ok(internship)
    }
}

/// Partial edit of an internship, sent as `PATCH internships/{id}/`.
///
/// Status is not editable here; use [`Internship::change_status`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternshipUpdate {
    /// New intern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intern: Option<UserId>,
    /// New supervisor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor: Option<UserId>,
    /// New first day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// New last day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl InternshipUpdate {
    /// Check the edit merged with the internship it applies to.
    pub fn validate_for(&self, internship: &Internship) -> Result<(), DraftError> {
        NewInternship {
            intern: self.intern.unwrap_or(internship.intern),
            supervisor: self.supervisor.unwrap_or(internship.supervisor),
            start_date: self.start_date.unwrap_or(internship.start_date),
            end_date: self.end_date.unwrap_or(internship.end_date),
        }
        .validate()
    }
}

/// Draft for a new internship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInternship {
    /// The intern.
    pub intern: UserId,
    /// Supervisor; must differ from the intern.
    pub supervisor: UserId,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day; strictly after `start_date`.
    pub end_date: NaiveDate,
}

impl NewInternship {
    /// Check the draft before it is sent.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.end_date <= self.start_date {
            return Err(DraftError::EndNotAfterStart {
                start: self.start_date,
                end: self.end_date,
            });
        }
        if self.intern == self.supervisor {
            return Err(DraftError::SameUser {
                first: "intern",
                second: "supervisor",
            });
        }
        Ok(())
    }
}
