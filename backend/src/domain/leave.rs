//! Leave requests and their approval rules.
//!
//! A leave starts `pending`. An administrator either approves it, which also
//! deducts the requested days from the requester's balance, or rejects it.
//! Both outcomes are terminal.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::draft::{DraftError, require_min_chars};
use crate::domain::{Actor, Decision, LeaveBalance, LeaveId, TransitionError, UserId};

const ENTITY: &str = "leave";

/// Lifecycle state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved; terminal.
    Approved,
    /// Rejected; terminal.
    Rejected,
}

impl LeaveStatus {
    /// Wire representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Whether no further transition is possible.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A requested absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leave {
    id: LeaveId,
    user: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_name: Option<String>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    reason: String,
    status: LeaveStatus,
    created_at: DateTime<Utc>,
}

impl Leave {
    /// Build a freshly created, pending leave.
    pub fn pending(
        id: LeaveId,
        user: UserId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user,
            user_name: None,
            start_date,
            end_date,
            reason: reason.into(),
            status: LeaveStatus::Pending,
            created_at,
        }
    }

    /// Remote identifier.
    #[must_use]
    pub fn id(&self) -> LeaveId {
        self.id
    }

    /// Requester.
    #[must_use]
    pub fn user(&self) -> UserId {
        self.user
    }

    /// Requester's username, when the remote API includes it.
    #[must_use]
    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    /// First day of absence.
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day of absence, inclusive.
    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Free-text reason.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> LeaveStatus {
        self.status
    }

    /// Creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Number of days covered, counting both endpoints.
    ///
    /// A malformed range (end before start) covers zero days.
    #[must_use]
    pub fn days(&self) -> u32 {
        inclusive_days(self.start_date, self.end_date)
    }

    /// Approve the leave and compute the requester's new balance.
    ///
    /// Only administrators may decide. The leave itself is untouched; the
    /// returned [`LeaveApproval`] carries both writes.
    pub fn approve(
        &self,
        actor: Actor,
        requester_balance: LeaveBalance,
    ) -> Result<LeaveApproval, TransitionError> {
        self.check_decision(actor, Decision::Approve)?;
        let days = self.days();
        let mut leave = self.clone();
        leave.status = LeaveStatus::Approved;
        Ok(LeaveApproval {
            leave,
            days,
            balance: requester_balance.deduct(days),
        })
    }

    /// Reject the leave. Balances are unaffected.
    pub fn reject(&self, actor: Actor) -> Result<Self, TransitionError> {
        self.check_decision(actor, Decision::Reject)?;
        let mut leave = self.clone();
        leave.status = LeaveStatus::Rejected;
        Ok(leave)
    }

    /// Check that `actor` may edit the request's dates or reason.
    ///
    /// The requester and administrators may edit while the leave is pending.
    pub fn check_edit(&self, actor: Actor) -> Result<(), TransitionError> {
        if !actor.is_admin() && actor.id() != self.user {
            return Err(TransitionError::forbidden(ENTITY, actor.role(), "edit"));
        }
        if self.status != LeaveStatus::Pending {
            return Err(TransitionError::invalid(ENTITY, self.status.as_str(), "edit"));
        }
        Ok(())
    }

    /// Check that `actor` may apply `decision` now, without applying it.
    ///
    /// Authorization is checked before status.
    pub fn check_decision(&self, actor: Actor, decision: Decision) -> Result<(), TransitionError> {
        if !actor.is_admin() {
            return Err(TransitionError::forbidden(ENTITY, actor.role(), decision.as_str()));
        }
        if self.status != LeaveStatus::Pending {
            return Err(TransitionError::invalid(
                ENTITY,
                self.status.as_str(),
                decision.as_str(),
            ));
        }
        Ok(())
    }
}

/// Outcome of approving a leave: the approved leave and the requester's
/// updated balance, applied together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveApproval {
    leave: Leave,
    days: u32,
    balance: LeaveBalance,
}

impl LeaveApproval {
    /// The leave in its approved state.
    #[must_use]
    pub fn leave(&self) -> &Leave {
        &self.leave
    }

    /// Requester whose balance changes.
    #[must_use]
    pub fn requester(&self) -> UserId {
        self.leave.user
    }

    /// Days deducted, before flooring at zero.
    #[must_use]
    pub fn days(&self) -> u32 {
        self.days
    }

    /// Requester's balance after deduction.
    #[must_use]
    pub fn balance(&self) -> LeaveBalance {
        self.balance
    }

    /// Take the approved leave.
    #[must_use]
    pub fn into_leave(self) -> Leave {
        self.leave
    }
}

/// Draft for a new leave request.
///
/// The remote API assigns the requester from the caller's token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLeave {
    /// First day of absence.
    pub start_date: NaiveDate,
    /// Last day of absence; may equal `start_date`.
    pub end_date: NaiveDate,
    /// Reason, at least three characters.
    pub reason: String,
}

impl NewLeave {
    /// Minimum reason length in characters.
    pub const MIN_REASON_CHARS: usize = 3;

    /// Check the draft before it is sent.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.end_date < self.start_date {
            return Err(DraftError::EndBeforeStart {
                start: self.start_date,
                end: self.end_date,
            });
        }
        require_min_chars("reason", &self.reason, Self::MIN_REASON_CHARS)
    }
}

/// Partial edit of a pending leave, sent as `PATCH leaves/{id}/`.
///
/// There is no status field: status moves only through a decision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveUpdate {
    /// New first day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// New last day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// New reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl LeaveUpdate {
    /// Check the edit against the leave it applies to.
    ///
    /// Dates are checked after merging with the current ones, so moving only
    /// the start past the existing end is refused.
    pub fn validate_for(&self, leave: &Leave) -> Result<(), DraftError> {
        let start = self.start_date.unwrap_or(leave.start_date);
        let end = self.end_date.unwrap_or(leave.end_date);
        if end < start {
            return Err(DraftError::EndBeforeStart { start, end });
        }
        match self.reason.as_deref() {
            Some(reason) => require_min_chars("reason", reason, NewLeave::MIN_REASON_CHARS),
            None => Ok(()),
        }
    }
}

pub(crate) fn inclusive_days(start: NaiveDate, end: NaiveDate) -> u32 {
    let span = (end - start).num_days() + 1;
    u32::try_from(span.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
#[path = "leave_tests.rs"]
mod tests;
