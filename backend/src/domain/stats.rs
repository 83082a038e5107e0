//! Dashboard summary figures derived from cached collections.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{Leave, LeaveId, LeaveStatus, Mission};

/// Figures shown on the dashboard and leave pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Leaves awaiting a decision.
    pub pending_leaves: usize,
    /// Missions not yet completed.
    pub active_missions: usize,
    /// Approved leaves starting after today.
    pub upcoming_leaves: usize,
    /// Earliest upcoming approved leave.
    pub next_leave: Option<LeaveId>,
    /// Days from today to the start of [`Self::next_leave`].
    pub days_until_next_leave: Option<i64>,
    /// Days covered by approved leaves.
    pub approved_leave_days: u64,
}

impl DashboardStats {
    /// Summarise `leaves` and `missions` as seen on `today`.
    #[must_use]
    pub fn compute(leaves: &[Leave], missions: &[Mission], today: NaiveDate) -> Self {
        let approved = || {
            leaves
                .iter()
                .filter(|leave| leave.status() == LeaveStatus::Approved)
        };
        let next = approved()
            .filter(|leave| leave.start_date() > today)
            .min_by_key(|leave| leave.start_date());
        Self {
            pending_leaves: leaves
                .iter()
                .filter(|leave| leave.status() == LeaveStatus::Pending)
                .count(),
            active_missions: missions.iter().filter(|mission| !mission.completed()).count(),
            upcoming_leaves: approved()
                .filter(|leave| leave.start_date() > today)
                .count(),
            next_leave: next.map(Leave::id),
            days_until_next_leave: next.map(|leave| (leave.start_date() - today).num_days()),
            approved_leave_days: approved().map(|leave| u64::from(leave.days())).sum(),
        }
    }
}
