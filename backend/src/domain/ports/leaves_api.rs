//! Driven port for leave requests on the remote HR API.

use async_trait::async_trait;

use crate::domain::{Leave, LeaveId, LeaveUpdate, NewLeave};

use super::HrApiError;

/// Port for reading, creating, and deciding leave requests.
///
/// The decision endpoints acknowledge with a status message rather than the
/// updated entity, so they return `()`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeavesApi: Send + Sync {
    /// Leaves visible to the caller.
    async fn list_leaves(&self) -> Result<Vec<Leave>, HrApiError>;

    /// One leave by id.
    async fn get_leave(&self, id: LeaveId) -> Result<Leave, HrApiError>;

    /// Submit a new leave request for the caller.
    async fn create_leave(&self, draft: &NewLeave) -> Result<Leave, HrApiError>;

    /// Apply a partial edit and return the stored leave.
    async fn update_leave(&self, id: LeaveId, update: &LeaveUpdate) -> Result<Leave, HrApiError>;

    /// Approve a leave.
    async fn approve_leave(&self, id: LeaveId) -> Result<(), HrApiError>;

    /// Reject a leave.
    async fn reject_leave(&self, id: LeaveId) -> Result<(), HrApiError>;
}
