//! Leave workflow service.
//!
//! Decisions fetch the current leave, evaluate the transition rule, call the
//! remote action endpoint, and return the computed outcome. The remote action
//! acknowledges with a status message, so the new state is derived locally
//! from the rule once the call succeeds.

use std::sync::Arc;

use tracing::info;

use crate::domain::ports::{LeavesApi, UsersApi};
use crate::domain::{
    Actor, Decision, Error, Leave, LeaveApproval, LeaveId, LeaveUpdate, NewLeave,
};

/// Service for listing, requesting, and deciding leaves.
pub struct LeaveService<L: ?Sized, U: ?Sized> {
    leaves: Arc<L>,
    users: Arc<U>,
}

impl<L: ?Sized, U: ?Sized> LeaveService<L, U> {
    /// Create a service over the leave and user ports.
    pub fn new(leaves: Arc<L>, users: Arc<U>) -> Self {
        Self { leaves, users }
    }
}

impl<L: ?Sized, U: ?Sized> Clone for LeaveService<L, U> {
    fn clone(&self) -> Self {
        Self {
            leaves: Arc::clone(&self.leaves),
            users: Arc::clone(&self.users),
        }
    }
}

impl<L, U> LeaveService<L, U>
where
    L: LeavesApi + ?Sized,
    U: UsersApi + ?Sized,
{
    /// Leaves visible to the caller.
    pub async fn list(&self) -> Result<Vec<Leave>, Error> {
        Ok(self.leaves.list_leaves().await?)
    }

    /// One leave by id.
    pub async fn get(&self, id: LeaveId) -> Result<Leave, Error> {
        Ok(self.leaves.get_leave(id).await?)
    }

    /// Validate and submit a leave request for the caller.
    pub async fn create(&self, draft: &NewLeave) -> Result<Leave, Error> {
        draft.validate()?;
        Ok(self.leaves.create_leave(draft).await?)
    }

    /// Edit a pending leave's dates or reason.
    pub async fn update(
        &self,
        actor: Actor,
        id: LeaveId,
        update: &LeaveUpdate,
    ) -> Result<Leave, Error> {
        let leave = self.leaves.get_leave(id).await?;
        leave.check_edit(actor)?;
        update.validate_for(&leave)?;
        Ok(self.leaves.update_leave(id, update).await?)
    }

    /// Approve a pending leave and deduct its days from the requester.
    pub async fn approve(&self, actor: Actor, id: LeaveId) -> Result<LeaveApproval, Error> {
        let leave = self.leaves.get_leave(id).await?;
        leave.check_decision(actor, Decision::Approve)?;
        let requester = self.users.get_user(leave.user()).await?;
        let approval = leave.approve(actor, requester.leave_balance())?;
        self.leaves.approve_leave(id).await?;
        info!(
            leave_id = %id,
            requester = %approval.requester(),
            days = approval.days(),
            balance = approval.balance().days(),
            "leave approved"
        );
        Ok(approval)
    }

    /// Reject a pending leave.
    pub async fn reject(&self, actor: Actor, id: LeaveId) -> Result<Leave, Error> {
        let leave = self.leaves.get_leave(id).await?;
        let rejected = leave.reject(actor)?;
        self.leaves.reject_leave(id).await?;
        info!(leave_id = %id, "leave rejected");
        Ok(rejected)
    }
}

#[cfg(test)]
#[path = "leave_service_tests.rs"]
mod tests;
