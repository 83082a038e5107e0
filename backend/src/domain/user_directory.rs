//! User accounts: lookup, profile edits, and access requests.
//!
//! Access requests create inactive accounts. Administrators approve or
//! reject them; approval activates the account, rejection removes it.

use std::sync::Arc;

use tracing::info;

use crate::domain::ports::{AccessRequest, UserUpdate, UsersApi};
use crate::domain::{
    Actor, Capability, Decision, Error, TransitionError, User, UserFilter, UserId, allows,
};

/// Service for looking up accounts, editing profiles, and deciding access
/// requests.
pub struct UserDirectory<U: ?Sized> {
    users: Arc<U>,
}

impl<U: ?Sized> UserDirectory<U> {
    /// Create a directory over the users port.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

impl<U: ?Sized> Clone for UserDirectory<U> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.users))
    }
}

impl<U> UserDirectory<U>
where
    U: UsersApi + ?Sized,
{
    /// Users visible to the caller that match `filter`.
    pub async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, Error> {
        let users = self.users.list_users().await?;
        Ok(users.into_iter().filter(|user| filter.matches(user)).collect())
    }

    /// One user by id.
    pub async fn get(&self, id: UserId) -> Result<User, Error> {
        Ok(self.users.get_user(id).await?)
    }

    /// The account behind the current token.
    pub async fn current(&self) -> Result<User, Error> {
        Ok(self.users.current_user().await?)
    }

    /// Edit profile fields.
    pub async fn update(&self, id: UserId, update: &UserUpdate) -> Result<User, Error> {
        if let Some(email) = update.email.as_deref() {
            crate::domain::draft::require_non_empty("email", email)?;
        }
        Ok(self.users.update_user(id, update).await?)
    }

    /// Ask for an account. No sign-in is required.
    pub async fn request_access(&self, request: &AccessRequest) -> Result<User, Error> {
        request.validate()?;
        let user = self.users.request_access(request).await?;
        info!(user_id = %user.id(), role = user.role().as_str(), "access requested");
        Ok(user)
    }

    /// Accounts still awaiting approval.
    pub async fn pending_requests(&self, actor: Actor) -> Result<Vec<User>, Error> {
        require_manage_users(actor, "list access requests")?;
        let users = self.users.list_users().await?;
        Ok(users.into_iter().filter(|user| !user.is_active()).collect())
    }

    /// Activate a requested account.
    pub async fn approve_request(&self, actor: Actor, id: UserId) -> Result<User, Error> {
        let user = self.users.get_user(id).await?;
        let approved = user.approve_access(actor)?;
        self.users.approve_user(id).await?;
        info!(user_id = %id, "access approved");
        Ok(approved)
    }

    /// Turn down a requested account. The account no longer exists afterwards.
    pub async fn reject_request(&self, actor: Actor, id: UserId) -> Result<(), Error> {
        let user = self.users.get_user(id).await?;
        user.check_access_decision(actor, Decision::Reject)?;
        self.users.reject_user(id).await?;
        info!(user_id = %id, "access rejected");
        Ok(())
    }

    /// Delete an account.
    pub async fn delete(&self, actor: Actor, id: UserId) -> Result<(), Error> {
        require_manage_users(actor, "delete")?;
        self.users.delete_user(id).await?;
        info!(user_id = %id, actor = %actor.id(), "user deleted");
        Ok(())
    }
}

fn require_manage_users(actor: Actor, action: &str) -> Result<(), TransitionError> {
    if allows(actor.role(), Capability::ManageUsers) {
        Ok(())
    } else {
        Err(TransitionError::forbidden("user", actor.role(), action))
    }
}
