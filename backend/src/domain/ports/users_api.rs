//! Driven port for user accounts on the remote HR API.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::draft::{DraftError, require_email, require_non_empty};
use crate::domain::{Role, User, UserId};

use super::HrApiError;

/// Profile fields a user may edit.
///
/// Role and leave balance cannot be patched: the role is fixed at creation
/// and the balance moves only through leave approval.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    /// New e-mail address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// New family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Self-service request for a new account.
///
/// The account is created inactive and stays so until an administrator
/// approves it. Only employee and intern accounts can be requested.
#[derive(Clone)]
pub struct AccessRequest {
    username: String,
    email: String,
    password: Zeroizing<String>,
    first_name: String,
    last_name: String,
    role: Role,
}

impl AccessRequest {
    /// Request an account with empty names.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: Zeroizing::new(password.into()),
            first_name: String::new(),
            last_name: String::new(),
            role,
        }
    }

    /// Set the given and family names.
    #[must_use]
    pub fn with_names(
        mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    /// Desired login name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Contact e-mail.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Password in clear text.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Given name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Family name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Requested role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Check the request before it is sent.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.role == Role::Admin {
            return Err(DraftError::UnrequestableRole { role: self.role });
        }
        require_non_empty("username", &self.username)?;
        require_email(&self.email)?;
        require_non_empty("password", self.password.as_str())
    }
}

impl fmt::Debug for AccessRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Port for reading, editing, and administering user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// Users visible to the caller.
    async fn list_users(&self) -> Result<Vec<User>, HrApiError>;

    /// One user by id.
    async fn get_user(&self, id: UserId) -> Result<User, HrApiError>;

    /// The account behind the current token.
    async fn current_user(&self) -> Result<User, HrApiError>;

    /// Apply a partial profile update.
    async fn update_user(&self, id: UserId, update: &UserUpdate) -> Result<User, HrApiError>;

    /// Remove an account.
    async fn delete_user(&self, id: UserId) -> Result<(), HrApiError>;

    /// File an access request; the returned account is inactive.
    async fn request_access(&self, request: &AccessRequest) -> Result<User, HrApiError>;

    /// Activate a requested account.
    async fn approve_user(&self, id: UserId) -> Result<(), HrApiError>;

    /// Turn down a requested account.
    async fn reject_user(&self, id: UserId) -> Result<(), HrApiError>;
}
