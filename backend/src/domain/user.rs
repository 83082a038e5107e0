//! User accounts, roles, and leave balances.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{Capability, Decision, TransitionError, UserId, allows};

const ENTITY: &str = "user";

/// Account role. Immutable once the account exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// HR administrator with every capability.
    Admin,
    /// Regular employee.
    Employee,
    /// Intern attached to a supervisor.
    Intern,
}

impl Role {
    /// Wire representation used by the remote API.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Employee => "employee",
            Self::Intern => "intern",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "employee" => Ok(Self::Employee),
            "intern" => Ok(Self::Intern),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// Remaining leave entitlement in whole days.
///
/// ## Invariants
/// - Never negative: deductions saturate at zero.
///
/// The remote API stores the balance as a floating-point number and does not
/// clamp it, so an overdrawn account arrives negative. Decoding floors
/// fractional values and clamps negative ones to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct LeaveBalance(u32);

/// Error raised when a balance received from the wire is not representable.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("leave balance must be a finite number of days, got {0}")]
pub struct InvalidLeaveBalance(f64);

impl LeaveBalance {
    /// Construct a balance of `days` days.
    #[must_use]
    pub const fn new(days: u32) -> Self {
        Self(days)
    }

    /// Remaining days.
    #[must_use]
    pub const fn days(self) -> u32 {
        self.0
    }

    /// Deduct `days`, flooring the result at zero.
    ///
    /// # Examples
    /// ```
    /// use hr_backend::domain::LeaveBalance;
    ///
    /// assert_eq!(LeaveBalance::new(5).deduct(3), LeaveBalance::new(2));
    /// assert_eq!(LeaveBalance::new(2).deduct(3), LeaveBalance::new(0));
    /// ```
    #[must_use]
    pub const fn deduct(self, days: u32) -> Self {
        Self(self.0.saturating_sub(days))
    }
}

impl TryFrom<f64> for LeaveBalance {
    type Error = InvalidLeaveBalance;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value > f64::from(u32::MAX) {
            return Err(InvalidLeaveBalance(value));
        }
        if value <= 0.0 {
            return Ok(Self::default());
        }
        // Range checked above; the cast floors fractional days.
        let days = value.floor() as u32;
        Ok(Self(days))
    }
}

impl From<LeaveBalance> for f64 {
    fn from(value: LeaveBalance) -> Self {
        Self::from(value.0)
    }
}

impl fmt::Display for LeaveBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} days", self.0)
    }
}

/// HR user account as cached from the remote API.
///
/// ## Invariants
/// - `role` never changes after creation.
/// - `leave_balance` only changes through an approved leave.
/// - An inactive account is an access request; it becomes active once an
///   administrator approves it and never reverts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(rename = "user_type")]
    role: Role,
    #[serde(default)]
    leave_balance: LeaveBalance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    position: Option<String>,
    #[serde(default = "active_by_default")]
    is_active: bool,
}

const fn active_by_default() -> bool {
    true
}

impl User {
    /// Build a user with empty profile fields and a zero balance.
    pub fn new(id: UserId, username: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            username: username.into(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            role,
            leave_balance: LeaveBalance::default(),
            position: None,
            is_active: true,
        }
    }

    /// Build an inactive account awaiting approval.
    pub fn requested(id: UserId, username: impl Into<String>, role: Role) -> Self {
        Self {
            is_active: false,
            ..Self::new(id, username, role)
        }
    }

    /// Set the first and last names.
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

    /// Set the contact e-mail.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Set the starting leave balance.
    #[must_use]
    pub fn with_leave_balance(mut self, balance: LeaveBalance) -> Self {
        self.leave_balance = balance;
        self
    }

    /// Remote identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Login name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Contact e-mail.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
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

    /// Account role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Remaining leave days.
    #[must_use]
    pub fn leave_balance(&self) -> LeaveBalance {
        self.leave_balance
    }

    /// Job title, when the remote API provides one.
    #[must_use]
    pub fn position(&self) -> Option<&str> {
        self.position.as_deref()
    }

    /// Whether the account may sign in. Inactive accounts are pending
    /// access requests.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Name shown in tables: "First Last", or the username when both are blank.
    #[must_use]
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_owned()
        }
    }

    /// Identity used for authorization checks.
    #[must_use]
    pub fn actor(&self) -> Actor {
        Actor::new(self.id, self.role)
    }

    pub(crate) fn set_leave_balance(&mut self, balance: LeaveBalance) {
        self.leave_balance = balance;
    }

    /// Check that `actor` may apply `decision` to this access request.
    ///
    /// Authorization is checked before status.
    pub fn check_access_decision(
        &self,
        actor: Actor,
        decision: Decision,
    ) -> Result<(), TransitionError> {
        let action = format!("{} access for", decision.as_str());
        if !allows(actor.role(), Capability::ManageUsers) {
            return Err(TransitionError::forbidden(ENTITY, actor.role(), action));
        }
        if self.is_active {
            return Err(TransitionError::invalid(ENTITY, "active", action));
        }
        Ok(())
    }

    /// Approve the access request, returning the activated account.
    pub fn approve_access(&self, actor: Actor) -> Result<Self, TransitionError> {
        self.check_access_decision(actor, Decision::Approve)?;
        Ok(Self {
            is_active: true,
            ..self.clone()
        })
    }
}

/// The caller on whose behalf an action runs.
///
/// Authorization is evaluated against the caller context; nothing about the
/// caller is stored on the entities themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Actor {
    id: UserId,
    role: Role,
}

impl Actor {
    /// Build an actor from an id and role.
    #[must_use]
    pub const fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    /// Caller's user id.
    #[must_use]
    pub const fn id(self) -> UserId {
        self.id
    }

    /// Caller's role.
    #[must_use]
    pub const fn role(self) -> Role {
        self.role
    }

    /// Whether the caller is an administrator.
    #[must_use]
    pub fn is_admin(self) -> bool {
        self.role == Role::Admin
    }
}
