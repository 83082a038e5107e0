//! Static role-to-capability allow-list.
//!
//! Relationship-based permissions (mission assignee or supervisor, internship
//! supervisor) are checked by the transition rules, not here.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::Role;

/// A page or action a role may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Dashboard page.
    Dashboard,
    /// Employee directory page.
    Employees,
    /// Leave requests page.
    Leave,
    /// Missions page.
    Missions,
    /// Work hours page.
    WorkHours,
    /// Internships page.
    Internships,
    /// Job applications review page.
    JobApplications,
    /// Approve or reject leave requests.
    DecideLeave,
    /// Create missions.
    CreateMission,
    /// Log hours on behalf of another user.
    LogHoursForOthers,
    /// Approve or reject job applications.
    DecideJobApplication,
    /// Create internships and change any internship's status.
    ManageInternships,
    /// Decide access requests and delete accounts.
    ManageUsers,
}

const SHARED: [Capability; 5] = [
    Capability::Dashboard,
    Capability::Leave,
    Capability::Missions,
    Capability::WorkHours,
    Capability::Internships,
];

/// Capabilities granted to `role`.
///
/// # Examples
/// ```
/// use hr_backend::domain::{Capability, Role, capabilities};
///
/// assert!(capabilities(Role::Admin).contains(&Capability::DecideLeave));
/// assert!(!capabilities(Role::Intern).contains(&Capability::CreateMission));
/// ```
#[must_use]
pub fn capabilities(role: Role) -> BTreeSet<Capability> {
    let mut granted: BTreeSet<Capability> = SHARED.into_iter().collect();
    match role {
        Role::Admin => granted.extend([
            Capability::Employees,
            Capability::JobApplications,
            Capability::DecideLeave,
            Capability::CreateMission,
            Capability::LogHoursForOthers,
            Capability::DecideJobApplication,
            Capability::ManageInternships,
            Capability::ManageUsers,
        ]),
        Role::Employee => {
            granted.insert(Capability::CreateMission);
        }
        Role::Intern => {}
    }
    granted
}

/// Whether `role` holds `capability`.
#[must_use]
pub fn allows(role: Role, capability: Capability) -> bool {
    capabilities(role).contains(&capability)
}
