//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_api;
mod decision_notifier;
mod hr_api_error;
mod hr_ports;
mod internships_api;
mod job_applications_api;
mod leaves_api;
mod missions_api;
mod users_api;
mod work_hours_api;

#[cfg(test)]
pub use auth_api::MockAuthApi;
pub use auth_api::{AuthApi, Credentials};
#[cfg(test)]
pub use decision_notifier::MockDecisionNotifier;
pub use decision_notifier::{
    DecisionNotifier, NoOpDecisionNotifier, NotificationError, TracingDecisionNotifier,
};
pub use hr_api_error::HrApiError;
pub use hr_ports::HrPorts;
#[cfg(test)]
pub use internships_api::MockInternshipsApi;
pub use internships_api::InternshipsApi;
#[cfg(test)]
pub use job_applications_api::MockJobApplicationsApi;
pub use job_applications_api::JobApplicationsApi;
#[cfg(test)]
pub use leaves_api::MockLeavesApi;
pub use leaves_api::LeavesApi;
#[cfg(test)]
pub use missions_api::MockMissionsApi;
pub use missions_api::MissionsApi;
#[cfg(test)]
pub use users_api::MockUsersApi;
pub use users_api::{AccessRequest, UserUpdate, UsersApi};
#[cfg(test)]
pub use work_hours_api::MockWorkHoursApi;
pub use work_hours_api::WorkHoursApi;
