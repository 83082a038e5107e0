//! Domain primitives, transition rules, and workflow services.
//!
//! Purpose: Define strongly typed HR entities, the pure rules that move them
//! between statuses, and the services that combine those rules with the
//! remote API ports. Nothing here depends on HTTP frameworks.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Leave, Mission, WorkHours, Internship, JobApplication: cached
//!   entities with read-only accessors; statuses change only through rules.
//! - NewLeave, NewMission, NewWorkHours, NewInternship, NewJobApplication:
//!   creation drafts validated before anything is sent.
//! - capabilities(role): static allow-list of pages and actions.
//! - LeaveService, MissionService, WorkHoursService, InternshipService,
//!   JobApplicationService, UserDirectory: authorization + rule + remote call.

pub mod capabilities;
pub mod draft;
pub mod error;
pub mod ids;
pub mod internship;
pub mod internship_service;
pub mod job_application;
pub mod job_application_service;
pub mod leave;
pub mod leave_service;
pub mod listing;
pub mod mission;
pub mod mission_service;
pub mod ports;
pub mod resume;
pub mod stats;
pub mod trace_id;
pub mod transition;
pub mod user;
pub mod user_directory;
pub mod work_hours;
pub mod work_hours_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::capabilities::{Capability, allows, capabilities};
pub use self::draft::DraftError;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::ids::{
    InternshipId, InvalidId, JobApplicationId, LeaveId, MissionId, UserId, WorkHoursId,
};
pub use self::internship::{
    Internship, InternshipStatus, InternshipUpdate, NewInternship, UnknownInternshipStatus,
};
pub use self::internship_service::InternshipService;
pub use self::job_application::{
    ApplicationType, JobApplication, JobApplicationStatus, JobApplicationUpdate,
    NewJobApplication,
};
pub use self::job_application_service::JobApplicationService;
pub use self::leave::{Leave, LeaveApproval, LeaveStatus, LeaveUpdate, NewLeave};
pub use self::leave_service::LeaveService;
pub use self::listing::{Page, PageRequest, PageRequestError, UserFilter, paginate};
pub use self::mission::{Mission, MissionUpdate, NewMission};
pub use self::mission_service::MissionService;
pub use self::resume::{
    ACCEPTED_RESUME_TYPES, MAX_RESUME_BYTES, ResumeArtifact, ResumeValidationError, check_resume,
};
pub use self::stats::DashboardStats;
pub use self::trace_id::TraceId;
pub use self::transition::{Decision, TransitionError};
pub use self::user::{Actor, InvalidLeaveBalance, LeaveBalance, Role, UnknownRole, User};
pub use self::user_directory::UserDirectory;
pub use self::work_hours::{Hours, MAX_HOURS, MIN_HOURS, NewWorkHours, WorkHours};
pub use self::work_hours_service::WorkHoursService;

/// Convenient result alias for domain operations.
///
/// # Examples
/// ```
/// use hr_backend::domain::{DomainResult, Error};
///
/// fn decide() -> DomainResult<()> {
///     Err(Error::forbidden("only administrators decide leaves"))
/// }
/// assert!(decide().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
