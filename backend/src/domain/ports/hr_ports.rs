//! Bundle of every entity port acting under one session.

use std::sync::Arc;

use super::{
    InternshipsApi, JobApplicationsApi, LeavesApi, MissionsApi, UsersApi, WorkHoursApi,
};

/// Entity ports sharing one token session.
#[derive(Clone)]
pub struct HrPorts {
    /// User accounts and access requests.
    pub users: Arc<dyn UsersApi>,
    /// Leave requests.
    pub leaves: Arc<dyn LeavesApi>,
    /// Missions.
    pub missions: Arc<dyn MissionsApi>,
    /// Work-hour entries.
    pub work_hours: Arc<dyn WorkHoursApi>,
    /// Internships.
    pub internships: Arc<dyn InternshipsApi>,
    /// Job applications.
    pub job_applications: Arc<dyn JobApplicationsApi>,
}

impl HrPorts {
    /// Use one adapter for every entity port.
    pub fn shared<A>(adapter: Arc<A>) -> Self
    where
        A: UsersApi
            + LeavesApi
            + MissionsApi
            + WorkHoursApi
            + InternshipsApi
            + JobApplicationsApi
            + 'static,
    {
        Self {
            users: adapter.clone(),
            leaves: adapter.clone(),
            missions: adapter.clone(),
            work_hours: adapter.clone(),
            internships: adapter.clone(),
            job_applications: adapter,
        }
    }
}
