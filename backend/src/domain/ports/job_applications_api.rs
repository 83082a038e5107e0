//! Driven port for job applications on the remote HR API.

use async_trait::async_trait;

use crate::domain::{
    Decision, JobApplication, JobApplicationId, JobApplicationUpdate, NewJobApplication,
};

use super::HrApiError;

/// Port for submitting and deciding job applications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobApplicationsApi: Send + Sync {
    /// Applications visible to the caller.
    async fn list_job_applications(&self) -> Result<Vec<JobApplication>, HrApiError>;

    /// One application by id.
    async fn get_job_application(
        &self,
        id: JobApplicationId,
    ) -> Result<JobApplication, HrApiError>;

    /// Upload an application and its résumé as a multipart form.
    async fn submit_job_application(
        &self,
        draft: NewJobApplication,
    ) -> Result<JobApplication, HrApiError>;

    /// Correct an application's details.
    async fn update_job_application(
        &self,
        id: JobApplicationId,
        update: &JobApplicationUpdate,
    ) -> Result<JobApplication, HrApiError>;

    /// Record an approve or reject decision.
    async fn decide_job_application(
        &self,
        id: JobApplicationId,
        decision: Decision,
    ) -> Result<(), HrApiError>;
}
