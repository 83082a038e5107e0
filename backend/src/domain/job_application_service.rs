//! Job application workflow service.
//!
//! After a decision is recorded remotely the [`DecisionNotifier`] runs. A
//! notifier failure is logged and the decision still stands.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::ports::{DecisionNotifier, JobApplicationsApi};
use crate::domain::{
    Actor, Decision, Error, JobApplication, JobApplicationId, JobApplicationUpdate,
    NewJobApplication,
};

/// Service for submitting and deciding job applications.
pub struct JobApplicationService<J: ?Sized, N: ?Sized> {
    applications: Arc<J>,
    notifier: Arc<N>,
}

impl<J: ?Sized, N: ?Sized> JobApplicationService<J, N> {
    /// Create a service over the applications port and a notifier.
    pub fn new(applications: Arc<J>, notifier: Arc<N>) -> Self {
        Self {
            applications,
            notifier,
        }
    }
}

impl<J: ?Sized, N: ?Sized> Clone for JobApplicationService<J, N> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.applications), Arc::clone(&self.notifier))
    }
}

impl<J, N> JobApplicationService<J, N>
where
    J: JobApplicationsApi + ?Sized,
    N: DecisionNotifier + ?Sized,
{
    /// Applications visible to the caller.
    pub async fn list(&self) -> Result<Vec<JobApplication>, Error> {
        Ok(self.applications.list_job_applications().await?)
    }

    /// One application by id.
    pub async fn get(&self, id: JobApplicationId) -> Result<JobApplication, Error> {
        Ok(self.applications.get_job_application(id).await?)
    }

    /// Validate the draft and its résumé, then upload it.
    ///
    /// A failing check means nothing is sent.
    pub async fn submit(&self, draft: NewJobApplication) -> Result<JobApplication, Error> {
        draft.validate()?;
        Ok(self.applications.submit_job_application(draft).await?)
    }

    /// Correct a pending application's details.
    pub async fn update(
        &self,
        actor: Actor,
        id: JobApplicationId,
        update: &JobApplicationUpdate,
    ) -> Result<JobApplication, Error> {
        update.validate()?;
        let application = self.applications.get_job_application(id).await?;
        application.check_edit(actor)?;
        Ok(self
            .applications
            .update_job_application(id, update)
            .await?)
    }

    /// Approve a pending application.
    pub async fn approve(
        &self,
        actor: Actor,
        id: JobApplicationId,
    ) -> Result<JobApplication, Error> {
        self.decide(actor, id, Decision::Approve).await
    }

    /// Reject a pending application.
    pub async fn reject(
        &self,
        actor: Actor,
        id: JobApplicationId,
    ) -> Result<JobApplication, Error> {
        self.decide(actor, id, Decision::Reject).await
    }

    async fn decide(
        &self,
        actor: Actor,
        id: JobApplicationId,
        decision: Decision,
    ) -> Result<JobApplication, Error> {
        let application = self.applications.get_job_application(id).await?;
        let decided = application.decide(actor, decision)?;
        self.applications
            .decide_job_application(id, decision)
            .await?;
        info!(application_id = %id, decision = decision.as_str(), "job application decided");
        if let Err(err) = self.notifier.notify(&decided, decision).await {
            warn!(application_id = %id, error = %err, "decision notification failed");
        }
        Ok(decided)
    }
}

#[cfg(test)]
#[path = "job_application_service_tests.rs"]
mod tests;
