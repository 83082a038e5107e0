//! Driven port for internships on the remote HR API.

use async_trait::async_trait;

use crate::domain::{Internship, InternshipId, InternshipStatus, InternshipUpdate, NewInternship};

use super::HrApiError;

/// Port for reading, creating, and moving internships through their lifecycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InternshipsApi: Send + Sync {
    /// Internships visible to the caller.
    async fn list_internships(&self) -> Result<Vec<Internship>, HrApiError>;

    /// One internship by id.
    async fn get_internship(&self, id: InternshipId) -> Result<Internship, HrApiError>;

    /// Create an internship.
    async fn create_internship(&self, draft: &NewInternship) -> Result<Internship, HrApiError>;

    /// Apply a partial edit and return the stored internship.
    async fn update_internship(
        &self,
        id: InternshipId,
        update: &InternshipUpdate,
    ) -> Result<Internship, HrApiError>;

    /// Overwrite an internship's status.
    async fn change_internship_status(
        &self,
        id: InternshipId,
        status: InternshipStatus,
    ) -> Result<(), HrApiError>;
}
