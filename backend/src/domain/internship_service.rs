//! Internship workflow service.

use std::sync::Arc;

use tracing::info;

use crate::domain::ports::InternshipsApi;
use crate::domain::{
    Actor, Capability, Error, Internship, InternshipId, InternshipStatus, InternshipUpdate,
    NewInternship, TransitionError, allows,
};

/// Service for listing, creating, and moving internships.
pub struct InternshipService<I: ?Sized> {
    internships: Arc<I>,
}

impl<I: ?Sized> InternshipService<I> {
    /// Create a service over the internships port.
    pub fn new(internships: Arc<I>) -> Self {
        Self { internships }
    }
}

impl<I: ?Sized> Clone for InternshipService<I> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.internships))
    }
}

impl<I> InternshipService<I>
where
    I: InternshipsApi + ?Sized,
{
    /// Internships visible to the caller.
    pub async fn list(&self) -> Result<Vec<Internship>, Error> {
        Ok(self.internships.list_internships().await?)
    }

    /// One internship by id.
    pub async fn get(&self, id: InternshipId) -> Result<Internship, Error> {
        Ok(self.internships.get_internship(id).await?)
    }

    /// Create an internship. Requires [`Capability::ManageInternships`].
    pub async fn create(&self, actor: Actor, draft: &NewInternship) -> Result<Internship, Error> {
        if !allows(actor.role(), Capability::ManageInternships) {
            return Err(TransitionError::forbidden("internship", actor.role(), "create").into());
        }
        draft.validate()?;
        Ok(self.internships.create_internship(draft).await?)
    }

    /// Edit an internship that has not ended.
    pub async fn update(
        &self,
        actor: Actor,
        id: InternshipId,
        update: &InternshipUpdate,
    ) -> Result<Internship, Error> {
        let internship = self.internships.get_internship(id).await?;
        internship.check_edit(actor)?;
        update.validate_for(&internship)?;
        Ok(self.internships.update_internship(id, update).await?)
    }

    /// Move an internship to `target` on behalf of `actor`.
    pub async fn change_status(
        &self,
        actor: Actor,
        id: InternshipId,
        target: InternshipStatus,
    ) -> Result<Internship, Error> {
        let internship = self.internships.get_internship(id).await?;
        let moved = internship.change_status(actor, target)?;
        self.internships.change_internship_status(id, target).await?;
        info!(
            internship_id = %id,
            from = internship.status().as_str(),
            to = target.as_str(),
            "internship status changed"
        );
        Ok(moved)
    }
}
