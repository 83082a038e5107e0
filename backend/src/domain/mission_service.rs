//! Mission workflow service.

use std::sync::Arc;

use tracing::info;

use crate::domain::ports::MissionsApi;
use crate::domain::{
    Actor, Capability, Error, Mission, MissionId, MissionUpdate, NewMission, TransitionError,
    allows,
};

/// Service for listing, creating, and completing missions.
pub struct MissionService<M: ?Sized> {
    missions: Arc<M>,
}

impl<M: ?Sized> MissionService<M> {
    /// Create a service over the missions port.
    pub fn new(missions: Arc<M>) -> Self {
        Self { missions }
    }
}

impl<M: ?Sized> Clone for MissionService<M> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.missions))
    }
}

impl<M> MissionService<M>
where
    M: MissionsApi + ?Sized,
{
    /// Missions the caller is involved in.
    pub async fn list(&self) -> Result<Vec<Mission>, Error> {
        Ok(self.missions.list_missions().await?)
    }

    /// One mission by id.
    pub async fn get(&self, id: MissionId) -> Result<Mission, Error> {
        Ok(self.missions.get_mission(id).await?)
    }

    /// Create a mission. Interns may not create missions.
    pub async fn create(&self, actor: Actor, draft: &NewMission) -> Result<Mission, Error> {
        if !allows(actor.role(), Capability::CreateMission) {
            return Err(TransitionError::forbidden("mission", actor.role(), "create").into());
        }
        draft.validate()?;
        Ok(self.missions.create_mission(draft).await?)
    }

    /// Edit an open mission.
    pub async fn update(
        &self,
        actor: Actor,
        id: MissionId,
        update: &MissionUpdate,
    ) -> Result<Mission, Error> {
        update.validate()?;
        let mission = self.missions.get_mission(id).await?;
        mission.check_edit(actor)?;
        Ok(self.missions.update_mission(id, update).await?)
    }

    /// Mark a mission completed on behalf of `actor`.
    pub async fn complete(&self, actor: Actor, id: MissionId) -> Result<Mission, Error> {
        let mission = self.missions.get_mission(id).await?;
        let completed = mission.complete(actor)?;
        self.missions.complete_mission(id).await?;
        info!(mission_id = %id, actor = %actor.id(), "mission completed");
        Ok(completed)
    }
}
