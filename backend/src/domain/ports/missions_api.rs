//! Driven port for missions on the remote HR API.

use async_trait::async_trait;

use crate::domain::{Mission, MissionId, MissionUpdate, NewMission};

use super::HrApiError;

/// Port for reading, creating, and completing missions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MissionsApi: Send + Sync {
    /// Missions the caller is assigned to or supervises.
    async fn list_missions(&self) -> Result<Vec<Mission>, HrApiError>;

    /// One mission by id.
    async fn get_mission(&self, id: MissionId) -> Result<Mission, HrApiError>;

    /// Create a mission.
    async fn create_mission(&self, draft: &NewMission) -> Result<Mission, HrApiError>;

    /// Apply a partial edit and return the stored mission.
    async fn update_mission(
        &self,
        id: MissionId,
        update: &MissionUpdate,
    ) -> Result<Mission, HrApiError>;

    /// Mark a mission completed.
    async fn complete_mission(&self, id: MissionId) -> Result<(), HrApiError>;
}
