//! Driven port for logged work hours on the remote HR API.

use async_trait::async_trait;

use crate::domain::{NewWorkHours, WorkHours};

use super::HrApiError;

/// Port for listing and logging work hours.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkHoursApi: Send + Sync {
    /// Entries visible to the caller.
    async fn list_work_hours(&self) -> Result<Vec<WorkHours>, HrApiError>;

    /// Log a new entry.
    async fn create_work_hours(&self, draft: &NewWorkHours) -> Result<WorkHours, HrApiError>;
}
