//! Work-hours logging service.

use std::sync::Arc;

use crate::domain::ports::WorkHoursApi;
use crate::domain::{Actor, Error, NewWorkHours, WorkHours};

/// Service for listing and logging work hours.
pub struct WorkHoursService<W: ?Sized> {
    work_hours: Arc<W>,
}

impl<W: ?Sized> WorkHoursService<W> {
    /// Create a service over the work-hours port.
    pub fn new(work_hours: Arc<W>) -> Self {
        Self { work_hours }
    }
}

impl<W: ?Sized> Clone for WorkHoursService<W> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.work_hours))
    }
}

impl<W> WorkHoursService<W>
where
    W: WorkHoursApi + ?Sized,
{
    /// Entries visible to the caller.
    pub async fn list(&self) -> Result<Vec<WorkHours>, Error> {
        Ok(self.work_hours.list_work_hours().await?)
    }

    /// Log hours. Logging for another user requires an administrator.
    pub async fn log(&self, actor: Actor, draft: &NewWorkHours) -> Result<WorkHours, Error> {
        draft.authorize(actor)?;
        draft.validate()?;
        Ok(self.work_hours.create_work_hours(draft).await?)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockWorkHoursApi;
    use crate::domain::test_support::{created_at, date, employee, user_id};
    use crate::domain::{ErrorCode, Hours, WorkHoursId};
    use rstest::rstest;

    fn entry() -> WorkHours {
        WorkHours::new(
            WorkHoursId::new(7).expect("id"),
            user_id(2),
            date(2024, 4, 2),
            Hours::new(7.5),
            created_at(),
        )
    }

    #[rstest]
    #[case(Some(3), 8.0, ErrorCode::Forbidden)]
    #[case(None, 30.0, ErrorCode::InvalidRequest)]
    #[tokio::test]
    async fn rejected_drafts_never_reach_the_api(
        #[case] user: Option<u64>,
        #[case] hours: f64,
        #[case] expected: ErrorCode,
    ) {
        let mut api = MockWorkHoursApi::new();
        api.expect_create_work_hours().times(0);
        let draft = NewWorkHours {
            user: user.map(user_id),
            date: date(2024, 4, 2),
            hours_worked: Hours::new(hours),
        };

        let error = WorkHoursService::new(Arc::new(api))
            .log(employee(2), &draft)
            .await
            .expect_err("rejected");

        assert_eq!(error.code(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn logs_own_hours() {
        let mut api = MockWorkHoursApi::new();
        api.expect_create_work_hours()
            .times(1)
            .return_once(|_| Ok(entry()));
        let draft = NewWorkHours {
            user: None,
            date: date(2024, 4, 2),
            hours_worked: Hours::new(7.5),
        };

        let logged = WorkHoursService::new(Arc::new(api))
            .log(employee(2), &draft)
            .await
            .expect("logged");

        assert_eq!(logged.user(), user_id(2));
    }
}
