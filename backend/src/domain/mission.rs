//! Missions and the one-way completion rule.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::draft::{DraftError, require_non_empty};
use crate::domain::{Actor, MissionId, TransitionError, UserId};

const ENTITY: &str = "mission";

/// An assignable task with a deadline.
///
/// `completed` flips from `false` to `true` once and never reverts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    id: MissionId,
    title: String,
    #[serde(default)]
    description: String,
    assigned_to: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    assigned_to_name: Option<String>,
    supervisor: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    supervisor_name: Option<String>,
    deadline: NaiveDate,
    #[serde(default)]
    completed: bool,
    created_at: DateTime<Utc>,
}

impl Mission {
    /// Build a freshly created, open mission.
    pub fn open(
        id: MissionId,
        title: impl Into<String>,
        description: impl Into<String>,
        assigned_to: UserId,
        supervisor: UserId,
        deadline: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            assigned_to,
            assigned_to_name: None,
            supervisor,
            supervisor_name: None,
            deadline,
            completed: false,
            created_at,
        }
    }

    /// Remote identifier.
    #[must_use]
    pub fn id(&self) -> MissionId {
        self.id
    }

    /// Short title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Longer description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Assignee.
    #[must_use]
    pub fn assigned_to(&self) -> UserId {
        self.assigned_to
    }

    /// Assignee's username, when provided.
    #[must_use]
    pub fn assigned_to_name(&self) -> Option<&str> {
        self.assigned_to_name.as_deref()
    }

    /// Supervisor.
    #[must_use]
    pub fn supervisor(&self) -> UserId {
        self.supervisor
    }

    /// Supervisor's username, when provided.
    #[must_use]
    pub fn supervisor_name(&self) -> Option<&str> {
        self.supervisor_name.as_deref()
    }

    /// Due date.
    #[must_use]
    pub fn deadline(&self) -> NaiveDate {
        self.deadline
    }

    /// Whether the mission is done.
    #[must_use]
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether `actor` is the assignee or supervisor.
    #[must_use]
    pub fn involves(&self, actor: Actor) -> bool {
        actor.id() == self.assigned_to || actor.id() == self.supervisor
    }

    /// Check that `actor` may edit the mission.
    ///
    /// The supervisor and administrators may edit until it is completed.
    pub fn check_edit(&self, actor: Actor) -> Result<(), TransitionError> {
        if !actor.is_admin() && actor.id() != self.supervisor {
            return Err(TransitionError::forbidden(ENTITY, actor.role(), "edit"));
        }
        if self.completed {
            return Err(TransitionError::invalid(ENTITY, "completed", "edit"));
        }
        Ok(())
    }

    /// Mark the mission completed.
    ///
    /// Allowed for the assignee, the supervisor, or an administrator.
    pub fn complete(&self, actor: Actor) -> Result<Self, TransitionError> {
        if !actor.is_admin() && !self.involves(actor) {
            return Err(TransitionError::forbidden(ENTITY, actor.role(), "complete"));
        }
        if self.completed {
            return Err(TransitionError::invalid(ENTITY, "completed", "complete"));
        }
        let mut mission = self.clone();
        mission.completed = true;
        Ok(mission)
    }
}

/// Partial edit of a mission, sent as `PATCH missions/{id}/`.
///
/// Completion is not editable here; it moves only through
/// [`Mission::complete`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionUpdate {
    /// New title; must not be blank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New assignee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<UserId>,
    /// New supervisor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor: Option<UserId>,
    /// New due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

impl MissionUpdate {
    /// Check the edit before it is sent.
    pub fn validate(&self) -> Result<(), DraftError> {
        match self.title.as_deref() {
            Some(title) => require_non_empty("title", title),
            None => Ok(()),
        }
    }
}

/// Draft for a new mission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMission {
    /// Short title; must not be blank.
    pub title: String,
    /// Longer description.
    pub description: String,
    /// Assignee.
    pub assigned_to: UserId,
    /// Supervisor.
    pub supervisor: UserId,
    /// Due date.
    pub deadline: NaiveDate,
}

impl NewMission {
    /// Check the draft before it is sent.
    pub fn validate(&self) -> Result<(), DraftError> {
        require_non_empty("title", &self.title)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::test_support::{admin, date, employee, intern, open_mission, user_id};
    use rstest::rstest;

    #[rstest]
    #[case::assignee(employee(3))]
    #[case::supervisor(employee(4))]
    #[case::admin(admin())]
    #[case::intern_assignee(intern(3))]
    fn involved_callers_may_complete(#[case] actor: Actor) {
        let mission = open_mission();
        let done = mission.complete(actor).expect("completes");
        assert!(done.completed());
        assert_eq!(done.title(), mission.title());
        assert_eq!(done.deadline(), mission.deadline());
        assert!(!mission.completed(), "source is not mutated");
    }

    #[rstest]
    fn outsiders_are_forbidden() {
        let err = open_mission().complete(employee(9)).expect_err("forbidden");
        assert!(matches!(err, TransitionError::Forbidden { .. }));
    }

    #[rstest]
    fn completing_twice_is_an_invalid_transition() {
        let done = open_mission().complete(employee(3)).expect("completes");
        let err = done.complete(employee(3)).expect_err("already completed");
        assert_eq!(err, TransitionError::invalid("mission", "completed", "complete"));
        assert!(done.completed());
    }

    #[rstest]
    fn blank_titles_are_rejected() {
        let draft = NewMission {
            title: "  ".to_owned(),
            description: String::new(),
            assigned_to: user_id(3),
            supervisor: user_id(4),
            deadline: date(2024, 6, 1),
        };
        assert_eq!(draft.validate(), Err(DraftError::Empty { field: "title" }));
    }

    #[rstest]
    #[case::supervisor(employee(4), true)]
    #[case::admin(admin(), true)]
    #[case::assignee(employee(3), false)]
    fn supervisors_and_admins_edit(#[case] actor: Actor, #[case] ok: bool) {
        assert_eq!(open_mission().check_edit(actor).is_ok(), ok);
    }

    #[rstest]
    fn completed_missions_are_frozen() {
        let done = open_mission().complete(employee(3)).expect("completes");
        let err = done.check_edit(admin()).expect_err("completed");
        assert_eq!(err, TransitionError::invalid("mission", "completed", "edit"));
    }

    #[rstest]
    fn blank_title_edits_are_rejected() {
        let update = MissionUpdate {
            title: Some(" ".to_owned()),
            ..MissionUpdate::default()
        };
        assert_eq!(update.validate(), Err(DraftError::Empty { field: "title" }));
    }

    #[rstest]
    fn decodes_remote_payload_with_names() {
        let payload = serde_json::json!({
            "id": 20,
            "title": "Audit",
            "description": "Review",
            "assigned_to": 3,
            "assigned_to_name": "jdoe",
            "supervisor": 4,
            "supervisor_name": "boss",
            "deadline": "2024-03-31",
            "completed": false,
            "created_at": "2024-01-02T09:30:00Z"
        });
        let mission: Mission = serde_json::from_value(payload).expect("valid mission");
        assert_eq!(mission.assigned_to_name(), Some("jdoe"));
        assert_eq!(mission.supervisor(), user_id(4));
    }
}
