//! Job applications and the admin decision rule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::draft::{DraftError, require_email, require_min_chars, require_non_empty};
use crate::domain::{Actor, Decision, JobApplicationId, ResumeArtifact, TransitionError, UserId};

const ENTITY: &str = "job application";

/// Kind of position applied for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationType {
    /// Permanent position.
    Employee,
    /// Internship.
    Intern,
}

impl ApplicationType {
    /// Wire representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Intern => "intern",
        }
    }
}

/// Lifecycle state of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobApplicationStatus {
    /// Awaiting a decision.
    Pending,
    /// Accepted; terminal.
    Approved,
    /// Declined; terminal.
    Rejected,
}

impl JobApplicationStatus {
    fn after(decision: Decision) -> Self {
        match decision {
            Decision::Approve => Self::Approved,
            Decision::Reject => Self::Rejected,
        }
    }

    /// Wire representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// A candidate's submission for a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobApplication {
    id: JobApplicationId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<UserId>,
    application_type: ApplicationType,
    position: String,
    first_name: String,
    last_name: String,
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    education: String,
    #[serde(default)]
    experience: String,
    #[serde(default)]
    motivation: String,
    #[serde(default)]
    cv_file: String,
    status: JobApplicationStatus,
    created_at: DateTime<Utc>,
}

impl JobApplication {
    /// Build a freshly submitted application from its draft.
    pub fn pending(
        id: JobApplicationId,
        draft: &NewJobApplication,
        cv_file: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user: None,
            application_type: draft.application_type,
            position: draft.position.clone(),
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            education: draft.education.clone(),
            experience: draft.experience.clone(),
            motivation: draft.motivation.clone(),
            cv_file: cv_file.into(),
            status: JobApplicationStatus::Pending,
            created_at,
        }
    }

    /// Remote identifier.
    #[must_use]
    pub fn id(&self) -> JobApplicationId {
        self.id
    }

    /// Account that submitted the application, if any.
    #[must_use]
    pub fn user(&self) -> Option<UserId> {
        self.user
    }

    /// Kind of position.
    #[must_use]
    pub fn application_type(&self) -> ApplicationType {
        self.application_type
    }

    /// Position applied for.
    #[must_use]
    pub fn position(&self) -> &str {
        &self.position
    }

    /// Candidate's given name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Candidate's family name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Candidate's e-mail.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Candidate's phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Education summary.
    #[must_use]
    pub fn education(&self) -> &str {
        &self.education
    }

    /// Experience summary.
    #[must_use]
    pub fn experience(&self) -> &str {
        &self.experience
    }

    /// Motivation letter.
    #[must_use]
    pub fn motivation(&self) -> &str {
        &self.motivation
    }

    /// Reference to the stored résumé.
    #[must_use]
    pub fn cv_file(&self) -> &str {
        &self.cv_file
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> JobApplicationStatus {
        self.status
    }

    /// Creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Apply an administrator's decision.
    pub fn decide(&self, actor: Actor, decision: Decision) -> Result<Self, TransitionError> {
        if !actor.is_admin() {
            return Err(TransitionError::forbidden(
                ENTITY,
                actor.role(),
                decision.as_str(),
            ));
        }
        if self.status != JobApplicationStatus::Pending {
            return Err(TransitionError::invalid(
                ENTITY,
                self.status.as_str(),
                decision.as_str(),
            ));
        }
        let mut application = self.clone();
        application.status = JobApplicationStatus::after(decision);
        Ok(application)
    }

    /// Check that `actor` may correct the application's details.
    ///
    /// Administrators may edit while the application awaits a decision.
    pub fn check_edit(&self, actor: Actor) -> Result<(), TransitionError> {
        if !actor.is_admin() {
            return Err(TransitionError::forbidden(ENTITY, actor.role(), "edit"));
        }
        if self.status != JobApplicationStatus::Pending {
            return Err(TransitionError::invalid(ENTITY, self.status.as_str(), "edit"));
        }
        Ok(())
    }

    /// Shorthand for [`Self::decide`] with [`Decision::Approve`].
    pub fn approve(&self, actor: Actor) -> Result<Self, TransitionError> {
        self.decide(actor, Decision::Approve)
    }

    /// Shorthand for [`Self::decide`] with [`Decision::Reject`].
    pub fn reject(&self, actor: Actor) -> Result<Self, TransitionError> {
        self.decide(actor, Decision::Reject)
    }
}

/// Draft for a new application, including the résumé upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJobApplication {
    /// Kind of position.
    pub application_type: ApplicationType,
    /// Position applied for, at least three characters.
    pub position: String,
    /// Candidate's given name.
    pub first_name: String,
    /// Candidate's family name.
    pub last_name: String,
    /// Candidate's e-mail.
    pub email: String,
    /// Phone number, at least ten characters.
    pub phone: String,
    /// Education summary, at least ten characters.
    pub education: String,
    /// Experience summary, at least ten characters.
    pub experience: String,
    /// Motivation letter, at least twenty characters.
    pub motivation: String,
    /// Uploaded résumé.
    pub resume: ResumeArtifact,
}

impl NewJobApplication {
    /// Check the résumé first, then the text fields.
    pub fn validate(&self) -> Result<(), DraftError> {
        self.resume.validate()?;
        require_min_chars("position", &self.position, 3)?;
        require_non_empty("first_name", &self.first_name)?;
        require_non_empty("last_name", &self.last_name)?;
        require_email(&self.email)?;
        require_min_chars("phone", &self.phone, 10)?;
        require_min_chars("education", &self.education, 10)?;
        require_min_chars("experience", &self.experience, 10)?;
        require_min_chars("motivation", &self.motivation, 20)
    }

    /// Text fields sent alongside the résumé, in form order.
    #[must_use]
    pub fn form_fields(&self) -> [(&'static str, &str); 9] {
        [
            ("application_type", self.application_type.as_str()),
            ("position", self.position.as_str()),
            ("first_name", self.first_name.as_str()),
            ("last_name", self.last_name.as_str()),
            ("email", self.email.as_str()),
            ("phone", self.phone.as_str()),
            ("education", self.education.as_str()),
            ("experience", self.experience.as_str()),
            ("motivation", self.motivation.as_str()),
        ]
    }
}

/// Partial correction of an application, sent as
/// `PATCH job-applications/{id}/`.
///
/// The résumé and the status cannot be changed this way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobApplicationUpdate {
    /// Kind of position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_type: Option<ApplicationType>,
    /// Position applied for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// Candidate's given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Candidate's family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Candidate's e-mail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Education summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    /// Experience summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    /// Motivation letter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivation: Option<String>,
}

impl JobApplicationUpdate {
    /// Apply the submission rules to every field present.
    pub fn validate(&self) -> Result<(), DraftError> {
        let min_chars = [
            ("position", self.position.as_deref(), 3),
            ("phone", self.phone.as_deref(), 10),
            ("education", self.education.as_deref(), 10),
            ("experience", self.experience.as_deref(), 10),
            ("motivation", self.motivation.as_deref(), 20),
        ];
        for (field, value, min) in min_chars {
            if let Some(value) = value {
                require_min_chars(field, value, min)?;
            }
        }
        for (field, value) in [
            ("first_name", self.first_name.as_deref()),
            ("last_name", self.last_name.as_deref()),
        ] {
            if let Some(value) = value {
                require_non_empty(field, value)?;
            }
        }
        match self.email.as_deref() {
            Some(email) => require_email(email),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ResumeValidationError;
    use crate::domain::test_support::{
        admin, application_draft, employee, pdf, pending_application,
    };
    use rstest::rstest;

    #[rstest]
    #[case(Decision::Approve, JobApplicationStatus::Approved)]
    #[case(Decision::Reject, JobApplicationStatus::Rejected)]
    fn pending_applications_are_decided_once(
        #[case] decision: Decision,
        #[case] expected: JobApplicationStatus,
    ) {
        let decided = pending_application()
            .decide(admin(), decision)
            .expect("pending decides");
        assert_eq!(decided.status(), expected);

        for again in [Decision::Approve, Decision::Reject] {
            let err = decided.decide(admin(), again).expect_err("terminal");
            assert!(matches!(err, TransitionError::InvalidTransition { .. }));
        }
    }

    #[rstest]
    fn only_admins_decide() {
        let err = pending_application()
            .approve(employee(2))
            .expect_err("forbidden");
        assert!(matches!(err, TransitionError::Forbidden { .. }));
    }

    #[rstest]
    fn valid_draft_passes() {
        assert_eq!(application_draft().validate(), Ok(()));
    }

    #[rstest]
    fn six_mebibyte_pdf_fails_on_size() {
        let mut draft = application_draft();
        draft.resume = pdf(6 * 1024 * 1024);
        assert!(matches!(
            draft.validate(),
            Err(DraftError::Resume(ResumeValidationError::SizeExceeded { .. }))
        ));
    }

    #[rstest]
    fn text_resume_fails_on_type() {
        let mut draft = application_draft();
        draft.resume = ResumeArtifact::new("cv.txt", "text/plain", vec![0; 2 * 1024 * 1024]);
        assert!(matches!(
            draft.validate(),
            Err(DraftError::Resume(ResumeValidationError::UnsupportedType { .. }))
        ));
    }

    #[rstest]
    #[case::short_position(|d: &mut NewJobApplication| d.position = "QA".to_owned(), "position")]
    #[case::bad_email(|d: &mut NewJobApplication| d.email = "ada.example.com".to_owned(), "email")]
    #[case::short_phone(|d: &mut NewJobApplication| d.phone = "0612".to_owned(), "phone")]
    #[case::short_motivation(|d: &mut NewJobApplication| d.motivation = "Hire me".to_owned(), "motivation")]
    fn invalid_fields_are_reported(
        #[case] mutate: fn(&mut NewJobApplication),
        #[case] field: &str,
    ) {
        let mut draft = application_draft();
        mutate(&mut draft);
        let err = draft.validate().expect_err("invalid draft");
        assert!(err.to_string().contains(field), "{err}");
    }

    #[rstest]
    fn decided_applications_cannot_be_edited() {
        let rejected = pending_application().reject(admin()).expect("rejects");
        assert_eq!(
            rejected.check_edit(admin()),
            Err(TransitionError::invalid("job application", "rejected", "edit"))
        );
        assert!(matches!(
            pending_application().check_edit(employee(2)),
            Err(TransitionError::Forbidden { .. })
        ));
    }

    #[rstest]
    #[case::valid_phone(JobApplicationUpdate { phone: Some("+33698765432".to_owned()), ..JobApplicationUpdate::default() }, None)]
    #[case::short_phone(JobApplicationUpdate { phone: Some("0612".to_owned()), ..JobApplicationUpdate::default() }, Some("phone"))]
    #[case::bad_email(JobApplicationUpdate { email: Some("nobody".to_owned()), ..JobApplicationUpdate::default() }, Some("email"))]
    #[case::blank_name(JobApplicationUpdate { last_name: Some(String::new()), ..JobApplicationUpdate::default() }, Some("last_name"))]
    fn edits_follow_submission_rules(
        #[case] update: JobApplicationUpdate,
        #[case] failing_field: Option<&str>,
    ) {
        match (update.validate(), failing_field) {
            (Ok(()), None) => {}
            (Err(err), Some(field)) => assert!(err.to_string().contains(field), "{err}"),
            (outcome, expected) => panic!("unexpected {outcome:?} for {expected:?}"),
        }
    }

    #[rstest]
    fn created_applications_start_pending() {
        let application = pending_application();
        assert_eq!(application.status(), JobApplicationStatus::Pending);
        assert_eq!(application.position(), "Backend developer");
    }
}
