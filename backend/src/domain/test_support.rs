//! Builders shared by domain unit tests.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::domain::{
    Actor, Internship, InternshipId, JobApplication, JobApplicationId, Leave, LeaveId, Mission,
    MissionId, NewJobApplication, ApplicationType, ResumeArtifact, Role, UserId,
};

pub(crate) fn user_id(raw: u64) -> UserId {
    UserId::new(raw).expect("valid user id")
}

pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(crate) fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 2, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(crate) fn admin() -> Actor {
    Actor::new(user_id(1), Role::Admin)
}

pub(crate) fn employee(raw: u64) -> Actor {
    Actor::new(user_id(raw), Role::Employee)
}

pub(crate) fn intern(raw: u64) -> Actor {
    Actor::new(user_id(raw), Role::Intern)
}

/// Pending leave for user 2 covering 2024-01-10 to 2024-01-12.
pub(crate) fn pending_leave() -> Leave {
    Leave::pending(
        LeaveId::new(10).expect("valid leave id"),
        user_id(2),
        date(2024, 1, 10),
        date(2024, 1, 12),
        "family event",
        created_at(),
    )
}

/// Open mission assigned to user 3 and supervised by user 4.
pub(crate) fn open_mission() -> Mission {
    Mission::open(
        MissionId::new(20).expect("valid mission id"),
        "Quarterly audit",
        "Review expense reports",
        user_id(3),
        user_id(4),
        date(2024, 3, 31),
        created_at(),
    )
}

/// Pending internship for intern 5 supervised by user 4.
pub(crate) fn pending_internship() -> Internship {
    Internship::pending(
        InternshipId::new(30).expect("valid internship id"),
        user_id(5),
        user_id(4),
        date(2024, 2, 1),
        date(2024, 7, 31),
        created_at(),
    )
}

/// Pending job application for a backend developer position.
pub(crate) fn pending_application() -> JobApplication {
    JobApplication::pending(
        JobApplicationId::new(40).expect("valid application id"),
        &application_draft(),
        "cvs/ada.pdf",
        created_at(),
    )
}

pub(crate) fn pdf(size: usize) -> ResumeArtifact {
    ResumeArtifact::new("ada.pdf", "application/pdf", vec![0; size])
}

pub(crate) fn application_draft() -> NewJobApplication {
    NewJobApplication {
        application_type: ApplicationType::Employee,
        position: "Backend developer".to_owned(),
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        email: "ada@example.com".to_owned(),
        phone: "+33612345678".to_owned(),
        education: "MSc Mathematics".to_owned(),
        experience: "Ten years of analytical engines".to_owned(),
        motivation: "I enjoy building reliable services.".to_owned(),
        resume: pdf(2 * 1024 * 1024),
    }
}
