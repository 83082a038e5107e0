//! Behavioural tests for the reqwest HR API adapter against a live socket.

mod hr_support;

use std::sync::Arc;
use std::time::Duration;

use hr_backend::domain::ports::{
    AccessRequest, AuthApi, Credentials, HrApiError, InternshipsApi, JobApplicationsApi,
    LeavesApi, MissionsApi, UsersApi,
};
use hr_backend::domain::{
    ApplicationType, LeaveId, LeaveUpdate, NewJobApplication, ResumeArtifact, Role, UserId,
};
use hr_backend::outbound::hr_api::{HrApiHttpClient, TokenSession};
use hr_support::{ADMIN_TOKEN, EMPLOYEE_TOKEN, FakeUpstream, spawn_upstream};
use rstest::rstest;

fn credentials() -> Credentials {
    Credentials::new("root", "hunter2")
}

fn adapter(base: url::Url) -> HrApiHttpClient {
    HrApiHttpClient::new(base, Duration::from_secs(5), "hr-backend-tests").expect("client builds")
}

fn signed_in_as(base: url::Url, token: &str) -> HrApiHttpClient {
    HrApiHttpClient::with_client(
        reqwest::Client::new(),
        base,
        Arc::new(TokenSession::bearer_only(token)),
    )
}

#[rstest]
#[actix_rt::test]
async fn expired_access_token_is_refreshed_once_and_retried() {
    let upstream = spawn_upstream(FakeUpstream::new()).await;
    let api = adapter(upstream.base.clone());
    api.login(&credentials()).await.expect("login succeeds");

    let me = api.current_user().await.expect("retried after refresh");

    assert_eq!(me.role(), Role::Admin);
    assert_eq!(upstream.fake.calls("POST", "/api/token/refresh/"), 1);
    assert_eq!(upstream.fake.calls("GET", "/api/users/me/"), 2);
    let retried = upstream
        .fake
        .last("GET", "/api/users/me/")
        .expect("retry recorded");
    assert_eq!(
        retried.authorization.as_deref(),
        Some(format!("Bearer {ADMIN_TOKEN}").as_str())
    );
    assert_eq!(
        api.session().access().map(|token| token.as_str().to_owned()),
        Some(ADMIN_TOKEN.to_owned())
    );
    upstream.stop().await;
}

#[rstest]
#[actix_rt::test]
async fn failed_refresh_ends_the_session() {
    let upstream = spawn_upstream(FakeUpstream::with_failing_refresh()).await;
    let api = adapter(upstream.base.clone());
    api.login(&credentials()).await.expect("login succeeds");

    let error = api.current_user().await.expect_err("refresh refused");

    assert!(matches!(error, HrApiError::Unauthenticated { .. }));
    assert!(!api.is_authenticated());
    assert_eq!(upstream.fake.calls("GET", "/api/users/me/"), 1);
    upstream.stop().await;
}

#[rstest]
#[actix_rt::test]
async fn rejected_retry_after_refresh_ends_the_session() {
    let upstream = spawn_upstream(FakeUpstream::with_revoked_refresh()).await;
    let api = adapter(upstream.base.clone());
    api.login(&credentials()).await.expect("login succeeds");

    let error = api.current_user().await.expect_err("retry rejected");

    assert!(matches!(error, HrApiError::Unauthenticated { .. }));
    assert!(!api.is_authenticated());
    assert_eq!(upstream.fake.calls("POST", "/api/token/refresh/"), 1);
    assert_eq!(upstream.fake.calls("GET", "/api/users/me/"), 2);
    upstream.stop().await;
}

#[rstest]
#[actix_rt::test]
async fn without_refresh_token_a_401_is_final() {
    let upstream = spawn_upstream(FakeUpstream::new()).await;
    let api = signed_in_as(upstream.base.clone(), hr_support::STALE_TOKEN);

    let error = api.current_user().await.expect_err("stale token");

    assert!(matches!(error, HrApiError::Unauthenticated { .. }));
    assert_eq!(upstream.fake.calls("POST", "/api/token/refresh/"), 0);
    upstream.stop().await;
}

#[rstest]
#[actix_rt::test]
async fn error_statuses_map_to_port_errors() {
    let upstream = spawn_upstream(FakeUpstream::new()).await;
    let api = signed_in_as(upstream.base.clone(), ADMIN_TOKEN);

    let unavailable = api.list_missions().await.expect_err("maintenance");
    assert_eq!(
        unavailable,
        HrApiError::upstream(503_u16, "status 503: maintenance window")
    );

    let missing = api.list_internships().await.expect_err("no such route");
    assert!(matches!(missing, HrApiError::NotFound { .. }));
    upstream.stop().await;
}

#[rstest]
#[actix_rt::test]
async fn unreachable_upstream_is_a_transport_error() {
    let base = url::Url::parse("http://127.0.0.1:1/api/").expect("url");
    let api = signed_in_as(base, ADMIN_TOKEN);

    let error = api.current_user().await.expect_err("connection refused");

    assert!(matches!(
        error,
        HrApiError::Transport { .. } | HrApiError::Timeout { .. }
    ));
}

#[rstest]
#[actix_rt::test]
async fn job_applications_upload_the_resume_as_multipart() {
    let upstream = spawn_upstream(FakeUpstream::new()).await;
    let api = signed_in_as(upstream.base.clone(), ADMIN_TOKEN);
    let draft = NewJobApplication {
        application_type: ApplicationType::Employee,
        position: "Backend developer".to_owned(),
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        email: "ada@example.com".to_owned(),
        phone: "+44 20 7946 0000".to_owned(),
        education: "MSc Mathematics".to_owned(),
        experience: "Ten years of analytical engines".to_owned(),
        motivation: "I would like to build payroll tooling.".to_owned(),
        resume: ResumeArtifact::new("cv.pdf", "application/pdf", b"%PDF-1.7".to_vec()),
    };

    let created = api
        .submit_job_application(draft)
        .await
        .expect("application created");

    assert_eq!(created.cv_file(), "cvs/cv.pdf");
    let request = upstream
        .fake
        .last("POST", "/api/job-applications/")
        .expect("upload recorded");
    assert!(
        request
            .content_type
            .as_deref()
            .is_some_and(|value| value.starts_with("multipart/form-data"))
    );
    let body = String::from_utf8_lossy(&request.body);
    assert!(body.contains(r#"name="cv_file"; filename="cv.pdf""#));
    assert!(body.contains(r#"name="application_type""#));
    assert!(body.contains("%PDF-1.7"));
    upstream.stop().await;
}

#[rstest]
#[actix_rt::test]
async fn leave_edits_patch_only_the_changed_fields() {
    let upstream = spawn_upstream(FakeUpstream::new()).await;
    let api = signed_in_as(upstream.base.clone(), EMPLOYEE_TOKEN);
    let update = LeaveUpdate {
        start_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 11),
        ..LeaveUpdate::default()
    };

    let leave = api
        .update_leave(LeaveId::new(9).expect("leave id"), &update)
        .await
        .expect("patched");

    assert_eq!(leave.days(), 2);
    let request = upstream
        .fake
        .last("PATCH", "/api/leaves/9/")
        .expect("patch recorded");
    let body: serde_json::Value = serde_json::from_slice(&request.body).expect("json body");
    assert_eq!(body, serde_json::json!({ "start_date": "2024-01-11" }));
    upstream.stop().await;
}

#[rstest]
#[actix_rt::test]
async fn access_requests_are_sent_without_a_token() {
    let upstream = spawn_upstream(FakeUpstream::new()).await;
    let api = adapter(upstream.base.clone());
    let request = AccessRequest::new("newcomer", "new@example.com", "s3cret", Role::Intern)
        .with_names("New", "Comer");

    let user = api.request_access(&request).await.expect("requested");

    assert!(!user.is_active());
    let sent = upstream
        .fake
        .last("POST", "/api/users/request-access/")
        .expect("request recorded");
    assert!(sent.authorization.is_none());
    let body: serde_json::Value = serde_json::from_slice(&sent.body).expect("json body");
    assert_eq!(body["user_type"], "intern");
    assert_eq!(body["first_name"], "New");
    upstream.stop().await;
}

#[rstest]
#[actix_rt::test]
async fn account_administration_hits_the_user_endpoints() {
    let upstream = spawn_upstream(FakeUpstream::new()).await;
    let api = signed_in_as(upstream.base.clone(), ADMIN_TOKEN);
    let newcomer = UserId::new(7).expect("user id");

    api.approve_user(newcomer).await.expect("approved");
    api.reject_user(newcomer).await.expect("rejected");
    api.delete_user(UserId::new(2).expect("user id"))
        .await
        .expect("deleted");

    assert_eq!(upstream.fake.calls("POST", "/api/users/7/approve/"), 1);
    assert_eq!(upstream.fake.calls("POST", "/api/users/7/reject/"), 1);
    assert_eq!(upstream.fake.calls("DELETE", "/api/users/2/"), 1);
    upstream.stop().await;
}
