//! Tests for the client facade.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ports::{
    HrApiError, MockAuthApi, MockDecisionNotifier, MockInternshipsApi, MockJobApplicationsApi,
    MockLeavesApi, MockMissionsApi, MockUsersApi, MockWorkHoursApi,
};
use crate::domain::test_support::{application_draft, date, pdf, pending_leave, user_id};
use crate::domain::{ErrorCode, LeaveBalance, LeaveStatus, Role};

#[derive(Default)]
struct Mocks {
    auth: MockAuthApi,
    users: MockUsersApi,
    leaves: MockLeavesApi,
    missions: MockMissionsApi,
    work_hours: MockWorkHoursApi,
    internships: MockInternshipsApi,
    job_applications: MockJobApplicationsApi,
    notifier: MockDecisionNotifier,
}

impl Mocks {
    fn into_client(self) -> HrClient {
        let ports = HrPorts {
            users: Arc::new(self.users),
            leaves: Arc::new(self.leaves),
            missions: Arc::new(self.missions),
            work_hours: Arc::new(self.work_hours),
            internships: Arc::new(self.internships),
            job_applications: Arc::new(self.job_applications),
        };
        HrClient::from_ports(Arc::new(self.auth), ports, Arc::new(self.notifier))
    }
}

fn admin_user() -> User {
    User::new(user_id(1), "root", Role::Admin).with_leave_balance(LeaveBalance::new(20))
}

fn requester() -> User {
    User::new(user_id(2), "jdoe", Role::Employee).with_leave_balance(LeaveBalance::new(5))
}

fn credentials() -> Credentials {
    Credentials::new("root", "hunter2")
}

async fn signed_in(mut mocks: Mocks, user: User) -> HrClient {
    mocks.auth.expect_login().times(1).return_once(|_| Ok(()));
    mocks
        .users
        .expect_current_user()
        .times(1)
        .return_once(move || Ok(user));
    let client = mocks.into_client();
    client.login(&credentials()).await.expect("signs in");
    client
}

#[rstest]
#[tokio::test]
async fn login_caches_the_current_user() {
    let client = signed_in(Mocks::default(), admin_user()).await;

    let actor = client.actor().expect("actor");
    assert!(actor.is_admin());
    assert!(client.capabilities().contains(&Capability::DecideLeave));
    assert_eq!(
        client.read(|store| store.current_user().map(User::username).map(str::to_owned)),
        Some("root".to_owned())
    );
}

#[rstest]
#[tokio::test]
async fn failed_login_leaves_the_session_empty() {
    let mut mocks = Mocks::default();
    mocks
        .auth
        .expect_login()
        .return_once(|_| Err(HrApiError::unauthenticated("bad credentials")));
    mocks.users.expect_current_user().times(0);
    let client = mocks.into_client();

    let error = client.login(&credentials()).await.expect_err("refused");

    assert_eq!(error.code(), ErrorCode::Unauthenticated);
    assert!(client.actor().is_err());
    assert!(client.capabilities().is_empty());
}

#[rstest]
#[tokio::test]
async fn actions_require_a_signed_in_user() {
    let mut mocks = Mocks::default();
    mocks.leaves.expect_get_leave().times(0);
    let client = mocks.into_client();

    let error = client
        .approve_leave(pending_leave().id())
        .await
        .expect_err("signed out");

    assert_eq!(error.code(), ErrorCode::Unauthenticated);
}

#[rstest]
#[tokio::test]
async fn approving_a_leave_updates_leave_and_balance_in_the_store() {
    let mut mocks = Mocks::default();
    mocks
        .leaves
        .expect_list_leaves()
        .return_once(|| Ok(vec![pending_leave()]));
    mocks
        .leaves
        .expect_get_leave()
        .return_once(|_| Ok(pending_leave()));
    mocks
        .leaves
        .expect_approve_leave()
        .times(1)
        .return_once(|_| Ok(()));
    mocks
        .users
        .expect_list_users()
        .return_once(|| Ok(vec![admin_user(), requester()]));
    mocks
        .users
        .expect_get_user()
        .return_once(|_| Ok(requester()));
    let client = signed_in(mocks, admin_user()).await;
    client.fetch_leaves().await.expect("leaves");
    client
        .fetch_users(&UserFilter::default())
        .await
        .expect("users");

    let leave = client
        .approve_leave(pending_leave().id())
        .await
        .expect("approves");

    assert_eq!(leave.status(), LeaveStatus::Approved);
    let store = client.snapshot();
    assert_eq!(
        store.leaves.get(leave.id()).map(Leave::status),
        Some(LeaveStatus::Approved)
    );
    assert_eq!(
        store.users.get(user_id(2)).map(User::leave_balance),
        Some(LeaveBalance::new(2))
    );
    assert!(!store.leaves.is_loading());
}

#[rstest]
#[tokio::test]
async fn rejected_transitions_are_recorded_in_the_store() {
    let mut mocks = Mocks::default();
    mocks.leaves.expect_get_leave().return_once(|_| {
        let approved = pending_leave()
            .approve(crate::domain::test_support::admin(), LeaveBalance::new(5))
            .expect("approves")
            .into_leave();
        Ok(approved)
    });
    mocks.leaves.expect_reject_leave().times(0);
    let client = signed_in(mocks, admin_user()).await;

    let error = client
        .reject_leave(pending_leave().id())
        .await
        .expect_err("already approved");

    assert_eq!(error.code(), ErrorCode::InvalidTransition);
    let store = client.snapshot();
    assert_eq!(
        store.leaves.error().map(Error::code),
        Some(ErrorCode::InvalidTransition)
    );
    assert!(!store.leaves.is_loading());
}

#[rstest]
#[tokio::test]
async fn oversized_resume_is_recorded_without_upload() {
    let mut mocks = Mocks::default();
    mocks.job_applications.expect_submit_job_application().times(0);
    let client = mocks.into_client();
    let mut draft = application_draft();
    draft.resume = pdf(6 * 1024 * 1024);

    let error = client
        .submit_job_application(draft)
        .await
        .expect_err("too large");

    assert_eq!(error.code(), ErrorCode::SizeExceeded);
    assert_eq!(
        client.read(|store| store.job_applications.error().map(Error::code)),
        Some(ErrorCode::SizeExceeded)
    );
}

#[rstest]
#[tokio::test]
async fn logout_clears_tokens_and_cache() {
    let mut mocks = Mocks::default();
    mocks.auth.expect_logout().times(1).return_const(());
    let client = signed_in(mocks, admin_user()).await;

    client.logout();

    assert!(client.actor().is_err());
    assert_eq!(client.snapshot(), HrStore::default());
}

#[rstest]
#[tokio::test]
async fn dashboard_stats_use_cached_collections() {
    let mut mocks = Mocks::default();
    mocks
        .leaves
        .expect_list_leaves()
        .return_once(|| Ok(vec![pending_leave()]));
    let client = signed_in(mocks, admin_user()).await;
    client.fetch_leaves().await.expect("leaves");

    let stats = client.dashboard_stats(crate::domain::test_support::date(2024, 1, 1));

    assert_eq!(stats.pending_leaves, 1);
    assert_eq!(stats.active_missions, 0);
}

#[rstest]
#[tokio::test]
async fn edited_leaves_replace_the_cached_copy() {
    let moved = Leave::pending(
        pending_leave().id(),
        user_id(2),
        date(2024, 1, 11),
        date(2024, 1, 12),
        "family event",
        crate::domain::test_support::created_at(),
    );
    let mut mocks = Mocks::default();
    mocks
        .leaves
        .expect_list_leaves()
        .return_once(|| Ok(vec![pending_leave()]));
    mocks
        .leaves
        .expect_get_leave()
        .return_once(|_| Ok(pending_leave()));
    mocks
        .leaves
        .expect_update_leave()
        .times(1)
        .return_once(move |_, _| Ok(moved));
    let client = signed_in(mocks, requester()).await;
    client.fetch_leaves().await.expect("leaves");
    let update = LeaveUpdate {
        start_date: Some(date(2024, 1, 11)),
        ..LeaveUpdate::default()
    };

    client
        .update_leave(pending_leave().id(), &update)
        .await
        .expect("edits");

    assert_eq!(
        client.read(|store| store.leaves.get(pending_leave().id()).map(Leave::days)),
        Some(2)
    );
}

#[rstest]
#[tokio::test]
async fn access_decisions_update_the_users_collection() {
    let mut mocks = Mocks::default();
    mocks.users.expect_list_users().return_once(|| {
        Ok(vec![
            admin_user(),
            User::requested(user_id(5), "newcomer", Role::Intern),
            User::requested(user_id(6), "spam", Role::Employee),
        ])
    });
    mocks.users.expect_get_user().returning(|id| {
        let name = if id == user_id(5) { "newcomer" } else { "spam" };
        Ok(User::requested(id, name, Role::Intern))
    });
    mocks
        .users
        .expect_approve_user()
        .times(1)
        .return_once(|_| Ok(()));
    mocks
        .users
        .expect_reject_user()
        .times(1)
        .return_once(|_| Ok(()));
    let client = signed_in(mocks, admin_user()).await;

    let pending = client.fetch_access_requests().await.expect("pending");
    assert_eq!(pending.len(), 2);

    let approved = client.approve_user(user_id(5)).await.expect("approves");
    client.reject_user(user_id(6)).await.expect("rejects");

    assert!(approved.is_active());
    let store = client.snapshot();
    assert_eq!(
        store.users.get(user_id(5)).map(User::is_active),
        Some(true)
    );
    assert!(store.users.get(user_id(6)).is_none());
}

#[rstest]
#[tokio::test]
async fn deleted_users_leave_the_cache() {
    let mut mocks = Mocks::default();
    mocks
        .users
        .expect_list_users()
        .return_once(|| Ok(vec![admin_user(), requester()]));
    mocks
        .users
        .expect_delete_user()
        .times(1)
        .return_once(|_| Ok(()));
    let client = signed_in(mocks, admin_user()).await;
    client
        .fetch_users(&UserFilter::default())
        .await
        .expect("users");

    client.delete_user(user_id(2)).await.expect("deletes");

    assert!(client.read(|store| store.users.get(user_id(2)).is_none()));
}

#[rstest]
#[tokio::test]
async fn access_requests_need_no_session() {
    let mut mocks = Mocks::default();
    mocks
        .users
        .expect_request_access()
        .times(1)
        .return_once(|_| Ok(User::requested(user_id(7), "newcomer", Role::Intern)));
    let client = mocks.into_client();
    let request = AccessRequest::new("newcomer", "new@example.com", "s3cret", Role::Intern);

    let user = client.request_access(&request).await.expect("requested");

    assert!(!user.is_active());
    assert!(client.read(|store| store.users.get(user_id(7)).is_none()));
}
