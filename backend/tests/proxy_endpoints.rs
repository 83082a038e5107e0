//! Behavioural tests for the proxy scope: guarded actions and verbatim
//! forwarding against a live upstream.

mod hr_support;

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::{AUTHORIZATION, CONTENT_TYPE};
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use hr_backend::Trace;
use hr_backend::domain::ports::NoOpDecisionNotifier;
use hr_backend::inbound::http::api_scope;
use hr_backend::inbound::http::state::HttpState;
use hr_support::{ADMIN_TOKEN, ECHO_CONTENT_TYPE, EMPLOYEE_TOKEN, FakeUpstream, spawn_upstream};
use rstest::rstest;
use serde_json::Value;
use url::Url;

async fn proxy_app(
    base: Url,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    let state = HttpState::new(
        reqwest::Client::new(),
        base,
        "hr-proxy-tests",
        Arc::new(NoOpDecisionNotifier),
    );
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .service(api_scope()),
    )
    .await
}

fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {token}"))
}

#[rstest]
#[actix_rt::test]
async fn admin_approval_returns_the_approved_leave() {
    let upstream = spawn_upstream(FakeUpstream::new()).await;
    let app = proxy_app(upstream.base.clone()).await;

    let request = TestRequest::post()
        .uri("/api/leaves/9/approve_leave/")
        .insert_header(bearer(ADMIN_TOKEN))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["status"], "approved");
    assert_eq!(upstream.fake.calls("POST", "/api/leaves/9/approve_leave/"), 1);
    upstream.stop().await;
}

#[rstest]
#[case::employee_cannot_decide(EMPLOYEE_TOKEN, 9, StatusCode::FORBIDDEN, "forbidden")]
#[case::decided_leave_is_final(ADMIN_TOKEN, 10, StatusCode::CONFLICT, "invalid_transition")]
#[actix_rt::test]
async fn refused_approvals_never_reach_the_action_endpoint(
    #[case] token: &str,
    #[case] leave_id: u64,
    #[case] status: StatusCode,
    #[case] code: &str,
) {
    let upstream = spawn_upstream(FakeUpstream::new()).await;
    let app = proxy_app(upstream.base.clone()).await;

    let request = TestRequest::post()
        .uri(&format!("/api/leaves/{leave_id}/approve_leave/"))
        .insert_header(bearer(token))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), status);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], code);
    assert_eq!(
        upstream
            .fake
            .calls("POST", &format!("/api/leaves/{leave_id}/approve_leave/")),
        0
    );
    upstream.stop().await;
}

#[rstest]
#[actix_rt::test]
async fn other_requests_are_forwarded_verbatim() {
    let upstream = spawn_upstream(FakeUpstream::new()).await;
    let app = proxy_app(upstream.base.clone()).await;

    let request = TestRequest::put()
        .uri("/api/echo/reports/?page=2&search=ada")
        .insert_header(bearer(EMPLOYEE_TOKEN))
        .insert_header((CONTENT_TYPE, "application/json"))
        .set_payload(r#"{"hours":7.5}"#)
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(
        response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some(ECHO_CONTENT_TYPE)
    );
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["method"], "PUT");
    assert_eq!(body["path"], "/api/echo/reports/");
    assert_eq!(body["query"], "page=2&search=ada");
    assert_eq!(
        body["authorization"],
        format!("Bearer {EMPLOYEE_TOKEN}").as_str()
    );
    assert_eq!(body["body"], r#"{"hours":7.5}"#);
    upstream.stop().await;
}

#[rstest]
#[actix_rt::test]
async fn forwarded_401_is_relayed_without_refresh() {
    let upstream = spawn_upstream(FakeUpstream::new()).await;
    let app = proxy_app(upstream.base.clone()).await;

    let request = TestRequest::get()
        .uri("/api/users/me/")
        .insert_header(bearer(hr_support::STALE_TOKEN))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(upstream.fake.calls("POST", "/api/token/refresh/"), 0);
    upstream.stop().await;
}

#[rstest]
#[actix_rt::test]
async fn unreachable_upstream_yields_bad_gateway() {
    let base = Url::parse("http://127.0.0.1:1/api/").expect("url");
    let app = proxy_app(base).await;

    let request = TestRequest::get()
        .uri("/api/leaves/")
        .insert_header(bearer(ADMIN_TOKEN))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "network_error");
    assert!(body["traceId"].is_string());
}

#[rstest]
#[actix_rt::test]
async fn guarded_actions_require_a_bearer_token() {
    let upstream = spawn_upstream(FakeUpstream::new()).await;
    let app = proxy_app(upstream.base.clone()).await;

    let request = TestRequest::post()
        .uri("/api/leaves/9/approve_leave/")
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(upstream.fake.calls("GET", "/api/users/me/"), 0);
    upstream.stop().await;
}

#[rstest]
#[case::absolute_url(None)]
#[case::parent_segments(Some("/api/leaves/../../internal-secret"))]
#[actix_rt::test]
async fn forwarding_never_leaves_the_api_base(#[case] uri: Option<&str>) {
    let upstream = spawn_upstream(FakeUpstream::new()).await;
    let app = proxy_app(upstream.base.clone()).await;
    let host = upstream.base.host_str().expect("host");
    let port = upstream.base.port().expect("port");
    let uri = uri.map_or_else(
        || format!("/api/http://{host}:{port}/internal-secret"),
        str::to_owned,
    );

    let request = TestRequest::get()
        .uri(&uri)
        .insert_header(bearer(ADMIN_TOKEN))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(upstream.fake.calls("GET", "/internal-secret"), 0);
    upstream.stop().await;
}

fn application_upload(cv_media_type: &str, cv: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        b"--hr-boundary\r\n\
          Content-Disposition: form-data; name=\"position\"\r\n\r\n\
          Backend developer\r\n\
          --hr-boundary\r\n\
          Content-Disposition: form-data; name=\"cv_file\"; filename=\"cv\"\r\n",
    );
    body.extend_from_slice(format!("Content-Type: {cv_media_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(cv);
    body.extend_from_slice(b"\r\n--hr-boundary--\r\n");
    body
}

#[rstest]
#[case::oversized("application/pdf", 6 * 1024 * 1024, StatusCode::PAYLOAD_TOO_LARGE, "size_exceeded")]
#[case::oversized_wins_over_type("text/plain", 6 * 1024 * 1024, StatusCode::PAYLOAD_TOO_LARGE, "size_exceeded")]
#[case::plain_text("text/plain", 1024, StatusCode::UNSUPPORTED_MEDIA_TYPE, "unsupported_type")]
#[case::image("image/png", 1024, StatusCode::UNSUPPORTED_MEDIA_TYPE, "unsupported_type")]
#[actix_rt::test]
async fn refused_resumes_never_reach_the_api(
    #[case] media_type: &str,
    #[case] size: usize,
    #[case] status: StatusCode,
    #[case] code: &str,
) {
    let upstream = spawn_upstream(FakeUpstream::new()).await;
    let app = proxy_app(upstream.base.clone()).await;

    let request = TestRequest::post()
        .uri("/api/job-applications/")
        .insert_header((CONTENT_TYPE, "multipart/form-data; boundary=hr-boundary"))
        .set_payload(application_upload(media_type, &vec![b'x'; size]))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), status);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], code);
    assert_eq!(upstream.fake.calls("POST", "/api/job-applications/"), 0);
    upstream.stop().await;
}

#[rstest]
#[actix_rt::test]
async fn accepted_uploads_are_relayed_unchanged() {
    let upstream = spawn_upstream(FakeUpstream::new()).await;
    let app = proxy_app(upstream.base.clone()).await;
    let payload = application_upload("application/pdf", b"%PDF-1.7");

    let request = TestRequest::post()
        .uri("/api/job-applications/")
        .insert_header((CONTENT_TYPE, "multipart/form-data; boundary=hr-boundary"))
        .set_payload(payload.clone())
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["cv_file"], "cvs/cv.pdf");
    let relayed = upstream
        .fake
        .last("POST", "/api/job-applications/")
        .expect("upload relayed");
    assert_eq!(relayed.body, payload);
    assert_eq!(
        relayed.content_type.as_deref(),
        Some("multipart/form-data; boundary=hr-boundary")
    );
    upstream.stop().await;
}

#[rstest]
#[actix_rt::test]
async fn listing_applications_is_still_forwarded() {
    let upstream = spawn_upstream(FakeUpstream::new()).await;
    let app = proxy_app(upstream.base.clone()).await;

    let request = TestRequest::get()
        .uri("/api/job-applications/")
        .insert_header(bearer(ADMIN_TOKEN))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(upstream.fake.calls("GET", "/api/job-applications/"), 1);
    upstream.stop().await;
}
