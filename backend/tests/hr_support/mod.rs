//! In-process stand-in for the remote HR API.
//!
//! Every request is recorded and answered from a fixed script keyed on
//! method, path, and bearer token. Tokens:
//!
//! - [`STALE_TOKEN`]: issued by `POST token/`, always rejected with `401`
//! - [`ADMIN_TOKEN`]: issued by `POST token/refresh/`, acts as user 1 (admin)
//! - [`EMPLOYEE_TOKEN`]: acts as user 2 (employee)

use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderName};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::{Value, json};
use url::Url;

pub const STALE_TOKEN: &str = "stale-access";
pub const ADMIN_TOKEN: &str = "admin-access";
pub const EMPLOYEE_TOKEN: &str = "employee-access";
pub const REFRESH_TOKEN: &str = "refresh-1";

/// Content type used by the echo endpoint so relays are observable.
pub const ECHO_CONTENT_TYPE: &str = "application/vnd.echo+json";

/// One request as the upstream saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

#[derive(Clone, Default)]
pub struct FakeUpstream {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    refresh_fails: bool,
    refresh_revoked: bool,
}

impl FakeUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upstream whose refresh endpoint rejects every refresh token.
    pub fn with_failing_refresh() -> Self {
        Self {
            refresh_fails: true,
            ..Self::default()
        }
    }

    /// Upstream whose refresh endpoint hands out an access token that is
    /// already rejected.
    pub fn with_revoked_refresh() -> Self {
        Self {
            refresh_revoked: true,
            ..Self::default()
        }
    }

    /// Number of requests seen for `method` and `path`.
    pub fn calls(&self, method: &str, path: &str) -> usize {
        self.requests
            .lock()
            .expect("request log lock")
            .iter()
            .filter(|request| request.method == method && request.path == path)
            .count()
    }

    /// Most recent request for `method` and `path`.
    pub fn last(&self, method: &str, path: &str) -> Option<RecordedRequest> {
        self.requests
            .lock()
            .expect("request log lock")
            .iter()
            .rev()
            .find(|request| request.method == method && request.path == path)
            .cloned()
    }

    fn record(&self, request: RecordedRequest) {
        self.requests
            .lock()
            .expect("request log lock")
            .push(request);
    }
}

/// A running upstream bound to an ephemeral local port.
pub struct RunningUpstream {
    pub fake: FakeUpstream,
    pub base: Url,
    handle: ServerHandle,
}

impl RunningUpstream {
    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

/// Start `fake` on `127.0.0.1:0`; `base` points at its `/api/` root.
pub async fn spawn_upstream(fake: FakeUpstream) -> RunningUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local address");
    let data = web::Data::new(fake.clone());

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .default_service(web::to(handle))
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .expect("listen")
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    RunningUpstream {
        fake,
        base: Url::parse(&format!("http://{addr}/api/")).expect("base url"),
        handle,
    }
}

async fn handle(state: web::Data<FakeUpstream>, req: HttpRequest, body: web::Bytes) -> HttpResponse {
    let header = |name: HeaderName| {
        req.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };
    let recorded = RecordedRequest {
        method: req.method().as_str().to_owned(),
        path: req.path().to_owned(),
        query: req.query_string().to_owned(),
        authorization: header(AUTHORIZATION),
        content_type: header(CONTENT_TYPE),
        body: body.to_vec(),
    };
    state.record(recorded.clone());
    respond(&state, &recorded)
}

fn respond(state: &FakeUpstream, request: &RecordedRequest) -> HttpResponse {
    let method = request.method.as_str();
    let path = request.path.as_str();

    if path.starts_with("/api/echo/") {
        return echo(request);
    }
    match (method, path) {
        ("POST", "/api/token/") => {
            return HttpResponse::Ok().json(json!({ "access": STALE_TOKEN, "refresh": REFRESH_TOKEN }));
        }
        ("POST", "/api/token/refresh/") if state.refresh_fails => {
            return HttpResponse::Unauthorized()
                .json(json!({ "detail": "Token is invalid or expired" }));
        }
        ("POST", "/api/token/refresh/") if state.refresh_revoked => {
            return HttpResponse::Ok().json(json!({ "access": STALE_TOKEN }));
        }
        ("POST", "/api/token/refresh/") => {
            return HttpResponse::Ok().json(json!({ "access": ADMIN_TOKEN }));
        }
        ("POST", "/api/users/request-access/") => {
            return HttpResponse::Created().json(requested());
        }
        ("POST", "/api/job-applications/") => {
            return HttpResponse::Created().json(application());
        }
        _ => {}
    }

    let bearer = request
        .authorization
        .as_deref()
        .and_then(|value| value.strip_prefix("Bearer "));
    let caller = match bearer {
        Some(ADMIN_TOKEN) => admin(),
        Some(EMPLOYEE_TOKEN) => employee(),
        _ => {
            return HttpResponse::Unauthorized()
                .json(json!({ "detail": "Given token not valid for any token type" }));
        }
    };

    match (method, path) {
        ("GET", "/api/users/me/") => HttpResponse::Ok().json(caller),
        ("GET", "/api/users/2/") => HttpResponse::Ok().json(employee()),
        ("GET", "/api/users/7/") => HttpResponse::Ok().json(requested()),
        ("DELETE", "/api/users/2/") => HttpResponse::NoContent().finish(),
        ("POST", "/api/users/7/approve/") => {
            HttpResponse::Ok().json(json!({ "status": "user approved" }))
        }
        ("POST", "/api/users/7/reject/") => {
            HttpResponse::Ok().json(json!({ "status": "user rejected" }))
        }
        ("PATCH", "/api/leaves/9/") => HttpResponse::Ok().json(json!({
            "id": 9,
            "user": 2,
            "start_date": "2024-01-11",
            "end_date": "2024-01-12",
            "reason": "family event",
            "status": "pending",
            "created_at": "2024-01-02T09:30:00Z"
        })),
        ("GET", "/api/leaves/9/") => HttpResponse::Ok().json(leave(9, "pending")),
        ("GET", "/api/leaves/10/") => HttpResponse::Ok().json(leave(10, "approved")),
        ("POST", "/api/leaves/9/approve_leave/" | "/api/leaves/10/approve_leave/") => {
            HttpResponse::Ok().json(json!({ "status": "leave approved" }))
        }
        ("GET", "/api/missions/") => HttpResponse::ServiceUnavailable()
            .content_type("text/plain")
            .body("maintenance   window\n"),
        _ => HttpResponse::NotFound().json(json!({ "detail": "Not found." })),
    }
}

fn echo(request: &RecordedRequest) -> HttpResponse {
    let payload = json!({
        "method": request.method,
        "path": request.path,
        "query": request.query,
        "authorization": request.authorization,
        "body": String::from_utf8_lossy(&request.body),
    });
    HttpResponse::build(StatusCode::ACCEPTED)
        .content_type(ECHO_CONTENT_TYPE)
        .body(payload.to_string())
}

pub fn admin() -> Value {
    json!({
        "id": 1,
        "username": "root",
        "email": "root@example.com",
        "user_type": "admin",
        "leave_balance": 20.0
    })
}

pub fn employee() -> Value {
    json!({
        "id": 2,
        "username": "jdoe",
        "email": "jdoe@example.com",
        "user_type": "employee",
        "leave_balance": 5.0
    })
}

/// Account created by an access request, awaiting approval.
pub fn requested() -> Value {
    json!({
        "id": 7,
        "username": "newcomer",
        "email": "new@example.com",
        "user_type": "intern",
        "leave_balance": 0.0,
        "is_active": false
    })
}

fn leave(id: u64, status: &str) -> Value {
    json!({
        "id": id,
        "user": 2,
        "start_date": "2024-01-10",
        "end_date": "2024-01-12",
        "reason": "family event",
        "status": status,
        "created_at": "2024-01-02T09:30:00Z"
    })
}

fn application() -> Value {
    json!({
        "id": 40,
        "application_type": "employee",
        "position": "Backend developer",
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": "ada@example.com",
        "phone": "+44 20 7946 0000",
        "education": "MSc Mathematics",
        "experience": "Ten years of analytical engines",
        "motivation": "I would like to build payroll tooling.",
        "cv_file": "cvs/cv.pdf",
        "status": "pending",
        "created_at": "2024-01-02T09:30:00Z"
    })
}
