//! Reqwest-backed adapter for the remote HR REST API.
//!
//! The adapter owns transport details only: bearer tokens, the single
//! refresh-and-retry on `401`, trace-id propagation, HTTP error mapping, and
//! JSON decoding into domain types. Workflow rules live in the domain
//! services.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{
    AccessRequestDto, AccessTokenDto, ChangeStatusDto, LoginRequestDto, RefreshRequestDto,
    TokenPairDto,
};
use super::token::TokenSession;
use crate::domain::ports::{
    AccessRequest, AuthApi, Credentials, HrApiError, InternshipsApi, JobApplicationsApi,
    LeavesApi, MissionsApi, UserUpdate, UsersApi, WorkHoursApi,
};
use crate::domain::{
    Decision, Internship, InternshipId, InternshipStatus, InternshipUpdate, JobApplication,
    JobApplicationId, JobApplicationUpdate, Leave, LeaveId, LeaveUpdate, Mission, MissionId,
    MissionUpdate, NewInternship, NewJobApplication, NewLeave, NewMission, NewWorkHours,
    TRACE_ID_HEADER, TraceId, User, UserId, WorkHours,
};

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = "hr-backend/0.1";

/// HR API adapter bound to one base URL and one token session.
#[derive(Clone)]
pub struct HrApiHttpClient {
    client: Client,
    base: Url,
    user_agent: String,
    session: Arc<TokenSession>,
}

impl HrApiHttpClient {
    /// Build an adapter with its own reqwest client and an empty session.
    /// ```rust,ignore
    /// let api = HrApiHttpClient::new(base, Duration::from_secs(30), "hr-backend/0.1");
    /// assert!(api.is_ok() || api.is_err());
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base: Url,
        timeout: Duration,
        user_agent: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base, Arc::new(TokenSession::new())).with_user_agent(user_agent))
    }

    /// Build an adapter over a shared reqwest client and an existing session.
    ///
    /// The proxy uses this to act on behalf of one inbound caller.
    pub fn with_client(client: Client, base: Url, session: Arc<TokenSession>) -> Self {
        Self {
            client,
            base: with_trailing_slash(base),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            session,
        }
    }

    /// Override the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Token session shared by every request of this adapter.
    pub fn session(&self) -> &Arc<TokenSession> {
        &self.session
    }

    /// Base URL every endpoint path is joined onto.
    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, HrApiError> {
        self.base
            .join(path)
            .map_err(|error| HrApiError::transport(format!("invalid endpoint {path}: {error}")))
    }

    /// Attach identity headers and send one attempt.
    async fn dispatch(&self, request: RequestBuilder) -> Result<Response, HrApiError> {
        let mut request = request
            .header(reqwest::header::USER_AGENT, self.user_agent.as_str())
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = self.session.access() {
            request = request.bearer_auth(token.as_str());
        }
        if let Some(trace_id) = TraceId::current() {
            request = request.header(TRACE_ID_HEADER, trace_id.to_string());
        }
        request.send().await.map_err(map_transport_error)
    }

    /// Send an authenticated request, refreshing the token once on `401`.
    ///
    /// `build` runs once per attempt because multipart bodies cannot be
    /// cloned. A `401` on the retry ends the session.
    async fn execute<F>(&self, build: F) -> Result<Vec<u8>, HrApiError>
    where
        F: Fn(&Client) -> Result<RequestBuilder, HrApiError> + Send + Sync,
    {
        let response = self.dispatch(build(&self.client)?).await?;
        if response.status() != StatusCode::UNAUTHORIZED || self.session.refresh().is_none() {
            return read_body(response).await;
        }

        debug!("access token rejected, refreshing once");
        self.refresh_access().await?;
        let retried = self.dispatch(build(&self.client)?).await?;
        if retried.status() == StatusCode::UNAUTHORIZED {
            warn!("refreshed token rejected, ending session");
            self.session.clear();
        }
        read_body(retried).await
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// Any failure ends the session.
    async fn refresh_access(&self) -> Result<(), HrApiError> {
        let Some(refresh) = self.session.refresh() else {
            return Err(HrApiError::unauthenticated("no refresh token"));
        };
        let url = self.endpoint("token/refresh/")?;
        let body = RefreshRequestDto {
            refresh: refresh.as_str(),
        };
        let outcome = async {
            let response = self
                .client
                .post(url)
                .header(reqwest::header::USER_AGENT, self.user_agent.as_str())
                .json(&body)
                .send()
                .await
                .map_err(map_transport_error)?;
            let bytes = read_body(response).await?;
            decode::<AccessTokenDto>(&bytes)
        }
        .await;

        match outcome {
            Ok(token) => {
                self.session.set_access(token.access);
                Ok(())
            }
            Err(error) => {
                warn!(error = %error, "token refresh failed, ending session");
                self.session.clear();
                Err(HrApiError::unauthenticated("session expired"))
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, HrApiError> {
        let url = self.endpoint(path)?;
        let body = self
            .execute(|client| Ok(client.get(url.clone())))
            .await?;
        decode(&body)
    }

    async fn send_json<B, T>(
        &self,
        method: reqwest::Method,
        path: &str,
        payload: &B,
    ) -> Result<T, HrApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let body = self
            .execute(|client| Ok(client.request(method.clone(), url.clone()).json(payload)))
            .await?;
        decode(&body)
    }

    /// Delete a resource. Any response body is ignored.
    async fn delete(&self, path: &str) -> Result<(), HrApiError> {
        let url = self.endpoint(path)?;
        self.execute(|client| Ok(client.delete(url.clone())))
            .await?;
        Ok(())
    }

    /// Trigger a detail action. The acknowledgement body is not used.
    async fn post_action<B>(&self, path: &str, payload: &B) -> Result<(), HrApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = self.endpoint(path)?;
        self.execute(|client| Ok(client.post(url.clone()).json(payload)))
            .await?;
        Ok(())
    }
}

pub(super) fn with_trailing_slash(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

async fn read_body(response: Response) -> Result<Vec<u8>, HrApiError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    Ok(body.to_vec())
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, HrApiError> {
    serde_json::from_slice(body)
        .map_err(|error| HrApiError::decode(format!("invalid HR API JSON payload: {error}")))
}

fn empty_object() -> serde_json::Map<String, serde_json::Value> {
    serde_json::Map::new()
}

#[async_trait]
impl AuthApi for HrApiHttpClient {
    async fn login(&self, credentials: &Credentials) -> Result<(), HrApiError> {
        let url = self.endpoint("token/")?;
        let body = LoginRequestDto {
            username: credentials.username(),
            password: credentials.password(),
        };
        let response = self
            .client
            .post(url)
            .header(reqwest::header::USER_AGENT, self.user_agent.as_str())
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;
        let bytes = read_body(response).await?;
        let tokens: TokenPairDto = decode(&bytes)?;
        self.session.store(tokens.access, Some(tokens.refresh));
        debug!(username = credentials.username(), "logged in to HR API");
        Ok(())
    }

    fn logout(&self) {
        self.session.clear();
    }

    fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}

#[async_trait]
impl UsersApi for HrApiHttpClient {
    async fn list_users(&self) -> Result<Vec<User>, HrApiError> {
        self.get_json("users/").await
    }

    async fn get_user(&self, id: UserId) -> Result<User, HrApiError> {
        self.get_json(&format!("users/{id}/")).await
    }

    async fn current_user(&self) -> Result<User, HrApiError> {
        self.get_json("users/me/").await
    }

    async fn update_user(&self, id: UserId, update: &UserUpdate) -> Result<User, HrApiError> {
        self.send_json(reqwest::Method::PATCH, &format!("users/{id}/"), update)
            .await
    }

    async fn delete_user(&self, id: UserId) -> Result<(), HrApiError> {
        self.delete(&format!("users/{id}/")).await
    }

    async fn request_access(&self, request: &AccessRequest) -> Result<User, HrApiError> {
        let body = AccessRequestDto {
            username: request.username(),
            email: request.email(),
            password: request.password(),
            first_name: request.first_name(),
            last_name: request.last_name(),
            user_type: request.role(),
        };
        self.send_json(reqwest::Method::POST, "users/request-access/", &body)
            .await
    }

    async fn approve_user(&self, id: UserId) -> Result<(), HrApiError> {
        self.post_action(&format!("users/{id}/approve/"), &empty_object())
            .await
    }

    async fn reject_user(&self, id: UserId) -> Result<(), HrApiError> {
        self.post_action(&format!("users/{id}/reject/"), &empty_object())
            .await
    }
}

#[async_trait]
impl LeavesApi for HrApiHttpClient {
    async fn list_leaves(&self) -> Result<Vec<Leave>, HrApiError> {
        self.get_json("leaves/").await
    }

    async fn get_leave(&self, id: LeaveId) -> Result<Leave, HrApiError> {
        self.get_json(&format!("leaves/{id}/")).await
    }

    async fn create_leave(&self, draft: &NewLeave) -> Result<Leave, HrApiError> {
        self.send_json(reqwest::Method::POST, "leaves/", draft).await
    }

    async fn update_leave(&self, id: LeaveId, update: &LeaveUpdate) -> Result<Leave, HrApiError> {
        self.send_json(reqwest::Method::PATCH, &format!("leaves/{id}/"), update)
            .await
    }

    async fn approve_leave(&self, id: LeaveId) -> Result<(), HrApiError> {
        self.post_action(&format!("leaves/{id}/approve_leave/"), &empty_object())
            .await
    }

    async fn reject_leave(&self, id: LeaveId) -> Result<(), HrApiError> {
        self.post_action(&format!("leaves/{id}/reject_leave/"), &empty_object())
            .await
    }
}

#[async_trait]
impl MissionsApi for HrApiHttpClient {
    async fn list_missions(&self) -> Result<Vec<Mission>, HrApiError> {
        self.get_json("missions/").await
    }

    async fn get_mission(&self, id: MissionId) -> Result<Mission, HrApiError> {
        self.get_json(&format!("missions/{id}/")).await
    }

    async fn create_mission(&self, draft: &NewMission) -> Result<Mission, HrApiError> {
        self.send_json(reqwest::Method::POST, "missions/", draft).await
    }

    async fn update_mission(
        &self,
        id: MissionId,
        update: &MissionUpdate,
    ) -> Result<Mission, HrApiError> {
        self.send_json(reqwest::Method::PATCH, &format!("missions/{id}/"), update)
            .await
    }

    async fn complete_mission(&self, id: MissionId) -> Result<(), HrApiError> {
        self.post_action(&format!("missions/{id}/complete_mission/"), &empty_object())
            .await
    }
}

#[async_trait]
impl WorkHoursApi for HrApiHttpClient {
    async fn list_work_hours(&self) -> Result<Vec<WorkHours>, HrApiError> {
        self.get_json("work-hours/").await
    }

    async fn create_work_hours(&self, draft: &NewWorkHours) -> Result<WorkHours, HrApiError> {
        self.send_json(reqwest::Method::POST, "work-hours/", draft)
            .await
    }
}

#[async_trait]
impl InternshipsApi for HrApiHttpClient {
    async fn list_internships(&self) -> Result<Vec<Internship>, HrApiError> {
        self.get_json("internships/").await
    }

    async fn get_internship(&self, id: InternshipId) -> Result<Internship, HrApiError> {
        self.get_json(&format!("internships/{id}/")).await
    }

    async fn create_internship(&self, draft: &NewInternship) -> Result<Internship, HrApiError> {
        self.send_json(reqwest::Method::POST, "internships/", draft)
            .await
    }

    async fn update_internship(
        &self,
        id: InternshipId,
        update: &InternshipUpdate,
    ) -> Result<Internship, HrApiError> {
        self.send_json(reqwest::Method::PATCH, &format!("internships/{id}/"), update)
            .await
    }

    async fn change_internship_status(
        &self,
        id: InternshipId,
        status: InternshipStatus,
    ) -> Result<(), HrApiError> {
        self.post_action(
            &format!("internships/{id}/change_status/"),
            &ChangeStatusDto { status },
        )
        .await
    }
}

#[async_trait]
impl JobApplicationsApi for HrApiHttpClient {
    async fn list_job_applications(&self) -> Result<Vec<JobApplication>, HrApiError> {
        self.get_json("job-applications/").await
    }

    async fn get_job_application(
        &self,
        id: JobApplicationId,
    ) -> Result<JobApplication, HrApiError> {
        self.get_json(&format!("job-applications/{id}/")).await
    }

    async fn submit_job_application(
        &self,
        draft: NewJobApplication,
    ) -> Result<JobApplication, HrApiError> {
        let url = self.endpoint("job-applications/")?;
        let fields = draft
            .form_fields()
            .map(|(name, value)| (name, value.to_owned()));
        let (file_name, media_type, content) = draft.resume.into_parts();
        let body = self
            .execute(|client| {
                let resume = Part::bytes(content.clone())
                    .file_name(file_name.clone())
                    .mime_str(&media_type)
                    .map_err(|error| {
                        HrApiError::rejected(
                            StatusCode::UNSUPPORTED_MEDIA_TYPE.as_u16(),
                            format!("invalid résumé media type: {error}"),
                        )
                    })?;
                let form = fields
                    .iter()
                    .fold(Form::new(), |form, (name, value)| {
                        form.text(*name, value.clone())
                    })
                    .part("cv_file", resume);
                Ok(client.post(url.clone()).multipart(form))
            })
            .await?;
        decode(&body)
    }

    async fn update_job_application(
        &self,
        id: JobApplicationId,
        update: &JobApplicationUpdate,
    ) -> Result<JobApplication, HrApiError> {
        self.send_json(
            reqwest::Method::PATCH,
            &format!("job-applications/{id}/"),
            update,
        )
        .await
    }

    async fn decide_job_application(
        &self,
        id: JobApplicationId,
        decision: Decision,
    ) -> Result<(), HrApiError> {
        let action = match decision {
            Decision::Approve => "approve",
            Decision::Reject => "reject",
        };
        self.post_action(&format!("job-applications/{id}/{action}/"), &empty_object())
            .await
    }
}

pub(super) fn map_transport_error(error: reqwest::Error) -> HrApiError {
    if error.is_timeout() {
        HrApiError::timeout(error.to_string())
    } else {
        HrApiError::transport(error.to_string())
    }
}

pub(super) fn map_status_error(status: StatusCode, body: &[u8]) -> HrApiError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::UNAUTHORIZED => HrApiError::unauthenticated(message),
        StatusCode::FORBIDDEN => HrApiError::forbidden(message),
        StatusCode::NOT_FOUND => HrApiError::not_found(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => HrApiError::timeout(message),
        _ if status.is_client_error() => HrApiError::rejected(status.as_u16(), message),
        _ => HrApiError::upstream(status.as_u16(), message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
