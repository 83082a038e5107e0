//! Guarded action endpoints.
//!
//! ```text
//! POST /api/leaves/{id}/approve_leave/
//! POST /api/leaves/{id}/reject_leave/
//! POST /api/missions/{id}/complete_mission/
//! POST /api/internships/{id}/change_status/ {"status":"active"}
//! POST /api/job-applications/{id}/approve/
//! POST /api/job-applications/{id}/reject/
//! ```
//!
//! Each handler resolves the caller through `users/me/` with the caller's
//! own token, then runs the workflow service. A refused transition returns
//! before the upstream action is called. The response body is the entity in
//! its new state.

use actix_web::{HttpResponse, post, web};
use serde::Deserialize;

use crate::domain::ports::HrPorts;
use crate::domain::{
    Actor, Error, InternshipId, InternshipService, InternshipStatus, JobApplicationId,
    JobApplicationService, LeaveId, LeaveService, MissionId, MissionService, UserDirectory,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::BearerToken;
use crate::inbound::http::state::HttpState;

/// Body of `POST /api/internships/{id}/change_status/`.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ChangeStatusRequest {
    /// Target status.
    #[schema(value_type = String, example = "active")]
    pub status: InternshipStatus,
}

async fn caller(ports: &HrPorts) -> Result<Actor, Error> {
    let user = UserDirectory::new(ports.users.clone()).current().await?;
    Ok(user.actor())
}

/// Approve a pending leave and deduct the requester's balance.
#[utoipa::path(
    post,
    path = "/api/leaves/{id}/approve_leave/",
    params(("id" = u64, Path, description = "Leave identifier")),
    responses(
        (status = 200, description = "Leave approved", body = crate::inbound::http::schemas::LeaveSchema),
        (status = 401, description = "Missing or expired token", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 403, description = "Caller may not decide leaves", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 409, description = "Leave is not pending", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 502, description = "HR API unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["leaves"],
    operation_id = "approveLeave"
)]
#[post("/leaves/{id}/approve_leave/")]
pub async fn approve_leave(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let id = LeaveId::new(path.into_inner())?;
    let ports = state.ports(&token);
    let actor = caller(&ports).await?;
    let approval = LeaveService::new(ports.leaves, ports.users)
        .approve(actor, id)
        .await?;
    Ok(HttpResponse::Ok().json(approval.leave()))
}

/// Reject a pending leave.
#[utoipa::path(
    post,
    path = "/api/leaves/{id}/reject_leave/",
    params(("id" = u64, Path, description = "Leave identifier")),
    responses(
        (status = 200, description = "Leave rejected", body = crate::inbound::http::schemas::LeaveSchema),
        (status = 403, description = "Caller may not decide leaves", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 409, description = "Leave is not pending", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["leaves"],
    operation_id = "rejectLeave"
)]
#[post("/leaves/{id}/reject_leave/")]
pub async fn reject_leave(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let id = LeaveId::new(path.into_inner())?;
    let ports = state.ports(&token);
    let actor = caller(&ports).await?;
    let leave = LeaveService::new(ports.leaves, ports.users)
        .reject(actor, id)
        .await?;
    Ok(HttpResponse::Ok().json(leave))
}

/// Mark a mission completed.
#[utoipa::path(
    post,
    path = "/api/missions/{id}/complete_mission/",
    params(("id" = u64, Path, description = "Mission identifier")),
    responses(
        (status = 200, description = "Mission completed", body = crate::inbound::http::schemas::MissionSchema),
        (status = 403, description = "Caller is not involved in the mission", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 409, description = "Mission already completed", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["missions"],
    operation_id = "completeMission"
)]
#[post("/missions/{id}/complete_mission/")]
pub async fn complete_mission(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let id = MissionId::new(path.into_inner())?;
    let ports = state.ports(&token);
    let actor = caller(&ports).await?;
    let mission = MissionService::new(ports.missions)
        .complete(actor, id)
        .await?;
    Ok(HttpResponse::Ok().json(mission))
}

/// Move an internship to another status.
#[utoipa::path(
    post,
    path = "/api/internships/{id}/change_status/",
    params(("id" = u64, Path, description = "Internship identifier")),
    request_body = ChangeStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = crate::inbound::http::schemas::InternshipSchema),
        (status = 403, description = "Caller does not supervise the internship", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 409, description = "Transition not allowed", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["internships"],
    operation_id = "changeInternshipStatus"
)]
#[post("/internships/{id}/change_status/")]
pub async fn change_internship_status(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<u64>,
    payload: web::Json<ChangeStatusRequest>,
) -> ApiResult<HttpResponse> {
    let id = InternshipId::new(path.into_inner())?;
    let target = payload.into_inner().status;
    let ports = state.ports(&token);
    let actor = caller(&ports).await?;
    let internship = InternshipService::new(ports.internships)
        .change_status(actor, id, target)
        .await?;
    Ok(HttpResponse::Ok().json(internship))
}

/// Approve a pending job application.
#[utoipa::path(
    post,
    path = "/api/job-applications/{id}/approve/",
    params(("id" = u64, Path, description = "Job application identifier")),
    responses(
        (status = 200, description = "Application approved", body = crate::inbound::http::schemas::JobApplicationSchema),
        (status = 403, description = "Caller may not decide applications", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 409, description = "Application is not pending", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["job-applications"],
    operation_id = "approveJobApplication"
)]
#[post("/job-applications/{id}/approve/")]
pub async fn approve_job_application(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let id = JobApplicationId::new(path.into_inner())?;
    let ports = state.ports(&token);
    let actor = caller(&ports).await?;
    let application = JobApplicationService::new(ports.job_applications, state.notifier.clone())
        .approve(actor, id)
        .await?;
    Ok(HttpResponse::Ok().json(application))
}

/// Reject a pending job application.
#[utoipa::path(
    post,
    path = "/api/job-applications/{id}/reject/",
    params(("id" = u64, Path, description = "Job application identifier")),
    responses(
        (status = 200, description = "Application rejected", body = crate::inbound::http::schemas::JobApplicationSchema),
        (status = 403, description = "Caller may not decide applications", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 409, description = "Application is not pending", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["job-applications"],
    operation_id = "rejectJobApplication"
)]
#[post("/job-applications/{id}/reject/")]
pub async fn reject_job_application(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let id = JobApplicationId::new(path.into_inner())?;
    let ports = state.ports(&token);
    let actor = caller(&ports).await?;
    let application = JobApplicationService::new(ports.job_applications, state.notifier.clone())
        .reject(actor, id)
        .await?;
    Ok(HttpResponse::Ok().json(application))
}

/// Register every guarded action on an `/api` scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(approve_leave)
        .service(reject_leave)
        .service(complete_mission)
        .service(change_internship_status)
        .service(approve_job_application)
        .service(reject_job_application);
}

#[cfg(test)]
#[path = "actions_tests.rs"]
mod tests;
