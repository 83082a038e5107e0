//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the proxy's own endpoints. It registers:
//!
//! - **Paths**: health probes, the guarded workflow actions, and the guarded
//!   job application upload
//! - **Schemas**: domain type wrappers ([`ErrorSchema`], [`LeaveSchema`] and
//!   friends) that keep domain types free of utoipa derives
//! - **Security**: bearer token authentication scheme
//!
//! Requests forwarded verbatim to the HR API are not described here. The
//! generated document backs Swagger UI in debug builds and the
//! `openapi-dump` binary.

use crate::inbound::http::actions::ChangeStatusRequest;
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, InternshipSchema, JobApplicationSchema, LeaveSchema,
    MissionSchema,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token issued by POST /api/token/."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the proxy.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "HR proxy API",
        description = "Guarded workflow actions in front of the HR management API, plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::actions::approve_leave,
        crate::inbound::http::actions::reject_leave,
        crate::inbound::http::actions::complete_mission,
        crate::inbound::http::actions::change_internship_status,
        crate::inbound::http::actions::approve_job_application,
        crate::inbound::http::actions::reject_job_application,
        crate::inbound::http::uploads::create_job_application,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LeaveSchema,
        MissionSchema,
        InternshipSchema,
        JobApplicationSchema,
        ChangeStatusRequest,
    )),
    tags(
        (name = "health", description = "Endpoints for health checks"),
        (name = "leaves", description = "Leave request decisions"),
        (name = "missions", description = "Mission completion"),
        (name = "internships", description = "Internship status changes"),
        (name = "job-applications", description = "Job application decisions")
    )
)]
pub struct ApiDoc;
