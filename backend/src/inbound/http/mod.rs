//! HTTP inbound adapter: guarded HR actions, pass-through proxy, and probes.

pub mod actions;
pub mod bearer;
pub mod error;
pub mod health;
pub mod proxy;
pub mod schemas;
pub mod state;
pub mod uploads;

pub use error::ApiResult;

use actix_web::{Scope, web};

/// The `/api` scope: guarded actions and uploads first, everything else
/// forwarded.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .app_data(web::PayloadConfig::new(proxy::MAX_FORWARD_BODY_BYTES))
        .configure(actions::configure)
        .service(uploads::create_job_application)
        .default_service(web::to(proxy::forward))
}
