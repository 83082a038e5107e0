//! HR management backend library.
//!
//! - [`domain`]: entities, status transitions, and workflow services
//! - [`outbound`]: the reqwest adapter for the remote HR API
//! - [`inbound`]: the actix proxy surface with guarded actions
//! - [`client`]: a typed facade with a cached entity store

pub mod client;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
