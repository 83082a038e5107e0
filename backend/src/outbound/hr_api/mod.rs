//! HR API outbound adapters.
//!
//! [`HrApiHttpClient`] implements every HR API port over reqwest.
//! [`UpstreamForwarder`] relays raw requests for the proxy.

mod dto;
mod forward;
mod http_client;
mod token;

pub use forward::{ForwardRequest, ForwardedResponse, UpstreamForwarder};
pub use http_client::{DEFAULT_USER_AGENT, HrApiHttpClient};
pub use token::TokenSession;
