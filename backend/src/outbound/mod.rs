//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **hr_api**: reqwest-backed client for the remote HR REST API, plus the
//!   raw forwarder used by the proxy
//!
//! Adapters are thin translators that convert between domain types and
//! wire representations. They contain no business logic.

pub mod hr_api;
