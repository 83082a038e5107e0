//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data`. Every guarded
//! action acts with the caller's own bearer token, so ports are built per
//! request from a shared reqwest client.

use std::sync::Arc;

use reqwest::{Client, Url};

use crate::domain::ports::{DecisionNotifier, HrPorts};
use crate::inbound::http::bearer::BearerToken;
use crate::outbound::hr_api::{HrApiHttpClient, TokenSession, UpstreamForwarder};

/// Builds the entity ports for one caller session.
pub type PortsForCaller = Arc<dyn Fn(Arc<TokenSession>) -> HrPorts + Send + Sync>;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    ports_for: PortsForCaller,
    /// Pass-through for unguarded `/api` calls.
    pub forwarder: UpstreamForwarder,
    /// Hook run after job application decisions.
    pub notifier: Arc<dyn DecisionNotifier>,
}

impl HttpState {
    /// State backed by the reqwest adapter against `base`.
    pub fn new(
        client: Client,
        base: Url,
        user_agent: impl Into<String>,
        notifier: Arc<dyn DecisionNotifier>,
    ) -> Self {
        let forwarder = UpstreamForwarder::new(client.clone(), base.clone());
        let user_agent = user_agent.into();
        let ports_for: PortsForCaller = Arc::new(move |session| {
            let api = HrApiHttpClient::with_client(client.clone(), base.clone(), session)
                .with_user_agent(user_agent.clone());
            HrPorts::shared(Arc::new(api))
        });
        Self::with_ports(ports_for, forwarder, notifier)
    }

    /// State over explicit per-caller ports.
    pub fn with_ports(
        ports_for: PortsForCaller,
        forwarder: UpstreamForwarder,
        notifier: Arc<dyn DecisionNotifier>,
    ) -> Self {
        Self {
            ports_for,
            forwarder,
            notifier,
        }
    }

    /// Ports acting with `token`. A `401` is final for these sessions.
    pub fn ports(&self, token: &BearerToken) -> HrPorts {
        (self.ports_for)(Arc::new(TokenSession::bearer_only(token.as_str())))
    }
}
