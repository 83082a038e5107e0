//! Port notified after a job application decision.
//!
//! The decision is already recorded when the notifier runs. Delivery failures
//! are logged by the caller and never undo the decision.

use async_trait::async_trait;
use tracing::info;

use crate::domain::{Decision, JobApplication};

use super::define_port_error;

define_port_error! {
    /// Errors exposed when delivering a decision notification.
    pub enum NotificationError {
        /// The notification channel refused the message.
        Delivery { message: String } => "decision notification failed: {message}",
    }
}

/// Hook invoked once per successful decision.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DecisionNotifier: Send + Sync {
    /// Tell the candidate about `decision`.
    async fn notify(
        &self,
        application: &JobApplication,
        decision: Decision,
    ) -> Result<(), NotificationError>;
}

/// Notifier that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpDecisionNotifier;

#[async_trait]
impl DecisionNotifier for NoOpDecisionNotifier {
    async fn notify(
        &self,
        _application: &JobApplication,
        _decision: Decision,
    ) -> Result<(), NotificationError> {
        Ok(())
    }
}

/// Notifier that records each decision as a structured log event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDecisionNotifier;

#[async_trait]
impl DecisionNotifier for TracingDecisionNotifier {
    async fn notify(
        &self,
        application: &JobApplication,
        decision: Decision,
    ) -> Result<(), NotificationError> {
        info!(
            application_id = %application.id(),
            position = application.position(),
            email = application.email(),
            decision = decision.as_str(),
            "job application decision recorded"
        );
        Ok(())
    }
}
