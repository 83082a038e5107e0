//! Driven port for obtaining and discarding API tokens.

use std::fmt;

use async_trait::async_trait;
use zeroize::Zeroizing;

use super::HrApiError;

/// Username and password exchanged for a token pair.
///
/// The password is wiped from memory when dropped and never printed.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Bundle a username and password.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Login name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Password in clear text.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Port for the token lifecycle of one client session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a token pair and keep it for later calls.
    async fn login(&self, credentials: &Credentials) -> Result<(), HrApiError>;

    /// Forget the current tokens.
    fn logout(&self);

    /// Whether an access token is held.
    fn is_authenticated(&self) -> bool;
}
