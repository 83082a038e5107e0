//! Bearer token storage for one client session.

use std::sync::{PoisonError, RwLock};

use zeroize::Zeroizing;

#[derive(Clone)]
struct Tokens {
    access: Zeroizing<String>,
    refresh: Option<Zeroizing<String>>,
}

/// Access and refresh tokens shared by every request of a session.
///
/// Tokens are wiped from memory when replaced or dropped. The lock is never
/// held across an `.await`.
#[derive(Default)]
pub struct TokenSession {
    tokens: RwLock<Option<Tokens>>,
}

impl TokenSession {
    /// Start without tokens.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Session carrying only a caller-supplied access token.
    ///
    /// Without a refresh token a `401` is final.
    pub fn bearer_only(access: impl Into<String>) -> Self {
        let session = Self::new();
        session.store(access, None::<String>);
        session
    }

    /// Replace both tokens.
    pub fn store(&self, access: impl Into<String>, refresh: Option<impl Into<String>>) {
        let tokens = Tokens {
            access: Zeroizing::new(access.into()),
            refresh: refresh.map(|value| Zeroizing::new(value.into())),
        };
        *self.tokens.write().unwrap_or_else(PoisonError::into_inner) = Some(tokens);
    }

    /// Replace the access token, keeping the refresh token.
    pub fn set_access(&self, access: impl Into<String>) {
        let mut guard = self.tokens.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(tokens) = guard.as_mut() {
            tokens.access = Zeroizing::new(access.into());
        }
    }

    /// Current access token.
    #[must_use]
    pub fn access(&self) -> Option<Zeroizing<String>> {
        self.read().map(|tokens| tokens.access)
    }

    /// Current refresh token.
    #[must_use]
    pub fn refresh(&self) -> Option<Zeroizing<String>> {
        self.read().and_then(|tokens| tokens.refresh)
    }

    /// Forget both tokens.
    pub fn clear(&self) {
        *self.tokens.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Whether an access token is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn read(&self) -> Option<Tokens> {
        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl std::fmt::Debug for TokenSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSession")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
