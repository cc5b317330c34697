// Token handling and the auth endpoint.
//
// The service hands out a token from `POST /auth/`; every later request
// carries it in the `Api-Token` header.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, trace};

use crate::client::InsightsClient;
use crate::error::Error;
use crate::models::AuthRequest;

/// Thread-safe holder for the service API token.
///
/// Requests take one snapshot of the token while they are being built, and
/// `authenticate` swaps a new token in atomically. A request already in
/// flight keeps the token it was built with; every request built after the
/// swap sees the new one. Empty tokens are treated as "no token".
#[derive(Debug, Default)]
pub struct TokenStore {
    current: ArcSwapOption<SecretString>,
}

impl TokenStore {
    pub fn new(token: Option<SecretString>) -> Self {
        let store = Self::default();
        store.replace(token);
        store
    }

    /// Snapshot of the current token, if any.
    pub fn get(&self) -> Option<Arc<SecretString>> {
        self.current.load_full()
    }

    /// Atomically replace the token. `None` or an empty string clears it.
    pub fn replace(&self, token: Option<SecretString>) {
        let token = token.filter(|t| !t.expose_secret().is_empty());
        trace!(present = token.is_some(), "swapping API token");
        self.current.store(token.map(Arc::new));
    }

    pub fn is_set(&self) -> bool {
        self.current.load().is_some()
    }
}

impl InsightsClient {
    /// Exchange the current credentials for a fresh API token.
    ///
    /// `POST /auth/` with `{"username": ...}` (username omitted when `None`).
    /// On success the returned token replaces the stored one for every
    /// request built afterwards.
    pub fn authenticate(&self, username: Option<&str>) -> Result<(), Error> {
        debug!(?username, "authenticating");
        let token: String = self.post("/auth/", &AuthRequest { username })?;
        self.token().replace(Some(SecretString::from(token)));
        debug!("authentication successful");
        Ok(())
    }
}
