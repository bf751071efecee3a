//! Session manager: the authentication lifecycle in one place.
//!
//! Owns token acquisition, persistence, decoding, and invalidation, and
//! exposes the current identity to the rest of the program. Everything else
//! is a consumer of this component's state.
//!
//! ## Design Decisions
//! - One explicit object passed by handle, not ambient global state: callers
//!   hold a `SessionManager` and ask it for the current identity.
//! - The identity is derived client-side from the access token payload with
//!   no signature verification, so it is advisory ([`DisplayIdentity`]) and
//!   never an authorization check.
//! - Tokens and identity move together inside one critical section, so a
//!   multi-threaded host observes each transition atomically.
//! - No proactive expiry handling: a stale token surfaces as a collaborator
//!   rejection on the next authenticated call.

pub mod identity;
pub mod store;

pub use identity::{decode_display_identity, DisplayIdentity};
pub use store::{StoredCredentials, TokenStore};

use crate::api::ApiClient;
use crate::error::{ApiError, ApiResult};
use parking_lot::Mutex;

/// Observable authentication state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No usable credentials.
    Anonymous,
    /// Credentials persisted and decoded.
    Authenticated(DisplayIdentity),
}

struct SessionInner {
    credentials: Option<StoredCredentials>,
    identity: Option<DisplayIdentity>,
}

/// Process-wide owner of the (tokens, identity) pair.
pub struct SessionManager {
    api: ApiClient,
    store: TokenStore,
    inner: Mutex<SessionInner>,
}

impl SessionManager {
    /// Initialize from persisted credentials.
    ///
    /// A stored token that decodes transitions straight to authenticated; a
    /// missing or undecodable token leaves the session anonymous. An
    /// undecodable token is also cleared from storage so the next start does
    /// not re-attempt it.
    pub fn load(api: ApiClient, store: TokenStore) -> Self {
        let mut inner = SessionInner {
            credentials: None,
            identity: None,
        };

        match store.load() {
            Ok(Some(credentials)) => match decode_display_identity(&credentials.access_token) {
                Some(identity) => {
                    tracing::debug!(user = %identity.username, "session restored from stored token");
                    inner.identity = Some(identity);
                    inner.credentials = Some(credentials);
                }
                None => {
                    tracing::warn!("stored access token failed to decode; clearing credentials");
                    if let Err(e) = store.clear() {
                        tracing::warn!("could not clear stale credentials: {e}");
                    }
                }
            },
            Ok(None) => {}
            Err(e) => tracing::warn!("could not read stored credentials: {e}"),
        }

        Self {
            api,
            store,
            inner: Mutex::new(inner),
        }
    }

    /// Exchange credentials for a token pair and transition to authenticated.
    ///
    /// On a 2xx response both tokens are persisted and the identity is decoded
    /// from the access token. If that decode fails the persisted pair is
    /// cleared again and a decode error is returned, so the store never holds
    /// tokens the session cannot represent.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<DisplayIdentity> {
        let pair = self.api.obtain_token_pair(email, password).await?;
        let credentials = StoredCredentials {
            access_token: pair.access,
            refresh_token: pair.refresh,
        };
        self.install(credentials)
    }

    /// Register a new account, then immediately log in with the same
    /// credentials and return that result.
    pub async fn register(&self, email: &str, password: &str) -> ApiResult<DisplayIdentity> {
        self.api.register(email, password).await?;
        self.login(email, password).await
    }

    /// Clear both persisted tokens and transition to anonymous.
    ///
    /// Purely local: no server-side invalidation endpoint is invoked. Fails
    /// only if the storage clear itself fails.
    pub fn logout(&self) -> ApiResult<()> {
        let mut inner = self.inner.lock();
        self.store.clear()?;
        inner.credentials = None;
        inner.identity = None;
        Ok(())
    }

    /// Mint a new access token from the stored refresh token and replace the
    /// persisted pair.
    pub async fn refresh(&self) -> ApiResult<DisplayIdentity> {
        let refresh_token = {
            let inner = self.inner.lock();
            inner
                .credentials
                .as_ref()
                .map(|c| c.refresh_token.clone())
                .ok_or_else(|| ApiError::Validation("Not logged in.".into()))?
        };

        let access = self.api.refresh_access(&refresh_token).await?;
        self.install(StoredCredentials {
            access_token: access,
            refresh_token,
        })
    }

    /// Persist a token pair and derive the identity, atomically from the
    /// point of view of other threads.
    ///
    /// The store write happens under the same lock as the in-memory update,
    /// so disk and memory always transition together. Store operations are
    /// synchronous; no await is held across the lock.
    fn install(&self, credentials: StoredCredentials) -> ApiResult<DisplayIdentity> {
        match decode_display_identity(&credentials.access_token) {
            Some(identity) => {
                let mut inner = self.inner.lock();
                self.store.save(&credentials)?;
                inner.credentials = Some(credentials);
                inner.identity = Some(identity.clone());
                Ok(identity)
            }
            None => {
                let mut inner = self.inner.lock();
                self.store.clear()?;
                inner.credentials = None;
                inner.identity = None;
                Err(ApiError::TokenDecode)
            }
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        match &self.inner.lock().identity {
            Some(identity) => SessionState::Authenticated(identity.clone()),
            None => SessionState::Anonymous,
        }
    }

    /// Current advisory identity, if authenticated.
    pub fn current_identity(&self) -> Option<DisplayIdentity> {
        self.inner.lock().identity.clone()
    }

    /// Current bearer credential for authenticated API calls.
    pub fn access_token(&self) -> Option<String> {
        self.inner
            .lock()
            .credentials
            .as_ref()
            .map(|c| c.access_token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.lock().identity.is_some()
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}
