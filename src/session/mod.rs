//! Session State
//!
//! Holds the bearer token a client attaches to its requests. A [`Session`]
//! is an explicit value handed to [`ApiClient::new`](crate::client::ApiClient::new),
//! so independent clients (and tests) never share hidden global state.
//!
//! ## Lifecycle
//!
//! 1. [`Session::load`] reads any previously persisted token from its store
//! 2. Login calls [`Session::set_token`], which writes memory and store
//! 3. Every request reads [`Session::token`]
//! 4. A 401 response or an explicit logout calls [`Session::clear_token`]

mod store;
pub mod token;

pub use store::{FileTokenStore, MemoryTokenStore, TokenStore, TOKEN_KEY};

use std::path::PathBuf;
use std::sync::RwLock;

/// Bearer token holder backed by a persistent store
pub struct Session {
    token: RwLock<Option<String>>,
    store: Box<dyn TokenStore>,
}

impl Session {
    /// Build a session, loading any token already in `store`.
    ///
    /// A store that fails to load starts the session unauthenticated.
    pub fn load(store: impl TokenStore + 'static) -> Self {
        let token = match store.load() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Failed to load stored token: {}", e);
                None
            }
        };

        Self {
            token: RwLock::new(token),
            store: Box::new(store),
        }
    }

    /// Unauthenticated session that never touches disk
    pub fn in_memory() -> Self {
        Self::load(MemoryTokenStore::new())
    }

    /// Current token, if any
    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    /// Whether a token is held (regardless of expiry)
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Store `token` in memory and in the persistent store
    pub fn set_token(&self, token: &str) -> Result<(), SessionError> {
        {
            let mut slot = self.token.write().map_err(|_| SessionError::Poisoned)?;
            *slot = Some(token.to_string());
        }
        self.store.save(token)
    }

    /// Drop the token from memory and from the persistent store
    pub fn clear_token(&self) -> Result<(), SessionError> {
        {
            let mut slot = self.token.write().map_err(|_| SessionError::Poisoned)?;
            *slot = None;
        }
        self.store.clear()
    }

    /// Advisory expiry check: decodes the token's `exp` claim and compares
    /// it with the current time. False when no token is held.
    pub fn is_token_valid(&self) -> bool {
        self.token().map(|t| token::is_valid(&t)).unwrap_or(false)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

/// Token store errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Token store I/O failed at {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Token lock poisoned")]
    Poisoned,
}
