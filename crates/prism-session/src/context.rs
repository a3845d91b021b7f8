//! Explicitly passed session context.

use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::error::Result;
use crate::store::{PersistedSession, SessionStore};

/// An access/refresh token pair issued by the auth backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Shared authentication and preference state for one front-end session.
///
/// Constructed once at startup from a [`SessionStore`], passed to whatever
/// needs it, and torn down with [`SessionContext::clear_tokens`] on logout.
/// Cloning is cheap; clones share the same state.
#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<Inner>,
}

struct Inner {
    store: Arc<dyn SessionStore>,
    tokens: RwLock<Option<TokenPair>>,
    compact_output: RwLock<bool>,
}

impl SessionContext {
    /// Loads session state from the given store.
    pub fn load(store: Arc<dyn SessionStore>) -> Result<Self> {
        let persisted = store.load()?;
        let tokens = match (persisted.access_token, persisted.refresh_token) {
            (Some(access_token), Some(refresh_token)) => Some(TokenPair {
                access_token,
                refresh_token,
            }),
            // A lone token is useless; treat it as logged out.
            _ => None,
        };

        debug!(logged_in = tokens.is_some(), "session loaded");

        Ok(Self {
            inner: Arc::new(Inner {
                store,
                tokens: RwLock::new(tokens),
                compact_output: RwLock::new(persisted.compact_output),
            }),
        })
    }

    /// Creates an empty, non-persisted context backed by the given store.
    pub fn empty(store: Arc<dyn SessionStore>) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                tokens: RwLock::new(None),
                compact_output: RwLock::new(false),
            }),
        }
    }

    /// Current access token, if logged in.
    pub fn access_token(&self) -> Option<String> {
        self.inner
            .tokens
            .read()
            .unwrap()
            .as_ref()
            .map(|t| t.access_token.clone())
    }

    /// Current refresh token, if logged in.
    pub fn refresh_token(&self) -> Option<String> {
        self.inner
            .tokens
            .read()
            .unwrap()
            .as_ref()
            .map(|t| t.refresh_token.clone())
    }

    /// Whether a token pair is present.
    pub fn is_logged_in(&self) -> bool {
        self.inner.tokens.read().unwrap().is_some()
    }

    /// Stores a new token pair and persists it.
    pub fn set_tokens(&self, tokens: TokenPair) -> Result<()> {
        *self.inner.tokens.write().unwrap() = Some(tokens);
        self.persist()
    }

    /// Drops the token pair and persists the logged-out state.
    pub fn clear_tokens(&self) -> Result<()> {
        *self.inner.tokens.write().unwrap() = None;
        self.persist()
    }

    /// The compact-output display preference.
    pub fn compact_output(&self) -> bool {
        *self.inner.compact_output.read().unwrap()
    }

    /// Sets and persists the compact-output display preference.
    pub fn set_compact_output(&self, compact: bool) -> Result<()> {
        *self.inner.compact_output.write().unwrap() = compact;
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let tokens = self.inner.tokens.read().unwrap().clone();
        let session = PersistedSession {
            access_token: tokens.as_ref().map(|t| t.access_token.clone()),
            refresh_token: tokens.map(|t| t.refresh_token),
            compact_output: *self.inner.compact_output.read().unwrap(),
            saved_at: None,
        };
        self.inner.store.save(&session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySessionStore;

    fn context() -> SessionContext {
        SessionContext::load(Arc::new(MemorySessionStore::new())).unwrap()
    }

    #[test]
    fn test_login_logout_cycle() {
        let ctx = context();
        assert!(!ctx.is_logged_in());
        assert!(ctx.access_token().is_none());

        ctx.set_tokens(TokenPair {
            access_token: "a1".to_string(),
            refresh_token: "r1".to_string(),
        })
        .unwrap();
        assert!(ctx.is_logged_in());
        assert_eq!(ctx.access_token().as_deref(), Some("a1"));
        assert_eq!(ctx.refresh_token().as_deref(), Some("r1"));

        ctx.clear_tokens().unwrap();
        assert!(!ctx.is_logged_in());
    }

    #[test]
    fn test_tokens_survive_reload() {
        let store = Arc::new(MemorySessionStore::new());
        {
            let ctx = SessionContext::load(store.clone()).unwrap();
            ctx.set_tokens(TokenPair {
                access_token: "a2".to_string(),
                refresh_token: "r2".to_string(),
            })
            .unwrap();
            ctx.set_compact_output(true).unwrap();
        }

        let ctx = SessionContext::load(store).unwrap();
        assert_eq!(ctx.access_token().as_deref(), Some("a2"));
        assert!(ctx.compact_output());
    }

    #[test]
    fn test_lone_token_treated_as_logged_out() {
        let store = Arc::new(MemorySessionStore::new());
        store
            .save(&PersistedSession {
                access_token: Some("orphan".to_string()),
                refresh_token: None,
                compact_output: false,
                saved_at: None,
            })
            .unwrap();

        let ctx = SessionContext::load(store).unwrap();
        assert!(!ctx.is_logged_in());
    }

    #[test]
    fn test_clones_share_state() {
        let ctx = context();
        let clone = ctx.clone();

        ctx.set_tokens(TokenPair {
            access_token: "shared".to_string(),
            refresh_token: "shared-r".to_string(),
        })
        .unwrap();

        assert_eq!(clone.access_token().as_deref(), Some("shared"));
    }
}
