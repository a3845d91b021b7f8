//! Session persistence backends.

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::atomic::{atomic_write_json, read_json_optional};
use crate::error::{Result, SessionError};

/// The on-disk shape of a session: the two token strings plus one display
/// preference. Plain key/value, no schema versioning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Whether result output should be rendered compactly.
    #[serde(default)]
    pub compact_output: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

/// Storage backend for session state.
pub trait SessionStore: Send + Sync {
    /// Loads the persisted session, or the default when none exists.
    fn load(&self) -> Result<PersistedSession>;

    /// Persists the session.
    fn save(&self, session: &PersistedSession) -> Result<()>;

    /// Removes any persisted session.
    fn clear(&self) -> Result<()>;
}

/// File-backed session store writing a single JSON document.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Creates a store at an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the default location under the user data dir.
    pub fn default_location() -> Result<Self> {
        let dir = dirs::data_dir().ok_or(SessionError::NoDataDir)?;
        Ok(Self::new(dir.join("prism").join("session.json")))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<PersistedSession> {
        Ok(read_json_optional(&self.path)?.unwrap_or_default())
    }

    fn save(&self, session: &PersistedSession) -> Result<()> {
        let mut session = session.clone();
        session.saved_at = Some(Utc::now());
        atomic_write_json(&self.path, &session)?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).map_err(|source| SessionError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

/// In-memory session store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<PersistedSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<PersistedSession> {
        Ok(self.session.lock().unwrap().clone().unwrap_or_default())
    }

    fn save(&self, session: &PersistedSession) -> Result<()> {
        *self.session.lock().unwrap() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.session.lock().unwrap() = None;
        Ok(())
    }
}
