//! Local session cache.
//!
//! The profile service issues no token on login, so the client keeps a
//! one-slot cache of identity hints (`profileId`, `email`, `name`) as a
//! stand-in. The cache is written on successful login/registration/
//! update, read by anything that needs the current identity, and cleared
//! on logout. It is never validated against the server after storage -
//! trusted until overwritten or cleared. No expiry, no cross-process
//! invalidation.
//!
//! The store is an injectable trait rather than a module-level global so
//! embedders can swap persistence and tests can stay on the heap.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use userhub_core::ProfileId;

/// Errors that can occur writing or clearing the session cache.
///
/// Reads never error: an unreadable or malformed cache is treated as an
/// absent session, not a failure.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Filesystem operation failed.
    #[error("session I/O error: {0}")]
    Io(#[from] io::Error),

    /// The session could not be serialized.
    #[error("session serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The cached identity of the logged-in profile.
///
/// Field names serialize camelCase (`profileId`) so the cache file is
/// readable next to the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    /// The profile's numeric id on the service.
    pub profile_id: ProfileId,
    /// Email the profile logged in with.
    pub email: String,
    /// Display name, when the service supplied one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
}

/// A one-slot store for the current session.
///
/// `set` overwrites whole-value, last-writer-wins; `get` treats any
/// unreadable state as absence; `clear` is a no-op when nothing is
/// stored.
pub trait SessionStore: Send + Sync {
    /// Read the cached session, if any.
    fn get(&self) -> Option<SessionInfo>;

    /// Overwrite the cached session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the new value cannot be persisted.
    fn set(&self, info: &SessionInfo) -> Result<(), SessionError>;

    /// Delete the cached session. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if a stored value exists but cannot be
    /// removed.
    fn clear(&self) -> Result<(), SessionError>;
}

/// Session store backed by a single JSON file.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store at the given path. Nothing is touched on disk
    /// until the first `set`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Option<SessionInfo> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(info) => Some(info),
            Err(e) => {
                // Malformed cache reads as "not logged in", not as an error.
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring malformed session file");
                None
            }
        }
    }

    fn set(&self, info: &SessionInfo) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_vec(info)?;
        fs::write(&self.path, raw)?;
        tracing::debug!(path = %self.path.display(), "session written");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory session store for tests and embedders that want no
/// persistence.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<SessionInfo>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<SessionInfo> {
        self.slot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn set(&self, info: &SessionInfo) -> Result<(), SessionError> {
        *self
            .slot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(info.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self
            .slot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = None;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("userhub-session-{}-{tag}.json", std::process::id()))
    }

    fn sample() -> SessionInfo {
        SessionInfo {
            profile_id: ProfileId::new(7),
            email: "a@b.com".to_string(),
            name: None,
        }
    }

    #[test]
    fn file_store_round_trip() {
        let path = temp_path("round-trip");
        let store = FileSessionStore::new(&path);

        assert!(store.get().is_none());
        store.set(&sample()).unwrap();
        assert_eq!(store.get(), Some(sample()));

        store.clear().unwrap();
        assert!(store.get().is_none());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn file_store_overwrites_last_writer_wins() {
        let path = temp_path("overwrite");
        let store = FileSessionStore::new(&path);

        store.set(&sample()).unwrap();
        let second = SessionInfo {
            profile_id: ProfileId::new(8),
            email: "c@d.com".to_string(),
            name: Some("C".to_string()),
        };
        store.set(&second).unwrap();
        assert_eq!(store.get(), Some(second));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn file_store_malformed_json_reads_as_absent() {
        let path = temp_path("malformed");
        fs::write(&path, "{not json").unwrap();

        let store = FileSessionStore::new(&path);
        assert!(store.get().is_none());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn file_store_clear_is_idempotent() {
        let path = temp_path("idempotent");
        let store = FileSessionStore::new(&path);
        store.clear().unwrap();
        store.clear().unwrap();
    }

    #[test]
    fn file_store_creates_parent_directories() {
        let dir = std::env::temp_dir().join(format!("userhub-nested-{}", std::process::id()));
        let path = dir.join("deep").join("session.json");
        let store = FileSessionStore::new(&path);

        store.set(&sample()).unwrap();
        assert_eq!(store.get(), Some(sample()));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemorySessionStore::new();
        assert!(store.get().is_none());
        store.set(&sample()).unwrap();
        assert_eq!(store.get(), Some(sample()));
        store.clear().unwrap();
        assert!(store.get().is_none());
    }

    #[test]
    fn session_info_serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["profileId"], 7);
        assert_eq!(json["email"], "a@b.com");
        // Absent name must be omitted entirely, not serialized as null.
        assert!(json.get("name").is_none());
    }
}
