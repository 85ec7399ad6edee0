// Session token storage.
//
// The bearer token lives under a single key (`JWT`). An empty value is
// treated exactly like an absent one.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;

/// Storage key for the bearer token.
pub const SESSION_KEY: &str = "JWT";

/// Backing storage for the session token.
///
/// Only login, logout, and the 401 interceptor write to it; every
/// other caller treats it as read-only.
pub trait SessionStore: Send + Sync {
    /// Current token, if one is stored and non-empty.
    fn token(&self) -> Option<String>;

    /// Store a new token, replacing any previous one.
    fn set_token(&self, token: &str) -> Result<(), Error>;

    /// Remove the stored token. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), Error>;
}

// ── In-memory store ─────────────────────────────────────────────────

/// Process-lifetime store, used by the TUI and in tests.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded store, handy for resuming a known session.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .filter(|t| !t.is_empty())
    }

    fn set_token(&self, token: &str) -> Result<(), Error> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<(), Error> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

// ── File-backed store ───────────────────────────────────────────────

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(rename = "JWT", default, skip_serializing_if = "Option::is_none")]
    jwt: Option<String>,
}

/// Stores the token in a small TOML file so separate CLI invocations
/// share one session.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Option<SessionFile> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        match toml::from_str(&raw) {
            Ok(file) => Some(file),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "ignoring unreadable session file");
                None
            }
        }
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Option<String> {
        self.read()?.jwt.filter(|t| !t.is_empty())
    }

    fn set_token(&self, token: &str) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Session(format!("cannot create {}: {e}", parent.display())))?;
        }

        let contents = toml::to_string(&SessionFile {
            jwt: Some(token.to_owned()),
        })
        .map_err(|e| Error::Session(e.to_string()))?;

        std::fs::write(&self.path, contents)
            .map_err(|e| Error::Session(format!("cannot write {}: {e}", self.path.display())))?;

        restrict_permissions(&self.path)
    }

    fn clear(&self) -> Result<(), Error> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Session(format!(
                "cannot remove {}: {e}",
                self.path.display()
            ))),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), Error> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .map_err(|e| Error::Session(format!("cannot restrict {}: {e}", path.display())))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), Error> {
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_treats_empty_token_as_absent() {
        let store = MemorySessionStore::new();
        assert_eq!(store.token(), None);

        store.set_token("").unwrap();
        assert_eq!(store.token(), None);

        store.set_token("abc").unwrap();
        assert_eq!(store.token().as_deref(), Some("abc"));

        store.clear().unwrap();
        assert_eq!(store.token(), None);
    }

    #[test]
    fn file_store_round_trips_under_jwt_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("session.toml");
        let store = FileSessionStore::new(&path);

        assert_eq!(store.token(), None);
        store.set_token("T").unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("JWT = \"T\""), "unexpected file contents: {raw}");
        assert_eq!(store.token().as_deref(), Some("T"));

        store.clear().unwrap();
        assert!(!path.exists());
        // second clear is a no-op
        store.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        FileSessionStore::new(&path).set_token("T").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn garbage_file_reads_as_unauthenticated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, "not = [valid").unwrap();

        assert_eq!(FileSessionStore::new(&path).token(), None);
    }
}
