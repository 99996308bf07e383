//! Token Persistence
//!
//! A [`TokenStore`] is the durable home of the bearer token between runs,
//! the moral equivalent of one local-storage key.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::SessionError;

/// Storage key / file name the token is kept under
pub const TOKEN_KEY: &str = "auth_token";

/// Durable storage for a single bearer token
pub trait TokenStore: Send + Sync {
    /// Read the stored token, if any
    fn load(&self) -> Result<Option<String>, SessionError>;

    /// Replace the stored token
    fn save(&self, token: &str) -> Result<(), SessionError>;

    /// Remove the stored token. Removing an absent token is not an error.
    fn clear(&self) -> Result<(), SessionError>;
}

/// Token kept in a plain file holding the raw token string
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store the token at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_dir>/nsportal/auth_token`, or `./.nsportal/auth_token`
    /// when the platform has no data directory
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .map(|p| p.join("nsportal"))
            .unwrap_or_else(|| PathBuf::from("./.nsportal"))
            .join(TOKEN_KEY)
    }

    /// Path of the token file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token.to_string()))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SessionError::Io {
                path: self.path.clone(),
                error: e.to_string(),
            }),
        }
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| SessionError::Io {
                    path: parent.to_path_buf(),
                    error: e.to_string(),
                })?;
            }
        }

        std::fs::write(&self.path, token).map_err(|e| SessionError::Io {
            path: self.path.clone(),
            error: e.to_string(),
        })
    }

    fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Io {
                path: self.path.clone(),
                error: e.to_string(),
            }),
        }
    }
}

/// Process-local store. Clones share the same slot, so two sessions built
/// from clones of one store see each other's writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(token.into()))),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        let slot = self.slot.lock().map_err(|_| SessionError::Poisoned)?;
        Ok(slot.clone())
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        let mut slot = self.slot.lock().map_err(|_| SessionError::Poisoned)?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut slot = self.slot.lock().map_err(|_| SessionError::Poisoned)?;
        *slot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_store_lifecycle() {
        let dir = tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join(TOKEN_KEY));

        assert_eq!(store.load().unwrap(), None);

        store.save("abc.def.ghi").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("abc.def.ghi"));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);

        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_default_path_under_data_dir() {
        let path = FileTokenStore::default_path();
        assert!(path.ends_with(Path::new("nsportal").join(TOKEN_KEY)));
        if let Some(data_dir) = dirs::data_dir() {
            assert!(path.starts_with(data_dir));
        }
    }

    #[test]
    fn test_file_store_ignores_blank_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(TOKEN_KEY);
        std::fs::write(&path, "  \n").unwrap();

        let store = FileTokenStore::new(path);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_memory_store_clones_share_slot() {
        let store = MemoryTokenStore::new();
        let other = store.clone();

        store.save("t1").unwrap();
        assert_eq!(other.load().unwrap().as_deref(), Some("t1"));

        other.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
