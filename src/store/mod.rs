use serde::{Serialize, de::DeserializeOwned};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::warn;

/// File name of the persisted key/value map inside the state directory.
pub const STORE_FILE: &str = "local_storage.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization: {0}")]
    Serde(#[from] serde_json::Error),
}

type Entries = BTreeMap<String, String>;

/// String key/value store with browser local-storage semantics.
///
/// Values are raw strings; the typed `get`/`set` helpers keep JSON inside
/// them. A file-backed store rewrites its file on every mutation. Clones
/// share the same entries.
#[derive(Clone, Debug)]
pub struct LocalStore {
    entries: Arc<Mutex<Entries>>,
    path: Option<PathBuf>,
}

impl LocalStore {
    /// Open (or create on first write) the store file under `state_dir`.
    ///
    /// A corrupt file is logged and treated as empty rather than failing
    /// the whole session.
    pub fn open(state_dir: &Path) -> Result<Self, StoreError> {
        let path = state_dir.join(STORE_FILE);
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Discarding unreadable local store {}: {e}", path.display());
                Entries::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Entries::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            entries: Arc::new(Mutex::new(entries)),
            path: Some(path),
        })
    }

    /// A store that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Entries::new())),
            path: None,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn flush(&self, entries: &Entries) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }

    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    pub fn set_raw(&self, key: &str, value: impl Into<String>) -> Result<(), StoreError> {
        let mut entries = self.lock();
        entries.insert(key.to_string(), value.into());
        self.flush(&entries)
    }

    /// Get a JSON value; `Ok(None)` when the key is absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.get_raw(key) {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let serialized = serde_json::to_string(value)?;
        self.set_raw(key, serialized)
    }

    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.lock();
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }

    pub fn exists(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Keys the console keeps in local storage.
pub mod keys {
    /// Pseudo-random id tagging outgoing chat requests.
    pub const CHAT_USER_ID: &str = "chatUserId";
    /// JSON array of chat messages.
    pub const CHAT_MESSAGES: &str = "chatMessages";
    /// Admin bearer token.
    pub const TOKEN: &str = "token";
}
