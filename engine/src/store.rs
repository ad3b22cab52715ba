use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config;
use crate::error::StoreError;
use shared::SESSION_TTL_MS;

/// Persisted session layout. Field names match the original kiosk builds so
/// that sessions written by earlier deployments keep resuming after an
/// upgrade.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredSession {
    /// Number of draws already consumed; `pool[cursor]` is the next prize.
    #[serde(rename = "currentSpinIndex")]
    pub cursor: usize,
    pub pool: Vec<usize>,
    /// Session creation time, epoch milliseconds.
    #[serde(rename = "timestamp")]
    pub created_at: i64,
}

pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Minimal key/value surface the session store persists through, shaped
/// after the browser localStorage the kiosk originally ran on.
pub trait StorageBackend {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove_item(&self, key: &str);
}

/// In-memory backend. Clones share the same underlying map, which lets a
/// second store observe what a first one wrote.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Ok(mut items) = self.items.lock() {
            items.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.remove(key);
        }
    }
}

/// Durable backend: one JSON file per key under a data directory.
#[derive(Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir: dir.as_ref().to_path_buf(),
        })
    }

    /// Backend rooted at the configured kiosk data directory.
    pub fn from_env() -> Result<Self, StoreError> {
        Self::new(config::storage_dir())
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are trusted constants, but keep filenames tame anyway.
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

impl StorageBackend for FileBackend {
    fn get_item(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) {
        let _ = fs::remove_file(self.path_for(key));
    }
}

/// Owns load/save/clear of persisted sessions plus the expiry policy.
/// Malformed or expired entries are cleared on sight and reported as
/// absent; the caller rebuilds, the player never sees an error.
pub struct SessionStore {
    backend: Box<dyn StorageBackend>,
    ttl_ms: i64,
}

impl SessionStore {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self::with_ttl(backend, SESSION_TTL_MS)
    }

    pub fn with_ttl(backend: Box<dyn StorageBackend>, ttl_ms: i64) -> Self {
        Self { backend, ttl_ms }
    }

    pub fn load(&self, key: &str) -> Option<StoredSession> {
        let raw = self.backend.get_item(key)?;
        let session: StoredSession = match serde_json::from_str(&raw) {
            Ok(session) => session,
            Err(e) => {
                warn!("🧹 Discarding malformed session under '{}': {}", key, e);
                self.backend.remove_item(key);
                return None;
            }
        };
        if session.cursor > session.pool.len() {
            warn!(
                "🧹 Discarding corrupt session under '{}': cursor {} past pool length {}",
                key,
                session.cursor,
                session.pool.len()
            );
            self.backend.remove_item(key);
            return None;
        }
        if now_ms() - session.created_at >= self.ttl_ms {
            info!("⏳ Session under '{}' is older than the TTL, clearing it", key);
            self.backend.remove_item(key);
            return None;
        }
        Some(session)
    }

    /// Write-through, synchronous, overwrites whatever was under `key`.
    pub fn save(&self, key: &str, session: &StoredSession) -> Result<(), StoreError> {
        let raw = serde_json::to_string(session)?;
        self.backend.set_item(key, &raw)
    }

    pub fn clear(&self, key: &str) {
        self.backend.remove_item(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_store() -> (MemoryBackend, SessionStore) {
        let backend = MemoryBackend::new();
        let store = SessionStore::new(Box::new(backend.clone()));
        (backend, store)
    }

    fn session(cursor: usize, pool: Vec<usize>, created_at: i64) -> StoredSession {
        StoredSession {
            cursor,
            pool,
            created_at,
        }
    }

    #[test]
    fn test_round_trip_preserves_cursor_and_pool_order() {
        let (_, store) = memory_store();
        let saved = session(2, vec![1, 0, 1, 3], now_ms());
        store.save("wheel", &saved).unwrap();
        assert_eq!(store.load("wheel"), Some(saved));
    }

    #[test]
    fn test_wire_format_field_names() {
        let raw = serde_json::to_string(&session(2, vec![1, 0, 1], 42)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["currentSpinIndex"], 2);
        assert_eq!(value["pool"], serde_json::json!([1, 0, 1]));
        assert_eq!(value["timestamp"], 42);
    }

    #[test]
    fn test_absent_key_loads_as_none() {
        let (_, store) = memory_store();
        assert_eq!(store.load("nothing"), None);
    }

    #[test]
    fn test_malformed_json_is_cleared_and_absent() {
        let (backend, store) = memory_store();
        backend.set_item("wheel", "{not json").unwrap();
        assert_eq!(store.load("wheel"), None);
        assert_eq!(backend.get_item("wheel"), None);
    }

    #[test]
    fn test_missing_fields_treated_as_malformed() {
        let (backend, store) = memory_store();
        backend.set_item("wheel", r#"{"pool":[1,2]}"#).unwrap();
        assert_eq!(store.load("wheel"), None);
        assert_eq!(backend.get_item("wheel"), None);
    }

    #[test]
    fn test_cursor_past_pool_end_treated_as_corrupt() {
        let (backend, store) = memory_store();
        store.save("wheel", &session(4, vec![1, 0, 1], now_ms())).unwrap();
        assert_eq!(store.load("wheel"), None);
        assert_eq!(backend.get_item("wheel"), None);
    }

    #[test]
    fn test_expired_session_is_cleared() {
        let (backend, store) = memory_store();
        let stale = now_ms() - shared::SESSION_TTL_MS - 1;
        store.save("wheel", &session(1, vec![0, 1], stale)).unwrap();
        assert_eq!(store.load("wheel"), None);
        assert_eq!(backend.get_item("wheel"), None);
    }

    #[test]
    fn test_session_within_ttl_survives() {
        let (_, store) = memory_store();
        let recent = now_ms() - shared::SESSION_TTL_MS / 2;
        let saved = session(1, vec![0, 1], recent);
        store.save("wheel", &saved).unwrap();
        assert_eq!(store.load("wheel"), Some(saved));
    }

    #[test]
    fn test_custom_ttl_is_honored() {
        let backend = MemoryBackend::new();
        let store = SessionStore::with_ttl(Box::new(backend), 0);
        store.save("wheel", &session(0, vec![0], now_ms())).unwrap();
        assert_eq!(store.load("wheel"), None);
    }

    #[test]
    fn test_clear_removes_entry() {
        let (backend, store) = memory_store();
        store.save("wheel", &session(0, vec![0], now_ms())).unwrap();
        store.clear("wheel");
        assert_eq!(backend.get_item("wheel"), None);
    }

    #[test]
    fn test_keys_are_independent() {
        let (_, store) = memory_store();
        let wheel = session(1, vec![0, 1], now_ms());
        let plinko = session(3, vec![2, 2, 0, 1], now_ms());
        store.save("wheel", &wheel).unwrap();
        store.save("plinko", &plinko).unwrap();
        assert_eq!(store.load("wheel"), Some(wheel));
        assert_eq!(store.load("plinko"), Some(plinko));
    }

    #[test]
    fn test_file_backend_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path()).unwrap();
        let store = SessionStore::new(Box::new(backend.clone()));
        let saved = session(5, vec![1, 1, 0, 2, 2, 2], now_ms());
        store.save("plinkoData", &saved).unwrap();
        assert_eq!(store.load("plinkoData"), Some(saved));
        store.clear("plinkoData");
        assert_eq!(store.load("plinkoData"), None);
    }

    #[test]
    fn test_file_backend_sanitizes_keys() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path()).unwrap();
        backend.set_item("odd/key name", "x").unwrap();
        assert_eq!(backend.get_item("odd/key name").as_deref(), Some("x"));
        assert!(dir.path().join("odd-key-name.json").exists());
    }
}
