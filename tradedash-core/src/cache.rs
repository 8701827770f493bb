//! Best-effort persistence of the last loaded trade list.
//!
//! Two layers:
//! - **Stores**: [`KeyValueStore`] with a file-backed [`FileStore`] and an
//!   in-process [`MemoryStore`]
//! - **Trade cache**: [`TradeCache`] keeps a single versioned envelope
//!   ([`CachedTrades`]) under [`CACHE_KEY`]
//!
//! Layout of the file-backed store: `{dir}/{key}.json`, written atomically
//! (write to `.tmp`, rename into place).
//!
//! Every failure on the [`TradeCache`] surface is logged and swallowed, so a
//! missing, full or corrupt store never blocks a load. Envelopes with a
//! `schema_version` newer than [`SCHEMA_VERSION`] are ignored on restore.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::TradeRecord;

/// Key under which the trade list is stored.
pub const CACHE_KEY: &str = "tradedash.trades";

/// Current envelope version. Newer versions are ignored on restore.
pub const SCHEMA_VERSION: u32 = 1;

// ─── Store errors ──────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A string key-value store.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

// ─── File store ────────────────────────────────────────────────────

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.key_path(key);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            StoreError::Io(e)
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ─── Memory store ──────────────────────────────────────────────────

/// In-process store, handy for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

// ─── Trade cache ───────────────────────────────────────────────────

/// What actually lands in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedTrades {
    pub schema_version: u32,
    pub saved_at: DateTime<Utc>,
    pub trades: Vec<TradeRecord>,
}

/// Opportunistic cache for the normalized trade list.
pub struct TradeCache {
    store: Box<dyn KeyValueStore>,
}

impl TradeCache {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Persist `trades`. Failures are logged and otherwise ignored.
    pub fn save(&self, trades: &[TradeRecord]) {
        if let Err(e) = self.try_save(trades) {
            warn!(error = %e, "failed to cache trades");
        }
    }

    fn try_save(&self, trades: &[TradeRecord]) -> Result<(), StoreError> {
        let envelope = CachedTrades {
            schema_version: SCHEMA_VERSION,
            saved_at: Utc::now(),
            trades: trades.to_vec(),
        };
        let json = serde_json::to_string(&envelope)?;
        self.store.set(CACHE_KEY, &json)
    }

    /// Load the cached envelope. Missing, unreadable, corrupt or
    /// newer-version payloads all yield `None`.
    pub fn load(&self) -> Option<CachedTrades> {
        let json = match self.store.get(CACHE_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "cache unavailable");
                return None;
            }
        };
        let cached: CachedTrades = match serde_json::from_str(&json) {
            Ok(cached) => cached,
            Err(e) => {
                warn!(error = %e, "ignoring corrupt trade cache");
                return None;
            }
        };
        if cached.schema_version > SCHEMA_VERSION {
            warn!(
                version = cached.schema_version,
                supported = SCHEMA_VERSION,
                "ignoring trade cache from a newer version"
            );
            return None;
        }
        info!(trades = cached.trades.len(), saved_at = %cached.saved_at, "restored trade cache");
        Some(cached)
    }

    /// Cached trades only.
    pub fn restore(&self) -> Option<Vec<TradeRecord>> {
        self.load().map(|cached| cached.trades)
    }

    /// Drop the cached payload. Failures are logged and otherwise ignored.
    pub fn clear(&self) {
        if let Err(e) = self.store.remove(CACHE_KEY) {
            warn!(error = %e, "failed to clear trade cache");
        }
    }
}

impl std::fmt::Debug for TradeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradeCache").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ─── Test helpers ────────────────────────────────────────────

    /// A store where every operation fails, like a full or disabled browser store.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("disabled".into()))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("quota exceeded".into()))
        }
        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("disabled".into()))
        }
    }

    fn sample_trades() -> Vec<TradeRecord> {
        vec![TradeRecord {
            time: "2025-01-10 09:15".into(),
            symbol: "ES".into(),
            side: "BUY".into(),
            qty: 1.0,
            price: 4500.5,
            pl: 150.0,
            date_only: "2025-01-10".into(),
        }]
    }

    // ─── Trade cache ─────────────────────────────────────────────

    #[test]
    fn memory_roundtrip() {
        let cache = TradeCache::new(MemoryStore::new());
        assert!(cache.restore().is_none());

        cache.save(&sample_trades());
        assert_eq!(cache.restore().unwrap(), sample_trades());

        cache.clear();
        assert!(cache.restore().is_none());
    }

    #[test]
    fn broken_store_is_silent() {
        let cache = TradeCache::new(BrokenStore);
        cache.save(&sample_trades());
        assert!(cache.restore().is_none());
        cache.clear();
    }

    #[test]
    fn corrupt_payload_restores_nothing() {
        let store = MemoryStore::new();
        store.set(CACHE_KEY, "{not json").unwrap();
        let cache = TradeCache::new(store);
        assert!(cache.restore().is_none());
    }

    #[test]
    fn newer_schema_version_is_ignored() {
        let store = MemoryStore::new();
        let payload = format!(
            r#"{{"schema_version":{},"saved_at":"2025-01-01T00:00:00Z","trades":[]}}"#,
            SCHEMA_VERSION + 1
        );
        store.set(CACHE_KEY, &payload).unwrap();
        let cache = TradeCache::new(store);
        assert!(cache.load().is_none());
    }

    // ─── File store ──────────────────────────────────────────────

    #[test]
    fn file_store_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp_dir.path().join("nested"));

        assert!(store.get("k").unwrap().is_none());
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        assert!(!store.key_path("k").with_extension("json.tmp").exists());

        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
        store.remove("k").unwrap();
    }
}
