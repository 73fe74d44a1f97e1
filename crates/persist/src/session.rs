//! Per-tab session state - counters and the matched set
//!
//! Every operation here is idempotent and never fails to the caller. Storage
//! errors and unparsable values are logged and treated as absent data.

use memory_match_types::{ELAPSED_TIME_KEY, MATCHED_TILES_KEY, MOVE_COUNT_KEY};

use crate::store::KeyValueStore;

/// Counters read back from storage. `None` means absent or unparsable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SavedCounters {
    pub move_count: Option<u32>,
    pub elapsed_secs: Option<u64>,
}

/// Mirrors session progress into per-tab storage
pub struct SessionPersistence {
    store: Box<dyn KeyValueStore>,
}

impl SessionPersistence {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Write both counters. Safe to call on every tick.
    pub fn save_counters(&mut self, move_count: u32, elapsed_secs: u64) {
        self.write(MOVE_COUNT_KEY, &move_count.to_string());
        self.write(ELAPSED_TIME_KEY, &elapsed_secs.to_string());
    }

    pub fn load_counters(&self) -> SavedCounters {
        SavedCounters {
            move_count: self.read_number(MOVE_COUNT_KEY),
            elapsed_secs: self.read_number(ELAPSED_TIME_KEY),
        }
    }

    pub fn load_elapsed(&self) -> Option<u64> {
        self.read_number(ELAPSED_TIME_KEY)
    }

    /// Union `keys` into the stored matched set and persist it.
    ///
    /// First-seen order is kept and duplicates are dropped. Returns the
    /// stored set after the merge.
    pub fn record_matches<S: AsRef<str>>(&mut self, keys: &[S]) -> Vec<String> {
        let mut merged = self.load_matches();
        for key in keys {
            let key = key.as_ref();
            if !merged.iter().any(|k| k == key) {
                merged.push(key.to_string());
            }
        }

        match serde_json::to_string(&merged) {
            Ok(json) => self.write(MATCHED_TILES_KEY, &json),
            Err(e) => tracing::error!(error = %e, "failed to encode matched set"),
        }
        merged
    }

    /// Matched pair keys; empty when absent or unparsable.
    pub fn load_matches(&self) -> Vec<String> {
        let Some(raw) = self.read(MATCHED_TILES_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(keys) => keys,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unparsable matched set");
                Vec::new()
            }
        }
    }

    /// Remove every per-tab key.
    pub fn clear(&mut self) {
        for key in [MOVE_COUNT_KEY, ELAPSED_TIME_KEY, MATCHED_TILES_KEY] {
            if let Err(e) = self.store.remove(key) {
                tracing::error!(key, error = %e, "failed to clear session key");
            }
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "session storage read failed");
                None
            }
        }
    }

    fn read_number<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        let raw = self.read(key)?;
        match raw.trim().parse() {
            Ok(n) => Some(n),
            Err(_) => {
                tracing::warn!(key, value = %raw, "ignoring unparsable counter");
                None
            }
        }
    }

    fn write(&mut self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            tracing::error!(key, error = %e, "session storage write failed");
        }
    }
}
