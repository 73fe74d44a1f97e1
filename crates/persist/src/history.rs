//! Cross-session history log
//!
//! A JSON array of finished sessions under [`GAME_HISTORY_KEY`]. Entries are
//! only ever appended. A corrupted log reads as empty and is overwritten by the
//! next append.

use serde::{Deserialize, Serialize};

use memory_match_types::{Difficulty, GAME_HISTORY_KEY};

use crate::store::KeyValueStore;

/// One finished (completed or abandoned) session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub move_count: u32,
    /// Seconds.
    pub elapsed_time: u64,
    pub difficulty: Difficulty,
    /// Epoch milliseconds.
    pub timestamp: u64,
}

pub struct HistoryLog {
    store: Box<dyn KeyValueStore>,
}

impl HistoryLog {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Append one entry (read-modify-write).
    pub fn append(&mut self, entry: HistoryEntry) {
        let mut entries = self.entries();
        entries.push(entry);

        let json = match serde_json::to_string(&entries) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "failed to encode game history");
                return;
            }
        };
        match self.store.set(GAME_HISTORY_KEY, &json) {
            Ok(()) => tracing::debug!(len = entries.len(), "appended history entry"),
            Err(e) => tracing::error!(error = %e, "failed to save game history"),
        }
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        let raw = match self.store.get(GAME_HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read game history");
                return Vec::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "game history is corrupted, treating as empty");
            Vec::new()
        })
    }

    pub fn entries_for(&self, difficulty: Difficulty) -> Vec<HistoryEntry> {
        self.entries()
            .into_iter()
            .filter(|e| e.difficulty == difficulty)
            .collect()
    }
}
