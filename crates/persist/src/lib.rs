//! Session persistence layer
//!
//! Keeps game progress alive across page reloads:
//!
//! - [`session`]: per-tab counters (moves, elapsed seconds) and the matched set
//! - [`history`]: append-only log of finished sessions
//! - [`store`]: the key/value backends both of them write through
//!
//! None of the public operations in [`session`] or [`history`] return errors.
//! Failures are logged through `tracing` and surface as absent data.

pub mod history;
pub mod session;
pub mod store;

pub use memory_match_types as types;

pub use history::{HistoryEntry, HistoryLog};
pub use session::{SavedCounters, SessionPersistence};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
