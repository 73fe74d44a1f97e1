//! Memory-match game core (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` so callers can depend on one
//! package:
//!
//! - [`types`]: difficulty presets, rarity tags, storage keys
//! - [`core`]: seed codec, seeded RNG, catalog model, board generation
//! - [`persist`]: per-tab counters, matched set, history log
//! - [`content`]: catalog fetch and media prefetch
//! - [`session`]: the game session controller

pub use memory_match_content as content;
pub use memory_match_core as core;
pub use memory_match_persist as persist;
pub use memory_match_session as session;
pub use memory_match_types as types;
