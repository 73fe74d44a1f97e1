//! Core board logic - pure, deterministic, and testable
//!
//! This crate turns a difficulty, a seed string and an optional content
//! catalog into a board. It has **no dependencies** on storage, networking or
//! timers, which makes it:
//!
//! - **Deterministic**: the same seed and catalog always produce the same board
//! - **Shareable**: the seed codec packs difficulty and seed into one URL token
//! - **Testable**: the random stream sits behind a one-method trait
//!
//! # Module Structure
//!
//! - [`seed`]: encode/decode of the `"<ordinal>&<seed>"` token
//! - [`rng`]: seeded `[0, 1)` stream and Fisher-Yates shuffle
//! - [`catalog`]: items and variants used to label tile pairs
//! - [`board`]: pair selection, duplication, shuffling and grid layout
//!
//! # Example
//!
//! ```
//! use memory_match_core::{generate, seed};
//! use memory_match_types::Difficulty;
//!
//! let token = seed::encode(Difficulty::Hard, "friday");
//! let parsed = seed::decode(&token);
//!
//! let board = generate(parsed.difficulty, Some(&parsed.seed), None);
//! assert_eq!(board.tiles().len(), 24);
//! assert!(board.pair_counts().values().all(|&n| n == 2));
//! ```

pub mod board;
pub mod catalog;
pub mod rng;
pub mod seed;

pub use memory_match_types as types;

// Re-export commonly used types for convenience
pub use board::{generate, generate_with, synthesize_seed, Board, Pairing, Tile};
pub use catalog::{CatalogItem, ContentCatalog, RarityInfo, Variant};
pub use rng::{create_rng, shuffle, RandomSource, SeededRng};
pub use seed::SeedToken;
