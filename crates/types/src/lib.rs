//! Shared types module - difficulty presets, rarity tags and storage keys
//!
//! This crate defines the vocabulary used by every other crate in the workspace.
//! Everything here is plain data; the only dependency is `serde` so the same
//! enums can be written into persisted history entries and catalog documents.
//!
//! # Difficulty Presets
//!
//! Each difficulty maps to a fixed grid. The tile count is always even because
//! every pair occupies exactly two tiles.
//!
//! | Difficulty | Rows | Cols | Pairs | Ordinal |
//! |------------|------|------|-------|---------|
//! | `Easy`     | 3    | 4    | 6     | 1       |
//! | `Medium`   | 4    | 4    | 8     | 2       |
//! | `Hard`     | 4    | 6    | 12    | 3       |
//! | `Expert`   | 6    | 6    | 18    | 4       |
//!
//! The ordinal is the stable number written into shareable seed tokens.
//!
//! # Storage Keys
//!
//! Per-tab session keys and the cross-session history key all share the
//! `memory-game-` prefix:
//!
//! - [`MOVE_COUNT_KEY`]: current move count
//! - [`ELAPSED_TIME_KEY`]: elapsed seconds
//! - [`MATCHED_TILES_KEY`]: JSON array of matched pair keys
//! - [`GAME_HISTORY_KEY`]: JSON array of finished sessions
//!
//! # Examples
//!
//! ```
//! use memory_match_types::{Difficulty, Rarity};
//!
//! let level = Difficulty::from_str("hard").unwrap();
//! assert_eq!(level.config().pairs, 12);
//! assert_eq!(level.ordinal(), 3);
//! assert_eq!(Difficulty::from_ordinal(3), Some(Difficulty::Hard));
//!
//! assert_eq!(Rarity::from_str("mil-spec"), Some(Rarity::MilSpec));
//! assert_eq!(memory_match_types::format_time(90), "01:30");
//! ```

use serde::{Deserialize, Serialize};

/// Prefix shared by every storage key.
pub const STORAGE_KEY_PREFIX: &str = "memory-game-";

/// Per-tab key holding the move count.
pub const MOVE_COUNT_KEY: &str = "memory-game-move-count";

/// Per-tab key holding elapsed seconds.
pub const ELAPSED_TIME_KEY: &str = "memory-game-elapsed-time";

/// Per-tab key holding the JSON array of matched pair keys.
pub const MATCHED_TILES_KEY: &str = "memory-game-matched-tiles";

/// Cross-session key holding the JSON array of history entries.
pub const GAME_HISTORY_KEY: &str = "memory-game-history";

/// Query parameter carrying the shareable seed token.
pub const SEED_QUERY_PARAM: &str = "seed";

/// Separator between the difficulty ordinal and the seed in a token.
pub const SEED_TOKEN_SEPARATOR: char = '&';

/// Session timer resolution (one tick per second).
pub const TIMER_INTERVAL_MS: u64 = 1000;

/// Grid dimensions bound to a difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DifficultyConfig {
    pub rows: u8,
    pub cols: u8,
    pub pairs: u8,
}

impl DifficultyConfig {
    /// Number of tiles on the grid (`rows * cols`).
    pub fn tile_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

/// The four grid-size presets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// All presets in ascending order.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// Grid dimensions for this preset.
    pub fn config(&self) -> DifficultyConfig {
        match self {
            Difficulty::Easy => DifficultyConfig {
                rows: 3,
                cols: 4,
                pairs: 6,
            },
            Difficulty::Medium => DifficultyConfig {
                rows: 4,
                cols: 4,
                pairs: 8,
            },
            Difficulty::Hard => DifficultyConfig {
                rows: 4,
                cols: 6,
                pairs: 12,
            },
            Difficulty::Expert => DifficultyConfig {
                rows: 6,
                cols: 6,
                pairs: 18,
            },
        }
    }

    /// Stable 1-based number used in seed tokens.
    pub fn ordinal(&self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
            Difficulty::Expert => 4,
        }
    }

    /// Inverse of [`Difficulty::ordinal`].
    ///
    /// # Examples
    ///
    /// ```
    /// use memory_match_types::Difficulty;
    ///
    /// assert_eq!(Difficulty::from_ordinal(1), Some(Difficulty::Easy));
    /// assert_eq!(Difficulty::from_ordinal(4), Some(Difficulty::Expert));
    /// assert_eq!(Difficulty::from_ordinal(0), None);
    /// ```
    pub fn from_ordinal(ordinal: u32) -> Option<Self> {
        match ordinal {
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Medium),
            3 => Some(Difficulty::Hard),
            4 => Some(Difficulty::Expert),
            _ => None,
        }
    }

    /// Parse from the lowercase wire name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            "expert" => Some(Difficulty::Expert),
            _ => None,
        }
    }

    /// Lowercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }

    /// Capitalized label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }
}

/// Rarity tags carried by catalog variants
///
/// Ordered from most common to rarest. Placeholder pairings use
/// [`Rarity::Consumer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rarity {
    #[default]
    Consumer,
    Industrial,
    MilSpec,
    Restricted,
    Classified,
    Covert,
    Contraband,
}

impl Rarity {
    pub const ALL: [Rarity; 7] = [
        Rarity::Consumer,
        Rarity::Industrial,
        Rarity::MilSpec,
        Rarity::Restricted,
        Rarity::Classified,
        Rarity::Covert,
        Rarity::Contraband,
    ];

    /// Parse from the kebab-case tag (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "consumer" => Some(Rarity::Consumer),
            "industrial" => Some(Rarity::Industrial),
            "mil-spec" => Some(Rarity::MilSpec),
            "restricted" => Some(Rarity::Restricted),
            "classified" => Some(Rarity::Classified),
            "covert" => Some(Rarity::Covert),
            "contraband" => Some(Rarity::Contraband),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Consumer => "consumer",
            Rarity::Industrial => "industrial",
            Rarity::MilSpec => "mil-spec",
            Rarity::Restricted => "restricted",
            Rarity::Classified => "classified",
            Rarity::Covert => "covert",
            Rarity::Contraband => "contraband",
        }
    }
}

/// Format seconds as `MM:SS`. Minutes are not wrapped at 60.
///
/// # Examples
///
/// ```
/// use memory_match_types::format_time;
///
/// assert_eq!(format_time(0), "00:00");
/// assert_eq!(format_time(69), "01:09");
/// assert_eq!(format_time(3661), "61:01");
/// ```
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Display label for a raw difficulty name; unknown names pass through.
pub fn format_difficulty(raw: &str) -> String {
    match Difficulty::from_str(raw) {
        Some(level) if level.as_str() == raw => level.label().to_string(),
        _ => raw.to_string(),
    }
}
