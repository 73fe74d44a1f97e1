//! Board module - deterministic generation of a paired tile grid
//!
//! A board is a `rows x cols` grid in row-major order where every pair key
//! appears on exactly two tiles. Generation consumes a single seeded stream:
//! the first shuffle picks which catalog pairings are used, the second one
//! (continuing the same stream) places the duplicated tiles on the grid.
//!
//! Coordinates: `(row, col)` with `id = row * cols + col`.

use std::collections::{BTreeMap, BTreeSet};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::catalog::ContentCatalog;
use crate::rng::{create_rng, shuffle, RandomSource};
use memory_match_types::{Difficulty, DifficultyConfig, Rarity};

/// The content shared by the two tiles of a pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pairing {
    /// Identifier shared by exactly two tiles.
    pub key: String,
    pub label: String,
    pub item_name: String,
    pub variant_name: String,
    pub item_id: String,
    pub variant_id: String,
    pub rarity: String,
}

impl Pairing {
    /// Synthetic pairing used when the catalog is absent or too small (1-based).
    pub fn placeholder(n: usize) -> Self {
        let key = format!("placeholder-{}", n);
        let label = format!("Placeholder {}", n);
        Self {
            key: key.clone(),
            label: label.clone(),
            item_name: label,
            variant_name: String::new(),
            item_id: key.clone(),
            variant_id: key,
            rarity: Rarity::Consumer.as_str().to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.key.starts_with("placeholder-")
    }
}

/// One cell of the board
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: usize,
    pub row: u8,
    pub col: u8,
    pub pairing: Pairing,
    pub is_revealed: bool,
    pub is_matched: bool,
    pub is_animating: bool,
}

impl Tile {
    pub fn pair_key(&self) -> &str {
        &self.pairing.key
    }
}

/// Generated grid plus the inputs that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    tiles: Vec<Tile>,
    rows: u8,
    cols: u8,
    pairs: u8,
    seed: String,
}

impl Board {
    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn pairs(&self) -> u8 {
        self.pairs
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Mutable access for the collaborators that own presentation flags.
    pub fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    /// Get the tile at `(row, col)`, `None` if out of bounds
    pub fn tile(&self, row: u8, col: u8) -> Option<&Tile> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.tiles
            .get(row as usize * self.cols as usize + col as usize)
    }

    /// Number of tiles carrying each pair key.
    pub fn pair_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for tile in &self.tiles {
            *counts.entry(tile.pair_key()).or_insert(0) += 1;
        }
        counts
    }

    /// Mark every tile whose pair key is listed as matched and revealed.
    ///
    /// Returns how many tiles changed.
    pub fn apply_matches<S: AsRef<str>>(&mut self, keys: &[S]) -> usize {
        let mut changed = 0;
        for tile in &mut self.tiles {
            if tile.is_matched {
                continue;
            }
            if keys.iter().any(|k| k.as_ref() == tile.pairing.key) {
                tile.is_matched = true;
                tile.is_revealed = true;
                changed += 1;
            }
        }
        changed
    }

    /// True once every tile is matched.
    pub fn is_complete(&self) -> bool {
        self.tiles.iter().all(|t| t.is_matched)
    }
}

/// Seed used when the caller supplies none: current time in epoch milliseconds.
pub fn synthesize_seed() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
        .to_string()
}

/// Generate a board for `difficulty`.
///
/// An absent or empty `seed` is synthesized from the wall clock and stored in
/// the board so it can be replayed.
///
/// # Examples
///
/// ```
/// use memory_match_core::board::generate;
/// use memory_match_types::Difficulty;
///
/// let a = generate(Difficulty::Easy, Some("abc"), None);
/// let b = generate(Difficulty::Easy, Some("abc"), None);
/// assert_eq!(a, b);
/// assert_eq!(a.tiles().len(), 12);
/// assert_eq!(a.seed(), "abc");
/// ```
pub fn generate(
    difficulty: Difficulty,
    seed: Option<&str>,
    catalog: Option<&ContentCatalog>,
) -> Board {
    let seed = match seed {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => synthesize_seed(),
    };
    let mut rng = create_rng(&seed);
    generate_with(difficulty.config(), seed, catalog, &mut rng)
}

/// Generate with an explicit random source.
///
/// `seed` is recorded on the board as-is; `rng` is the only entropy consumed.
pub fn generate_with<R: RandomSource + ?Sized>(
    config: DifficultyConfig,
    seed: String,
    catalog: Option<&ContentCatalog>,
    rng: &mut R,
) -> Board {
    let pairs = config.pairs as usize;
    let chosen = choose_pairings(pairs, catalog, rng);

    let mut values: Vec<Pairing> = Vec::with_capacity(pairs * 2);
    for pairing in chosen {
        values.push(pairing.clone());
        values.push(pairing);
    }

    // Continues the stream used by the pool shuffle.
    shuffle(rng, &mut values);

    let cols = config.cols as usize;
    let tiles = values
        .into_iter()
        .enumerate()
        .map(|(id, pairing)| Tile {
            id,
            row: (id / cols) as u8,
            col: (id % cols) as u8,
            pairing,
            is_revealed: false,
            is_matched: false,
            is_animating: false,
        })
        .collect();

    Board {
        tiles,
        rows: config.rows,
        cols: config.cols,
        pairs: config.pairs,
        seed,
    }
}

fn choose_pairings<R: RandomSource + ?Sized>(
    pairs: usize,
    catalog: Option<&ContentCatalog>,
    rng: &mut R,
) -> Vec<Pairing> {
    let Some(catalog) = catalog.filter(|c| !c.is_empty()) else {
        return (1..=pairs).map(Pairing::placeholder).collect();
    };

    // Repeated (item, variant) ids collapse to their first occurrence.
    let mut seen = BTreeSet::new();
    let mut pool: Vec<Pairing> = catalog
        .pairings()
        .map(|(item, variant)| Pairing {
            key: format!("{}-{}", item.id, variant.id),
            label: format!("{} | {}", item.name, variant.name),
            item_name: item.name.clone(),
            variant_name: variant.name.clone(),
            item_id: item.id.to_string(),
            variant_id: variant.id.clone(),
            rarity: variant.rarity.clone(),
        })
        .filter(|p| seen.insert(p.key.clone()))
        .collect();
    shuffle(rng, &mut pool);

    let mut chosen: Vec<Pairing> = pool.into_iter().take(pairs).collect();

    if chosen.len() < pairs {
        let missing = pairs - chosen.len();
        tracing::warn!(
            available = chosen.len(),
            required = pairs,
            "catalog too small, padding with placeholder pairs"
        );
        chosen.extend((1..=missing).map(Pairing::placeholder));
    }

    chosen
}
