//! Seed codec - the shareable `"<ordinal>&<seed>"` token
//!
//! Parsing is lenient on purpose: a malformed or legacy token must never break
//! page load, so anything that does not parse cleanly is treated as a raw seed
//! at [`Difficulty::Medium`].

use memory_match_types::{Difficulty, SEED_TOKEN_SEPARATOR};

/// Difficulty and seed carried by a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeedToken {
    pub difficulty: Difficulty,
    pub seed: String,
}

impl SeedToken {
    pub fn new(difficulty: Difficulty, seed: impl Into<String>) -> Self {
        Self {
            difficulty,
            seed: seed.into(),
        }
    }

    /// Encode back into the URL form.
    pub fn encode(&self) -> String {
        encode(self.difficulty, &self.seed)
    }
}

/// Encode a difficulty and seed into a token.
///
/// # Examples
///
/// ```
/// use memory_match_core::seed::encode;
/// use memory_match_types::Difficulty;
///
/// assert_eq!(encode(Difficulty::Hard, "abc"), "3&abc");
/// ```
pub fn encode(difficulty: Difficulty, seed: &str) -> String {
    format!("{}{}{}", difficulty.ordinal(), SEED_TOKEN_SEPARATOR, seed)
}

/// Decode a token, splitting on the first `&`.
///
/// A non-numeric (or empty) ordinal or an empty seed segment falls back to
/// `{Medium, token}`. Any numeric ordinal that names no difficulty, such as
/// `-1`, `2.5` or `99999999999`, keeps the seed segment and uses `Medium`.
///
/// # Examples
///
/// ```
/// use memory_match_core::seed::decode;
/// use memory_match_types::Difficulty;
///
/// let t = decode("1&abc");
/// assert_eq!((t.difficulty, t.seed.as_str()), (Difficulty::Easy, "abc"));
///
/// let t = decode("&abc");
/// assert_eq!((t.difficulty, t.seed.as_str()), (Difficulty::Medium, "&abc"));
/// ```
pub fn decode(token: &str) -> SeedToken {
    let Some((ordinal_part, seed_part)) = token.split_once(SEED_TOKEN_SEPARATOR) else {
        return fallback(token);
    };

    let ordinal_part = ordinal_part.trim();
    let ordinal = match ordinal_part.parse::<f64>() {
        Ok(n) if !n.is_nan() && !ordinal_part.is_empty() && !seed_part.is_empty() => n,
        _ => return fallback(token),
    };

    let difficulty = Some(ordinal)
        .filter(|n| n.fract() == 0.0 && (1.0..=4.0).contains(n))
        .and_then(|n| Difficulty::from_ordinal(n as u32))
        .unwrap_or_else(|| {
            tracing::debug!(ordinal, "unknown difficulty ordinal in seed token");
            Difficulty::Medium
        });

    SeedToken::new(difficulty, seed_part)
}

/// Legacy tokens carry only the seed; difficulty is implicitly `Medium`.
pub fn decode_legacy(token: &str) -> SeedToken {
    SeedToken::new(Difficulty::Medium, token)
}

/// Interpret the raw value of the `seed` query parameter.
///
/// Returns `None` for an empty value.
pub fn parse_seed_param(value: &str) -> Option<SeedToken> {
    if value.is_empty() {
        return None;
    }
    if value.contains(SEED_TOKEN_SEPARATOR) {
        Some(decode(value))
    } else {
        Some(decode_legacy(value))
    }
}

fn fallback(token: &str) -> SeedToken {
    tracing::debug!(token, "seed token did not parse, using it as a raw seed");
    SeedToken::new(Difficulty::Medium, token)
}
