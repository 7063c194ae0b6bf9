//! Session configuration.
//!
//! A `SessionConfig` fixes everything a session needs at start:
//! the symbol set (one label per pair), the move and star budgets,
//! the timing of deferred effects, and the deck seed.

use serde::{Deserialize, Serialize};

use crate::cards::MAX_CARDS;

/// Symbol labels used by the default eight-pair deck.
pub const DEFAULT_SYMBOLS: [&str; 8] = [
    "diamond",
    "paper-plane",
    "anchor",
    "bolt",
    "cube",
    "leaf",
    "bicycle",
    "bomb",
];

/// Error returned when a configuration cannot produce a playable session.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ConfigError {
    /// The deck would have no pairs.
    #[display("Deck must contain at least one pair")]
    NoPairs,

    /// The deck would hold more cards than `CardId` can address.
    #[display("Deck of {} pairs exceeds the {} card limit", _0, MAX_CARDS)]
    TooManyPairs(usize),

    /// A fixed deck does not hold exactly two cards of each configured symbol.
    #[display("Deck must hold exactly two cards of each of the {} symbols", _0)]
    InvalidDeck(usize),

    /// Two pairs share the same label.
    #[display("Symbol {:?} appears more than once", _0)]
    DuplicateSymbol(String),

    /// The move budget is zero.
    #[display("Initial moves must be at least 1")]
    NoMoves,

    /// The star rating starts at zero.
    #[display("Initial stars must be at least 1")]
    NoStars,

    /// The elapsed-time ticker would never advance.
    #[display("Tick interval must be at least 1ms")]
    ZeroTickInterval,
}

impl std::error::Error for ConfigError {}

/// Configuration for one game session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Distinct symbol labels, one per pair.
    pub symbols: Vec<String>,

    /// Moves available at session start.
    /// A move is consumed by every second-of-pair click.
    pub initial_moves: u32,

    /// Star rating at session start.
    pub initial_stars: u32,

    /// Delay before a mismatched pair is hidden again.
    pub mismatch_delay_ms: u64,

    /// Interval of the elapsed-time ticker.
    pub tick_interval_ms: u64,

    /// Seed for the deck shuffle.
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| (*s).to_string()).collect(),
            initial_moves: 24,
            initial_stars: 3,
            mismatch_delay_ms: 1000,
            tick_interval_ms: 1000,
            seed: 42,
        }
    }
}

impl SessionConfig {
    /// Resize the symbol set to `pair_count` pairs.
    ///
    /// Keeps the leading default labels and generates `symbol-<i>`
    /// labels past the end of the current set.
    #[must_use]
    pub fn with_pair_count(mut self, pair_count: usize) -> Self {
        self.symbols.truncate(pair_count);
        for i in self.symbols.len()..pair_count {
            self.symbols.push(format!("symbol-{i}"));
        }
        self
    }

    /// Replace the symbol set.
    #[must_use]
    pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    /// Set the move budget.
    #[must_use]
    pub fn with_moves(mut self, moves: u32) -> Self {
        self.initial_moves = moves;
        self
    }

    /// Set the starting star rating.
    #[must_use]
    pub fn with_stars(mut self, stars: u32) -> Self {
        self.initial_stars = stars;
        self
    }

    /// Set the mismatch hide delay.
    #[must_use]
    pub fn with_mismatch_delay_ms(mut self, delay: u64) -> Self {
        self.mismatch_delay_ms = delay;
        self
    }

    /// Set the ticker interval.
    #[must_use]
    pub fn with_tick_interval_ms(mut self, interval: u64) -> Self {
        self.tick_interval_ms = interval;
        self
    }

    /// Set the deck seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of pairs in the deck.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.symbols.len()
    }

    /// Moves that must be consumed to lose one star.
    ///
    /// Integer division: with 20 moves and 3 stars a star is lost every 6 moves.
    /// Zero when there are fewer moves than stars, which disables star decay.
    #[must_use]
    pub fn moves_per_star(&self) -> u32 {
        if self.initial_stars == 0 {
            return 0;
        }
        self.initial_moves / self.initial_stars
    }

    /// Check that this configuration can produce a playable session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbols.is_empty() {
            return Err(ConfigError::NoPairs);
        }
        if self.pair_count() * 2 > MAX_CARDS {
            return Err(ConfigError::TooManyPairs(self.pair_count()));
        }
        let mut seen = rustc_hash::FxHashSet::default();
        for symbol in &self.symbols {
            if !seen.insert(symbol.as_str()) {
                return Err(ConfigError::DuplicateSymbol(symbol.clone()));
            }
        }
        if self.initial_moves == 0 {
            return Err(ConfigError::NoMoves);
        }
        if self.initial_stars == 0 {
            return Err(ConfigError::NoStars);
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }
}
