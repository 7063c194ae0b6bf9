//! Session state snapshot.
//!
//! `SessionState` is the complete observable state of a session. The
//! `SessionMachine` owns the live value; the presentation layer only ever
//! receives clones, which are cheap because the deck is persistent.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, CardRegistry};

/// Lifecycle phase of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Clicks are processed.
    #[default]
    Active,
    /// All pairs matched. Terminal.
    Won,
    /// Moves ran out with pairs left. Terminal.
    Lost,
}

impl Phase {
    /// Whether this phase ends the session.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self != Phase::Active
    }
}

/// Final score reported when a session is won.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Moves consumed: initial moves minus moves remaining.
    pub moves_used: u32,

    /// Star rating at the end of the game.
    pub stars_remaining: u32,

    /// Seconds on the clock when the last pair was matched.
    pub elapsed_seconds: u64,
}

/// Observable state of one session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// The dealt cards and their visible state.
    pub cards: CardRegistry,

    /// Card revealed and waiting for its partner, if any.
    pub selected: Option<CardId>,

    /// Moves left; never negative.
    pub moves_remaining: u32,

    /// Current star rating; never increases.
    pub stars_remaining: u32,

    /// Pairs locked so far; never decreases.
    pub matched_pairs: u32,

    /// Seconds counted by the ticker.
    pub elapsed_seconds: u64,

    /// Lifecycle phase.
    pub phase: Phase,
}

impl SessionState {
    /// Fresh state for a newly dealt deck.
    #[must_use]
    pub fn new(cards: CardRegistry, initial_moves: u32, initial_stars: u32) -> Self {
        Self {
            cards,
            selected: None,
            moves_remaining: initial_moves,
            stars_remaining: initial_stars,
            matched_pairs: 0,
            elapsed_seconds: 0,
            phase: Phase::Active,
        }
    }

    /// Number of pairs in the deck.
    #[must_use]
    pub fn pair_count(&self) -> u32 {
        u32::try_from(self.cards.pair_count()).unwrap_or(u32::MAX)
    }

    /// Whether every pair has been matched.
    #[must_use]
    pub fn all_matched(&self) -> bool {
        self.matched_pairs == self.pair_count()
    }
}
