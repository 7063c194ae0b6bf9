//! Session events.
//!
//! The `SessionMachine` never talks to the presentation layer directly.
//! Every visible consequence of a click or a timer is queued as a
//! `SessionEvent`; the `Notifier` forwards them to a `Renderer`.

use serde::{Deserialize, Serialize};

use super::state::GameSummary;
use crate::cards::Card;

/// Something the presentation layer should render.
///
/// Cards are carried by value as they were when the event fired.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A card was turned face up.
    Revealed(Card),

    /// The move counter changed; carries the moves remaining.
    MovesUpdated(u32),

    /// One star was lost; carries the stars remaining.
    StarLost(u32),

    /// Two cards were locked as a matched pair.
    PairLocked(Card, Card),

    /// Two revealed cards did not match and will be hidden after a delay.
    MismatchFeedback(Card, Card),

    /// A card was turned face down again after a mismatch.
    Hidden(Card),

    /// Every pair was matched.
    GameWon(GameSummary),

    /// Moves ran out with pairs left.
    GameLost,
}

impl SessionEvent {
    /// Whether this event ends the session.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionEvent::GameWon(_) | SessionEvent::GameLost)
    }
}
