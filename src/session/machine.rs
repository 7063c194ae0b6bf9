//! The session state machine.
//!
//! ## Click Handling
//!
//! `on_card_clicked` is the only mutating entry point driven by input:
//!
//! 1. Clicks are ignored once the session is Won or Lost.
//! 2. Matched cards ignore clicks.
//! 3. Re-clicking the selected card is ignored; it consumes no move.
//! 4. The first card of a pair is revealed and selected.
//! 5. The second card is revealed and consumes one move. The pair is then
//!    either locked (same symbol) or scheduled to be hidden again.
//! 6. Star decay and the Won/Lost check run after every consumed move.
//!
//! Bookkeeping is synchronous. Only the hide of a mismatched pair is deferred,
//! returned to the caller as a `PendingHide` to be applied later with
//! `apply_hide`.

use tracing::{debug, info};

use super::event::SessionEvent;
use super::state::{GameSummary, Phase, SessionState};
use super::timer::{Epoch, PendingHide};
use crate::cards::{Card, CardId, CardRegistry, CardState};
use crate::core::SessionConfig;

/// Why a click changed nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    /// The session is Won or Lost.
    SessionOver,
    /// The click did not resolve to a tracked card.
    UnknownCard,
    /// The card is already locked in a matched pair.
    AlreadyMatched,
    /// The card is the one already waiting for a partner.
    AlreadySelected,
}

/// Result of processing one click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// First card of a pair revealed; no move consumed.
    Selected(CardId),
    /// Second card matched the first; both are locked.
    Matched(CardId, CardId),
    /// Second card did not match; both hide once the pending hide applies.
    Mismatched(PendingHide),
}

/// Owns one session's state and applies the game rules to it.
#[derive(Clone, Debug)]
pub struct SessionMachine {
    state: SessionState,
    epoch: Epoch,

    initial_moves: u32,
    moves_per_star: u32,
    mismatch_delay_ms: u64,
    tick_interval_ms: u64,

    moves_since_star: u32,
    /// Milliseconds counted by the ticker; `elapsed_seconds` is derived from it.
    elapsed_ms: u64,
    ticker_running: bool,

    events: Vec<SessionEvent>,
}

impl SessionMachine {
    /// Start a session over an already dealt deck.
    #[must_use]
    pub fn new(config: &SessionConfig, cards: CardRegistry, epoch: Epoch) -> Self {
        Self {
            state: SessionState::new(cards, config.initial_moves, config.initial_stars),
            epoch,
            initial_moves: config.initial_moves,
            moves_per_star: config.moves_per_star(),
            mismatch_delay_ms: config.mismatch_delay_ms,
            tick_interval_ms: config.tick_interval_ms,
            moves_since_star: 0,
            elapsed_ms: 0,
            ticker_running: true,
            events: Vec::new(),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Epoch this session was started in.
    #[must_use]
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Whether the elapsed-time ticker is still counting.
    #[must_use]
    pub fn ticker_running(&self) -> bool {
        self.ticker_running
    }

    /// Take the events queued since the last call.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Process a click on `id`.
    pub fn on_card_clicked(&mut self, id: CardId) -> ClickOutcome {
        if self.state.phase.is_terminal() {
            return self.ignore(id, IgnoreReason::SessionOver);
        }
        let Some(card) = self.state.cards.lookup(id).copied() else {
            return self.ignore(id, IgnoreReason::UnknownCard);
        };
        if card.is_matched() {
            return self.ignore(id, IgnoreReason::AlreadyMatched);
        }
        if self.state.selected == Some(id) {
            return self.ignore(id, IgnoreReason::AlreadySelected);
        }

        let card = self.reveal(card);

        let previous = self
            .state
            .selected
            .take()
            .and_then(|prev| self.state.cards.lookup(prev).copied());
        let Some(previous) = previous else {
            self.state.selected = Some(id);
            return ClickOutcome::Selected(id);
        };

        self.consume_move();

        let outcome = if previous.symbol == card.symbol {
            self.lock_pair(previous, card)
        } else {
            self.reject_pair(previous, card)
        };

        self.decay_star();
        self.check_termination();

        outcome
    }

    /// Hide a mismatched pair scheduled by an earlier click.
    ///
    /// A hide from another epoch is stale and does nothing. Only cards still
    /// revealed and not currently selected are hidden. Returns whether the
    /// hide belonged to this session.
    pub fn apply_hide(&mut self, pending: &PendingHide) -> bool {
        if pending.epoch != self.epoch {
            debug!(
                stale = %pending.epoch,
                current = %self.epoch,
                "Ignoring hide from a previous session"
            );
            return false;
        }

        for id in pending.cards {
            if self.state.selected == Some(id) {
                continue;
            }
            if let Some(card) = self.state.cards.lookup(id).copied() {
                if card.is_revealed() {
                    self.state.cards.set_state(id, CardState::Hidden);
                    self.events.push(SessionEvent::Hidden(Card {
                        state: CardState::Hidden,
                        ..card
                    }));
                }
            }
        }
        true
    }

    /// Advance the elapsed time by one ticker interval if the ticker runs.
    ///
    /// `elapsed_seconds` only counts whole seconds, whatever the interval.
    pub fn tick(&mut self) -> bool {
        if !self.ticker_running {
            return false;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(self.tick_interval_ms);
        self.state.elapsed_seconds = self.elapsed_ms / 1000;
        true
    }

    /// Stop the elapsed-time ticker. Returns false if it was already stopped.
    pub fn stop_timer(&mut self) -> bool {
        std::mem::replace(&mut self.ticker_running, false)
    }

    fn ignore(&self, id: CardId, reason: IgnoreReason) -> ClickOutcome {
        debug!(card = %id, ?reason, "Ignoring click");
        ClickOutcome::Ignored(reason)
    }

    fn reveal(&mut self, card: Card) -> Card {
        self.state.cards.set_state(card.id, CardState::Revealed);
        let revealed = Card {
            state: CardState::Revealed,
            ..card
        };
        self.events.push(SessionEvent::Revealed(revealed));
        revealed
    }

    fn consume_move(&mut self) {
        self.state.moves_remaining = self.state.moves_remaining.saturating_sub(1);
        self.events
            .push(SessionEvent::MovesUpdated(self.state.moves_remaining));
    }

    fn lock_pair(&mut self, previous: Card, card: Card) -> ClickOutcome {
        debug!(first = %previous.id, second = %card.id, symbol = %card.symbol, "Pair matched");

        self.state.cards.set_state(previous.id, CardState::Matched);
        self.state.cards.set_state(card.id, CardState::Matched);
        self.state.matched_pairs += 1;

        let locked = |c: Card| Card {
            state: CardState::Matched,
            ..c
        };
        self.events
            .push(SessionEvent::PairLocked(locked(previous), locked(card)));
        ClickOutcome::Matched(previous.id, card.id)
    }

    fn reject_pair(&mut self, previous: Card, card: Card) -> ClickOutcome {
        debug!(first = %previous.id, second = %card.id, "Pair mismatched");

        self.events
            .push(SessionEvent::MismatchFeedback(previous, card));
        ClickOutcome::Mismatched(PendingHide {
            epoch: self.epoch,
            cards: [previous.id, card.id],
            delay_ms: self.mismatch_delay_ms,
        })
    }

    fn decay_star(&mut self) {
        self.moves_since_star += 1;
        if self.moves_since_star == self.moves_per_star {
            self.moves_since_star = 0;
            if self.state.stars_remaining > 0 {
                self.state.stars_remaining -= 1;
                self.events
                    .push(SessionEvent::StarLost(self.state.stars_remaining));
            }
        }
    }

    fn check_termination(&mut self) {
        if self.state.all_matched() {
            self.state.phase = Phase::Won;
            self.stop_timer();

            let summary = GameSummary {
                moves_used: self.initial_moves - self.state.moves_remaining,
                stars_remaining: self.state.stars_remaining,
                elapsed_seconds: self.state.elapsed_seconds,
            };
            info!(
                moves_used = summary.moves_used,
                stars = summary.stars_remaining,
                seconds = summary.elapsed_seconds,
                "Game won"
            );
            self.events.push(SessionEvent::GameWon(summary));
        } else if self.state.moves_remaining == 0 {
            self.state.phase = Phase::Lost;
            info!(
                matched_pairs = self.state.matched_pairs,
                pair_count = self.state.pair_count(),
                "Game lost"
            );
            self.events.push(SessionEvent::GameLost);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::SymbolId;

    const X: SymbolId = SymbolId::new(0);
    const Y: SymbolId = SymbolId::new(1);

    fn machine(symbols: &[SymbolId], moves: u32, stars: u32) -> SessionMachine {
        let config = SessionConfig::default()
            .with_pair_count(symbols.len() / 2)
            .with_moves(moves)
            .with_stars(stars);
        SessionMachine::new(&config, CardRegistry::build(symbols), Epoch(0))
    }

    fn id(i: u16) -> CardId {
        CardId::new(i)
    }

    #[test]
    fn test_first_click_selects() {
        let mut m = machine(&[X, Y, X, Y], 10, 2);

        assert_eq!(m.on_card_clicked(id(0)), ClickOutcome::Selected(id(0)));
        assert_eq!(m.state().selected, Some(id(0)));
        assert_eq!(m.state().moves_remaining, 10);
        assert!(m.state().cards.lookup(id(0)).unwrap().is_revealed());

        let events = m.take_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], SessionEvent::Revealed(c) if c.id == id(0)));
    }

    #[test]
    fn test_same_card_twice_is_ignored() {
        let mut m = machine(&[X, Y, X, Y], 10, 2);
        m.on_card_clicked(id(0));
        m.take_events();

        assert_eq!(
            m.on_card_clicked(id(0)),
            ClickOutcome::Ignored(IgnoreReason::AlreadySelected)
        );
        assert_eq!(m.state().moves_remaining, 10);
        assert_eq!(m.state().selected, Some(id(0)));
        assert!(m.take_events().is_empty());
    }

    #[test]
    fn test_unknown_card_is_ignored() {
        let mut m = machine(&[X, Y, X, Y], 10, 2);
        assert_eq!(
            m.on_card_clicked(id(9)),
            ClickOutcome::Ignored(IgnoreReason::UnknownCard)
        );
        assert!(m.take_events().is_empty());
    }

    #[test]
    fn test_match_locks_pair() {
        let mut m = machine(&[X, Y, X, Y], 10, 2);
        m.on_card_clicked(id(0));

        assert_eq!(m.on_card_clicked(id(2)), ClickOutcome::Matched(id(0), id(2)));
        assert_eq!(m.state().matched_pairs, 1);
        assert_eq!(m.state().moves_remaining, 9);
        assert_eq!(m.state().selected, None);
        assert!(m.state().cards.lookup(id(0)).unwrap().is_matched());
        assert!(m.state().cards.lookup(id(2)).unwrap().is_matched());

        // Locked cards ignore clicks
        assert_eq!(
            m.on_card_clicked(id(2)),
            ClickOutcome::Ignored(IgnoreReason::AlreadyMatched)
        );
    }

    #[test]
    fn test_mismatch_then_hide() {
        let mut m = machine(&[X, Y, X, Y], 10, 2);
        m.on_card_clicked(id(0));
        m.take_events();

        let ClickOutcome::Mismatched(pending) = m.on_card_clicked(id(1)) else {
            panic!("expected a mismatch");
        };
        assert_eq!(pending.cards, [id(0), id(1)]);
        assert_eq!(pending.epoch, Epoch(0));

        let events = m.take_events();
        assert!(matches!(events[0], SessionEvent::Revealed(c) if c.id == id(1)));
        assert_eq!(events[1], SessionEvent::MovesUpdated(9));
        assert!(matches!(events[2], SessionEvent::MismatchFeedback(a, b) if a.id == id(0) && b.id == id(1)));

        // Still revealed until the hide applies
        assert!(m.state().cards.lookup(id(1)).unwrap().is_revealed());

        assert!(m.apply_hide(&pending));
        assert!(m.state().cards.lookup(id(0)).unwrap().is_hidden());
        assert!(m.state().cards.lookup(id(1)).unwrap().is_hidden());
        assert_eq!(m.take_events().len(), 2);
    }

    #[test]
    fn test_hide_skips_reselected_card() {
        let mut m = machine(&[X, Y, X, Y], 10, 2);
        m.on_card_clicked(id(0));
        let ClickOutcome::Mismatched(pending) = m.on_card_clicked(id(1)) else {
            panic!("expected a mismatch");
        };

        // Card 0 clicked again before the hide fires
        assert_eq!(m.on_card_clicked(id(0)), ClickOutcome::Selected(id(0)));
        m.take_events();

        m.apply_hide(&pending);
        assert!(m.state().cards.lookup(id(0)).unwrap().is_revealed());
        assert!(m.state().cards.lookup(id(1)).unwrap().is_hidden());
        assert_eq!(m.take_events().len(), 1);
    }

    #[test]
    fn test_hide_skips_matched_card() {
        let mut m = machine(&[X, Y, X, Y], 10, 2);
        m.on_card_clicked(id(0));
        let ClickOutcome::Mismatched(pending) = m.on_card_clicked(id(1)) else {
            panic!("expected a mismatch");
        };

        // Card 0 re-clicked and matched before the hide fires
        m.on_card_clicked(id(0));
        m.on_card_clicked(id(2));

        m.apply_hide(&pending);
        assert!(m.state().cards.lookup(id(0)).unwrap().is_matched());
        assert!(m.state().cards.lookup(id(1)).unwrap().is_hidden());
    }

    #[test]
    fn test_stale_hide_is_ignored() {
        let mut m = machine(&[X, Y, X, Y], 10, 2);
        m.on_card_clicked(id(0));
        m.on_card_clicked(id(1));

        let stale = PendingHide {
            epoch: Epoch(7),
            cards: [id(0), id(1)],
            delay_ms: 1000,
        };
        assert!(!m.apply_hide(&stale));
        assert!(m.state().cards.lookup(id(0)).unwrap().is_revealed());
    }

    #[test]
    fn test_star_decay() {
        // 4 moves, 2 stars: one star every 2 moves
        let mut m = machine(&[X, Y, X, Y], 4, 2);

        m.on_card_clicked(id(0));
        m.on_card_clicked(id(1));
        assert_eq!(m.state().stars_remaining, 2);

        m.on_card_clicked(id(0));
        m.on_card_clicked(id(1));
        assert_eq!(m.state().stars_remaining, 1);
        assert!(m.take_events().contains(&SessionEvent::StarLost(1)));

        m.on_card_clicked(id(0));
        m.on_card_clicked(id(1));
        m.on_card_clicked(id(0));
        m.on_card_clicked(id(1));
        assert_eq!(m.state().stars_remaining, 0);
        assert_eq!(m.phase(), Phase::Lost);
    }

    #[test]
    fn test_no_star_decay_when_moves_below_stars() {
        let mut m = machine(&[X, Y, X, Y], 2, 3);
        m.on_card_clicked(id(0));
        m.on_card_clicked(id(1));
        m.on_card_clicked(id(0));
        m.on_card_clicked(id(1));
        assert_eq!(m.state().stars_remaining, 3);
    }

    #[test]
    fn test_won_stops_ticker() {
        let mut m = machine(&[X, X], 5, 1);
        m.tick();
        m.tick();

        m.on_card_clicked(id(0));
        m.on_card_clicked(id(1));

        assert_eq!(m.phase(), Phase::Won);
        assert!(!m.ticker_running());
        assert!(!m.tick());
        assert!(!m.stop_timer());

        let events = m.take_events();
        assert_eq!(
            events.last(),
            Some(&SessionEvent::GameWon(GameSummary {
                moves_used: 1,
                stars_remaining: 1,
                elapsed_seconds: 2,
            }))
        );
    }

    #[test]
    fn test_tick_counts_whole_seconds() {
        let config = SessionConfig::default()
            .with_pair_count(1)
            .with_tick_interval_ms(400);
        let mut m = SessionMachine::new(&config, CardRegistry::build(&[X, X]), Epoch(0));

        m.tick();
        m.tick();
        assert_eq!(m.state().elapsed_seconds, 0);

        m.tick(); // 1200ms
        assert_eq!(m.state().elapsed_seconds, 1);

        for _ in 0..2 {
            m.tick();
        }
        assert_eq!(m.state().elapsed_seconds, 2);
    }

    #[test]
    fn test_lost_keeps_ticker() {
        let mut m = machine(&[X, Y, X, Y], 1, 1);
        m.on_card_clicked(id(0));
        m.on_card_clicked(id(1));

        assert_eq!(m.phase(), Phase::Lost);
        assert!(m.ticker_running());
        assert!(m.tick());
        assert_eq!(m.state().elapsed_seconds, 1);

        assert_eq!(
            m.on_card_clicked(id(2)),
            ClickOutcome::Ignored(IgnoreReason::SessionOver)
        );
    }
}
