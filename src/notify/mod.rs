//! Outcome notification: forwarding session events to the presentation layer.
//!
//! The presentation layer implements `Renderer`, one method per kind of
//! visible change. `Notifier` maps each `SessionEvent` onto the matching
//! call and holds no state of its own.

use crate::cards::Card;
use crate::session::{GameSummary, SessionEvent};

/// Rendering callbacks provided by the presentation layer.
pub trait Renderer {
    /// Show a card's symbol.
    fn render_reveal(&mut self, card: &Card);

    /// Turn a card face down and clear any mismatch highlight on it.
    fn render_hide(&mut self, card: &Card);

    /// Show a card as permanently matched.
    fn render_lock(&mut self, card: &Card);

    /// Display the moves remaining.
    fn render_moves_updated(&mut self, moves_remaining: u32);

    /// Remove one star from the rating.
    fn render_star_lost(&mut self);

    /// Highlight a mismatched pair until it is hidden.
    fn render_mismatch_feedback(&mut self, first: &Card, second: &Card);

    /// Show the end-of-game summary.
    fn render_game_won(&mut self, summary: &GameSummary);

    /// Show that the game is lost.
    fn render_game_lost(&mut self);
}

/// Stateless translator from session events to renderer calls.
#[derive(Clone, Copy, Debug, Default)]
pub struct Notifier;

impl Notifier {
    /// Forward one event.
    pub fn dispatch<R: Renderer + ?Sized>(event: &SessionEvent, renderer: &mut R) {
        match event {
            SessionEvent::Revealed(card) => renderer.render_reveal(card),
            SessionEvent::MovesUpdated(moves) => renderer.render_moves_updated(*moves),
            SessionEvent::StarLost(_) => renderer.render_star_lost(),
            SessionEvent::PairLocked(first, second) => {
                renderer.render_lock(first);
                renderer.render_lock(second);
            }
            SessionEvent::MismatchFeedback(first, second) => {
                renderer.render_mismatch_feedback(first, second);
            }
            SessionEvent::Hidden(card) => renderer.render_hide(card),
            SessionEvent::GameWon(summary) => renderer.render_game_won(summary),
            SessionEvent::GameLost => renderer.render_game_lost(),
        }
    }

    /// Forward a batch of events in order.
    pub fn dispatch_all<'a, R, I>(events: I, renderer: &mut R)
    where
        R: Renderer + ?Sized,
        I: IntoIterator<Item = &'a SessionEvent>,
    {
        for event in events {
            Self::dispatch(event, renderer);
        }
    }
}

/// One renderer call, as captured by `RecordingRenderer`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderCall {
    /// `render_reveal`
    Reveal(Card),
    /// `render_hide`
    Hide(Card),
    /// `render_lock`
    Lock(Card),
    /// `render_moves_updated`
    MovesUpdated(u32),
    /// `render_star_lost`
    StarLost,
    /// `render_mismatch_feedback`
    MismatchFeedback(Card, Card),
    /// `render_game_won`
    GameWon(GameSummary),
    /// `render_game_lost`
    GameLost,
}

/// Renderer that records every call, for headless hosts and tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
    /// Calls in the order they were made.
    pub calls: Vec<RenderCall>,
}

impl RecordingRenderer {
    /// Create a renderer with no recorded calls.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the calls recorded so far.
    pub fn take(&mut self) -> Vec<RenderCall> {
        std::mem::take(&mut self.calls)
    }
}

impl Renderer for RecordingRenderer {
    fn render_reveal(&mut self, card: &Card) {
        self.calls.push(RenderCall::Reveal(*card));
    }

    fn render_hide(&mut self, card: &Card) {
        self.calls.push(RenderCall::Hide(*card));
    }

    fn render_lock(&mut self, card: &Card) {
        self.calls.push(RenderCall::Lock(*card));
    }

    fn render_moves_updated(&mut self, moves_remaining: u32) {
        self.calls.push(RenderCall::MovesUpdated(moves_remaining));
    }

    fn render_star_lost(&mut self) {
        self.calls.push(RenderCall::StarLost);
    }

    fn render_mismatch_feedback(&mut self, first: &Card, second: &Card) {
        self.calls.push(RenderCall::MismatchFeedback(*first, *second));
    }

    fn render_game_won(&mut self, summary: &GameSummary) {
        self.calls.push(RenderCall::GameWon(*summary));
    }

    fn render_game_lost(&mut self) {
        self.calls.push(RenderCall::GameLost);
    }
}
