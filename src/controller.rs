//! Game controller: the surface the presentation layer drives.
//!
//! `GameController` deals the deck, owns the running `SessionMachine`,
//! drives deferred effects from a virtual clock, and forwards every session
//! event to the host's `Renderer`.
//!
//! ## Usage
//!
//! ```
//! use memory_match::{CardId, GameController, Phase, RecordingRenderer};
//!
//! let mut game = GameController::init_session(2, 10, 2, RecordingRenderer::new()).unwrap();
//!
//! game.on_card_clicked(CardId::new(0));
//! game.advance(1500);
//!
//! let state = game.get_state();
//! assert_eq!(state.phase, Phase::Active);
//! assert_eq!(state.elapsed_seconds, 1);
//! ```

use tracing::{debug, info};

use crate::cards::{deal, CardId, CardRegistry, SymbolId};
use crate::core::{ConfigError, GameRng, GameRngState, SessionConfig};
use crate::notify::{Notifier, Renderer};
use crate::session::{
    ClickOutcome, Epoch, IgnoreReason, PendingHide, SessionMachine, SessionState, Timer, TimerQueue,
};

/// Handle to a running game.
pub struct GameController<R: Renderer> {
    config: SessionConfig,
    rng: GameRng,
    machine: SessionMachine,
    timers: TimerQueue,
    renderer: R,
}

impl<R: Renderer> GameController<R> {
    /// Start a session with the default symbols and timing.
    pub fn init_session(
        pair_count: usize,
        initial_moves: u32,
        initial_stars: u32,
        renderer: R,
    ) -> Result<Self, ConfigError> {
        let config = SessionConfig::default()
            .with_pair_count(pair_count)
            .with_moves(initial_moves)
            .with_stars(initial_stars);
        Self::from_config(config, renderer)
    }

    /// Start a session from a full configuration.
    pub fn from_config(config: SessionConfig, renderer: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = GameRng::new(config.seed).for_context("deck");
        let machine = Self::start(&config, &mut rng, Epoch::default());
        Ok(Self::assemble(config, rng, machine, renderer))
    }

    /// Start a session over a fixed, already shuffled deck.
    ///
    /// `symbols` are indexes into `config.symbols`; each must appear twice.
    pub fn with_deck(
        config: SessionConfig,
        symbols: &[SymbolId],
        renderer: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let cards = CardRegistry::build(symbols);
        let in_range = symbols
            .iter()
            .all(|s| (s.raw() as usize) < config.pair_count());
        if symbols.len() != config.pair_count() * 2 || !in_range || !cards.validate_pairs() {
            return Err(ConfigError::InvalidDeck(config.pair_count()));
        }

        let rng = GameRng::new(config.seed).for_context("deck");
        let machine = SessionMachine::new(&config, cards, Epoch::default());
        Ok(Self::assemble(config, rng, machine, renderer))
    }

    fn assemble(config: SessionConfig, rng: GameRng, machine: SessionMachine, renderer: R) -> Self {
        let timers = TimerQueue::new(config.tick_interval_ms);
        Self {
            config,
            rng,
            machine,
            timers,
            renderer,
        }
    }

    fn start(config: &SessionConfig, rng: &mut GameRng, epoch: Epoch) -> SessionMachine {
        let cards = CardRegistry::build(&deal(config.pair_count(), rng));
        info!(
            %epoch,
            pairs = config.pair_count(),
            moves = config.initial_moves,
            stars = config.initial_stars,
            "Session started"
        );
        SessionMachine::new(config, cards, epoch)
    }

    /// Process a click on a card.
    ///
    /// A mismatch schedules the hide of both cards on the virtual clock.
    pub fn on_card_clicked(&mut self, id: CardId) -> ClickOutcome {
        let outcome = self.machine.on_card_clicked(id);
        if let ClickOutcome::Mismatched(pending) = outcome {
            self.timers.schedule(pending);
        }
        if !self.machine.ticker_running() {
            self.timers.cancel_ticker();
        }
        self.flush();
        outcome
    }

    /// Process a click identified by its raw position in the rendered deck.
    pub fn on_index_clicked(&mut self, index: usize) -> ClickOutcome {
        match self.machine.state().cards.lookup_index(index) {
            Some(id) => self.on_card_clicked(id),
            None => {
                debug!(index, "Click outside any card");
                ClickOutcome::Ignored(IgnoreReason::UnknownCard)
            }
        }
    }

    /// Advance the virtual clock, firing ticks and hides that come due.
    pub fn advance(&mut self, elapsed_ms: u64) {
        let until = self.timers.now_ms().saturating_add(elapsed_ms);
        while let Some(timer) = self.timers.pop_due(until) {
            match timer {
                Timer::Tick => {
                    self.machine.tick();
                }
                Timer::Hide(pending) => {
                    self.machine.apply_hide(&pending);
                }
            }
        }
        self.timers.finish(until);
        self.flush();
    }

    /// Apply a hide the host scheduled on its own timer.
    ///
    /// Hides from before the last restart are ignored.
    pub fn apply_hide(&mut self, pending: &PendingHide) -> bool {
        let applied = self.machine.apply_hide(pending);
        self.flush();
        applied
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn get_state(&self) -> SessionState {
        self.machine.state().clone()
    }

    /// Whether clicks can still change the session.
    #[must_use]
    pub fn accepts_input(&self) -> bool {
        !self.machine.phase().is_terminal()
    }

    /// Deal a new deck and start over.
    ///
    /// The ticker restarts from zero and hides scheduled by the previous
    /// session are dropped or, if held by the host, become no-ops.
    pub fn restart(&mut self) {
        let epoch = self.machine.epoch().next();
        self.machine = Self::start(&self.config, &mut self.rng, epoch);
        self.timers = TimerQueue::new(self.config.tick_interval_ms);
    }

    /// Current session epoch.
    #[must_use]
    pub fn epoch(&self) -> Epoch {
        self.machine.epoch()
    }

    /// Configuration the sessions are dealt from.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Label of the symbol shown on a card.
    #[must_use]
    pub fn symbol_label(&self, id: CardId) -> Option<&str> {
        let card = self.machine.state().cards.lookup(id)?;
        self.config
            .symbols
            .get(card.symbol.raw() as usize)
            .map(String::as_str)
    }

    /// Deck RNG state, for replaying the next deal.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Virtual time since the session started.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    /// Hides waiting on the virtual clock.
    #[must_use]
    pub fn pending_hides(&self) -> usize {
        self.timers.pending_hides()
    }

    /// The host's renderer.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable access to the host's renderer.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    fn flush(&mut self) {
        let events = self.machine.take_events();
        Notifier::dispatch_all(&events, &mut self.renderer);
    }
}
