//! # memory-match
//!
//! Session controller for a pair-matching memory card game.
//!
//! A deck of paired symbol cards is shuffled and dealt face down. The player
//! reveals cards two at a time: matching pairs are locked open, mismatches
//! are hidden again after a short delay. A move counter and a star rating
//! track performance until every pair is matched or the moves run out.
//!
//! ## Design Principles
//!
//! 1. **Presentation-Agnostic**: The crate never draws anything. It emits
//!    `SessionEvent`s and forwards them to a host-provided `Renderer`.
//!
//! 2. **Owned State**: All session state lives in one `SessionMachine`;
//!    there is no process-wide mutable state.
//!
//! 3. **Restart-Safe Deferred Effects**: Time is virtual and advanced by the
//!    host. Deferred hides carry the `Epoch` they were scheduled in and do
//!    nothing once a restart has moved the session on.
//!
//! ## Modules
//!
//! - `core`: Deterministic RNG and session configuration
//! - `cards`: Card entities, deck generation, and the card registry
//! - `session`: The state machine, events, and timer queue
//! - `notify`: `Renderer` callbacks and the event `Notifier`
//! - `controller`: `GameController`, the surface hosts drive

pub mod core;
pub mod cards;
pub mod session;
pub mod notify;
pub mod controller;

// Re-export commonly used types
pub use crate::core::{ConfigError, GameRng, GameRngState, SessionConfig, DEFAULT_SYMBOLS};

pub use crate::cards::{Card, CardId, CardRegistry, CardState, SymbolId};

pub use crate::session::{
    ClickOutcome, Epoch, GameSummary, IgnoreReason, PendingHide, Phase,
    SessionEvent, SessionMachine, SessionState, TimerQueue,
};

pub use crate::notify::{Notifier, RecordingRenderer, RenderCall, Renderer};

pub use crate::controller::GameController;
