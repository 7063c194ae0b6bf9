//! Session state machine and its deferred effects.
//!
//! ## Key Types
//!
//! - `SessionMachine`: Applies the pairing rules to one session
//! - `SessionState`: Observable snapshot (cards, counters, phase)
//! - `SessionEvent`: Render-worthy consequences of clicks and timers
//! - `TimerQueue`: Virtual clock for the ticker and mismatch hides
//! - `Epoch`: Session generation guarding deferred hides across restarts

pub mod event;
pub mod machine;
pub mod state;
pub mod timer;

pub use event::SessionEvent;
pub use machine::{ClickOutcome, IgnoreReason, SessionMachine};
pub use state::{GameSummary, Phase, SessionState};
pub use timer::{Epoch, PendingHide, Timer, TimerQueue};
