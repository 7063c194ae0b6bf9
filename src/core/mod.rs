//! Core building blocks: RNG and session configuration.

pub mod config;
pub mod rng;

pub use config::{ConfigError, SessionConfig, DEFAULT_SYMBOLS};
pub use rng::{GameRng, GameRngState};
