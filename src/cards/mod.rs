//! Card system: card entities, deck generation, and the card registry.
//!
//! ## Key Types
//!
//! - `CardId`: Stable identifier for a dealt card (its deck position)
//! - `SymbolId`: Symbol kind; each appears on exactly two cards
//! - `Card`: A card with its symbol and visible state
//! - `CardRegistry`: The dealt deck with lookup by `CardId`

pub mod card;
pub mod deck;
pub mod registry;

pub use card::{Card, CardId, CardState, SymbolId};
pub use deck::{deal, paired_symbols, shuffle};
pub use registry::{CardRegistry, MAX_CARDS};
