//! Card registry: the dealt deck and lookup by card identity.
//!
//! The `CardRegistry` owns every card of a session in deal order.
//! Cards are created once when the deck is dealt and only change state
//! afterwards; a restart builds a fresh registry.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::{Card, CardId, CardState, SymbolId};

/// Most cards a registry can hold: one per `CardId` value.
pub const MAX_CARDS: usize = u16::MAX as usize + 1;

/// Ordered collection of the cards in play.
///
/// Backed by `im::Vector` so snapshots handed to the presentation layer
/// are O(1) clones.
///
/// ## Example
///
/// ```
/// use memory_match::cards::{CardRegistry, CardId, SymbolId};
///
/// let registry = CardRegistry::build(&[SymbolId::new(0), SymbolId::new(0)]);
///
/// let card = registry.lookup(CardId::new(1)).unwrap();
/// assert_eq!(card.symbol, SymbolId::new(0));
/// assert!(registry.lookup(CardId::new(2)).is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRegistry {
    cards: Vector<Card>,
}

impl CardRegistry {
    /// Create one hidden card per symbol, in order.
    ///
    /// Stops after `MAX_CARDS` cards; positions past that have no `CardId`.
    #[must_use]
    pub fn build(shuffled: &[SymbolId]) -> Self {
        let cards = shuffled
            .iter()
            .enumerate()
            .map_while(|(i, &symbol)| {
                let id = u16::try_from(i).ok()?;
                Some(Card::new(CardId::new(id), symbol))
            })
            .collect();
        Self { cards }
    }

    /// Resolve a card ID to its card.
    ///
    /// Returns `None` if the ID is not tracked (a click outside any card).
    #[must_use]
    pub fn lookup(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    /// Resolve a raw presentation index (e.g. a child position) to a card ID.
    #[must_use]
    pub fn lookup_index(&self, index: usize) -> Option<CardId> {
        self.cards.get(index).map(|card| card.id)
    }

    /// Set the state of a tracked card. Unknown IDs are ignored.
    pub(crate) fn set_state(&mut self, id: CardId, state: CardState) {
        if let Some(card) = self.cards.get_mut(id.index()) {
            card.state = state;
        }
    }

    /// Number of cards in the deck.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the deck is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of pairs in the deck.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    /// Iterate over the cards in deal order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Iterate over cards in a given state.
    pub fn in_state(&self, state: CardState) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(move |c| c.state == state)
    }

    /// Check that every symbol occurs on exactly two cards.
    #[must_use]
    pub fn validate_pairs(&self) -> bool {
        let mut census: FxHashMap<SymbolId, usize> = FxHashMap::default();
        for card in &self.cards {
            *census.entry(card.symbol).or_insert(0) += 1;
        }
        census.values().all(|&count| count == 2)
    }
}
