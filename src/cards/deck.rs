//! Deck generation: paired symbols and the Fisher–Yates shuffle.

use crate::core::GameRng;

use super::card::SymbolId;

/// Build the ordered multiset of symbols for `pair_count` pairs.
///
/// Each symbol appears exactly twice, adjacent: `[0, 0, 1, 1, ...]`.
/// Pairs beyond the `SymbolId` range are not generated.
#[must_use]
pub fn paired_symbols(pair_count: usize) -> Vec<SymbolId> {
    (0..pair_count)
        .map_while(|i| u16::try_from(i).ok().map(SymbolId::new))
        .flat_map(|symbol| [symbol, symbol])
        .collect()
}

/// Shuffle in place with Fisher–Yates.
///
/// Walks from the last index down to 1, swapping each slot with a
/// uniformly chosen index in `[0, i]`.
pub fn shuffle<T>(items: &mut [T], rng: &mut GameRng) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range_usize(0..i + 1);
        items.swap(i, j);
    }
}

/// Produce a shuffled deck of `pair_count` pairs.
#[must_use]
pub fn deal(pair_count: usize, rng: &mut GameRng) -> Vec<SymbolId> {
    let mut symbols = paired_symbols(pair_count);
    shuffle(&mut symbols, rng);
    symbols
}
