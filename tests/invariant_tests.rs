//! Property tests for deck and counter invariants.

use proptest::prelude::*;
use rustc_hash::FxHashMap;

use memory_match::cards::{deal, CardRegistry};
use memory_match::{CardId, GameController, GameRng, Phase, RecordingRenderer, SessionConfig};

proptest! {
    #[test]
    fn dealt_deck_holds_every_symbol_twice(pairs in 1usize..40, seed in any::<u64>()) {
        let mut rng = GameRng::new(seed);
        let symbols = deal(pairs, &mut rng);

        prop_assert_eq!(symbols.len(), pairs * 2);

        let mut census: FxHashMap<_, usize> = FxHashMap::default();
        for symbol in &symbols {
            *census.entry(*symbol).or_insert(0) += 1;
        }
        prop_assert_eq!(census.len(), pairs);
        prop_assert!(census.values().all(|&n| n == 2));
        prop_assert!(CardRegistry::build(&symbols).validate_pairs());
    }

    #[test]
    fn counters_are_monotonic(
        seed in any::<u64>(),
        moves in 1u32..30,
        stars in 1u32..5,
        clicks in prop::collection::vec((0usize..18, 0u64..1500), 0..80),
    ) {
        let config = SessionConfig::default()
            .with_seed(seed)
            .with_moves(moves)
            .with_stars(stars);
        let mut game = GameController::from_config(config, RecordingRenderer::new()).unwrap();
        let pair_count = game.config().pair_count() as u32;
        let moves_per_star = moves / stars;

        let mut prev = game.get_state();
        for (index, wait) in clicks {
            let selected_before = prev.selected;
            game.on_index_clicked(index);
            game.advance(wait);
            let next = game.get_state();

            prop_assert!(next.matched_pairs >= prev.matched_pairs);
            prop_assert!(next.matched_pairs <= pair_count);
            prop_assert!(next.moves_remaining <= prev.moves_remaining);
            prop_assert!(next.stars_remaining <= prev.stars_remaining);
            prop_assert!(next.elapsed_seconds >= prev.elapsed_seconds);

            // Re-clicking the open card is free.
            if selected_before == Some(CardId::new(index as u16)) {
                prop_assert_eq!(next.moves_remaining, prev.moves_remaining);
                prop_assert_eq!(next.matched_pairs, prev.matched_pairs);
            }

            if prev.phase != Phase::Active {
                prop_assert_eq!(next.phase, prev.phase);
                prop_assert_eq!(next.moves_remaining, prev.moves_remaining);
            }

            // Stars fall exactly once per `moves_per_star` consumed moves.
            if moves_per_star > 0 {
                let used = moves - next.moves_remaining;
                let expected = stars.saturating_sub(used / moves_per_star);
                prop_assert_eq!(next.stars_remaining, expected);
            }

            prev = next;
        }

        if prev.matched_pairs == pair_count {
            prop_assert_eq!(prev.phase, Phase::Won);
        } else if prev.moves_remaining == 0 {
            prop_assert_eq!(prev.phase, Phase::Lost);
        }
    }
}
