//! Property tests for totals, ranks and persistence.
//!
//! Increase cases locally with `PROPTEST_CASES=1000 cargo test`.

mod common;

use proptest::prelude::*;
use scorecard_core::{
    GameStateManager, MemoryStore, ScorecardError, MAX_PLAYERS, MIN_PLAYERS, TOTAL_ROUNDS,
};

/// A roster size plus a sequence of `(player, round, score)` edits that are
/// valid for it.
fn game_script() -> impl Strategy<Value = (usize, Vec<(usize, usize, i32)>)> {
    (MIN_PLAYERS..=MAX_PLAYERS).prop_flat_map(|count| {
        let edit = (0..count, 1..=TOTAL_ROUNDS, -50i32..=200);
        (Just(count), prop::collection::vec(edit, 0..40))
    })
}

proptest! {
    #![proptest_config(common::proptest_config())]

    #[test]
    fn fresh_roster_is_blank(count in MIN_PLAYERS..=MAX_PLAYERS) {
        let mut m = common::manager(MemoryStore::new());
        m.select_player_count(count).unwrap();

        let game = m.active_game();
        prop_assert_eq!(game.players().len(), count);
        prop_assert_eq!(game.player_count(), count);
        for p in game.players() {
            prop_assert_eq!(p.rounds(), &[0; TOTAL_ROUNDS][..]);
            prop_assert_eq!(p.total(), 0);
            prop_assert_eq!(p.rank(), None);
        }
    }

    #[test]
    fn totals_always_match_formula((count, edits) in game_script()) {
        let mut m = common::manager(MemoryStore::new());
        m.select_player_count(count).unwrap();

        for (player, round, score) in edits {
            m.update_score(player, round, score).unwrap();
            for p in m.active_game().players() {
                let r = p.rounds();
                prop_assert_eq!(r.len(), TOTAL_ROUNDS);
                prop_assert_eq!(p.total(), r[0] + r[1] + r[2] + r[3] + r[4] * 2);
            }
        }
    }

    #[test]
    fn ranks_are_a_sorted_bijection((count, edits) in game_script()) {
        prop_assume!(!edits.is_empty());
        let mut m = common::manager(MemoryStore::new());
        m.select_player_count(count).unwrap();
        for (player, round, score) in edits {
            m.update_score(player, round, score).unwrap();
        }

        let players = m.active_game().players();
        let mut ranks: Vec<u32> = players.iter().map(|p| p.rank().unwrap()).collect();
        ranks.sort_unstable();
        prop_assert_eq!(ranks, (1..=count as u32).collect::<Vec<_>>());

        let mut by_rank: Vec<_> = players.iter().collect();
        by_rank.sort_by_key(|p| p.rank());
        for pair in by_rank.windows(2) {
            prop_assert!(pair[0].total() <= pair[1].total());
        }
    }

    #[test]
    fn reset_snapshots_current_ranks((count, edits) in game_script()) {
        let mut m = common::manager(MemoryStore::new());
        m.select_player_count(count).unwrap();
        for (player, round, score) in edits {
            m.update_score(player, round, score).unwrap();
        }
        let before = m.active_game().players().to_vec();
        let archived_before = m.history().len();

        m.reset_game().unwrap();

        prop_assert_eq!(m.history().len(), archived_before + 1);
        prop_assert_eq!(&m.history().latest().unwrap().players, &before);
        prop_assert!(m.active_game().is_empty());
        prop_assert!(m.selection_in_progress());
    }

    #[test]
    fn saved_game_round_trips((count, edits) in game_script()) {
        let mut m = common::manager(MemoryStore::new());
        m.select_player_count(count).unwrap();
        for (i, (player, round, score)) in edits.into_iter().enumerate() {
            m.update_score(player, round, score).unwrap();
            if i % 3 == 0 {
                m.update_player_name(player, format!("p{i}")).unwrap();
            }
        }
        let game = m.active_game().clone();

        let restored = common::manager(m.into_store());
        prop_assert_eq!(restored.active_game().players(), game.players());
        prop_assert_eq!(restored.active_game().player_count(), game.player_count());
    }

    #[test]
    fn out_of_range_counts_are_rejected(
        count in prop_oneof![0usize..MIN_PLAYERS, (MAX_PLAYERS + 1)..64]
    ) {
        let mut m: GameStateManager<MemoryStore, _> = common::manager(MemoryStore::new());
        let rejected = matches!(
            m.select_player_count(count),
            Err(ScorecardError::InvalidPlayerCount(_))
        );
        prop_assert!(rejected);
        prop_assert!(m.selection_in_progress());
    }
}
