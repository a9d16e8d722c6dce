//! Property-based invariant tests for the referee.
//!
//! Uses proptest to generate random seeds, plays full east games with the
//! eager random policy at every seat, and checks the recorded action stream.

mod common;

use proptest::prelude::*;

use mjai_arena::{ActionRecorder, Arena, GameLength};
use mjai_engine::{Action, ActionType, GameRule, Player};

/// Play a full east game; every seat runs the eager policy with its own seed.
fn play_full_game(seed: u64, rule: GameRule) -> (Arena, ActionRecorder) {
    let recorder = ActionRecorder::new();
    let players: [Box<dyn Player>; 4] =
        std::array::from_fn(|s| common::seat(rule, common::eager(seed * 4 + s as u64)));
    let mut arena = Arena::new(players, rule, seed, Some(recorder.observer()));
    if let Err(err) = arena.play_game(GameLength::East) {
        panic!("seed {seed}: {err}");
    }
    (arena, recorder)
}

fn count(actions: &[Action], ty: ActionType) -> usize {
    actions.iter().filter(|a| a.action_type() == ty).count()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Ranking, score conservation and kyoku boundaries across random games.
    #[test]
    fn game_invariants_hold(seed in 0u64..1_000_000) {
        let rule = GameRule::default_mjai();
        let (arena, recorder) = play_full_game(seed, rule);
        let actions = recorder.actions();

        // -- ranking is a permutation, best first --
        let ranking = arena.game().ranked_players().unwrap();
        let mut seats = ranking;
        seats.sort_unstable();
        prop_assert_eq!(seats, [0, 1, 2, 3]);
        let scores: Vec<i32> = ranking.iter().map(|&s| arena.game().player(s).score()).collect();
        prop_assert!(scores.windows(2).all(|w| w[0] >= w[1]), "seed {}: {:?}", seed, scores);

        // -- without a scorer only reach deposits leave the table --
        let reaches = count(&actions, ActionType::ReachAccepted) as i32;
        let sum: i32 = arena.game().players().iter().map(|p| p.score()).sum();
        prop_assert_eq!(sum, 4 * rule.starting_score - reaches * rule.reach_cost,
            "seed {}: score sum", seed);

        // -- every kyoku is closed, and the game ends once --
        prop_assert_eq!(count(&actions, ActionType::StartKyoku), arena.kyokus_played());
        prop_assert_eq!(count(&actions, ActionType::EndKyoku), arena.kyokus_played());
        prop_assert_eq!(count(&actions, ActionType::EndGame), 1);
        prop_assert_eq!(actions.last(), Some(&Action::EndGame));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Rinshan draws come out of the live wall, so no kyoku exceeds 70 draws.
    #[test]
    fn draws_per_kyoku_bounded(seed in 0u64..1_000_000) {
        let (_, recorder) = play_full_game(seed, GameRule::no_red());
        let actions = recorder.actions();
        for kyoku in actions.split(|a| *a == Action::EndKyoku) {
            let draws = count(kyoku, ActionType::Tsumo);
            prop_assert!(draws <= 70, "seed {}: {} draws in one kyoku", seed, draws);
            prop_assert!(count(kyoku, ActionType::Hora) <= 1);
            prop_assert!(count(kyoku, ActionType::Dora) <= 4);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// A seed replays to the same action stream.
    #[test]
    fn games_replay_from_seed(seed in 0u64..1_000_000) {
        let (_, first) = play_full_game(seed, GameRule::default_mjai());
        let (_, second) = play_full_game(seed, GameRule::default_mjai());
        prop_assert_eq!(first.to_json_lines().unwrap(), second.to_json_lines().unwrap());
    }
}
