//! Full kyokus and games played through the referee.

mod common;

use mjai_arena::{ActionRecorder, Arena, GameLength, KyokuOutcome, SeatState, TsumogiriPolicy};
use mjai_engine::{Action, ActionType, GameRule, HoraType, Pai, Player, RefereeError, Wind};

const OYA_HAND: &str = "1m 2m 3m 4m 5m 6m 7m 8m 9m 1p 2p 3p 4p";
const SOUZU_HAND: &str = "1s 2s 3s 4s 5s 6s 7s 8s 1p 1p 1p E E";
const JUNK_A: &str = "1m 4m 7m 2p 5p 8p 3s 6s S W N P F";
const JUNK_B: &str = "2m 5m 8m 3p 6p 9p 2s 5s 8s S W N F";

#[test]
fn tsumogiri_kyoku_runs_to_exhaustive_draw() {
    common::init_logging();
    let rule = GameRule::default_mjai();
    let recorder = ActionRecorder::new();
    let mut arena = Arena::new(common::tsumogiri_table(rule), rule, 42, Some(recorder.observer()));
    arena.start_game(None).unwrap();

    let outcome = arena.play_kyoku().unwrap();
    assert!(matches!(outcome, KyokuOutcome::Ryukyoku { .. }));
    assert_eq!(arena.game().num_pipais(), Some(0));

    let actions = recorder.actions();
    let count = |t: ActionType| actions.iter().filter(|a| a.action_type() == t).count();
    assert_eq!(count(ActionType::Tsumo), 70);
    assert_eq!(count(ActionType::Dahai), 70);
    assert_eq!(count(ActionType::Ryukyoku), 1);
    assert_eq!(actions.len(), 2 + 140 + 2);
    assert_eq!(actions.first().map(Action::action_type), Some(ActionType::StartGame));
    assert_eq!(actions.last(), Some(&Action::EndKyoku));

    for seat in 0..4 {
        assert_eq!(arena.game().player(seat).tehais().len(), 13);
        assert_eq!(arena.game().player(seat).ho().len(), 70 / 4 + usize::from(seat < 70 % 4));
    }
}

#[test]
fn noten_payments_are_zero_sum() {
    let rule = GameRule::default_mjai();
    let mut arena = Arena::new(common::tsumogiri_table(rule), rule, 7, None);
    arena.start_game(None).unwrap();
    let outcome = arena.play_kyoku().unwrap();
    let KyokuOutcome::Ryukyoku { deltas, .. } = outcome else {
        panic!("tsumogiri seats cannot win");
    };
    assert_eq!(deltas.iter().sum::<i32>(), 0);
    let total: i32 = arena.game().players().iter().map(|p| p.score()).sum();
    assert_eq!(total, 100_000);
    assert_eq!(arena.next_setup().honba, 1);
}

#[test]
fn same_seed_same_record() {
    let rule = GameRule::default_mjai();
    let record = |seed: u64| {
        let recorder = ActionRecorder::new();
        let mut arena = Arena::new(common::tsumogiri_table(rule), rule, seed, Some(recorder.observer()));
        arena.start_game(None).unwrap();
        arena.play_kyoku().unwrap();
        recorder.to_json_lines().unwrap()
    };
    assert_eq!(record(3), record(3));
    assert_ne!(record(3), record(4));
}

#[test]
fn tenhou_on_first_draw() {
    common::init_logging();
    let rule = GameRule::no_red();
    let wall = common::stacked_wall(&rule, [OYA_HAND, SOUZU_HAND, JUNK_A, JUNK_B], "4p");
    let players = [
        common::seat(rule, common::eager(1)),
        common::seat(rule, TsumogiriPolicy),
        common::seat(rule, TsumogiriPolicy),
        common::seat(rule, TsumogiriPolicy),
    ];
    let mut arena =
        Arena::new(players, rule, 0, None).with_scorer(Box::new(common::FixedScorer(12_000)));
    arena.start_game(None).unwrap();

    let outcome = arena.play_kyoku_with(wall).unwrap();
    let KyokuOutcome::Hora {
        actor,
        target,
        request,
        deltas,
    } = outcome
    else {
        panic!("expected a win, got {outcome:?}");
    };
    assert_eq!((actor, target), (0, 0));
    assert_eq!(request.hora_type, HoraType::Tsumo);
    assert_eq!(request.tehais, common::pais(OYA_HAND));
    assert_eq!(request.taken, Pai::parse("4p"));
    assert!(request.oya);
    assert!(request.first_turn);
    assert!(!request.rinshan);
    assert_eq!(deltas, Some([12_000, -4_000, -4_000, -4_000]));
    assert_eq!(arena.game().player(0).score(), 37_000);

    let next = arena.next_setup();
    assert_eq!((next.oya, next.honba, next.kyoku), (0, 1, 1));
}

#[test]
fn ron_on_first_discard() {
    let rule = GameRule::no_red();
    let wall = common::stacked_wall(&rule, [OYA_HAND, SOUZU_HAND, JUNK_A, JUNK_B], "9s");
    let recorder = ActionRecorder::new();
    let players = [
        common::seat(rule, TsumogiriPolicy),
        common::seat(rule, common::eager(2)),
        common::seat(rule, TsumogiriPolicy),
        common::seat(rule, TsumogiriPolicy),
    ];
    let mut arena = Arena::new(players, rule, 0, Some(recorder.observer()))
        .with_scorer(Box::new(common::FixedScorer(2_000)));
    arena.start_game(None).unwrap();

    let outcome = arena.play_kyoku_with(wall).unwrap();
    let KyokuOutcome::Hora {
        actor,
        target,
        request,
        deltas,
    } = outcome
    else {
        panic!("expected a win, got {outcome:?}");
    };
    assert_eq!((actor, target), (1, 0));
    assert_eq!(request.hora_type, HoraType::Ron);
    assert_eq!(request.taken, Pai::parse("9s"));
    assert_eq!(request.jikaze, Wind::South);
    assert_eq!(request.tehais.len(), 13);
    assert!(!request.reach);
    assert_eq!(deltas, Some([-2_000, 2_000, 0, 0]));

    let types: Vec<ActionType> = recorder.actions().iter().map(Action::action_type).collect();
    assert_eq!(
        types,
        vec![
            ActionType::StartGame,
            ActionType::StartKyoku,
            ActionType::Tsumo,
            ActionType::Dahai,
            ActionType::Hora,
            ActionType::EndKyoku,
        ]
    );

    // The dealer lost, so the deal moves on.
    let next = arena.next_setup();
    assert_eq!((next.oya, next.kyoku, next.honba), (1, 2, 0));
}

#[test]
fn illegal_discard_stops_the_kyoku() {
    let rule = GameRule::no_red();
    let wall = common::stacked_wall(&rule, [OYA_HAND, SOUZU_HAND, JUNK_A, JUNK_B], "9s");
    let cheater = |_: &SeatState, action: &Action| match action {
        Action::Tsumo { actor: 0, .. } => Some(Action::Dahai {
            actor: 0,
            pai: Pai::parse("C"),
            tsumogiri: false,
        }),
        _ => None,
    };
    let players = [
        common::seat(rule, cheater),
        common::seat(rule, TsumogiriPolicy),
        common::seat(rule, TsumogiriPolicy),
        common::seat(rule, TsumogiriPolicy),
    ];
    let mut arena = Arena::new(players, rule, 0, None);
    arena.start_game(None).unwrap();

    match arena.play_kyoku_with(wall) {
        Err(RefereeError::Validation(err)) => {
            assert_eq!(err.player, Some(0));
            assert_eq!(err.reason, "Cannot dahai this pai.");
            assert!(err.to_string().contains("\"pai\":\"C\""));
        }
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[test]
fn tsumogiri_east_game_ranks_all_seats() {
    common::init_logging();
    let rule = GameRule::default_mjai();
    let recorder = ActionRecorder::new();
    let mut arena = Arena::new(common::tsumogiri_table(rule), rule, 11, Some(recorder.observer()));

    let ranking = arena.play_game(GameLength::East).unwrap();
    let mut seats = ranking;
    seats.sort_unstable();
    assert_eq!(seats, [0, 1, 2, 3]);
    assert!(arena.kyokus_played() >= 4);
    assert_eq!(recorder.actions().last(), Some(&Action::EndGame));

    let scores: Vec<i32> = ranking.iter().map(|&s| arena.game().player(s).score()).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(scores.iter().sum::<i32>(), 100_000);
}
