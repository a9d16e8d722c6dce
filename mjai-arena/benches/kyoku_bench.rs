use criterion::{criterion_group, criterion_main, Criterion};
use mjai_arena::{Agent, Arena, GameLength, TsumogiriPolicy};
use mjai_engine::{GameRule, Player};

fn tsumogiri_arena(seed: u64) -> Arena {
    let rule = GameRule::default_mjai();
    let players: [Box<dyn Player>; 4] =
        std::array::from_fn(|_| Box::new(Agent::new(rule, TsumogiriPolicy)) as Box<dyn Player>);
    Arena::new(players, rule, seed, None)
}

fn bench_single_kyoku(c: &mut Criterion) {
    c.bench_function("single_kyoku_tsumogiri", |b| {
        b.iter(|| {
            let mut arena = tsumogiri_arena(42);
            arena.start_game(None).unwrap();
            arena.play_kyoku().unwrap()
        });
    });
}

fn bench_single_game(c: &mut Criterion) {
    c.bench_function("single_game_tsumogiri", |b| {
        b.iter(|| tsumogiri_arena(42).play_game(GameLength::East).unwrap());
    });
}

fn bench_batch_100(c: &mut Criterion) {
    use rayon::prelude::*;
    c.bench_function("batch_100_games", |b| {
        b.iter(|| {
            let results: Vec<[usize; 4]> = (0..100u64)
                .into_par_iter()
                .map(|i| tsumogiri_arena(i).play_game(GameLength::East).unwrap())
                .collect();
            results
        });
    });
}

criterion_group!(benches, bench_single_kyoku, bench_single_game, bench_batch_100);
criterion_main!(benches);
