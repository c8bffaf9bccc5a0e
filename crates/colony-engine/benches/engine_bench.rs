use colony_engine::Game;
use criterion::{criterion_group, criterion_main, Criterion};

fn busy_colony() -> Game {
    let mut game = Game::standard();
    game.add_resource("energy", 1_000_000.0);
    game.buy_upgrade("expand_colony_1");
    game.buy_max("solar_panel", Some(15));
    game.check_unlocks();
    game
}

fn bench_tick(c: &mut Criterion) {
    let mut game = busy_colony();
    c.bench_function("colony_tick", |b| b.iter(|| game.tick()));
}

fn bench_recalculate(c: &mut Criterion) {
    let mut game = busy_colony();
    c.bench_function("recalculate_production", |b| {
        b.iter(|| game.recalculate_production())
    });
}

criterion_group!(benches, bench_tick, bench_recalculate);
criterion_main!(benches);
