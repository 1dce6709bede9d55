use criterion::{criterion_group, criterion_main, Criterion};
use rl::{Trainer, TrainConfig, Transition};

fn filled_trainer() -> Trainer {
    let config = TrainConfig::default();
    let mut trainer = Trainer::new(&config, 3, 1).unwrap();
    let mut rng = fastrand::Rng::with_seed(0);
    for _ in 0..config.buffer_capacity {
        let state: Vec<f32> = (0..3).map(|_| rng.f32() * 2.0 - 1.0).collect();
        let next_state: Vec<f32> = (0..3).map(|_| rng.f32() * 2.0 - 1.0).collect();
        trainer.remember(Transition {
            state,
            action: vec![rng.f32() * 4.0 - 2.0],
            reward: -rng.f32(),
            next_state,
            terminal: false,
        });
    }
    trainer
}

fn bench_train_step(c: &mut Criterion) {
    let mut trainer = filled_trainer();
    c.bench_function("actor_critic_train_step", |b| {
        b.iter(|| trainer.train());
    });
    c.bench_function("target_sync", |b| {
        b.iter(|| trainer.update_target());
    });
}

criterion_group!(benches, bench_train_step);
criterion_main!(benches);
