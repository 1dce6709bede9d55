mod common;

use common::{CountdownEnv, PushRightEnv};
use gym::CartPole;
use rl::search::{demo, rollout};
use rl::{hill_climb, random_search, LinearPolicy, SearchConfig};

#[test]
fn linear_policy_thresholds_at_zero() {
    let policy = LinearPolicy::new(vec![1.0, -2.0]);
    assert_eq!(policy.action(&[3.0, 1.0]), 1.0);
    assert_eq!(policy.action(&[1.0, 1.0]), 0.0);
    assert_eq!(policy.action(&[2.0, 1.0]), 0.0);
}

#[test]
fn rollout_counts_steps_until_done() {
    let mut env = CountdownEnv::new(1, 1, 7);
    let policy = LinearPolicy::new(vec![1.0]);
    assert_eq!(rollout(&mut env, &policy, 100), 7);
    assert_eq!(rollout(&mut env, &policy, 5), 5);
    assert_eq!(env.resets, 2);
}

#[test]
fn random_search_stops_once_solved() {
    let mut env = PushRightEnv::new();
    let mut rng = fastrand::Rng::with_seed(4);
    let config = SearchConfig { trials: 50, max_steps: 20, ..Default::default() };
    let outcome = random_search(&mut env, &config, &mut rng);
    assert!(outcome.solved);
    assert_eq!(outcome.best_steps, 20);
    assert!(outcome.trials_used <= 2);
    assert_eq!(outcome.best.action(&[1.0]), 1.0);
}

#[test]
fn hill_climb_finds_the_surviving_direction() {
    let mut env = PushRightEnv::new();
    let mut rng = fastrand::Rng::with_seed(5);
    let config =
        SearchConfig { trials: 200, max_steps: 20, noise_scale: 3.0, ..Default::default() };
    let outcome = hill_climb(&mut env, &config, &mut rng);
    assert!(outcome.solved);
    assert_eq!(outcome.best_steps, 20);
    assert!(outcome.best.params[0] > 0.0);
}

#[test]
fn unsolved_search_uses_every_trial() {
    // every episode lasts 3 steps, short of max_steps
    let mut env = CountdownEnv::new(4, 1, 3);
    let mut rng = fastrand::Rng::with_seed(6);
    let config = SearchConfig { trials: 15, max_steps: 10, ..Default::default() };
    let outcome = random_search(&mut env, &config, &mut rng);
    assert!(!outcome.solved);
    assert_eq!(outcome.trials_used, 15);
    assert_eq!(outcome.best_steps, 3);
    assert_eq!(env.resets, 15);
}

#[test]
fn random_search_balances_cartpole() {
    let mut env = CartPole::new(11);
    let mut rng = fastrand::Rng::with_seed(11);
    let config = SearchConfig::default();
    let outcome = random_search(&mut env, &config, &mut rng);
    assert!(outcome.best_steps > 0);
    assert!(outcome.best_steps <= config.max_steps);
    assert!(outcome.trials_used <= config.trials);
    if outcome.solved {
        assert_eq!(outcome.best_steps, config.max_steps);
    }
}

#[test]
fn demo_resets_after_each_episode() {
    let mut env = CountdownEnv::new(1, 1, 4);
    let policy = LinearPolicy::new(vec![1.0]);
    let report = demo(&mut env, &policy, 10, false);
    assert_eq!(report.steps, 10);
    assert_eq!(report.episodes_ended, 2);
    assert_eq!(env.resets, 3);
}
