//! Gradient-free search over linear threshold policies.
//!
//! A [`LinearPolicy`] pushes right whenever `params . observation > 0`.
//! [`random_search`] samples fresh parameters every trial; [`hill_climb`]
//! perturbs the best parameters found so far and keeps improvements.

use crate::config::SearchConfig;
use crate::network::Policy;
use gym::Env;

#[derive(Clone, Debug, PartialEq)]
pub struct LinearPolicy {
    pub params: Vec<f32>,
}

impl LinearPolicy {
    #[must_use]
    pub fn new(params: Vec<f32>) -> Self {
        Self { params }
    }

    /// Parameters drawn uniformly from `[low, high)`.
    pub fn uniform(dim: usize, low: f32, high: f32, rng: &mut fastrand::Rng) -> Self {
        Self::new((0..dim).map(|_| low + rng.f32() * (high - low)).collect())
    }

    #[must_use]
    pub fn action(&self, observation: &[f32]) -> f32 {
        let score: f32 = self.params.iter().zip(observation).map(|(p, o)| p * o).sum();
        if score > 0.0 {
            1.0
        } else {
            0.0
        }
    }
}

impl Policy for LinearPolicy {
    fn predict(&self, state: &[f32]) -> Vec<f32> {
        vec![self.action(state)]
    }
}

/// Runs one episode and returns how many steps it lasted.
pub fn rollout<E: Env, P: Policy + ?Sized>(env: &mut E, policy: &P, max_steps: usize) -> usize {
    let mut observation = env.reset();
    for step in 1..=max_steps {
        let result = env.step(&policy.predict(&observation));
        if result.done {
            return step;
        }
        observation = result.observation;
    }
    max_steps
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome {
    pub best: LinearPolicy,
    pub best_steps: usize,
    pub trials_used: usize,
    /// An episode lasted the full `max_steps`.
    pub solved: bool,
}

/// Samples parameters from `[0, 1)` each trial, keeping the longest-lived.
pub fn random_search<E: Env>(
    env: &mut E,
    config: &SearchConfig,
    rng: &mut fastrand::Rng,
) -> SearchOutcome {
    let dim = env.observation_space().shape();
    let mut outcome = SearchOutcome {
        best: LinearPolicy::new(vec![0.0; dim]),
        best_steps: 0,
        trials_used: 0,
        solved: false,
    };
    for trial in 1..=config.trials {
        let candidate = LinearPolicy::uniform(dim, 0.0, 1.0, rng);
        let steps = rollout(env, &candidate, config.max_steps);
        outcome.trials_used = trial;
        if steps > outcome.best_steps {
            tracing::debug!(trial, steps, "random search improved");
            outcome.best = candidate;
            outcome.best_steps = steps;
        }
        if steps >= config.max_steps {
            outcome.solved = true;
            break;
        }
    }
    outcome
}

/// Perturbs the best parameters by uniform noise in
/// `[-noise_scale, noise_scale)` and keeps strict improvements.
pub fn hill_climb<E: Env>(
    env: &mut E,
    config: &SearchConfig,
    rng: &mut fastrand::Rng,
) -> SearchOutcome {
    let dim = env.observation_space().shape();
    let mut outcome = SearchOutcome {
        best: LinearPolicy::uniform(dim, -1.0, 1.0, rng),
        best_steps: 0,
        trials_used: 0,
        solved: false,
    };
    for trial in 1..=config.trials {
        let candidate = LinearPolicy::new(
            outcome
                .best
                .params
                .iter()
                .map(|p| p + config.noise_scale * (rng.f32() * 2.0 - 1.0))
                .collect(),
        );
        let steps = rollout(env, &candidate, config.max_steps);
        outcome.trials_used = trial;
        if steps > outcome.best_steps {
            tracing::debug!(trial, steps, "hill climb improved");
            outcome.best = candidate;
            outcome.best_steps = steps;
        }
        if steps >= config.max_steps {
            outcome.solved = true;
            break;
        }
    }
    outcome
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DemoReport {
    pub steps: usize,
    /// Episodes that ended during the demo.
    pub episodes_ended: usize,
}

/// Runs `policy` for `steps` environment steps, resetting whenever an
/// episode ends.
pub fn demo<E: Env, P: Policy + ?Sized>(
    env: &mut E,
    policy: &P,
    steps: usize,
    render: bool,
) -> DemoReport {
    let mut report = DemoReport::default();
    let mut observation = env.reset();
    for _ in 0..steps {
        let result = env.step(&policy.predict(&observation));
        if render {
            env.render();
        }
        report.steps += 1;
        observation = if result.done {
            report.episodes_ended += 1;
            env.reset()
        } else {
            result.observation
        };
    }
    report
}
