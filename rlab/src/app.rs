//! Experiment drivers behind the `rlab` subcommands.

use anyhow::Result;
use gym::{CartPole, CartPoleConfig, Env, Pendulum};
use rl::search::{demo, hill_climb, random_search};
use rl::{Agent, EnvironmentLoop, SearchConfig, TrainConfig};
use tracing_subscriber::EnvFilter;

/// Installs the global `fmt` subscriber. `RUST_LOG` overrides the default
/// `info` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Trains an actor-critic agent on Pendulum for `config.episodes` episodes.
///
/// # Errors
///
/// Returns an error if the config is invalid or does not fit the
/// environment.
pub fn run_actor_critic(config: &TrainConfig) -> Result<()> {
    let env = Pendulum::new(config.seed);
    let obs_dim = env.observation_space().shape();
    let act_dim = env.action_space().shape();
    let agent = Agent::new(config, obs_dim, act_dim)?;
    let mut runner = EnvironmentLoop::new(env, agent, config)?;

    tracing::info!(
        episodes = config.episodes,
        seed = config.seed,
        "Training actor-critic on Pendulum..."
    );
    let reports = runner.run(config.episodes);

    let best = reports.iter().map(|r| r.total_reward).fold(f32::NEG_INFINITY, f32::max);
    let tail = &reports[reports.len().saturating_sub(10)..];
    let recent = tail.iter().map(|r| r.total_reward).sum::<f32>() / tail.len().max(1) as f32;
    tracing::info!(
        best,
        recent,
        steps = runner.total_steps(),
        train_steps = runner.agent().trainer().train_steps(),
        syncs = runner.agent().trainer().syncs(),
        "Training finished"
    );
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchMethod {
    Random,
    HillClimb,
}

/// Searches for a CartPole policy, then runs the best one for
/// `config.demo_steps` steps.
///
/// # Errors
///
/// Returns an error if the config is invalid.
pub fn run_search(method: SearchMethod, config: &SearchConfig) -> Result<()> {
    config.validate()?;
    let mut env = CartPole::with_config(
        CartPoleConfig { max_steps: config.max_steps, ..CartPoleConfig::default() },
        config.seed,
    );
    let mut rng = fastrand::Rng::with_seed(config.seed);

    tracing::info!(?method, trials = config.trials, "Searching for a CartPole policy...");
    let outcome = match method {
        SearchMethod::Random => random_search(&mut env, config, &mut rng),
        SearchMethod::HillClimb => hill_climb(&mut env, config, &mut rng),
    };
    if outcome.solved {
        tracing::info!(trials = outcome.trials_used, params = ?outcome.best.params, "Solved");
    } else {
        tracing::warn!(
            trials = outcome.trials_used,
            best_steps = outcome.best_steps,
            params = ?outcome.best.params,
            "Not solved"
        );
    }

    if config.demo_steps > 0 {
        let report = demo(&mut env, &outcome.best, config.demo_steps, config.render);
        tracing::info!(
            steps = report.steps,
            episodes_ended = report.episodes_ended,
            "Demo finished"
        );
    }
    Ok(())
}
