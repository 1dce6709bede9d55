//! # rlab
//!
//! Entry point for the experiment binary.
//!
//! `actor-critic` trains a deterministic actor-critic on Pendulum.
//! `random-search` and `hill-climb` search linear threshold policies for
//! CartPole. Every experiment reads an optional JSON config and then applies
//! any command-line overrides on top of it.

mod app;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rl::{SearchConfig, TargetUpdate, TrainConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rlab", version, about = "Reinforcement learning experiments")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Train an actor-critic agent on Pendulum
    ActorCritic(ActorCriticArgs),
    /// Sample random linear policies for CartPole
    RandomSearch(SearchArgs),
    /// Hill-climb a linear policy for CartPole
    HillClimb(SearchArgs),
}

#[derive(Args, Debug)]
struct ActorCriticArgs {
    /// JSON training config
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    episodes: Option<usize>,
    #[arg(long)]
    max_steps: Option<usize>,
    #[arg(long)]
    batch_size: Option<usize>,
    #[arg(long)]
    learning_rate: Option<f32>,
    #[arg(long)]
    gamma: Option<f32>,
    /// Soft target update rate
    #[arg(long, conflicts_with = "hard_target")]
    tau: Option<f32>,
    #[arg(long)]
    epsilon_decay: Option<f32>,
    #[arg(long)]
    seed: Option<u64>,
    /// Copy online weights into the targets instead of blending
    #[arg(long)]
    hard_target: bool,
    #[arg(long)]
    render: bool,
}

impl ActorCriticArgs {
    fn into_config(self) -> Result<TrainConfig> {
        let mut config: TrainConfig = match &self.config {
            Some(path) => rl::config::load(path)
                .with_context(|| format!("loading training config {}", path.display()))?,
            None => TrainConfig::default(),
        };
        if let Some(episodes) = self.episodes {
            config.episodes = episodes;
        }
        if let Some(max_steps) = self.max_steps {
            config.max_steps = max_steps;
        }
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
        if let Some(lr) = self.learning_rate {
            config.learning_rate = lr;
        }
        if let Some(gamma) = self.gamma {
            config.gamma = gamma;
        }
        if let Some(tau) = self.tau {
            config.target.update = TargetUpdate::Soft { tau };
        }
        if self.hard_target {
            config.target.update = TargetUpdate::Hard;
        }
        if let Some(decay) = self.epsilon_decay {
            config.epsilon_decay = decay;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config.render |= self.render;
        config.validate().context("invalid training config")?;
        Ok(config)
    }
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// JSON search config
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    trials: Option<usize>,
    /// Episode length that counts as solved
    #[arg(long)]
    max_steps: Option<usize>,
    /// Hill-climbing perturbation scale
    #[arg(long)]
    noise_scale: Option<f32>,
    /// Steps to run the best policy for afterwards
    #[arg(long)]
    demo_steps: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    render: bool,
}

impl SearchArgs {
    fn into_config(self) -> Result<SearchConfig> {
        let mut config: SearchConfig = match &self.config {
            Some(path) => rl::config::load(path)
                .with_context(|| format!("loading search config {}", path.display()))?,
            None => SearchConfig::default(),
        };
        if let Some(trials) = self.trials {
            config.trials = trials;
        }
        if let Some(max_steps) = self.max_steps {
            config.max_steps = max_steps;
        }
        if let Some(noise_scale) = self.noise_scale {
            config.noise_scale = noise_scale;
        }
        if let Some(demo_steps) = self.demo_steps {
            config.demo_steps = demo_steps;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config.render |= self.render;
        config.validate().context("invalid search config")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    app::init_logging();
    match Cli::parse().command {
        Command::ActorCritic(args) => app::run_actor_critic(&args.into_config()?),
        Command::RandomSearch(args) => {
            app::run_search(app::SearchMethod::Random, &args.into_config()?)
        }
        Command::HillClimb(args) => {
            app::run_search(app::SearchMethod::HillClimb, &args.into_config()?)
        }
    }
}
