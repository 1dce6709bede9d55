#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::cast_precision_loss)]
//! # rl
//!
//! Reinforcement learning on top of [`ml`] networks and [`gym`]
//! environments.
//!
//! ## Key Components
//!
//! -   **Actor-critic:** [`Trainer`] owns a [`PolicyNetwork`], a
//!     [`ValueNetwork`], their [`TargetNetworks`] and a [`ReplayBuffer`].
//!     Each training step fits the critic to bootstrapped targets and moves
//!     the actor along the critic's action gradient.
//! -   **Episodes:** [`EnvironmentLoop`] steps an [`gym::Env`] with an
//!     epsilon-greedy [`Agent`], recording every transition and training
//!     after each step.
//! -   **Policy search:** [`search`] holds random search and hill climbing
//!     over linear threshold policies for discrete tasks like CartPole.
//! -   **Configuration:** [`TrainConfig`] and [`SearchConfig`] load from
//!     JSON and validate before anything is built.

pub mod agent;
pub mod buffer;
pub mod config;
pub mod error;
pub mod exploration;
pub mod network;
pub mod runner;
pub mod search;
pub mod target;
pub mod trainer;

pub use agent::Agent;
pub use buffer::{ReplayBuffer, Transition};
pub use config::{ActorConfig, CriticConfig, SearchConfig, TargetConfig, TrainConfig};
pub use error::{Result, RlError};
pub use exploration::EpsilonGreedy;
pub use network::{
    ActorModel, CriticModel, Gradients, Parameters, Policy, PolicyNetwork, ValueFunction,
    ValueNetwork,
};
pub use runner::{EnvironmentLoop, EpisodeReport};
pub use search::{hill_climb, random_search, LinearPolicy, SearchOutcome};
pub use target::{TargetNetworks, TargetUpdate};
pub use trainer::{critic_target, TrainStats, Trainer};
