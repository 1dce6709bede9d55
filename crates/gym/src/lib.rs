#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # gym
//!
//! Classic-control environments behind a small Gym-style interface.
//!
//! -   **[`Env`]:** reset, step, render and the observation/action
//!     [`Space`]s an agent needs to size its networks and to explore.
//! -   **[`Pendulum`]:** the continuous swing-up task with a single torque
//!     action and a fixed time limit.
//! -   **[`CartPole`]:** the discrete balancing task with two push actions.
//!
//! Each environment owns a seeded generator so episodes are reproducible.

pub mod cartpole;
pub mod env;
pub mod pendulum;
pub mod space;

pub use cartpole::{CartPole, CartPoleConfig};
pub use env::{Env, Step};
pub use pendulum::{Pendulum, PendulumConfig};
pub use space::Space;
