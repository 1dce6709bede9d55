//! # rlab
//!
//! Documentation entry point for the reinforcement learning experiments.
//!
//! ## Overview
//!
//! The workspace solves two classic-control tasks. Pendulum, with a
//! continuous torque, is learned by a deterministic actor-critic with
//! target networks and experience replay. CartPole, with two discrete
//! pushes, is solved by searching linear threshold policies.
//!
//! ## The Crates
//!
//! -   **`rlab`:** The crate you are currently viewing. Its binary parses
//!     the command line, installs logging, and runs one experiment.
//! -   **[`ml`]:** Dense feed-forward networks with hand-written backprop,
//!     MSE loss, and SGD/Adam optimizers.
//! -   **[`gym`]:** The [`gym::Env`] trait with the `Pendulum` and
//!     `CartPole` environments.
//! -   **[`rl`]:** Replay buffer, actor and critic networks, target
//!     networks, the training step, the episode loop, and policy search.
//!
//! ## Getting Started
//!
//! ```text
//! rlab actor-critic --episodes 200 --tau 0.01
//! rlab random-search --trials 1000
//! rlab hill-climb --config search.json --render
//! ```
//!
//! Set `RUST_LOG=debug` to see every training step.

pub use gym;
pub use ml;
pub use rl;
