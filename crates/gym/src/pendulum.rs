//! Inverted pendulum swing-up.
//!
//! A frictionless pendulum starts at a random angle and the agent applies a
//! bounded torque at the pivot to swing it up and keep it upright. There is
//! no failure state; an episode ends only at the time limit.

use crate::env::{Env, Step};
use crate::space::Space;
use std::f32::consts::PI;

/// Configuration for the pendulum dynamics.
#[derive(Clone, Debug)]
pub struct PendulumConfig {
    /// Angular velocity bound (rad/s)
    pub max_speed: f32,
    /// Torque bound applied to actions
    pub max_torque: f32,
    /// Integration time step (s)
    pub dt: f32,
    /// Gravitational acceleration
    pub gravity: f32,
    /// Pendulum mass (kg)
    pub mass: f32,
    /// Pendulum length (m)
    pub length: f32,
    /// Steps before the episode is truncated
    pub max_steps: usize,
}

impl Default for PendulumConfig {
    fn default() -> Self {
        Self {
            max_speed: 8.0,
            max_torque: 2.0,
            dt: 0.05,
            gravity: 10.0,
            mass: 1.0,
            length: 1.0,
            max_steps: 200,
        }
    }
}

pub struct Pendulum {
    config: PendulumConfig,
    theta: f32,
    theta_dot: f32,
    steps: usize,
    rng: fastrand::Rng,
    observation_space: Space,
    action_space: Space,
}

impl Pendulum {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_config(PendulumConfig::default(), seed)
    }

    #[must_use]
    pub fn with_config(config: PendulumConfig, seed: u64) -> Self {
        let observation_space = Space::continuous(
            vec![-1.0, -1.0, -config.max_speed],
            vec![1.0, 1.0, config.max_speed],
        );
        let action_space = Space::continuous(vec![-config.max_torque], vec![config.max_torque]);
        Self {
            config,
            theta: 0.0,
            theta_dot: 0.0,
            steps: 0,
            rng: fastrand::Rng::with_seed(seed),
            observation_space,
            action_space,
        }
    }

    /// Places the pendulum at a given angle and angular velocity.
    pub fn set_state(&mut self, theta: f32, theta_dot: f32) -> Vec<f32> {
        self.theta = theta;
        self.theta_dot = theta_dot;
        self.steps = 0;
        self.observation()
    }

    /// `(theta, theta_dot)`, with `theta = 0` pointing straight up.
    #[must_use]
    pub fn state(&self) -> (f32, f32) {
        (self.theta, self.theta_dot)
    }

    fn observation(&self) -> Vec<f32> {
        vec![self.theta.cos(), self.theta.sin(), self.theta_dot]
    }
}

/// Wraps an angle into `[-pi, pi)`.
#[must_use]
pub fn angle_normalize(x: f32) -> f32 {
    (x + PI).rem_euclid(2.0 * PI) - PI
}

impl Env for Pendulum {
    fn reset(&mut self) -> Vec<f32> {
        let theta = self.rng.f32() * 2.0 * PI - PI;
        let theta_dot = self.rng.f32() * 2.0 - 1.0;
        self.set_state(theta, theta_dot)
    }

    fn step(&mut self, action: &[f32]) -> Step {
        let c = &self.config;
        let u = action[0].clamp(-c.max_torque, c.max_torque);
        let (th, thdot) = (self.theta, self.theta_dot);

        let cost = angle_normalize(th).powi(2) + 0.1 * thdot.powi(2) + 0.001 * u.powi(2);

        let new_thdot = thdot
            + (3.0 * c.gravity / (2.0 * c.length) * th.sin()
                + 3.0 / (c.mass * c.length * c.length) * u)
                * c.dt;
        self.theta = th + new_thdot * c.dt;
        self.theta_dot = new_thdot.clamp(-c.max_speed, c.max_speed);

        self.steps += 1;
        let truncated = self.steps >= c.max_steps;
        Step { observation: self.observation(), reward: -cost, done: truncated, truncated }
    }

    fn render(&mut self) {
        tracing::trace!(
            theta = angle_normalize(self.theta),
            theta_dot = self.theta_dot,
            "pendulum"
        );
    }

    fn observation_space(&self) -> &Space {
        &self.observation_space
    }

    fn action_space(&self) -> &Space {
        &self.action_space
    }
}
