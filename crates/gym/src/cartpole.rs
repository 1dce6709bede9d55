//! CartPole balancing task.
//!
//! A pole is hinged to a cart moving along a frictionless track. The agent
//! pushes the cart left or right and earns one point per step while the pole
//! stays within the angle limit and the cart stays on the track.

use crate::env::{Env, Step};
use crate::space::Space;

/// Configuration for the cart-pole dynamics.
#[derive(Clone, Debug)]
pub struct CartPoleConfig {
    /// Gravitational acceleration
    pub gravity: f32,
    /// Cart mass in kg
    pub cart_mass: f32,
    /// Pole mass in kg
    pub pole_mass: f32,
    /// Half the pole length in meters
    pub half_length: f32,
    /// Force magnitude applied to the cart by either action
    pub force_magnitude: f32,
    /// Integration time step (s)
    pub tau: f32,
    /// Angle threshold for failure detection (radians)
    pub failure_angle: f32,
    /// Position threshold for failure detection (meters)
    pub position_limit: f32,
    /// Steps before the episode is truncated
    pub max_steps: usize,
}

impl Default for CartPoleConfig {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            cart_mass: 1.0,
            pole_mass: 0.1,
            half_length: 0.5,
            force_magnitude: 10.0,
            tau: 0.02,
            failure_angle: 12.0_f32.to_radians(),
            position_limit: 2.4,
            max_steps: 200,
        }
    }
}

/// Observation layout: `[cart_x, cart_vel, pole_angle, pole_angular_vel]`.
pub struct CartPole {
    config: CartPoleConfig,
    state: [f32; 4],
    steps: usize,
    rng: fastrand::Rng,
    observation_space: Space,
    action_space: Space,
}

impl CartPole {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_config(CartPoleConfig::default(), seed)
    }

    #[must_use]
    pub fn with_config(config: CartPoleConfig, seed: u64) -> Self {
        let high = vec![
            config.position_limit * 2.0,
            f32::INFINITY,
            config.failure_angle * 2.0,
            f32::INFINITY,
        ];
        let low = high.iter().map(|h| -h).collect();
        Self {
            config,
            state: [0.0; 4],
            steps: 0,
            rng: fastrand::Rng::with_seed(seed),
            observation_space: Space::continuous(low, high),
            action_space: Space::Discrete(2),
        }
    }

    /// Places the cart-pole in an exact state.
    pub fn set_state(&mut self, state: [f32; 4]) -> Vec<f32> {
        self.state = state;
        self.steps = 0;
        state.to_vec()
    }

    #[must_use]
    pub fn state(&self) -> [f32; 4] {
        self.state
    }

    fn failed(&self) -> bool {
        let [x, _, theta, _] = self.state;
        x.abs() > self.config.position_limit || theta.abs() > self.config.failure_angle
    }
}

impl Env for CartPole {
    fn reset(&mut self) -> Vec<f32> {
        let mut state = [0.0; 4];
        for v in &mut state {
            *v = self.rng.f32() * 0.1 - 0.05;
        }
        self.set_state(state)
    }

    /// Action `1` pushes right, anything else pushes left.
    fn step(&mut self, action: &[f32]) -> Step {
        let c = &self.config;
        let [x, x_dot, theta, theta_dot] = self.state;
        let force = if action[0] >= 0.5 { c.force_magnitude } else { -c.force_magnitude };

        let total_mass = c.cart_mass + c.pole_mass;
        let pole_mass_length = c.pole_mass * c.half_length;
        let (sin, cos) = theta.sin_cos();
        let temp = (force + pole_mass_length * theta_dot * theta_dot * sin) / total_mass;
        let theta_acc = (c.gravity * sin - cos * temp)
            / (c.half_length * (4.0 / 3.0 - c.pole_mass * cos * cos / total_mass));
        let x_acc = temp - pole_mass_length * theta_acc * cos / total_mass;

        self.state = [
            x + c.tau * x_dot,
            x_dot + c.tau * x_acc,
            theta + c.tau * theta_dot,
            theta_dot + c.tau * theta_acc,
        ];
        self.steps += 1;

        let failed = self.failed();
        let truncated = !failed && self.steps >= self.config.max_steps;
        Step { observation: self.state.to_vec(), reward: 1.0, done: failed || truncated, truncated }
    }

    fn render(&mut self) {
        let [x, _, theta, _] = self.state;
        tracing::trace!(x, theta, "cartpole");
    }

    fn observation_space(&self) -> &Space {
        &self.observation_space
    }

    fn action_space(&self) -> &Space {
        &self.action_space
    }
}
