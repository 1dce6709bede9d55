#![allow(dead_code)]

use gym::{Env, Space, Step};

/// Episode ends after a fixed number of steps, reward 1 per step.
pub struct CountdownEnv {
    pub length: usize,
    pub resets: usize,
    steps: usize,
    observation_space: Space,
    action_space: Space,
}

impl CountdownEnv {
    pub fn new(obs_dim: usize, act_dim: usize, length: usize) -> Self {
        Self {
            length,
            resets: 0,
            steps: 0,
            observation_space: Space::continuous(vec![-1.0; obs_dim], vec![1.0; obs_dim]),
            action_space: Space::continuous(vec![-1.0; act_dim], vec![1.0; act_dim]),
        }
    }

    fn observation(&self) -> Vec<f32> {
        let x = self.steps as f32 / self.length.max(1) as f32;
        vec![x; self.observation_space.shape()]
    }
}

impl Env for CountdownEnv {
    fn reset(&mut self) -> Vec<f32> {
        self.resets += 1;
        self.steps = 0;
        self.observation()
    }

    fn step(&mut self, _action: &[f32]) -> Step {
        self.steps += 1;
        let done = self.steps >= self.length;
        Step { observation: self.observation(), reward: 1.0, done, truncated: false }
    }

    fn observation_space(&self) -> &Space {
        &self.observation_space
    }

    fn action_space(&self) -> &Space {
        &self.action_space
    }
}

/// Survives only while the agent keeps choosing action 1.
pub struct PushRightEnv {
    observation_space: Space,
    action_space: Space,
}

impl PushRightEnv {
    pub fn new() -> Self {
        Self {
            observation_space: Space::continuous(vec![1.0], vec![1.0]),
            action_space: Space::Discrete(2),
        }
    }
}

impl Env for PushRightEnv {
    fn reset(&mut self) -> Vec<f32> {
        vec![1.0]
    }

    fn step(&mut self, action: &[f32]) -> Step {
        Step { observation: vec![1.0], reward: 1.0, done: action[0] < 0.5, truncated: false }
    }

    fn observation_space(&self) -> &Space {
        &self.observation_space
    }

    fn action_space(&self) -> &Space {
        &self.action_space
    }
}
