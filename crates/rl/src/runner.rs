use crate::agent::Agent;
use crate::buffer::Transition;
use crate::config::TrainConfig;
use crate::error::{Result, RlError};
use gym::{Env, Step};

/// What happened during one episode.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EpisodeReport {
    /// Environment steps taken.
    pub steps: usize,
    pub total_reward: f32,
    /// Steps on which a training update ran.
    pub updates: usize,
    /// Exploration rate at the end of the episode.
    pub epsilon: f32,
}

/// Drives episodes: act, step, record, train, and periodically sync the
/// target networks.
pub struct EnvironmentLoop<E: Env> {
    env: E,
    agent: Agent,
    max_steps: usize,
    sync_interval: u64,
    render: bool,
    total_steps: u64,
}

impl<E: Env> EnvironmentLoop<E> {
    /// # Errors
    ///
    /// Returns [`RlError::InvalidConfig`] if `config` does not validate and
    /// [`RlError::DimensionMismatch`] if the environment's spaces do not
    /// match the agent's networks.
    pub fn new(env: E, agent: Agent, config: &TrainConfig) -> Result<Self> {
        config.validate()?;
        let obs = env.observation_space().shape();
        if obs != agent.trainer().obs_dim() {
            return Err(RlError::DimensionMismatch {
                what: "observation",
                expected: agent.trainer().obs_dim(),
                actual: obs,
            });
        }
        let act = env.action_space().shape();
        if act != agent.trainer().act_dim() {
            return Err(RlError::DimensionMismatch {
                what: "action",
                expected: agent.trainer().act_dim(),
                actual: act,
            });
        }
        Ok(Self {
            env,
            agent,
            max_steps: config.max_steps,
            sync_interval: config.target.interval_steps as u64,
            render: config.render,
            total_steps: 0,
        })
    }

    pub fn run_episode(&mut self) -> EpisodeReport {
        let mut report = EpisodeReport::default();
        let mut state = self.env.reset();
        for _ in 0..self.max_steps {
            if self.render {
                self.env.render();
            }
            let action = self.agent.act(&state, self.env.action_space());
            let Step { observation, reward, done, .. } = self.env.step(&action);
            self.agent.remember(Transition {
                state,
                action,
                reward,
                next_state: observation.clone(),
                terminal: done,
            });
            if self.agent.train().is_some() {
                report.updates += 1;
            }
            self.total_steps += 1;
            if self.total_steps % self.sync_interval == 0 {
                self.agent.update_target();
            }

            report.steps += 1;
            report.total_reward += reward;
            state = observation;
            if done {
                break;
            }
        }
        report.epsilon = self.agent.epsilon();
        report
    }

    pub fn run(&mut self, episodes: usize) -> Vec<EpisodeReport> {
        (0..episodes)
            .map(|episode| {
                let report = self.run_episode();
                tracing::info!(
                    episode,
                    reward = report.total_reward,
                    epsilon = report.epsilon,
                    "Ended in: {} steps",
                    report.steps
                );
                report
            })
            .collect()
    }

    #[must_use]
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    #[must_use]
    pub fn env(&self) -> &E {
        &self.env
    }

    #[must_use]
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }
}
