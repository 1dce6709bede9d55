use crate::buffer::Transition;
use crate::config::TrainConfig;
use crate::error::Result;
use crate::exploration::EpsilonGreedy;
use crate::trainer::{TrainStats, Trainer};
use gym::Space;

/// The training context: the learner plus its exploration state.
pub struct Agent {
    trainer: Trainer,
    exploration: EpsilonGreedy,
    rng: fastrand::Rng,
}

impl Agent {
    /// # Errors
    ///
    /// Returns [`crate::RlError::InvalidConfig`] if `config` does not validate.
    pub fn new(config: &TrainConfig, obs_dim: usize, act_dim: usize) -> Result<Self> {
        let trainer = Trainer::new(config, obs_dim, act_dim)?;
        Ok(Self::with_trainer(trainer, config))
    }

    #[must_use]
    pub fn with_trainer(trainer: Trainer, config: &TrainConfig) -> Self {
        Self {
            trainer,
            exploration: EpsilonGreedy::new(config.epsilon_start, config.epsilon_decay),
            rng: fastrand::Rng::with_seed(config.seed.wrapping_add(2)),
        }
    }

    /// Epsilon-greedy action: a random element of `action_space` with
    /// probability epsilon, otherwise the actor's prediction.
    pub fn act(&mut self, state: &[f32], action_space: &Space) -> Vec<f32> {
        if self.exploration.explore(&mut self.rng) {
            action_space.sample(&mut self.rng)
        } else {
            self.trainer.actor().predict(state)
        }
    }

    pub fn remember(&mut self, transition: Transition) {
        self.trainer.remember(transition);
    }

    pub fn train(&mut self) -> Option<TrainStats> {
        self.trainer.train()
    }

    pub fn update_target(&mut self) {
        self.trainer.update_target();
    }

    #[must_use]
    pub fn epsilon(&self) -> f32 {
        self.exploration.epsilon()
    }

    #[must_use]
    pub fn trainer(&self) -> &Trainer {
        &self.trainer
    }
}
