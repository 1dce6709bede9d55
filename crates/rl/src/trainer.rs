use crate::buffer::{ReplayBuffer, Transition};
use crate::config::TrainConfig;
use crate::error::Result;
use crate::network::{
    ActorModel, CriticModel, Gradients, Policy, PolicyNetwork, ValueFunction, ValueNetwork,
};
use crate::target::{TargetNetworks, TargetUpdate};

/// Summary of one training step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrainStats {
    /// Critic loss on the sampled batch, before the update.
    pub critic_loss: f32,
    /// Samples whose policy gradient was applied.
    pub actor_applied: usize,
    /// Samples skipped because a gradient was unavailable.
    pub actor_skipped: usize,
}

/// Bootstrapped critic target for one transition.
///
/// Terminal transitions return the reward alone.
pub fn critic_target<P, V>(transition: &Transition, gamma: f32, actor: &P, critic: &V) -> f32
where
    P: Policy + ?Sized,
    V: ValueFunction + ?Sized,
{
    if transition.terminal {
        return transition.reward;
    }
    let next_action = actor.predict(&transition.next_state);
    transition.reward + gamma * critic.predict(&transition.next_state, &next_action)
}

/// Deterministic policy-gradient actor-critic learner.
///
/// Owns the online networks, their targets and the replay buffer. Each
/// [`Trainer::train`] call samples a batch, fits the critic to
/// bootstrapped targets, then moves the actor up the critic's action
/// gradient. Targets move only on [`Trainer::update_target`].
pub struct Trainer {
    actor: PolicyNetwork,
    critic: ValueNetwork,
    target: TargetNetworks,
    buffer: ReplayBuffer,
    rng: fastrand::Rng,
    gamma: f32,
    batch_size: usize,
    target_update: TargetUpdate,
    obs_dim: usize,
    act_dim: usize,
    train_steps: u64,
    syncs: u64,
}

impl Trainer {
    /// # Errors
    ///
    /// Returns [`crate::RlError::InvalidConfig`] if `config` does not validate.
    pub fn new(config: &TrainConfig, obs_dim: usize, act_dim: usize) -> Result<Self> {
        config.validate()?;
        let mut rng = fastrand::Rng::with_seed(config.seed);
        let actor = ActorModel::new(obs_dim, act_dim, &config.actor, &mut rng);
        let critic = CriticModel::new(obs_dim, act_dim, &config.critic, &mut rng);
        Self::with_models(config, actor, critic, obs_dim, act_dim)
    }

    /// Builds a trainer around explicit models; the architecture fields of
    /// `config` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RlError::InvalidConfig`] if `config` does not validate.
    pub fn with_models(
        config: &TrainConfig,
        actor: ActorModel,
        critic: CriticModel,
        obs_dim: usize,
        act_dim: usize,
    ) -> Result<Self> {
        config.validate()?;
        let actor = PolicyNetwork::new(actor, config.optimizer, config.learning_rate);
        let critic = ValueNetwork::new(critic, config.optimizer, config.learning_rate);
        let target = TargetNetworks::new(&actor, &critic);
        Ok(Self {
            actor,
            critic,
            target,
            buffer: ReplayBuffer::new(config.buffer_capacity),
            rng: fastrand::Rng::with_seed(config.seed.wrapping_add(1)),
            gamma: config.gamma,
            batch_size: config.batch_size,
            target_update: config.target.update,
            obs_dim,
            act_dim,
            train_steps: 0,
            syncs: 0,
        })
    }

    pub fn remember(&mut self, transition: Transition) {
        self.buffer.record(transition);
    }

    /// Runs one training step. A no-op returning `None` until the buffer
    /// holds a full batch.
    pub fn train(&mut self) -> Option<TrainStats> {
        let Ok(batch) = self.buffer.sample(self.batch_size, &mut self.rng) else {
            return None;
        };

        let (target_actor, target_critic) = (self.target.actor(), self.target.critic());
        let targets: Vec<f32> = batch
            .iter()
            .map(|t| critic_target(t, self.gamma, target_actor, target_critic))
            .collect();
        let samples: Vec<(&[f32], &[f32], f32)> = batch
            .iter()
            .zip(&targets)
            .map(|(t, &y)| (t.state.as_slice(), t.action.as_slice(), y))
            .collect();
        let critic_loss = self.critic.fit_batch(&samples);

        let mut total: Option<Gradients> = None;
        let mut applied = 0usize;
        let mut skipped = 0usize;
        for transition in &batch {
            let state = &transition.state;
            let action = self.actor.predict(state);
            let Some(dq_da) = self.critic.action_gradient(state, &action) else {
                tracing::trace!("critic gradient unavailable, skipping sample");
                skipped += 1;
                continue;
            };
            // ascend the critic: descend on -dQ/da
            let upstream: Vec<f32> = dq_da.iter().map(|g| -g).collect();
            let Some(grads) = self.actor.gradient(state, &upstream) else {
                tracing::trace!("actor gradient unavailable, skipping sample");
                skipped += 1;
                continue;
            };
            match total.as_mut() {
                Some(acc) => acc.accumulate(&grads),
                None => total = Some(grads),
            }
            applied += 1;
        }
        if let Some(mut grads) = total {
            grads.scale(1.0 / applied as f32);
            self.actor.update(&grads);
        }

        self.train_steps += 1;
        tracing::debug!(critic_loss, applied, skipped, step = self.train_steps, "train step");
        Some(TrainStats { critic_loss, actor_applied: applied, actor_skipped: skipped })
    }

    /// Moves the target networks toward the online networks.
    pub fn update_target(&mut self) {
        self.target.sync(&self.actor, &self.critic, self.target_update);
        self.syncs += 1;
        tracing::debug!(syncs = self.syncs, "target networks synced");
    }

    #[must_use]
    pub fn actor(&self) -> &PolicyNetwork {
        &self.actor
    }

    #[must_use]
    pub fn critic(&self) -> &ValueNetwork {
        &self.critic
    }

    #[must_use]
    pub fn target(&self) -> &TargetNetworks {
        &self.target
    }

    #[must_use]
    pub fn buffer(&self) -> &ReplayBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn obs_dim(&self) -> usize {
        self.obs_dim
    }

    #[must_use]
    pub fn act_dim(&self) -> usize {
        self.act_dim
    }

    #[must_use]
    pub fn train_steps(&self) -> u64 {
        self.train_steps
    }

    #[must_use]
    pub fn syncs(&self) -> u64 {
        self.syncs
    }
}
