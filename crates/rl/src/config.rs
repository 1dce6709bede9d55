//! Experiment configuration.
//!
//! Every field has a default, so a config file only needs to name what it
//! changes. Call `validate` before building anything from a config; bad
//! values are rejected up front rather than surfacing mid-training.

use crate::error::{Result, RlError};
use crate::target::TargetUpdate;
use ml::{Activation, OptimizerKind};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Reads a JSON config file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse.
pub fn load<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let json = std::fs::read_to_string(path)?;
    from_str(&json)
}

/// # Errors
///
/// Returns [`RlError::Parse`] if `json` does not describe a `T`.
pub fn from_str<T: DeserializeOwned>(json: &str) -> Result<T> {
    Ok(serde_json::from_str(json)?)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActorConfig {
    pub hidden: Vec<usize>,
    pub activation: Activation,
    pub output: Activation,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self { hidden: vec![24, 48, 24], activation: Activation::Relu, output: Activation::Linear }
    }
}

/// Two-stream critic layout.
///
/// The state passes through `state_hidden` and a linear projection to
/// `merged` units, the action is projected linearly to `merged` units, the
/// two are summed and fed through `trunk_hidden` to a single output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CriticConfig {
    pub state_hidden: Vec<usize>,
    pub merged: usize,
    pub trunk_hidden: Vec<usize>,
    pub activation: Activation,
    pub output: Activation,
}

impl Default for CriticConfig {
    fn default() -> Self {
        Self {
            state_hidden: vec![24],
            merged: 48,
            trunk_hidden: vec![24],
            activation: Activation::Relu,
            output: Activation::Linear,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetConfig {
    pub update: TargetUpdate,
    /// Environment steps between target syncs.
    pub interval_steps: usize,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self { update: TargetUpdate::Soft { tau: 0.125 }, interval_steps: 50 }
    }
}

/// Actor-critic training run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainConfig {
    pub episodes: usize,
    pub max_steps: usize,
    pub batch_size: usize,
    pub buffer_capacity: usize,
    pub learning_rate: f32,
    pub optimizer: OptimizerKind,
    pub gamma: f32,
    pub epsilon_start: f32,
    pub epsilon_decay: f32,
    pub target: TargetConfig,
    pub actor: ActorConfig,
    pub critic: CriticConfig,
    pub seed: u64,
    pub render: bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            episodes: 10_000,
            max_steps: 500,
            batch_size: 32,
            buffer_capacity: 2000,
            learning_rate: 0.001,
            optimizer: OptimizerKind::Adam,
            gamma: 0.90,
            epsilon_start: 1.0,
            epsilon_decay: 0.995,
            target: TargetConfig::default(),
            actor: ActorConfig::default(),
            critic: CriticConfig::default(),
            seed: 0,
            render: false,
        }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> RlError {
    RlError::InvalidConfig { field, reason: reason.into() }
}

fn ensure(ok: bool, field: &'static str, reason: &str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(invalid(field, reason))
    }
}

fn ensure_widths(widths: &[usize], field: &'static str) -> Result<()> {
    ensure(!widths.is_empty(), field, "must not be empty")?;
    ensure(widths.iter().all(|&w| w > 0), field, "layer widths must be positive")
}

impl TrainConfig {
    /// # Errors
    ///
    /// Returns [`RlError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        ensure(self.episodes > 0, "episodes", "must be positive")?;
        ensure(self.max_steps > 0, "max_steps", "must be positive")?;
        ensure(self.batch_size > 0, "batch_size", "must be positive")?;
        ensure(
            self.batch_size <= self.buffer_capacity,
            "batch_size",
            "must not exceed buffer_capacity",
        )?;
        ensure(
            self.learning_rate.is_finite() && self.learning_rate > 0.0,
            "learning_rate",
            "must be positive",
        )?;
        ensure(self.gamma > 0.0 && self.gamma < 1.0, "gamma", "must lie in (0, 1)")?;
        ensure(
            self.epsilon_start >= 0.0 && self.epsilon_start <= 1.0,
            "epsilon_start",
            "must lie in [0, 1]",
        )?;
        ensure(
            self.epsilon_decay > 0.0 && self.epsilon_decay <= 1.0,
            "epsilon_decay",
            "must lie in (0, 1]",
        )?;
        if let TargetUpdate::Soft { tau } = self.target.update {
            ensure(tau > 0.0 && tau <= 1.0, "target.update.tau", "must lie in (0, 1]")?;
        }
        ensure(self.target.interval_steps > 0, "target.interval_steps", "must be positive")?;
        ensure_widths(&self.actor.hidden, "actor.hidden")?;
        ensure_widths(&self.critic.state_hidden, "critic.state_hidden")?;
        ensure(self.critic.merged > 0, "critic.merged", "must be positive")?;
        ensure_widths(&self.critic.trunk_hidden, "critic.trunk_hidden")?;
        Ok(())
    }
}

/// Random search or hill climbing over linear CartPole policies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    pub trials: usize,
    /// Episode length that counts as solved.
    pub max_steps: usize,
    /// Scale of the hill-climbing perturbation.
    pub noise_scale: f32,
    /// Steps to run the best policy for after the search.
    pub demo_steps: usize,
    pub seed: u64,
    pub render: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            trials: 1000,
            max_steps: 200,
            noise_scale: 1.0,
            demo_steps: 1000,
            seed: 0,
            render: false,
        }
    }
}

impl SearchConfig {
    /// # Errors
    ///
    /// Returns [`RlError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        ensure(self.trials > 0, "trials", "must be positive")?;
        ensure(self.max_steps > 0, "max_steps", "must be positive")?;
        ensure(
            self.noise_scale.is_finite() && self.noise_scale > 0.0,
            "noise_scale",
            "must be positive",
        )?;
        Ok(())
    }
}
