//! Target networks and how they follow the online networks.

use crate::network::{ActorModel, CriticModel, Parameters, PolicyNetwork, ValueNetwork};
use serde::{Deserialize, Serialize};

/// How target weights move toward the online weights on each sync.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetUpdate {
    /// Copy the online weights exactly.
    Hard,
    /// Polyak averaging: `target = tau * online + (1 - tau) * target`.
    Soft { tau: f32 },
}

impl TargetUpdate {
    /// Moves `target` toward `online`. Both must share one architecture.
    pub fn apply<P: Parameters>(self, target: &mut P, online: &P) {
        let online = online.params();
        let target = target.params_mut();
        debug_assert_eq!(online.len(), target.len());
        for (t, o) in target.into_iter().zip(online) {
            match self {
                TargetUpdate::Hard => t.data.copy_from_slice(&o.data),
                TargetUpdate::Soft { tau } => {
                    for (tv, ov) in t.data.iter_mut().zip(&o.data) {
                        *tv = tau * ov + (1.0 - tau) * *tv;
                    }
                }
            }
        }
    }
}

/// Slow copies of the actor and the critic used for bootstrap targets.
///
/// Each is separately owned and only changes through [`TargetNetworks::sync`].
#[derive(Clone)]
pub struct TargetNetworks {
    actor: ActorModel,
    critic: CriticModel,
}

impl TargetNetworks {
    /// Starts both targets as exact copies of the online models.
    #[must_use]
    pub fn new(actor: &PolicyNetwork, critic: &ValueNetwork) -> Self {
        Self { actor: actor.model().clone(), critic: critic.model().clone() }
    }

    pub fn sync(&mut self, actor: &PolicyNetwork, critic: &ValueNetwork, update: TargetUpdate) {
        update.apply(&mut self.actor, actor.model());
        update.apply(&mut self.critic, critic.model());
    }

    #[must_use]
    pub fn actor(&self) -> &ActorModel {
        &self.actor
    }

    #[must_use]
    pub fn critic(&self) -> &CriticModel {
        &self.critic
    }
}
