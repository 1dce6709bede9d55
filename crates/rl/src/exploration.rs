/// Epsilon-greedy exploration schedule.
///
/// The rate decays on every call to [`EpsilonGreedy::explore`], so it keeps
/// shrinking within an episode as well as across episodes.
#[derive(Clone, Debug)]
pub struct EpsilonGreedy {
    epsilon: f32,
    decay: f32,
}

impl EpsilonGreedy {
    #[must_use]
    pub fn new(epsilon: f32, decay: f32) -> Self {
        Self { epsilon, decay }
    }

    /// Decays the rate, then decides whether this action should be random.
    pub fn explore(&mut self, rng: &mut fastrand::Rng) -> bool {
        self.epsilon *= self.decay;
        rng.f32() < self.epsilon
    }

    #[must_use]
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }
}

impl Default for EpsilonGreedy {
    fn default() -> Self {
        Self::new(1.0, 0.995)
    }
}
