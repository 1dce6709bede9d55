use crate::space::Space;

/// Outcome of a single [`Env::step`].
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub observation: Vec<f32>,
    pub reward: f32,
    /// The episode is over, either by failure or by the time limit.
    pub done: bool,
    /// `done` was caused by the time limit rather than a terminal state.
    pub truncated: bool,
}

/// Reinforcement learning environment trait.
///
/// Modelled on the classic Gym interface. Each call to [`step`] advances the
/// simulation by one action and returns the new observation vector, a
/// reward signal, and whether the episode has ended.
///
/// [`step`]: Env::step
pub trait Env {
    /// Reset the environment to a fresh starting state and return the
    /// initial observation vector.
    fn reset(&mut self) -> Vec<f32>;

    /// Advance the environment by one action.
    ///
    /// Actions are always passed as a slice. Discrete environments read the
    /// action index from the first element.
    fn step(&mut self, action: &[f32]) -> Step;

    /// Show the current state. Environments without a visual front-end
    /// leave this as a no-op.
    fn render(&mut self) {}

    fn observation_space(&self) -> &Space;

    fn action_space(&self) -> &Space;
}
