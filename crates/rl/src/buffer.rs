use crate::error::{Result, RlError};
use std::collections::VecDeque;

/// One recorded environment interaction.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub state: Vec<f32>,
    pub action: Vec<f32>,
    pub reward: f32,
    pub next_state: Vec<f32>,
    pub terminal: bool,
}

/// Bounded FIFO history of transitions.
///
/// Once full, every insertion evicts the oldest entry.
pub struct ReplayBuffer {
    buffer: VecDeque<Transition>,
    capacity: usize,
}

impl ReplayBuffer {
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "replay buffer capacity must be positive");
        Self { buffer: VecDeque::with_capacity(capacity), capacity }
    }

    pub fn record(&mut self, transition: Transition) {
        if self.buffer.len() == self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(transition);
    }

    /// Draws `n` distinct transitions uniformly at random.
    ///
    /// # Errors
    ///
    /// Returns [`RlError::InsufficientData`] when fewer than `n` transitions
    /// are stored.
    pub fn sample(&self, n: usize, rng: &mut fastrand::Rng) -> Result<Vec<&Transition>> {
        let len = self.buffer.len();
        if len < n {
            return Err(RlError::InsufficientData { requested: n, available: len });
        }
        // partial Fisher-Yates over indices
        let mut indices: Vec<usize> = (0..len).collect();
        for i in 0..n {
            let j = rng.usize(i..len);
            indices.swap(i, j);
        }
        Ok(indices[..n].iter().map(|&i| &self.buffer[i]).collect())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates from the oldest to the newest transition.
    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.buffer.iter()
    }
}
