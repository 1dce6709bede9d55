/// The set of valid observations or actions of an environment.
#[derive(Clone, Debug, PartialEq)]
pub enum Space {
    /// A box of real vectors bounded element-wise by `low` and `high`.
    Continuous { low: Vec<f32>, high: Vec<f32> },
    /// `n` actions, encoded as the single value `0.0..n`.
    Discrete(usize),
}

impl Space {
    /// # Panics
    ///
    /// Panics if the bounds differ in length or `low > high` anywhere.
    #[must_use]
    pub fn continuous(low: Vec<f32>, high: Vec<f32>) -> Self {
        assert_eq!(low.len(), high.len());
        assert!(low.iter().zip(&high).all(|(l, h)| l <= h), "low must not exceed high");
        Space::Continuous { low, high }
    }

    /// Number of values in one element of the space.
    #[must_use]
    pub fn shape(&self) -> usize {
        match self {
            Space::Continuous { low, .. } => low.len(),
            Space::Discrete(_) => 1,
        }
    }

    /// Draws a uniformly random element.
    #[allow(clippy::cast_precision_loss)]
    pub fn sample(&self, rng: &mut fastrand::Rng) -> Vec<f32> {
        match self {
            Space::Continuous { low, high } => low
                .iter()
                .zip(high)
                .map(|(l, h)| {
                    if l.is_finite() && h.is_finite() {
                        l + rng.f32() * (h - l)
                    } else {
                        rng.f32() * 2.0 - 1.0
                    }
                })
                .collect(),
            Space::Discrete(n) => vec![rng.usize(..*n) as f32],
        }
    }

    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn contains(&self, value: &[f32]) -> bool {
        match self {
            Space::Continuous { low, high } => {
                value.len() == low.len()
                    && value
                        .iter()
                        .zip(low.iter().zip(high))
                        .all(|(v, (l, h))| *v >= *l && *v <= *h)
            }
            Space::Discrete(n) => {
                value.len() == 1
                    && value[0] >= 0.0
                    && value[0] < *n as f32
                    && value[0].fract() == 0.0
            }
        }
    }
}
