#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::cast_precision_loss)]
//! # ml
//!
//! The small numerical layer the learning agents are built on: a dense
//! [`Tensor`], differentiable [`Layer`]s composed into a [`Sequential`]
//! network, first-order [`Optimizer`]s and the mean-squared-error loss.
//!
//! Backpropagation is explicit. A forward pass through a [`Sequential`]
//! returns the activations it saw, and the backward pass turns an upstream
//! gradient into both the gradient with respect to the network input and
//! the gradients of every parameter, in the same order as
//! [`Sequential::params`]. The input gradient is what lets a critic hand
//! `dQ/da` back to an actor.

pub mod loss;
pub mod nn;
pub mod optim;

pub use loss::{value_loss, value_loss_grad};
pub use nn::{Activation, Dense, Layer, Relu, Sequential, TanhAct};
pub use optim::{Adam, Optimizer, OptimizerKind, Sgd};

/// A dense row-major array of `f32` values.
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor {
    pub data: Vec<f32>,
    pub shape: Vec<usize>,
}

impl Tensor {
    /// # Panics
    ///
    /// Panics if `data` does not hold exactly `shape.iter().product()` values.
    #[must_use]
    pub fn from_vec(shape: Vec<usize>, data: Vec<f32>) -> Self {
        assert_eq!(shape.iter().product::<usize>(), data.len());
        Self { data, shape }
    }

    /// A rank-1 tensor holding a copy of `values`.
    #[must_use]
    pub fn vector(values: &[f32]) -> Self {
        Self { data: values.to_vec(), shape: vec![values.len()] }
    }

    #[must_use]
    pub fn zeros(shape: Vec<usize>) -> Self {
        let len = shape.iter().product();
        Self { data: vec![0.0; len], shape }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// `true` when no element is NaN or infinite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    /// Element-wise `self += other`.
    pub fn add_assign(&mut self, other: &Tensor) {
        debug_assert_eq!(self.shape, other.shape);
        for (a, b) in self.data.iter_mut().zip(&other.data) {
            *a += b;
        }
    }

    pub fn scale(&mut self, factor: f32) {
        for v in &mut self.data {
            *v *= factor;
        }
    }
}
