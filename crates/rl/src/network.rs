//! Actor and critic function approximators.
//!
//! [`ActorModel`] and [`CriticModel`] are the bare parametric functions;
//! they are `Clone` so target networks can hold their own copies.
//! [`PolicyNetwork`] and [`ValueNetwork`] pair a model with the optimizer
//! that trains it.

use crate::config::{ActorConfig, CriticConfig};
use ml::{value_loss_grad, Activation, Optimizer, OptimizerKind, Sequential, Tensor};

/// Read and write access to a model's weights, in a stable order.
pub trait Parameters {
    fn params(&self) -> Vec<&Tensor>;
    fn params_mut(&mut self) -> Vec<&mut Tensor>;
}

/// Maps a state to an action.
pub trait Policy {
    fn predict(&self, state: &[f32]) -> Vec<f32>;
}

/// Maps a state and an action to a scalar value estimate.
pub trait ValueFunction {
    fn predict(&self, state: &[f32], action: &[f32]) -> f32;
}

/// Parameter gradients of a model, ordered like [`Parameters::params`].
#[derive(Clone, Debug, PartialEq)]
pub struct Gradients(pub Vec<Tensor>);

impl Gradients {
    pub fn accumulate(&mut self, other: &Gradients) {
        for (a, b) in self.0.iter_mut().zip(&other.0) {
            a.add_assign(b);
        }
    }

    pub fn scale(&mut self, factor: f32) {
        for g in &mut self.0 {
            g.scale(factor);
        }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(Tensor::is_finite)
    }
}

fn apply(optimizer: &mut dyn Optimizer, params: Vec<&mut Tensor>, grads: &Gradients) {
    debug_assert_eq!(params.len(), grads.0.len());
    let mut pairs: Vec<(&mut Tensor, &Tensor)> = params.into_iter().zip(&grads.0).collect();
    optimizer.step(&mut pairs);
}

fn widths(input: usize, hidden: &[usize], output: usize) -> Vec<usize> {
    let mut sizes = Vec::with_capacity(hidden.len() + 2);
    sizes.push(input);
    sizes.extend_from_slice(hidden);
    sizes.push(output);
    sizes
}

/// Deterministic policy `state -> action`.
#[derive(Clone)]
pub struct ActorModel {
    net: Sequential,
}

impl ActorModel {
    pub fn new(
        obs_dim: usize,
        act_dim: usize,
        config: &ActorConfig,
        rng: &mut fastrand::Rng,
    ) -> Self {
        let sizes = widths(obs_dim, &config.hidden, act_dim);
        Self { net: Sequential::mlp(&sizes, config.activation, config.output, rng) }
    }

    #[must_use]
    pub fn from_net(net: Sequential) -> Self {
        Self { net }
    }

    /// Backpropagates `upstream` (a gradient on the action) to the weights.
    #[must_use]
    pub fn backward(&self, state: &[f32], upstream: &[f32]) -> Gradients {
        let (_, activations) = self.net.forward(&Tensor::vector(state));
        let (_, grads) = self.net.backward(&activations, &Tensor::vector(upstream));
        Gradients(grads)
    }
}

impl Policy for ActorModel {
    fn predict(&self, state: &[f32]) -> Vec<f32> {
        self.net.forward(&Tensor::vector(state)).0.data
    }
}

impl Parameters for ActorModel {
    fn params(&self) -> Vec<&Tensor> {
        self.net.params()
    }

    fn params_mut(&mut self) -> Vec<&mut Tensor> {
        self.net.params_mut()
    }
}

/// Saved intermediate values of one critic forward pass.
struct CriticPass {
    state: Vec<Tensor>,
    action: Vec<Tensor>,
    trunk: Vec<Tensor>,
    value: f32,
}

/// Two-stream critic `(state, action) -> value`.
///
/// State and action are embedded separately, summed, and reduced to a
/// scalar by the trunk.
#[derive(Clone)]
pub struct CriticModel {
    state_branch: Sequential,
    action_branch: Sequential,
    trunk: Sequential,
}

impl CriticModel {
    pub fn new(
        obs_dim: usize,
        act_dim: usize,
        config: &CriticConfig,
        rng: &mut fastrand::Rng,
    ) -> Self {
        let state_sizes = widths(obs_dim, &config.state_hidden, config.merged);
        let trunk_sizes = widths(config.merged, &config.trunk_hidden, 1);
        Self {
            state_branch: Sequential::mlp(&state_sizes, config.activation, Activation::Linear, rng),
            action_branch: Sequential::mlp(
                &[act_dim, config.merged],
                config.activation,
                Activation::Linear,
                rng,
            ),
            trunk: Sequential::mlp(&trunk_sizes, config.activation, config.output, rng),
        }
    }

    /// Assembles a critic from explicit branches. The state and action
    /// branches must produce vectors of the same width.
    #[must_use]
    pub fn from_parts(
        state_branch: Sequential,
        action_branch: Sequential,
        trunk: Sequential,
    ) -> Self {
        Self { state_branch, action_branch, trunk }
    }

    fn forward(&self, state: &[f32], action: &[f32]) -> CriticPass {
        let (hs, state_acts) = self.state_branch.forward(&Tensor::vector(state));
        let (ha, action_acts) = self.action_branch.forward(&Tensor::vector(action));
        let mut merged = hs;
        merged.add_assign(&ha);
        let (q, trunk_acts) = self.trunk.forward(&merged);
        CriticPass { state: state_acts, action: action_acts, trunk: trunk_acts, value: q.data[0] }
    }

    /// Backpropagates `grad_value` from the output. Returns the gradient on
    /// the action input and the parameter gradients.
    fn backward(&self, pass: &CriticPass, grad_value: f32) -> (Tensor, Gradients) {
        let (grad_merged, trunk_grads) =
            self.trunk.backward(&pass.trunk, &Tensor::vector(&[grad_value]));
        let (_, state_grads) = self.state_branch.backward(&pass.state, &grad_merged);
        let (grad_action, action_grads) = self.action_branch.backward(&pass.action, &grad_merged);
        let mut grads = state_grads;
        grads.extend(action_grads);
        grads.extend(trunk_grads);
        (grad_action, Gradients(grads))
    }

    /// `dQ/da` at `(state, action)`.
    ///
    /// `None` when the action does not reach the output (every component
    /// is zero, e.g. a dead output unit or a zeroed action branch) or the
    /// gradient is not finite.
    #[must_use]
    pub fn action_gradient(&self, state: &[f32], action: &[f32]) -> Option<Vec<f32>> {
        let pass = self.forward(state, action);
        let (grad_action, _) = self.backward(&pass, 1.0);
        let connected = grad_action.data.iter().any(|&g| g != 0.0);
        (connected && grad_action.is_finite()).then_some(grad_action.data)
    }
}

impl ValueFunction for CriticModel {
    fn predict(&self, state: &[f32], action: &[f32]) -> f32 {
        self.forward(state, action).value
    }
}

impl Parameters for CriticModel {
    fn params(&self) -> Vec<&Tensor> {
        let mut params = self.state_branch.params();
        params.extend(self.action_branch.params());
        params.extend(self.trunk.params());
        params
    }

    fn params_mut(&mut self) -> Vec<&mut Tensor> {
        let mut params = self.state_branch.params_mut();
        params.extend(self.action_branch.params_mut());
        params.extend(self.trunk.params_mut());
        params
    }
}

/// The online actor and its optimizer.
pub struct PolicyNetwork {
    model: ActorModel,
    optimizer: Box<dyn Optimizer>,
}

impl PolicyNetwork {
    #[must_use]
    pub fn new(model: ActorModel, optimizer: OptimizerKind, lr: f32) -> Self {
        Self { model, optimizer: optimizer.build(lr) }
    }

    #[must_use]
    pub fn predict(&self, state: &[f32]) -> Vec<f32> {
        Policy::predict(&self.model, state)
    }

    /// Weight gradients for an upstream gradient on the action, or `None`
    /// if any of them is not finite.
    #[must_use]
    pub fn gradient(&self, state: &[f32], upstream: &[f32]) -> Option<Gradients> {
        let grads = self.model.backward(state, upstream);
        grads.is_finite().then_some(grads)
    }

    /// One optimizer step descending `grads`.
    pub fn update(&mut self, grads: &Gradients) {
        apply(self.optimizer.as_mut(), self.model.params_mut(), grads);
    }

    #[must_use]
    pub fn model(&self) -> &ActorModel {
        &self.model
    }
}

/// The online critic and its optimizer.
pub struct ValueNetwork {
    model: CriticModel,
    optimizer: Box<dyn Optimizer>,
}

impl ValueNetwork {
    #[must_use]
    pub fn new(model: CriticModel, optimizer: OptimizerKind, lr: f32) -> Self {
        Self { model, optimizer: optimizer.build(lr) }
    }

    #[must_use]
    pub fn predict(&self, state: &[f32], action: &[f32]) -> f32 {
        ValueFunction::predict(&self.model, state, action)
    }

    /// One supervised step toward `target`. Returns the squared error
    /// before the step.
    pub fn fit(&mut self, state: &[f32], action: &[f32], target: f32) -> f32 {
        self.fit_batch(&[(state, action, target)])
    }

    /// One optimizer step on the mean squared error over `batch`.
    /// Returns the loss before the step.
    pub fn fit_batch(&mut self, batch: &[(&[f32], &[f32], f32)]) -> f32 {
        if batch.is_empty() {
            return 0.0;
        }
        let passes: Vec<CriticPass> = batch
            .iter()
            .map(|(state, action, _)| self.model.forward(state, action))
            .collect();
        let pred = Tensor::vector(&passes.iter().map(|p| p.value).collect::<Vec<_>>());
        let targets = Tensor::vector(&batch.iter().map(|(_, _, t)| *t).collect::<Vec<_>>());
        let loss = ml::value_loss(&pred, &targets);
        let grad_pred = value_loss_grad(&pred, &targets);

        let mut total: Option<Gradients> = None;
        for (pass, &g) in passes.iter().zip(&grad_pred.data) {
            let (_, grads) = self.model.backward(pass, g);
            match total.as_mut() {
                Some(acc) => acc.accumulate(&grads),
                None => total = Some(grads),
            }
        }
        if let Some(grads) = total {
            apply(self.optimizer.as_mut(), self.model.params_mut(), &grads);
        }
        loss
    }

    #[must_use]
    pub fn action_gradient(&self, state: &[f32], action: &[f32]) -> Option<Vec<f32>> {
        self.model.action_gradient(state, action)
    }

    #[must_use]
    pub fn model(&self) -> &CriticModel {
        &self.model
    }
}
