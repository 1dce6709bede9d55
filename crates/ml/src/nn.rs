use crate::Tensor;
use serde::{Deserialize, Serialize};

/// A differentiable layer.
///
/// `backward` receives the same input `x` that was passed to `forward` and
/// the gradient of the loss with respect to the layer output. It returns
/// the gradient with respect to `x` together with one gradient per
/// parameter, ordered like [`Layer::params`].
pub trait Layer {
    fn forward(&self, x: &Tensor) -> Tensor;
    fn backward(&self, x: &Tensor, grad: &Tensor) -> (Tensor, Vec<Tensor>);
    fn params(&self) -> Vec<&Tensor> {
        Vec::new()
    }
    fn params_mut(&mut self) -> Vec<&mut Tensor> {
        Vec::new()
    }
    fn clone_box(&self) -> Box<dyn Layer>;
}

impl Clone for Box<dyn Layer> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// A fully connected layer computing `y = Wx + b`.
#[derive(Clone, Debug)]
pub struct Dense {
    /// Weight matrix, shape `[out_dim, in_dim]`.
    pub w: Tensor,
    /// Bias vector, shape `[out_dim]`.
    pub b: Tensor,
    in_dim: usize,
    out_dim: usize,
}

impl Dense {
    /// # Panics
    ///
    /// Panics if the weight or bias lengths do not match the dimensions.
    #[must_use]
    pub fn new(weights: Vec<f32>, bias: Vec<f32>, in_dim: usize, out_dim: usize) -> Self {
        assert_eq!(weights.len(), in_dim * out_dim);
        assert_eq!(bias.len(), out_dim);
        Self {
            w: Tensor::from_vec(vec![out_dim, in_dim], weights),
            b: Tensor::from_vec(vec![out_dim], bias),
            in_dim,
            out_dim,
        }
    }

    /// Glorot-uniform weights and zero bias.
    pub fn xavier(in_dim: usize, out_dim: usize, rng: &mut fastrand::Rng) -> Self {
        let limit = (6.0 / (in_dim + out_dim) as f32).sqrt();
        let weights = (0..in_dim * out_dim)
            .map(|_| rng.f32() * 2.0 * limit - limit)
            .collect();
        Self::new(weights, vec![0.0; out_dim], in_dim, out_dim)
    }

    #[must_use]
    pub fn in_dim(&self) -> usize {
        self.in_dim
    }

    #[must_use]
    pub fn out_dim(&self) -> usize {
        self.out_dim
    }
}

impl Layer for Dense {
    fn forward(&self, x: &Tensor) -> Tensor {
        debug_assert_eq!(x.len(), self.in_dim);
        let mut y = vec![0f32; self.out_dim];
        for (o, out) in y.iter_mut().enumerate() {
            let row = &self.w.data[o * self.in_dim..(o + 1) * self.in_dim];
            *out = self.b.data[o] + row.iter().zip(&x.data).map(|(w, v)| w * v).sum::<f32>();
        }
        Tensor::from_vec(vec![self.out_dim], y)
    }

    fn backward(&self, x: &Tensor, grad: &Tensor) -> (Tensor, Vec<Tensor>) {
        let mut grad_input = vec![0.0; self.in_dim];
        let mut grad_w = vec![0.0; self.in_dim * self.out_dim];
        let mut grad_b = vec![0.0; self.out_dim];
        for (o, (&go, gb)) in grad.data.iter().zip(&mut grad_b).enumerate() {
            let row = o * self.in_dim..(o + 1) * self.in_dim;
            let weights = grad_w[row.clone()].iter_mut().zip(&self.w.data[row]);
            for ((gw, w), (gi, xv)) in weights.zip(grad_input.iter_mut().zip(&x.data)) {
                *gw += go * xv;
                *gi += w * go;
            }
            *gb += go;
        }
        (
            Tensor::from_vec(vec![self.in_dim], grad_input),
            vec![
                Tensor::from_vec(vec![self.out_dim, self.in_dim], grad_w),
                Tensor::from_vec(vec![self.out_dim], grad_b),
            ],
        )
    }

    fn params(&self) -> Vec<&Tensor> {
        vec![&self.w, &self.b]
    }

    fn params_mut(&mut self) -> Vec<&mut Tensor> {
        vec![&mut self.w, &mut self.b]
    }

    fn clone_box(&self) -> Box<dyn Layer> {
        Box::new(self.clone())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Relu;

impl Layer for Relu {
    fn forward(&self, x: &Tensor) -> Tensor {
        let data = x.data.iter().map(|&v| v.max(0.0)).collect();
        Tensor::from_vec(x.shape.clone(), data)
    }

    fn backward(&self, x: &Tensor, grad: &Tensor) -> (Tensor, Vec<Tensor>) {
        let data = x
            .data
            .iter()
            .zip(&grad.data)
            .map(|(&v, &g)| if v > 0.0 { g } else { 0.0 })
            .collect();
        (Tensor::from_vec(x.shape.clone(), data), Vec::new())
    }

    fn clone_box(&self) -> Box<dyn Layer> {
        Box::new(*self)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TanhAct;

impl Layer for TanhAct {
    fn forward(&self, x: &Tensor) -> Tensor {
        let data = x.data.iter().map(|&v| v.tanh()).collect();
        Tensor::from_vec(x.shape.clone(), data)
    }

    fn backward(&self, x: &Tensor, grad: &Tensor) -> (Tensor, Vec<Tensor>) {
        let data = x
            .data
            .iter()
            .zip(&grad.data)
            .map(|(&v, &g)| {
                let t = v.tanh();
                g * (1.0 - t * t)
            })
            .collect();
        (Tensor::from_vec(x.shape.clone(), data), Vec::new())
    }

    fn clone_box(&self) -> Box<dyn Layer> {
        Box::new(*self)
    }
}

/// Activation applied after a dense layer when building networks from
/// configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    #[default]
    Linear,
    Relu,
    Tanh,
}

/// An ordered stack of layers.
#[derive(Clone, Default)]
pub struct Sequential {
    layers: Vec<Box<dyn Layer>>,
}

impl Sequential {
    #[must_use]
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Builds a multi-layer perceptron through the given layer widths.
    ///
    /// `sizes` lists the input width, every hidden width and the output
    /// width. Hidden layers use `hidden`, the last dense layer uses `output`.
    ///
    /// # Panics
    ///
    /// Panics if fewer than two sizes are given.
    pub fn mlp(
        sizes: &[usize],
        hidden: Activation,
        output: Activation,
        rng: &mut fastrand::Rng,
    ) -> Self {
        assert!(sizes.len() >= 2, "an mlp needs an input and an output width");
        let mut net = Self::new();
        let last = sizes.len() - 2;
        for (i, pair) in sizes.windows(2).enumerate() {
            net.push(Dense::xavier(pair[0], pair[1], rng));
            net.push_activation(if i == last { output } else { hidden });
        }
        net
    }

    pub fn push<L: Layer + 'static>(&mut self, layer: L) {
        self.layers.push(Box::new(layer));
    }

    pub fn push_activation(&mut self, activation: Activation) {
        match activation {
            Activation::Linear => {}
            Activation::Relu => self.push(Relu),
            Activation::Tanh => self.push(TanhAct),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Runs the network and returns its output along with the input of
    /// every layer (plus the final output) for use in [`Sequential::backward`].
    #[must_use]
    pub fn forward(&self, x: &Tensor) -> (Tensor, Vec<Tensor>) {
        let mut out = x.clone();
        let mut activations = Vec::with_capacity(self.layers.len() + 1);
        activations.push(out.clone());
        for layer in &self.layers {
            out = layer.forward(&out);
            activations.push(out.clone());
        }
        (out, activations)
    }

    /// Backpropagates `grad` through the network.
    ///
    /// Returns the gradient with respect to the network input and the
    /// parameter gradients in [`Sequential::params`] order.
    #[must_use]
    pub fn backward(&self, activations: &[Tensor], grad: &Tensor) -> (Tensor, Vec<Tensor>) {
        let mut grad_out = grad.clone();
        let mut per_layer = Vec::with_capacity(self.layers.len());
        let inputs = &activations[..self.layers.len()];
        for (layer, input) in self.layers.iter().zip(inputs).rev() {
            let (grad_in, param_grads) = layer.backward(input, &grad_out);
            grad_out = grad_in;
            per_layer.push(param_grads);
        }
        per_layer.reverse();
        (grad_out, per_layer.into_iter().flatten().collect())
    }

    #[must_use]
    pub fn params(&self) -> Vec<&Tensor> {
        self.layers.iter().flat_map(|l| l.params()).collect()
    }

    pub fn params_mut(&mut self) -> Vec<&mut Tensor> {
        self.layers.iter_mut().flat_map(|l| l.params_mut()).collect()
    }
}
