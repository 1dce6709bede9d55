use crate::Tensor;
use serde::{Deserialize, Serialize};

/// A first-order optimizer stepping parameters against their gradients.
///
/// Stateful optimizers key their moment estimates by position, so callers
/// must pass the same parameters in the same order on every step.
pub trait Optimizer {
    fn step(&mut self, params: &mut [(&mut Tensor, &Tensor)]);
    fn learning_rate(&self) -> f32;
}

pub struct Sgd {
    pub lr: f32,
}

impl Sgd {
    #[must_use]
    pub fn new(lr: f32) -> Self {
        Self { lr }
    }
}

impl Optimizer for Sgd {
    fn step(&mut self, params: &mut [(&mut Tensor, &Tensor)]) {
        for (p, g) in params {
            for (pv, gv) in p.data.iter_mut().zip(&g.data) {
                *pv -= self.lr * gv;
            }
        }
    }

    fn learning_rate(&self) -> f32 {
        self.lr
    }
}

pub struct Adam {
    lr: f32,
    beta1: f32,
    beta2: f32,
    eps: f32,
    t: i32,
    m: Vec<Vec<f32>>,
    v: Vec<Vec<f32>>,
}

impl Adam {
    #[must_use]
    pub fn new(lr: f32) -> Self {
        Self { lr, beta1: 0.9, beta2: 0.999, eps: 1e-8, t: 0, m: Vec::new(), v: Vec::new() }
    }
}

impl Optimizer for Adam {
    fn step(&mut self, params: &mut [(&mut Tensor, &Tensor)]) {
        if self.m.is_empty() {
            self.m = params.iter().map(|(p, _)| vec![0.0; p.len()]).collect();
            self.v = params.iter().map(|(p, _)| vec![0.0; p.len()]).collect();
        }
        self.t += 1;
        let (beta1, beta2) = (self.beta1, self.beta2);
        let bias1 = 1.0 - beta1.powi(self.t);
        let bias2 = 1.0 - beta2.powi(self.t);
        let state = self.m.iter_mut().zip(self.v.iter_mut());
        for ((p, g), (m_vec, v_vec)) in params.iter_mut().zip(state) {
            let moments = m_vec.iter_mut().zip(v_vec.iter_mut());
            for ((pv, gv), (m, v)) in p.data.iter_mut().zip(&g.data).zip(moments) {
                *m = beta1 * *m + (1.0 - beta1) * gv;
                *v = beta2 * *v + (1.0 - beta2) * gv * gv;
                let m_hat = *m / bias1;
                let v_hat = *v / bias2;
                *pv -= self.lr * m_hat / (v_hat.sqrt() + self.eps);
            }
        }
    }

    fn learning_rate(&self) -> f32 {
        self.lr
    }
}

/// Optimizer choice as it appears in configuration files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizerKind {
    Sgd,
    #[default]
    Adam,
}

impl OptimizerKind {
    #[must_use]
    pub fn build(self, lr: f32) -> Box<dyn Optimizer> {
        match self {
            OptimizerKind::Sgd => Box::new(Sgd::new(lr)),
            OptimizerKind::Adam => Box::new(Adam::new(lr)),
        }
    }
}
