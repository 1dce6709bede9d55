use crate::Tensor;

/// Mean squared error between predictions and targets.
#[must_use]
pub fn value_loss(pred: &Tensor, targets: &Tensor) -> f32 {
    let n = pred.len();
    let sum: f32 = pred
        .data
        .iter()
        .zip(&targets.data)
        .map(|(&p, &t)| (p - t).powi(2))
        .sum();
    sum / n as f32
}

/// Gradient of [`value_loss`] with respect to `pred`.
#[must_use]
pub fn value_loss_grad(pred: &Tensor, targets: &Tensor) -> Tensor {
    let n = pred.len() as f32;
    let data = pred
        .data
        .iter()
        .zip(&targets.data)
        .map(|(&p, &t)| 2.0 * (p - t) / n)
        .collect();
    Tensor::from_vec(pred.shape.clone(), data)
}
