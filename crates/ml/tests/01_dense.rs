use ml::{Dense, Layer, Relu, TanhAct, Tensor};

fn close(a: &[f32], b: &[f32]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (*x - *y).abs() < 1e-5)
}

#[test]
fn dense_forward_exact() {
    let w = vec![
        1.0, 0.5, -0.5, -1.0, // First row
        0.2, 0.3, 0.1, 0.9, // Second row
    ];
    let b = vec![0.1, -0.2];
    let layer = Dense::new(w, b.clone(), 4, 2);
    let x = Tensor::vector(&[1.0, 2.0, 3.0, 4.0]);
    let y = layer.forward(&x);

    let expected_y0 = 1.0 * 1.0 + 0.5 * 2.0 - 0.5 * 3.0 - 1.0 * 4.0 + b[0];
    let expected_y1 = 0.2 * 1.0 + 0.3 * 2.0 + 0.1 * 3.0 + 0.9 * 4.0 + b[1];

    assert_eq!(y.shape, vec![2]);
    assert!((y.data[0] - expected_y0).abs() < 1e-6);
    assert!((y.data[1] - expected_y1).abs() < 1e-6);
}

#[test]
fn dense_backward_gradients() {
    let w = vec![1.0, 2.0,
                 -3.0, 0.5];
    let b = vec![0.1, -0.2];
    let x = Tensor::vector(&[0.5, -1.0]);
    let dense = Dense::new(w, b, 2, 2);
    let grad_out = Tensor::vector(&[1.0, -2.0]);
    let (dx, grads) = dense.backward(&x, &grad_out);
    let expected_dx = vec![1.0 * 1.0 + -3.0 * (-2.0), 2.0 * 1.0 + 0.5 * (-2.0)];
    let expected_dw = vec![0.5 * 1.0, -1.0 * 1.0,
                           0.5 * (-2.0), -1.0 * (-2.0)];
    assert_eq!(grads.len(), 2);
    assert!(close(&dx.data, &expected_dx));
    assert!(close(&grads[0].data, &expected_dw));
    assert!(close(&grads[1].data, &grad_out.data));
}

#[test]
fn xavier_respects_glorot_limit() {
    let mut rng = fastrand::Rng::with_seed(7);
    let layer = Dense::xavier(3, 5, &mut rng);
    let limit = (6.0f32 / 8.0).sqrt();
    assert_eq!(layer.w.shape, vec![5, 3]);
    assert!(layer.w.data.iter().all(|w| w.abs() <= limit));
    assert!(layer.b.data.iter().all(|&b| b == 0.0));
}

#[test]
fn relu_forward_backward() {
    let x = Tensor::vector(&[-1.0, 0.0, 2.0]);
    let y = Relu.forward(&x);
    assert_eq!(y.data, vec![0.0, 0.0, 2.0]);
    let grad_out = Tensor::vector(&[0.1, 0.2, 0.3]);
    let (dx, params) = Relu.backward(&x, &grad_out);
    assert!(params.is_empty());
    assert_eq!(dx.data, vec![0.0, 0.0, 0.3]);
}

#[test]
fn tanh_forward_backward() {
    let x = Tensor::vector(&[0.0, 1.0]);
    let y = TanhAct.forward(&x);
    let expected = vec![0.0f32.tanh(), 1.0f32.tanh()];
    assert!(close(&y.data, &expected));
    let grad_out = Tensor::vector(&[0.2, -0.1]);
    let (dx, _) = TanhAct.backward(&x, &grad_out);
    let exp_dx = vec![0.2 * (1.0 - expected[0].powi(2)), -0.1 * (1.0 - expected[1].powi(2))];
    assert!(close(&dx.data, &exp_dx));
}
