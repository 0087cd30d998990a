use super::*;
use crate::autograd::{check_operation_gradient, Operation};
use crate::backend::{Backend, CpuBackend};
use crate::error::NdGradError;
use crate::node::NodeArena;
use crate::store::{ActivationStore, GradientAccumulator};
use crate::utils::testing::{check_array_near, create_test_array};
use std::sync::Arc;

#[test]
fn test_relu_forward_backward() -> Result<(), NdGradError> {
    let backend: Arc<dyn Backend> = Arc::new(CpuBackend::new());
    let mut arena = NodeArena::new();
    let x = arena.node(&[4])?;
    let y = arena.node(&[4])?;
    let op = ReluOp::new(x, y);
    let mut activations = ActivationStore::new();
    let mut gradients = GradientAccumulator::new(Arc::clone(&backend));

    activations.set(x, create_test_array(vec![-2.0, 0.0, 1.0, 3.0], vec![4]));
    op.forward(backend.as_ref(), &mut activations)?;
    check_array_near(activations.get(y)?, &[4], &[0.0, 0.0, 1.0, 3.0], 1e-6);

    gradients.add(y, create_test_array(vec![5.0, 5.0, 5.0, 5.0], vec![4]))?;
    op.backward(backend.as_ref(), &activations, &mut gradients)?;
    check_array_near(gradients.get(x)?, &[4], &[0.0, 0.0, 5.0, 5.0], 1e-6);
    Ok(())
}

#[test]
fn test_sigmoid_and_tanh_at_zero() -> Result<(), NdGradError> {
    let backend: Arc<dyn Backend> = Arc::new(CpuBackend::new());
    let mut arena = NodeArena::new();
    let x = arena.node(&[1])?;
    let s = arena.node(&[1])?;
    let t = arena.node(&[1])?;
    let sigmoid = SigmoidOp::new(x, s);
    let tanh = TanhOp::new(x, t);
    let mut activations = ActivationStore::new();
    let mut gradients = GradientAccumulator::new(Arc::clone(&backend));

    activations.set(x, create_test_array(vec![0.0], vec![1]));
    sigmoid.forward(backend.as_ref(), &mut activations)?;
    tanh.forward(backend.as_ref(), &mut activations)?;
    check_array_near(activations.get(s)?, &[1], &[0.5], 1e-6);
    check_array_near(activations.get(t)?, &[1], &[0.0], 1e-6);

    // x feeds both ops: the two contributions are summed at x.
    gradients.add(s, create_test_array(vec![1.0], vec![1]))?;
    gradients.add(t, create_test_array(vec![1.0], vec![1]))?;
    sigmoid.backward(backend.as_ref(), &activations, &mut gradients)?;
    tanh.backward(backend.as_ref(), &activations, &mut gradients)?;
    check_array_near(gradients.get(x)?, &[1], &[0.25 + 1.0], 1e-6);
    Ok(())
}

#[test]
fn test_activation_grad_checks() -> Result<(), NdGradError> {
    let mut arena = NodeArena::new();
    let x = arena.node(&[2, 2])?;
    let y = arena.node(&[2, 2])?;
    // Keep away from relu's kink at zero.
    let input = vec![(x, create_test_array(vec![-1.3, -0.4, 0.6, 2.1], vec![2, 2]))];
    let output_grad = create_test_array(vec![0.3, -1.0, 0.7, 1.5], vec![2, 2]);

    let ops: Vec<Box<dyn Operation>> = vec![
        Box::new(ReluOp::new(x, y)),
        Box::new(SigmoidOp::new(x, y)),
        Box::new(TanhOp::new(x, y)),
    ];
    for op in &ops {
        let result = check_operation_gradient(
            op.as_ref(),
            Arc::new(CpuBackend::new()),
            &input,
            &output_grad,
            1e-3,
            1e-2,
        );
        assert!(result.is_ok(), "{} grad check failed: {:?}", op.name(), result.err());
    }
    Ok(())
}
