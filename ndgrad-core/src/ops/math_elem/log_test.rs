use super::*;
use crate::array::NDArray;
use crate::autograd::grad_check::check_operation_gradient;
use crate::backend::CpuBackend;
use crate::config::{GradientConfig, MissingGradientPolicy};
use crate::error::StoreKind;
use crate::node::NodeArena;
use crate::utils::testing::{check_array_near, create_test_array, init_test_logger};
use approx::assert_relative_eq;
use std::sync::Arc;

struct Fixture {
    backend: Arc<dyn Backend>,
    activations: ActivationStore,
    gradients: GradientAccumulator,
}

fn fixture() -> Fixture {
    init_test_logger();
    let backend: Arc<dyn Backend> = Arc::new(CpuBackend::new());
    Fixture {
        activations: ActivationStore::new(),
        gradients: GradientAccumulator::new(Arc::clone(&backend)),
        backend,
    }
}

#[test]
fn test_log_forward_and_backward_simple() -> Result<(), NdGradError> {
    let mut f = fixture();
    let mut arena = NodeArena::new();
    let x = create_test_array(vec![1.0, 2.0, 3.0], vec![3]);
    let x_node = arena.node(x.shape())?;
    let y_node = arena.node(x.shape())?;

    f.activations.set(x_node, x.clone());
    let log_op = LogOp::new(x_node, y_node);
    log_op.forward(f.backend.as_ref(), &mut f.activations)?;

    let y = f.activations.get(y_node)?;
    assert_eq!(y.shape(), &[3]);
    assert_relative_eq!(y.get(&[0])?, 1.0f32.ln(), epsilon = 1e-6);
    assert_relative_eq!(y.get(&[1])?, 2.0f32.ln(), epsilon = 1e-6);
    assert_relative_eq!(y.get(&[2])?, 3.0f32.ln(), epsilon = 1e-6);

    let dy = create_test_array(vec![1.0, 2.0, 3.0], vec![3]);
    f.gradients.add(y_node, dy.clone())?;
    log_op.backward(f.backend.as_ref(), &f.activations, &mut f.gradients)?;

    let dx = f.gradients.get(x_node)?;
    assert_eq!(dx.shape(), x.shape());
    for i in 0..3 {
        assert_relative_eq!(dx.get(&[i])?, dy.get(&[i])? / x.get(&[i])?, epsilon = 1e-6);
    }
    check_array_near(dx, &[3], &[1.0, 1.0, 1.0], 1e-6);
    Ok(())
}

#[test]
fn test_log_forward_rank_two() -> Result<(), NdGradError> {
    let mut f = fixture();
    let mut arena = NodeArena::new();
    let x_node = arena.node(&[2, 2])?;
    let y_node = arena.node(&[2, 2])?;
    let e = std::f32::consts::E;

    f.activations.set(x_node, create_test_array(vec![1.0, e, e * e, 10.0], vec![2, 2]));
    LogOp::new(x_node, y_node).forward(f.backend.as_ref(), &mut f.activations)?;
    check_array_near(
        f.activations.get(y_node)?,
        &[2, 2],
        &[0.0, 1.0, 2.0, 10.0f32.ln()],
        1e-6,
    );
    Ok(())
}

#[test]
fn test_log_forward_non_positive() -> Result<(), NdGradError> {
    let mut f = fixture();
    let mut arena = NodeArena::new();
    let x_node = arena.node(&[3])?;
    let y_node = arena.node(&[3])?;

    f.activations.set(x_node, create_test_array(vec![1.0, 0.0, -1.0], vec![3]));
    LogOp::new(x_node, y_node).forward(f.backend.as_ref(), &mut f.activations)?;

    let y = f.activations.get(y_node)?.data();
    assert!(y[0].is_finite());
    assert!(y[1].is_infinite(), "ln(0.0) should be infinite");
    assert!(y[1].is_sign_negative(), "ln(0.0) should be negative infinity");
    assert!(y[2].is_nan(), "ln(-1.0) should be NaN");
    Ok(())
}

#[test]
fn test_log_forward_missing_input() -> Result<(), NdGradError> {
    let mut f = fixture();
    let mut arena = NodeArena::new();
    let x_node = arena.node(&[1])?;
    let y_node = arena.node(&[1])?;

    let result = LogOp::new(x_node, y_node).forward(f.backend.as_ref(), &mut f.activations);
    assert_eq!(
        result,
        Err(NdGradError::NotFound {
            node: x_node,
            store: StoreKind::Activations
        })
    );
    assert!(!f.activations.has(y_node));
    Ok(())
}

#[test]
fn test_log_backward_without_upstream_is_fatal_by_default() -> Result<(), NdGradError> {
    let mut f = fixture();
    let mut arena = NodeArena::new();
    let x_node = arena.node(&[1])?;
    let y_node = arena.node(&[1])?;
    let log_op = LogOp::new(x_node, y_node);

    f.activations.set(x_node, NDArray::from_slice(&[2.0])?);
    log_op.forward(f.backend.as_ref(), &mut f.activations)?;
    let result = log_op.backward(f.backend.as_ref(), &f.activations, &mut f.gradients);
    assert_eq!(
        result,
        Err(NdGradError::NotFound {
            node: y_node,
            store: StoreKind::Gradients
        })
    );
    assert!(!f.gradients.has(x_node));
    Ok(())
}

#[test]
fn test_log_backward_without_upstream_implicit_zero() -> Result<(), NdGradError> {
    let mut f = fixture();
    let mut gradients = GradientAccumulator::with_config(
        Arc::clone(&f.backend),
        GradientConfig::new().missing_gradient(MissingGradientPolicy::ImplicitZero),
    );
    let mut arena = NodeArena::new();
    let x_node = arena.node(&[1])?;
    let y_node = arena.node(&[1])?;
    let log_op = LogOp::new(x_node, y_node);

    f.activations.set(x_node, NDArray::from_slice(&[2.0])?);
    log_op.forward(f.backend.as_ref(), &mut f.activations)?;
    log_op.backward(f.backend.as_ref(), &f.activations, &mut gradients)?;
    assert!(!gradients.has(x_node), "No contribution should have been recorded");
    Ok(())
}

#[test]
fn test_log_backward_disposed_input_is_not_found() -> Result<(), NdGradError> {
    let mut f = fixture();
    let mut arena = NodeArena::new();
    let x_node = arena.node(&[2])?;
    let y_node = arena.node(&[2])?;
    let log_op = LogOp::new(x_node, y_node);

    f.activations.set(x_node, NDArray::from_slice(&[1.0, 2.0])?);
    log_op.forward(f.backend.as_ref(), &mut f.activations)?;
    f.activations.dispose_array(x_node);
    f.gradients.add(y_node, NDArray::from_slice(&[1.0, 1.0])?)?;

    let result = log_op.backward(f.backend.as_ref(), &f.activations, &mut f.gradients);
    assert!(matches!(result, Err(NdGradError::NotFound { .. })));
    Ok(())
}

#[test]
fn test_log_backward_accumulates_into_existing_gradient() -> Result<(), NdGradError> {
    let mut f = fixture();
    let mut arena = NodeArena::new();
    let x_node = arena.node(&[2])?;
    let y_node = arena.node(&[2])?;
    let log_op = LogOp::new(x_node, y_node);

    f.activations.set(x_node, NDArray::from_slice(&[1.0, 4.0])?);
    log_op.forward(f.backend.as_ref(), &mut f.activations)?;
    // x already received a contribution from another consumer.
    f.gradients.add(x_node, NDArray::from_slice(&[10.0, 10.0])?)?;
    f.gradients.add(y_node, NDArray::from_slice(&[2.0, 2.0])?)?;
    log_op.backward(f.backend.as_ref(), &f.activations, &mut f.gradients)?;

    check_array_near(f.gradients.get(x_node)?, &[2], &[12.0, 10.5], 1e-6);
    Ok(())
}

#[test]
fn test_log_grad_check() {
    let mut arena = NodeArena::new();
    let x_node = arena.node(&[4]).unwrap();
    let y_node = arena.node(&[4]).unwrap();
    let backend: Arc<dyn Backend> = Arc::new(CpuBackend::new());

    let inputs = vec![(x_node, create_test_array(vec![0.5, 1.0, 2.0, 4.0], vec![4]))];
    let output_grad = create_test_array(vec![0.1, 0.2, 0.3, 0.4], vec![4]);
    let result = check_operation_gradient(
        &LogOp::new(x_node, y_node),
        backend,
        &inputs,
        &output_grad,
        1e-3,
        1e-2,
    );
    assert!(result.is_ok(), "Log grad check failed: {:?}", result.err());
}

#[test]
fn test_log_metadata() -> Result<(), NdGradError> {
    let mut arena = NodeArena::new();
    let x_node = arena.node(&[1])?;
    let y_node = arena.node(&[1])?;
    let log_op = LogOp::new(x_node, y_node);
    assert_eq!(log_op.name(), "log");
    assert_eq!(log_op.inputs(), vec![x_node]);
    assert_eq!(log_op.output(), y_node);
    Ok(())
}
