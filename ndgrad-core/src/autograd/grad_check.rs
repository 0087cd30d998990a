use crate::array::NDArray;
use crate::autograd::Operation;
use crate::backend::Backend;
use crate::error::NdGradError;
use crate::node::Node;
use crate::store::{ActivationStore, GradientAccumulator};
use std::sync::Arc;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}, element {element_index}: Analytical grad {analytical_grad:?} != Numerical grad {numerical_grad:?}. Difference: {difference:?}")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Forward pass failed during gradient check: {0}")]
    ForwardPassError(NdGradError),
    #[error("Backward pass failed during gradient check: {0}")]
    BackwardPassError(NdGradError),
    #[error("Input {input_index} received no gradient after the backward pass.")]
    MissingAnalyticalGrad { input_index: usize },
    #[error("Numerical gradient is NaN or infinite for input {input_index}, element {element_index}. Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Analytical gradient is NaN or infinite for input {input_index}, element {element_index}. Value: {value:?}")]
    AnalyticalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        value: f64,
    },
    #[error("Array error during intermediate calculation: {0}")]
    ArrayError(NdGradError),
}

impl From<NdGradError> for GradCheckError {
    fn from(err: NdGradError) -> Self {
        GradCheckError::ArrayError(err)
    }
}

/// Runs `op.forward` on fresh stores seeded with `inputs` and returns
/// \( L = \sum_i y_i \cdot g_i \), the scalar loss whose gradient w.r.t. the output
/// is `output_grad`.
fn weighted_output_sum(
    op: &dyn Operation,
    backend: &dyn Backend,
    inputs: &[(Node, NDArray)],
    output_grad: &NDArray,
) -> Result<f64, GradCheckError> {
    let mut activations = ActivationStore::new();
    for (node, array) in inputs {
        activations.set(*node, array.clone());
    }
    op.forward(backend, &mut activations)
        .map_err(GradCheckError::ForwardPassError)?;
    let output = activations.get(op.output())?;
    if output.shape() != output_grad.shape() {
        return Err(GradCheckError::ArrayError(NdGradError::ShapeMismatch {
            expected: output.shape().to_vec(),
            actual: output_grad.shape().to_vec(),
            operation: "check_operation_gradient".to_string(),
        }));
    }
    Ok(output
        .data()
        .iter()
        .zip(output_grad.data())
        .map(|(&y, &g)| y as f64 * g as f64)
        .sum())
}

/// Checks an operation's analytical backward pass against central finite differences
/// of its forward pass.
///
/// `inputs` lists each *distinct* input node with its value; an operation that reads
/// the same node twice (e.g. `x * x`) lists it once. `output_grad` is fed as the
/// upstream gradient. An element passes when
/// `|analytical - numerical| <= tolerance * max(1, |numerical|)`.
pub fn check_operation_gradient(
    op: &dyn Operation,
    backend: Arc<dyn Backend>,
    inputs: &[(Node, NDArray)],
    output_grad: &NDArray,
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError> {
    // --- 1. Analytical gradients ---
    let mut activations = ActivationStore::new();
    for (node, array) in inputs {
        activations.set(*node, array.clone());
    }
    op.forward(backend.as_ref(), &mut activations)
        .map_err(GradCheckError::ForwardPassError)?;
    let mut gradients = GradientAccumulator::new(Arc::clone(&backend));
    gradients.add(op.output(), output_grad.clone())?;
    op.backward(backend.as_ref(), &activations, &mut gradients)
        .map_err(GradCheckError::BackwardPassError)?;

    // --- 2. Numerical gradients, element by element ---
    for (input_index, (node, original)) in inputs.iter().enumerate() {
        let analytical = gradients
            .get(*node)
            .map_err(|_| GradCheckError::MissingAnalyticalGrad { input_index })?;
        if analytical.shape() != original.shape() {
            return Err(GradCheckError::ArrayError(NdGradError::ShapeMismatch {
                expected: original.shape().to_vec(),
                actual: analytical.shape().to_vec(),
                operation: format!("{} backward", op.name()),
            }));
        }

        for element_index in 0..original.size() {
            let x = original.data()[element_index];
            let x_plus = (x as f64 + epsilon) as f32;
            let x_minus = (x as f64 - epsilon) as f32;

            let mut perturbed = inputs.to_vec();
            perturbed[input_index].1.data_mut()[element_index] = x_plus;
            let loss_plus = weighted_output_sum(op, backend.as_ref(), &perturbed, output_grad)?;
            perturbed[input_index].1.data_mut()[element_index] = x_minus;
            let loss_minus = weighted_output_sum(op, backend.as_ref(), &perturbed, output_grad)?;

            // Use the step actually representable in f32.
            let step = x_plus as f64 - x_minus as f64;
            let numerical_grad = (loss_plus - loss_minus) / step;
            if !numerical_grad.is_finite() {
                return Err(GradCheckError::NumericalGradNaNOrInfinite {
                    input_index,
                    element_index,
                    loss_plus,
                    loss_minus,
                });
            }

            let analytical_grad = analytical.data()[element_index] as f64;
            if !analytical_grad.is_finite() {
                return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                    input_index,
                    element_index,
                    value: analytical_grad,
                });
            }

            let difference = (analytical_grad - numerical_grad).abs();
            if difference > tolerance * numerical_grad.abs().max(1.0) {
                return Err(GradCheckError::GradientMismatch {
                    input_index,
                    element_index,
                    analytical_grad,
                    numerical_grad,
                    difference,
                });
            }
        }
    }
    log::debug!("check_operation_gradient: {} passed", op.name());
    Ok(())
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;
