// ndgrad-core/src/ops/linalg/matmul.rs

use crate::autograd::Operation;
use crate::backend::Backend;
use crate::error::NdGradError;
use crate::node::Node;
use crate::ops::apply_binary_backward;
use crate::store::{ActivationStore, GradientAccumulator};

/// Matrix multiplication \( C = A \cdot B \) of rank-2 arrays `[m, k] · [k, n] -> [m, n]`.
///
/// Backward:
/// * \( \frac{dL}{dA} = \frac{dL}{dC} \cdot B^T \)
/// * \( \frac{dL}{dB} = A^T \cdot \frac{dL}{dC} \)
///
/// Both transposes are folded into the backend's `matmul` flags, so no transposed
/// copy is materialised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatMulOp {
    a: Node,
    b: Node,
    c: Node,
}

impl MatMulOp {
    pub fn new(a: Node, b: Node, c: Node) -> Self {
        MatMulOp { a, b, c }
    }
}

impl Operation for MatMulOp {
    fn name(&self) -> &'static str {
        "matmul"
    }

    fn inputs(&self) -> Vec<Node> {
        vec![self.a, self.b]
    }

    fn output(&self) -> Node {
        self.c
    }

    fn forward(
        &self,
        backend: &dyn Backend,
        activations: &mut ActivationStore,
    ) -> Result<(), NdGradError> {
        log::debug!("matmul: forward ({:?}, {:?}) -> {:?}", self.a, self.b, self.c);
        let output = backend.matmul(
            activations.get(self.a)?,
            activations.get(self.b)?,
            false,
            false,
        )?;
        activations.set(self.c, output);
        Ok(())
    }

    fn backward(
        &self,
        backend: &dyn Backend,
        activations: &ActivationStore,
        gradients: &mut GradientAccumulator,
    ) -> Result<(), NdGradError> {
        apply_binary_backward(
            activations,
            gradients,
            (self.a, self.b),
            self.c,
            self.name(),
            |dc, acts| {
                let a = acts.get(self.a)?;
                let b = acts.get(self.b)?;
                let grad_a = backend.matmul(dc, b, false, true)?;
                let grad_b = backend.matmul(a, dc, true, false)?;
                Ok((grad_a, grad_b))
            },
        )
    }
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
