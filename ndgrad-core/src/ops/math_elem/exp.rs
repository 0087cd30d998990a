// ndgrad-core/src/ops/math_elem/exp.rs

use crate::autograd::Operation;
use crate::backend::{Backend, UnaryKernel};
use crate::error::NdGradError;
use crate::node::Node;
use crate::ops::{apply_unary_backward, apply_unary_forward};
use crate::store::{ActivationStore, GradientAccumulator};

/// Element-wise exponential \( y = e^x \).
///
/// The backward pass reuses the saved output: \( \frac{dy}{dx} = e^x = y \),
/// so the output activation must still be present when `backward` runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpOp {
    x: Node,
    y: Node,
}

impl ExpOp {
    pub fn new(x: Node, y: Node) -> Self {
        ExpOp { x, y }
    }
}

impl Operation for ExpOp {
    fn name(&self) -> &'static str {
        "exp"
    }

    fn inputs(&self) -> Vec<Node> {
        vec![self.x]
    }

    fn output(&self) -> Node {
        self.y
    }

    fn forward(
        &self,
        backend: &dyn Backend,
        activations: &mut ActivationStore,
    ) -> Result<(), NdGradError> {
        apply_unary_forward(backend, activations, UnaryKernel::Exp, self.x, self.y, self.name())
    }

    fn backward(
        &self,
        backend: &dyn Backend,
        activations: &ActivationStore,
        gradients: &mut GradientAccumulator,
    ) -> Result<(), NdGradError> {
        apply_unary_backward(activations, gradients, self.x, self.y, self.name(), |dy, acts| {
            backend.mul(dy, acts.get(self.y)?)
        })
    }
}
