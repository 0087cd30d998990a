// ndgrad-core/src/ops/math_elem/square.rs

use crate::autograd::Operation;
use crate::backend::{Backend, UnaryKernel};
use crate::error::NdGradError;
use crate::node::Node;
use crate::ops::{apply_unary_backward, apply_unary_forward};
use crate::store::{ActivationStore, GradientAccumulator};

/// Element-wise square \( y = x^2 \), with \( \frac{dy}{dx} = 2x \).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquareOp {
    x: Node,
    y: Node,
}

impl SquareOp {
    pub fn new(x: Node, y: Node) -> Self {
        SquareOp { x, y }
    }
}

impl Operation for SquareOp {
    fn name(&self) -> &'static str {
        "square"
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
        apply_unary_forward(backend, activations, UnaryKernel::Square, self.x, self.y, self.name())
    }

    fn backward(
        &self,
        backend: &dyn Backend,
        activations: &ActivationStore,
        gradients: &mut GradientAccumulator,
    ) -> Result<(), NdGradError> {
        apply_unary_backward(activations, gradients, self.x, self.y, self.name(), |dy, acts| {
            let x = acts.get(self.x)?;
            let two_x = backend.add(x, x)?;
            backend.mul(dy, &two_x)
        })
    }
}
