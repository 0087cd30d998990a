// ndgrad-core/src/ops/activation/sigmoid.rs

use crate::autograd::Operation;
use crate::backend::{Backend, UnaryKernel};
use crate::error::NdGradError;
use crate::node::Node;
use crate::ops::{apply_unary_backward, apply_unary_forward};
use crate::store::{ActivationStore, GradientAccumulator};

/// Logistic sigmoid \( y = \frac{1}{1 + e^{-x}} \).
///
/// Backward reads the saved output: \( \frac{dy}{dx} = y(1 - y) = y - y^2 \).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigmoidOp {
    x: Node,
    y: Node,
}

impl SigmoidOp {
    pub fn new(x: Node, y: Node) -> Self {
        SigmoidOp { x, y }
    }
}

impl Operation for SigmoidOp {
    fn name(&self) -> &'static str {
        "sigmoid"
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
        apply_unary_forward(backend, activations, UnaryKernel::Sigmoid, self.x, self.y, self.name())
    }

    fn backward(
        &self,
        backend: &dyn Backend,
        activations: &ActivationStore,
        gradients: &mut GradientAccumulator,
    ) -> Result<(), NdGradError> {
        apply_unary_backward(activations, gradients, self.x, self.y, self.name(), |dy, acts| {
            let y = acts.get(self.y)?;
            let y_squared = backend.unary(UnaryKernel::Square, y)?;
            let local = backend.sub(y, &y_squared)?;
            backend.mul(dy, &local)
        })
    }
}
