// ndgrad-core/src/ops/activation/tanh.rs

use crate::autograd::Operation;
use crate::backend::{Backend, UnaryKernel};
use crate::error::NdGradError;
use crate::node::Node;
use crate::ops::{apply_unary_backward, apply_unary_forward};
use crate::store::{ActivationStore, GradientAccumulator};

/// Hyperbolic tangent \( y = \tanh(x) \).
///
/// Backward reads the saved output: \( \frac{dL}{dx} = dy \cdot (1 - y^2) = dy - dy \cdot y^2 \).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TanhOp {
    x: Node,
    y: Node,
}

impl TanhOp {
    pub fn new(x: Node, y: Node) -> Self {
        TanhOp { x, y }
    }
}

impl Operation for TanhOp {
    fn name(&self) -> &'static str {
        "tanh"
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
        apply_unary_forward(backend, activations, UnaryKernel::Tanh, self.x, self.y, self.name())
    }

    fn backward(
        &self,
        backend: &dyn Backend,
        activations: &ActivationStore,
        gradients: &mut GradientAccumulator,
    ) -> Result<(), NdGradError> {
        apply_unary_backward(activations, gradients, self.x, self.y, self.name(), |dy, acts| {
            let y_squared = backend.unary(UnaryKernel::Square, acts.get(self.y)?)?;
            let dy_y_squared = backend.mul(dy, &y_squared)?;
            backend.sub(dy, &dy_y_squared)
        })
    }
}
