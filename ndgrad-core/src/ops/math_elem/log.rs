// ndgrad-core/src/ops/math_elem/log.rs

use crate::autograd::Operation;
use crate::backend::{Backend, UnaryKernel};
use crate::error::NdGradError;
use crate::node::Node;
use crate::ops::{apply_unary_backward, apply_unary_forward};
use crate::store::{ActivationStore, GradientAccumulator};

/// Element-wise natural logarithm \( y = \ln(x) \).
///
/// # Domain Considerations
/// The logarithm is only defined for strictly positive numbers. Non-positive inputs
/// are not rejected: `ln(0)` gives `-inf` and negative inputs give `NaN`, and these
/// values flow through the rest of the graph like any other. The gradient \( 1/x \)
/// is likewise infinite at \( x = 0 \).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogOp {
    x: Node,
    y: Node,
}

impl LogOp {
    pub fn new(x: Node, y: Node) -> Self {
        LogOp { x, y }
    }
}

impl Operation for LogOp {
    fn name(&self) -> &'static str {
        "log"
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
        apply_unary_forward(backend, activations, UnaryKernel::Log, self.x, self.y, self.name())
    }

    /// Using the chain rule \( \frac{dL}{dx} = \frac{dL}{dy} \cdot \frac{dy}{dx} \),
    /// where \( \frac{dy}{dx} = \frac{1}{x} \), the contribution is
    /// \( \frac{grad\_output}{x} \).
    fn backward(
        &self,
        backend: &dyn Backend,
        activations: &ActivationStore,
        gradients: &mut GradientAccumulator,
    ) -> Result<(), NdGradError> {
        apply_unary_backward(activations, gradients, self.x, self.y, self.name(), |dy, acts| {
            backend.div(dy, acts.get(self.x)?)
        })
    }
}

#[cfg(test)]
#[path = "log_test.rs"]
mod tests;
