// ndgrad-core/src/ops/activation/relu.rs

use crate::autograd::Operation;
use crate::backend::{Backend, UnaryKernel};
use crate::error::NdGradError;
use crate::node::Node;
use crate::ops::{apply_unary_backward, apply_unary_forward};
use crate::store::{ActivationStore, GradientAccumulator};

/// Rectified Linear Unit \( y = \max(x, 0) \).
///
/// The local derivative is the step function of the saved input; the gradient at
/// exactly \( x = 0 \) is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReluOp {
    x: Node,
    y: Node,
}

impl ReluOp {
    pub fn new(x: Node, y: Node) -> Self {
        ReluOp { x, y }
    }
}

impl Operation for ReluOp {
    fn name(&self) -> &'static str {
        "relu"
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
        apply_unary_forward(backend, activations, UnaryKernel::Relu, self.x, self.y, self.name())
    }

    fn backward(
        &self,
        backend: &dyn Backend,
        activations: &ActivationStore,
        gradients: &mut GradientAccumulator,
    ) -> Result<(), NdGradError> {
        apply_unary_backward(activations, gradients, self.x, self.y, self.name(), |dy, acts| {
            let mask = backend.unary(UnaryKernel::Step, acts.get(self.x)?)?;
            backend.mul(dy, &mask)
        })
    }
}
