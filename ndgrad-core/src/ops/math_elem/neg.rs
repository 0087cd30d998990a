// ndgrad-core/src/ops/math_elem/neg.rs

use crate::autograd::Operation;
use crate::backend::{Backend, UnaryKernel};
use crate::error::NdGradError;
use crate::node::Node;
use crate::ops::{apply_unary_backward, apply_unary_forward};
use crate::store::{ActivationStore, GradientAccumulator};

/// Element-wise negation \( y = -x \). The backward pass needs no saved activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NegOp {
    x: Node,
    y: Node,
}

impl NegOp {
    pub fn new(x: Node, y: Node) -> Self {
        NegOp { x, y }
    }
}

impl Operation for NegOp {
    fn name(&self) -> &'static str {
        "neg"
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
        apply_unary_forward(backend, activations, UnaryKernel::Neg, self.x, self.y, self.name())
    }

    fn backward(
        &self,
        backend: &dyn Backend,
        activations: &ActivationStore,
        gradients: &mut GradientAccumulator,
    ) -> Result<(), NdGradError> {
        apply_unary_backward(activations, gradients, self.x, self.y, self.name(), |dy, _| {
            backend.neg(dy)
        })
    }
}
