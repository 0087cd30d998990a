// ndgrad-core/src/ops/arithmetic/sub.rs

use crate::autograd::Operation;
use crate::backend::{Backend, BinaryKernel};
use crate::error::NdGradError;
use crate::node::Node;
use crate::ops::{apply_binary_backward, apply_binary_forward};
use crate::store::{ActivationStore, GradientAccumulator};

/// Element-wise subtraction \( c = a - b \): `da = dc`, `db = -dc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubOp {
    a: Node,
    b: Node,
    c: Node,
}

impl SubOp {
    pub fn new(a: Node, b: Node, c: Node) -> Self {
        SubOp { a, b, c }
    }
}

impl Operation for SubOp {
    fn name(&self) -> &'static str {
        "sub"
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
        apply_binary_forward(
            backend,
            activations,
            BinaryKernel::Sub,
            (self.a, self.b),
            self.c,
            self.name(),
        )
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
            |dc, _| Ok((dc.clone(), backend.neg(dc)?)),
        )
    }
}
