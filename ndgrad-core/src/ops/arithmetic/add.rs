// ndgrad-core/src/ops/arithmetic/add.rs

use crate::autograd::Operation;
use crate::backend::{Backend, BinaryKernel};
use crate::error::NdGradError;
use crate::node::Node;
use crate::ops::{apply_binary_backward, apply_binary_forward};
use crate::store::{ActivationStore, GradientAccumulator};

/// Element-wise addition \( c = a + b \).
///
/// Both partial derivatives are one, so each input receives its own copy of the
/// upstream gradient. With `a == b` the node receives it twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOp {
    a: Node,
    b: Node,
    c: Node,
}

impl AddOp {
    pub fn new(a: Node, b: Node, c: Node) -> Self {
        AddOp { a, b, c }
    }
}

impl Operation for AddOp {
    fn name(&self) -> &'static str {
        "add"
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
            BinaryKernel::Add,
            (self.a, self.b),
            self.c,
            self.name(),
        )
    }

    fn backward(
        &self,
        _backend: &dyn Backend,
        activations: &ActivationStore,
        gradients: &mut GradientAccumulator,
    ) -> Result<(), NdGradError> {
        apply_binary_backward(
            activations,
            gradients,
            (self.a, self.b),
            self.c,
            self.name(),
            |dc, _| Ok((dc.clone(), dc.clone())),
        )
    }
}
