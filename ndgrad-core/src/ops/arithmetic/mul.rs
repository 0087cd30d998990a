// ndgrad-core/src/ops/arithmetic/mul.rs

use crate::autograd::Operation;
use crate::backend::{Backend, BinaryKernel};
use crate::error::NdGradError;
use crate::node::Node;
use crate::ops::{apply_binary_backward, apply_binary_forward};
use crate::store::{ActivationStore, GradientAccumulator};

/// Element-wise (Hadamard) product \( c = a \odot b \).
///
/// For \( c = a \cdot b \): `da = dc * b` and `db = dc * a`, so both input
/// activations must still be present at backward time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MulOp {
    a: Node,
    b: Node,
    c: Node,
}

impl MulOp {
    pub fn new(a: Node, b: Node, c: Node) -> Self {
        MulOp { a, b, c }
    }
}

impl Operation for MulOp {
    fn name(&self) -> &'static str {
        "mul"
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
            BinaryKernel::Mul,
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
            |dc, acts| {
                let grad_a = backend.mul(dc, acts.get(self.b)?)?;
                let grad_b = backend.mul(dc, acts.get(self.a)?)?;
                Ok((grad_a, grad_b))
            },
        )
    }
}
