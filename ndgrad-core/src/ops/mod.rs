//! # Graph Operations Module (`ops`)
//!
//! Concrete implementations of the [`Operation`](crate::autograd::Operation) trait,
//! grouped by kind:
//!
//! - [`math_elem`]: elementwise math (`log`, `exp`, `square`, `neg`).
//! - [`activation`]: elementwise activations (`relu`, `sigmoid`, `tanh`).
//! - [`arithmetic`]: elementwise binary arithmetic (`add`, `sub`, `mul`).
//! - [`linalg`]: matrix multiply.
//!
//! Every operation computes both passes purely by composing
//! [`Backend`](crate::backend::Backend) kernels. For an elementwise unary `y = f(x)`
//! the backward pass is `dx = dy * f'(x)`, built from kernels rather than a custom
//! loop. The helpers below factor out the store plumbing shared by all of them.

use crate::array::NDArray;
use crate::backend::{Backend, BinaryKernel, UnaryKernel};
use crate::error::NdGradError;
use crate::node::Node;
use crate::store::{ActivationStore, GradientAccumulator};

pub mod activation;
pub mod arithmetic;
pub mod linalg;
pub mod math_elem;

pub use activation::{ReluOp, SigmoidOp, TanhOp};
pub use arithmetic::{AddOp, MulOp, SubOp};
pub use linalg::MatMulOp;
pub use math_elem::{ExpOp, LogOp, NegOp, SquareOp};

/// Forward pass of an elementwise unary operation: `y = kernel(x)`.
pub(crate) fn apply_unary_forward(
    backend: &dyn Backend,
    activations: &mut ActivationStore,
    kernel: UnaryKernel,
    x: Node,
    y: Node,
    op_name: &str,
) -> Result<(), NdGradError> {
    log::debug!("{}: forward {:?} -> {:?}", op_name, x, y);
    let output = backend.unary(kernel, activations.get(x)?)?;
    activations.set(y, output);
    Ok(())
}

/// Forward pass of an elementwise binary operation: `y = kernel(a, b)`.
pub(crate) fn apply_binary_forward(
    backend: &dyn Backend,
    activations: &mut ActivationStore,
    kernel: BinaryKernel,
    (a, b): (Node, Node),
    y: Node,
    op_name: &str,
) -> Result<(), NdGradError> {
    log::debug!("{}: forward ({:?}, {:?}) -> {:?}", op_name, a, b, y);
    let output = backend.binary(kernel, activations.get(a)?, activations.get(b)?)?;
    activations.set(y, output);
    Ok(())
}

/// Backward pass of a unary operation.
///
/// Resolves the upstream gradient of `y`, lets `local_grad` turn it into the
/// contribution for `x`, and adds that into the accumulator. `local_grad` receives
/// the upstream gradient and the activation store so it can read `x` or `y` as needed.
pub(crate) fn apply_unary_backward<F>(
    activations: &ActivationStore,
    gradients: &mut GradientAccumulator,
    x: Node,
    y: Node,
    op_name: &str,
    local_grad: F,
) -> Result<(), NdGradError>
where
    F: FnOnce(&NDArray, &ActivationStore) -> Result<NDArray, NdGradError>,
{
    let grad_x = match gradients.upstream(y)? {
        Some(grad_y) => local_grad(grad_y, activations)?,
        None => return Ok(()),
    };
    log::debug!("{}: backward {:?} -> {:?}", op_name, y, x);
    gradients.add(x, grad_x)
}

/// Backward pass of a binary operation.
///
/// Both contributions are computed first and then committed together through
/// [`GradientAccumulator::add_all`]. A failure in either step leaves the accumulator
/// untouched. `a == b` (e.g. `x * x`) sums both contributions into the one entry.
pub(crate) fn apply_binary_backward<F>(
    activations: &ActivationStore,
    gradients: &mut GradientAccumulator,
    (a, b): (Node, Node),
    y: Node,
    op_name: &str,
    local_grads: F,
) -> Result<(), NdGradError>
where
    F: FnOnce(&NDArray, &ActivationStore) -> Result<(NDArray, NDArray), NdGradError>,
{
    let (grad_a, grad_b) = match gradients.upstream(y)? {
        Some(grad_y) => local_grads(grad_y, activations)?,
        None => return Ok(()),
    };
    log::debug!("{}: backward {:?} -> ({:?}, {:?})", op_name, y, a, b);
    gradients.add_all([(a, grad_a), (b, grad_b)])
}
