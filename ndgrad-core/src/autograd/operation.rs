use crate::backend::Backend;
use crate::error::NdGradError;
use crate::node::Node;
use crate::store::{ActivationStore, GradientAccumulator};
use std::fmt::Debug;

/// Defines the forward/backward contract of a differentiable operation.
///
/// An operation references its input node(s) and its output node but owns no arrays:
/// it reads and writes the stores passed to it. An external scheduler calls
/// `forward` in topological order and `backward` in reverse topological order.
///
/// The trait requires `Debug + Send + Sync` so a graph can hold operations as
/// `Box<dyn Operation>` and hand them to a scheduler on another thread.
pub trait Operation: Debug + Send + Sync {
    /// Short name used in logs and error messages (e.g. `"log"`).
    fn name(&self) -> &'static str;

    /// Input nodes, in the order the operation reads them.
    fn inputs(&self) -> Vec<Node>;

    /// The node this operation writes.
    fn output(&self) -> Node;

    /// Computes the output activation from the input activations.
    ///
    /// Precondition: every input node has an entry in `activations`.
    /// Effect: inserts (or overwrites) the output node's entry.
    ///
    /// # Errors
    /// * `NdGradError::NotFound` if an input activation is missing.
    /// * `NdGradError::ShapeMismatch` if the backend rejects the operand shapes.
    ///
    /// On error the output entry is left as it was.
    fn forward(
        &self,
        backend: &dyn Backend,
        activations: &mut ActivationStore,
    ) -> Result<(), NdGradError>;

    /// Propagates the output gradient to the inputs.
    ///
    /// Precondition: every consumer of the output node has already added its
    /// contribution to `gradients`, and the activations the local derivative needs
    /// are still present.
    /// Effect: computes \( \frac{dL}{d\text{Input}_i} = \frac{dL}{d\text{Output}} \cdot
    /// \frac{d\text{Output}}{d\text{Input}_i} \) for each input and adds it into
    /// `gradients` at that input. An input used twice receives two contributions.
    ///
    /// # Errors
    /// * `NdGradError::NotFound` if the output gradient is missing (under the default
    ///   [`MissingGradientPolicy::Fatal`](crate::config::MissingGradientPolicy)) or a
    ///   needed activation was disposed.
    /// * `NdGradError::ShapeMismatch` if a kernel or the accumulator rejects a shape.
    fn backward(
        &self,
        backend: &dyn Backend,
        activations: &ActivationStore,
        gradients: &mut GradientAccumulator,
    ) -> Result<(), NdGradError>;
}
