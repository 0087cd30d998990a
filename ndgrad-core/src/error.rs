use crate::node::Node;
use thiserror::Error;

/// Identifies which node-keyed store an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKind {
    /// The forward-pass [`ActivationStore`](crate::store::ActivationStore).
    Activations,
    /// The backward-pass [`GradientAccumulator`](crate::store::GradientAccumulator).
    Gradients,
    /// The [`NodeArena`](crate::node::NodeArena) that issued the node handles.
    Arena,
}

/// Custom error type for the ndgrad core.
///
/// `NotFound` and `ShapeMismatch` are structural errors: they indicate a malformed
/// graph or an out-of-order call from the scheduler and are never recovered locally.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum NdGradError {
    #[error("No entry for node {node:?} in {store:?}")]
    NotFound { node: Node, store: StoreKind },

    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Invalid shape {shape:?}: every dimension must be strictly positive")]
    InvalidShape { shape: Vec<usize> },

    #[error("Array creation error: data length {data_len} does not match shape {shape:?}")]
    ArrayCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Index out of bounds: index {index:?} for shape {shape:?}")]
    IndexOutOfBounds {
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}
