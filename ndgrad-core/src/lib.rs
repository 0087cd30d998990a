//! # ndgrad-core
//!
//! Reverse-mode automatic differentiation core: graph nodes, operations with a
//! forward/backward contract, and the two node-keyed stores that route arrays
//! along graph edges.
//!
//! Graph construction and scheduling live outside this crate. A scheduler drives
//! the core like this:
//!
//! ```
//! use ndgrad_core::autograd::Operation;
//! use ndgrad_core::backend::{Backend, CpuBackend};
//! use ndgrad_core::ops::LogOp;
//! use ndgrad_core::{ActivationStore, GradientAccumulator, NDArray, NodeArena};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), ndgrad_core::NdGradError> {
//! let backend: Arc<dyn Backend> = Arc::new(CpuBackend::new());
//! let mut arena = NodeArena::new();
//! let x = arena.node(&[3])?;
//! let y = arena.node(&[3])?;
//! let log = LogOp::new(x, y);
//!
//! let mut activations = ActivationStore::new();
//! activations.set(x, NDArray::from_slice(&[1.0, 2.0, 3.0])?);
//! log.forward(backend.as_ref(), &mut activations)?;
//!
//! let mut gradients = GradientAccumulator::new(Arc::clone(&backend));
//! gradients.add(y, NDArray::from_slice(&[1.0, 2.0, 3.0])?)?;
//! log.backward(backend.as_ref(), &activations, &mut gradients)?;
//! assert_eq!(gradients.get(x)?.data(), &[1.0, 1.0, 1.0]);
//! # Ok(())
//! # }
//! ```

pub mod array;
pub mod autograd;
pub mod backend;
pub mod config;
pub mod error;
pub mod node;
pub mod ops;
pub mod store;
pub mod utils;

pub use array::NDArray;
pub use error::NdGradError;
pub use node::{Node, NodeArena};
pub use store::{ActivationStore, GradientAccumulator};
