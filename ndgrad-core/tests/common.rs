use ndgrad_core::autograd::Operation;
use ndgrad_core::backend::{Backend, CpuBackend};
use ndgrad_core::{ActivationStore, GradientAccumulator, NDArray, NdGradError};
use std::sync::Arc;

#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[allow(dead_code)]
pub fn cpu_backend() -> Arc<dyn Backend> {
    Arc::new(CpuBackend::new())
}

#[allow(dead_code)]
pub fn array(data: &[f32]) -> NDArray {
    NDArray::from_slice(data).expect("Test array creation failed")
}

/// Minimal scheduler for tests: runs `ops` forward in the given (topological)
/// order, seeds the last output with `seed`, then runs backward in reverse.
#[allow(dead_code)]
pub fn run_graph(
    ops: &[Box<dyn Operation>],
    backend: &Arc<dyn Backend>,
    activations: &mut ActivationStore,
    gradients: &mut GradientAccumulator,
    seed: NDArray,
) -> Result<(), NdGradError> {
    for op in ops {
        op.forward(backend.as_ref(), activations)?;
    }
    if let Some(last) = ops.last() {
        gradients.add(last.output(), seed)?;
    }
    for op in ops.iter().rev() {
        op.backward(backend.as_ref(), activations, gradients)?;
    }
    Ok(())
}
