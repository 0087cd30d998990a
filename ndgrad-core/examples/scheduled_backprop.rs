//! Drives the ndgrad core by hand: a fixed topological order stands in for the
//! external scheduler. Computes the gradient of
//! `loss = log(sigmoid(x · w)) + log(sigmoid(x · w))` w.r.t. `w`. Both terms are the
//! same node, so `log_p` receives two gradient contributions.
//!
//! Run with `RUST_LOG=debug cargo run --example scheduled_backprop` to see the
//! store traffic.

use ndgrad_core::autograd::Operation;
use ndgrad_core::backend::{Backend, CpuBackend};
use ndgrad_core::config::GradientConfig;
use ndgrad_core::ops::{AddOp, LogOp, MatMulOp, SigmoidOp};
use ndgrad_core::{ActivationStore, GradientAccumulator, NDArray, NdGradError, NodeArena};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

fn main() -> Result<(), NdGradError> {
    env_logger::init();

    let backend: Arc<dyn Backend> = Arc::new(CpuBackend::new());
    let config = GradientConfig::new().warn_on_non_finite(true);
    let mut rng = StdRng::seed_from_u64(0);

    // --- Graph construction ---
    let mut arena = NodeArena::new();
    let x = arena.node(&[4, 3])?;
    let w = arena.node(&[3, 1])?;
    let h = arena.node(&[4, 1])?;
    let p = arena.node(&[4, 1])?;
    let log_p = arena.node(&[4, 1])?;
    let loss = arena.node(&[4, 1])?;
    let ops: Vec<Box<dyn Operation>> = vec![
        Box::new(MatMulOp::new(x, w, h)),
        Box::new(SigmoidOp::new(h, p)),
        Box::new(LogOp::new(p, log_p)),
        Box::new(AddOp::new(log_p, log_p, loss)),
    ];

    // --- Forward sweep ---
    let mut activations = ActivationStore::with_config(config);
    activations.set(x, ndgrad_core::array::randn(&[4, 3], &mut rng)?);
    activations.set(w, ndgrad_core::array::randn(&[3, 1], &mut rng)?);
    for op in &ops {
        op.forward(backend.as_ref(), &mut activations)?;
    }
    println!("loss = {:?}", activations.get(loss)?.data());

    // --- Backward sweep ---
    let mut gradients = GradientAccumulator::with_config(Arc::clone(&backend), config);
    gradients.add(loss, ndgrad_core::array::ones(&[4, 1])?)?;
    for op in ops.iter().rev() {
        op.backward(backend.as_ref(), &activations, &mut gradients)?;
        // The output's gradient has been consumed.
        if op.output() != loss {
            gradients.dispose_array(op.output());
        }
    }

    let grad_w: &NDArray = gradients.get(w)?;
    println!("dloss/dw = {:?}", grad_w.data());

    activations.clear();
    gradients.clear();
    Ok(())
}
