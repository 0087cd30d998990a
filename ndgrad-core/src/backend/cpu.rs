// ndgrad-core/src/backend/cpu.rs

use crate::array::utils::check_same_shape;
use crate::array::NDArray;
use crate::backend::{Backend, BinaryKernel, UnaryKernel};
use crate::error::NdGradError;
use num_traits::Float;

/// Reference CPU backend: plain loops over contiguous `f32` buffers.
#[derive(Debug, Default, Clone, Copy)]
pub struct CpuBackend;

impl CpuBackend {
    pub fn new() -> Self {
        CpuBackend
    }
}

// --- Scalar kernels ---

fn relu<F: Float>(x: F) -> F {
    // NaN must stay NaN, so no `max` here.
    if x < F::zero() {
        F::zero()
    } else {
        x
    }
}

fn step<F: Float>(x: F) -> F {
    if x.is_nan() {
        x
    } else if x > F::zero() {
        F::one()
    } else {
        F::zero()
    }
}

fn sigmoid<F: Float>(x: F) -> F {
    F::one() / (F::one() + (-x).exp())
}

fn unary_fn(kernel: UnaryKernel) -> fn(f32) -> f32 {
    match kernel {
        UnaryKernel::Log => f32::ln,
        UnaryKernel::Exp => f32::exp,
        UnaryKernel::Neg => |x| -x,
        UnaryKernel::Reciprocal => f32::recip,
        UnaryKernel::Sqrt => f32::sqrt,
        UnaryKernel::Square => |x| x * x,
        UnaryKernel::Abs => f32::abs,
        UnaryKernel::Relu => relu,
        UnaryKernel::Step => step,
        UnaryKernel::Sigmoid => sigmoid,
        UnaryKernel::Tanh => f32::tanh,
    }
}

fn binary_fn(kernel: BinaryKernel) -> fn(f32, f32) -> f32 {
    match kernel {
        BinaryKernel::Add => |a, b| a + b,
        BinaryKernel::Sub => |a, b| a - b,
        BinaryKernel::Mul => |a, b| a * b,
        BinaryKernel::Div => |a, b| a / b,
    }
}

/// Returns `(rows, cols)` of `op(m)` for a rank-2 array.
fn matrix_dims(m: &NDArray, transpose: bool) -> Result<(usize, usize), NdGradError> {
    match m.shape() {
        [r, c] if transpose => Ok((*c, *r)),
        [r, c] => Ok((*r, *c)),
        other => Err(NdGradError::DimensionMismatch {
            expected: 2,
            actual: other.len(),
        }),
    }
}

impl Backend for CpuBackend {
    fn unary(&self, kernel: UnaryKernel, a: &NDArray) -> Result<NDArray, NdGradError> {
        log::trace!("CpuBackend: unary {} on shape {:?}", kernel, a.shape());
        let f = unary_fn(kernel);
        let output_data: Vec<f32> = a.data().iter().map(|&val| f(val)).collect();
        NDArray::new(output_data, a.shape().to_vec())
    }

    fn binary(
        &self,
        kernel: BinaryKernel,
        a: &NDArray,
        b: &NDArray,
    ) -> Result<NDArray, NdGradError> {
        check_same_shape(a.shape(), b.shape(), &kernel.to_string())?;
        log::trace!("CpuBackend: binary {} on shape {:?}", kernel, a.shape());
        let f = binary_fn(kernel);
        let output_data: Vec<f32> = a
            .data()
            .iter()
            .zip(b.data())
            .map(|(&x, &y)| f(x, y))
            .collect();
        NDArray::new(output_data, a.shape().to_vec())
    }

    fn matmul(
        &self,
        a: &NDArray,
        b: &NDArray,
        transpose_a: bool,
        transpose_b: bool,
    ) -> Result<NDArray, NdGradError> {
        let (m, k) = matrix_dims(a, transpose_a)?;
        let (k2, n) = matrix_dims(b, transpose_b)?;
        if k != k2 {
            return Err(NdGradError::ShapeMismatch {
                expected: vec![m, k],
                actual: vec![k2, n],
                operation: "matmul".to_string(),
            });
        }
        log::trace!(
            "CpuBackend: matmul [{}x{}]·[{}x{}] (transpose_a={}, transpose_b={})",
            m,
            k,
            k2,
            n,
            transpose_a,
            transpose_b
        );

        let a_cols = a.shape()[1];
        let b_cols = b.shape()[1];
        let a_data = a.data();
        let b_data = b.data();
        let a_at = |i: usize, p: usize| {
            if transpose_a {
                a_data[p * a_cols + i]
            } else {
                a_data[i * a_cols + p]
            }
        };
        let b_at = |p: usize, j: usize| {
            if transpose_b {
                b_data[j * b_cols + p]
            } else {
                b_data[p * b_cols + j]
            }
        };

        let mut result_data = vec![0.0f32; m * n];
        for i in 0..m {
            for j in 0..n {
                let mut acc = 0.0f32;
                for p in 0..k {
                    acc += a_at(i, p) * b_at(p, j);
                }
                result_data[i * n + j] = acc;
            }
        }
        NDArray::new(result_data, vec![m, n])
    }
}

#[cfg(test)]
#[path = "cpu_test.rs"]
mod tests;
