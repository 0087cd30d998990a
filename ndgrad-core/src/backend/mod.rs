//! # Numeric Kernel Backend (`backend`)
//!
//! The autodiff core never touches array elements directly. Every forward value and
//! every gradient contribution is produced by composing the kernels exposed by the
//! [`Backend`] trait:
//!
//! - **Unary kernels** ([`UnaryKernel`]): elementwise `f(a)`.
//! - **Binary kernels** ([`BinaryKernel`]): elementwise `f(a, b)` over operands of
//!   *identical* shape. There is no broadcasting; mismatched shapes fail with
//!   `NdGradError::ShapeMismatch` and produce no result.
//! - **Matrix multiply**: rank-2 product with optional operand transposition.
//!
//! Every kernel returns a freshly allocated [`NDArray`]. Inputs are only borrowed.
//!
//! [`CpuBackend`] is the reference implementation.

use crate::array::NDArray;
use crate::error::NdGradError;
use std::fmt::{self, Debug};

pub mod cpu;

pub use cpu::CpuBackend;

/// Elementwise unary kernels a backend must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryKernel {
    /// Natural logarithm. Non-positive inputs give NaN or -Inf.
    Log,
    Exp,
    Neg,
    /// `1 / a`. Zero gives ±Inf.
    Reciprocal,
    Sqrt,
    Square,
    Abs,
    /// `max(a, 0)`.
    Relu,
    /// Heaviside step: `1` where `a > 0`, else `0`. Derivative of `Relu`.
    Step,
    Sigmoid,
    Tanh,
}

/// Elementwise binary kernels a backend must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryKernel {
    Add,
    Sub,
    Mul,
    Div,
}

impl fmt::Display for UnaryKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnaryKernel::Log => "log",
            UnaryKernel::Exp => "exp",
            UnaryKernel::Neg => "neg",
            UnaryKernel::Reciprocal => "reciprocal",
            UnaryKernel::Sqrt => "sqrt",
            UnaryKernel::Square => "square",
            UnaryKernel::Abs => "abs",
            UnaryKernel::Relu => "relu",
            UnaryKernel::Step => "step",
            UnaryKernel::Sigmoid => "sigmoid",
            UnaryKernel::Tanh => "tanh",
        };
        f.write_str(name)
    }
}

impl fmt::Display for BinaryKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BinaryKernel::Add => "add",
            BinaryKernel::Sub => "sub",
            BinaryKernel::Mul => "mul",
            BinaryKernel::Div => "div",
        };
        f.write_str(name)
    }
}

/// Numeric kernel provider consumed by operations and by the gradient accumulator.
///
/// The `Debug + Send + Sync` bounds let a backend be shared behind an `Arc` by a
/// scheduler running on another thread.
pub trait Backend: Debug + Send + Sync {
    /// Applies an elementwise unary kernel, returning a new array of the same shape.
    fn unary(&self, kernel: UnaryKernel, a: &NDArray) -> Result<NDArray, NdGradError>;

    /// Applies an elementwise binary kernel.
    ///
    /// # Errors
    /// Returns `NdGradError::ShapeMismatch` if `a` and `b` differ in shape.
    fn binary(&self, kernel: BinaryKernel, a: &NDArray, b: &NDArray)
        -> Result<NDArray, NdGradError>;

    /// Rank-2 matrix product `op(a) · op(b)` where `op` optionally transposes.
    ///
    /// # Errors
    /// * `NdGradError::DimensionMismatch` if an operand is not rank 2.
    /// * `NdGradError::ShapeMismatch` if the inner dimensions disagree.
    fn matmul(
        &self,
        a: &NDArray,
        b: &NDArray,
        transpose_a: bool,
        transpose_b: bool,
    ) -> Result<NDArray, NdGradError>;

    // --- Convenience wrappers ---

    fn log(&self, a: &NDArray) -> Result<NDArray, NdGradError> {
        self.unary(UnaryKernel::Log, a)
    }

    fn exp(&self, a: &NDArray) -> Result<NDArray, NdGradError> {
        self.unary(UnaryKernel::Exp, a)
    }

    fn neg(&self, a: &NDArray) -> Result<NDArray, NdGradError> {
        self.unary(UnaryKernel::Neg, a)
    }

    fn add(&self, a: &NDArray, b: &NDArray) -> Result<NDArray, NdGradError> {
        self.binary(BinaryKernel::Add, a, b)
    }

    fn sub(&self, a: &NDArray, b: &NDArray) -> Result<NDArray, NdGradError> {
        self.binary(BinaryKernel::Sub, a, b)
    }

    fn mul(&self, a: &NDArray, b: &NDArray) -> Result<NDArray, NdGradError> {
        self.binary(BinaryKernel::Mul, a, b)
    }

    fn div(&self, a: &NDArray, b: &NDArray) -> Result<NDArray, NdGradError> {
        self.binary(BinaryKernel::Div, a, b)
    }
}
