// ndgrad-core/src/array/create.rs

use crate::array::NDArray;
use crate::error::NdGradError;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Creates a new array filled with zeros with the specified shape.
pub fn zeros(shape: &[usize]) -> Result<NDArray, NdGradError> {
    full(shape, 0.0)
}

/// Creates a new array filled with ones with the specified shape.
pub fn ones(shape: &[usize]) -> Result<NDArray, NdGradError> {
    full(shape, 1.0)
}

/// Creates a new array filled with `value` with the specified shape.
pub fn full(shape: &[usize], value: f32) -> Result<NDArray, NdGradError> {
    let numel = shape.iter().product();
    NDArray::new(vec![value; numel], shape.to_vec())
}

/// Creates a zero-filled array with the same shape as `array`.
pub fn zeros_like(array: &NDArray) -> Result<NDArray, NdGradError> {
    zeros(array.shape())
}

/// Samples every element uniformly from `[low, high)`.
pub fn rand_uniform<R: Rng + ?Sized>(
    shape: &[usize],
    low: f32,
    high: f32,
    rng: &mut R,
) -> Result<NDArray, NdGradError> {
    if !(low < high) {
        return Err(NdGradError::UnsupportedOperation(format!(
            "rand_uniform requires low < high, got [{}, {})",
            low, high
        )));
    }
    let numel = shape.iter().product();
    let data_vec: Vec<f32> = (0..numel).map(|_| rng.gen_range(low..high)).collect();
    NDArray::new(data_vec, shape.to_vec())
}

/// Samples every element from the standard normal distribution.
pub fn randn<R: Rng + ?Sized>(shape: &[usize], rng: &mut R) -> Result<NDArray, NdGradError> {
    let numel = shape.iter().product();
    let data_vec: Vec<f32> = (0..numel).map(|_| StandardNormal.sample(rng)).collect();
    NDArray::new(data_vec, shape.to_vec())
}
