// ndgrad-core/src/array/mod.rs

use crate::error::NdGradError;

pub mod create;
pub mod utils;

pub use create::{full, ones, rand_uniform, randn, zeros, zeros_like};
use utils::{calculate_strides, check_shape_positive};

/// A dense, contiguous, row-major `f32` array.
///
/// `NDArray` exclusively owns its buffer. Moving an array into a store moves the
/// buffer with it; no copy is ever made implicitly (use `clone()` when a copy is
/// really wanted). A rank-0 array (empty shape) holds a single scalar.
#[derive(Debug, Clone, PartialEq)]
pub struct NDArray {
    data: Vec<f32>,
    shape: Vec<usize>,
    strides: Vec<usize>,
}

impl NDArray {
    /// Creates a new array from flattened row-major data and a shape.
    ///
    /// # Errors
    /// * `NdGradError::InvalidShape` if a dimension is zero.
    /// * `NdGradError::ArrayCreationError` if `data.len()` does not match the shape.
    pub fn new(data: Vec<f32>, shape: Vec<usize>) -> Result<Self, NdGradError> {
        check_shape_positive(&shape)?;
        let numel: usize = shape.iter().product();
        if data.len() != numel {
            return Err(NdGradError::ArrayCreationError {
                data_len: data.len(),
                shape,
            });
        }
        let strides = calculate_strides(&shape);
        Ok(NDArray {
            data,
            shape,
            strides,
        })
    }

    /// Creates a rank-1 array from a slice.
    pub fn from_slice(values: &[f32]) -> Result<Self, NdGradError> {
        Self::new(values.to_vec(), vec![values.len()])
    }

    /// Creates a rank-0 array holding `value`.
    pub fn scalar(value: f32) -> Self {
        NDArray {
            data: vec![value],
            shape: vec![],
            strides: vec![],
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Flattened row-major view of the elements.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consumes the array and returns its buffer.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Reads the element at a multi-index.
    ///
    /// # Errors
    /// * `NdGradError::DimensionMismatch` if `index` does not have one entry per dimension.
    /// * `NdGradError::IndexOutOfBounds` if any coordinate exceeds its dimension.
    pub fn get(&self, index: &[usize]) -> Result<f32, NdGradError> {
        let offset = self.offset_of(index)?;
        Ok(self.data[offset])
    }

    /// Writes the element at a multi-index. Same errors as [`NDArray::get`].
    pub fn set(&mut self, index: &[usize], value: f32) -> Result<(), NdGradError> {
        let offset = self.offset_of(index)?;
        self.data[offset] = value;
        Ok(())
    }

    /// Returns the single element of a one-element array.
    pub fn as_scalar(&self) -> Result<f32, NdGradError> {
        match self.data.as_slice() {
            [value] => Ok(*value),
            _ => Err(NdGradError::ShapeMismatch {
                expected: vec![],
                actual: self.shape.clone(),
                operation: "as_scalar".to_string(),
            }),
        }
    }

    /// Reinterprets the buffer under a new shape with the same element count.
    pub fn reshape(self, shape: Vec<usize>) -> Result<Self, NdGradError> {
        check_shape_positive(&shape)?;
        let numel: usize = shape.iter().product();
        if numel != self.data.len() {
            return Err(NdGradError::ShapeMismatch {
                expected: self.shape,
                actual: shape,
                operation: "reshape".to_string(),
            });
        }
        Ok(NDArray {
            strides: calculate_strides(&shape),
            data: self.data,
            shape,
        })
    }

    /// `true` if any element is NaN or infinite.
    pub fn has_non_finite(&self) -> bool {
        self.data.iter().any(|v| !v.is_finite())
    }

    fn offset_of(&self, index: &[usize]) -> Result<usize, NdGradError> {
        if index.len() != self.shape.len() {
            return Err(NdGradError::DimensionMismatch {
                expected: self.shape.len(),
                actual: index.len(),
            });
        }
        let mut offset = 0;
        for ((&i, &dim), &stride) in index.iter().zip(&self.shape).zip(&self.strides) {
            if i >= dim {
                return Err(NdGradError::IndexOutOfBounds {
                    index: index.to_vec(),
                    shape: self.shape.clone(),
                });
            }
            offset += i * stride;
        }
        Ok(offset)
    }
}
