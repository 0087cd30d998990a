// ndgrad-core/src/array/utils.rs

use crate::error::NdGradError;

/// Calculates the strides for a given shape.
/// Strides represent the number of elements to skip in the flattened data array
/// to move one step along each dimension.
///
/// Example:
/// shape = [2, 3] -> strides = [3, 1]
/// shape = [2, 2, 2] -> strides = [4, 2, 1]
pub fn calculate_strides(shape: &[usize]) -> Vec<usize> {
    if shape.is_empty() {
        return vec![];
    }
    let rank = shape.len();
    let mut strides = vec![1; rank];
    for i in (0..rank - 1).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

/// Rejects shapes containing a zero-sized dimension.
pub fn check_shape_positive(shape: &[usize]) -> Result<(), NdGradError> {
    if shape.iter().any(|&d| d == 0) {
        return Err(NdGradError::InvalidShape {
            shape: shape.to_vec(),
        });
    }
    Ok(())
}

/// Checks that two operand shapes are identical. Elementwise kernels do not broadcast.
pub fn check_same_shape(a: &[usize], b: &[usize], operation: &str) -> Result<(), NdGradError> {
    if a != b {
        return Err(NdGradError::ShapeMismatch {
            expected: a.to_vec(),
            actual: b.to_vec(),
            operation: operation.to_string(),
        });
    }
    Ok(())
}
