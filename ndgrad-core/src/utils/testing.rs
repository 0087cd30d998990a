use crate::array::NDArray;

/// Checks if an array is approximately equal to the expected shape and data.
/// Panics if shapes differ or any element differs by more than `tolerance`.
///
/// NaN never compares as near; assert on non-finite values explicitly instead.
pub fn check_array_near(
    actual: &NDArray,
    expected_shape: &[usize],
    expected_data: &[f32],
    tolerance: f32,
) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");
    assert_eq!(
        actual.data().len(),
        expected_data.len(),
        "Data length mismatch"
    );

    for (i, (a, e)) in actual.data().iter().zip(expected_data.iter()).enumerate() {
        let diff = (*a - *e).abs();
        if !(diff <= tolerance) {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}

/// Helper to create a small array for testing purposes.
#[cfg(test)]
pub(crate) fn create_test_array(data: Vec<f32>, shape: Vec<usize>) -> NDArray {
    NDArray::new(data, shape).expect("Failed to create test array")
}

/// Installs `env_logger` once for the test binary. Safe to call from every test.
#[cfg(test)]
pub(crate) fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
