pub mod grad_check;
pub mod operation;

pub use grad_check::{check_operation_gradient, GradCheckError};
pub use operation::Operation;
