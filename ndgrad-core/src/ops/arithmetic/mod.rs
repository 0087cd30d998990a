// Elementwise binary arithmetic. Operands must share a shape; there is no broadcasting.
pub mod add;
pub mod mul;
pub mod sub;

pub use add::AddOp;
pub use mul::MulOp;
pub use sub::SubOp;

#[cfg(test)]
#[path = "arithmetic_test.rs"]
mod tests;
