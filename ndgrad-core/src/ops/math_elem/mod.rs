// Elementwise math operations
pub mod exp;
pub mod log;
pub mod neg;
pub mod square;

pub use exp::ExpOp;
pub use self::log::LogOp;
pub use neg::NegOp;
pub use square::SquareOp;

#[cfg(test)]
#[path = "math_elem_test.rs"]
mod tests;
