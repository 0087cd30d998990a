//! # Activation Functions
//!
//! Elementwise non-linearities as graph operations. Sigmoid and tanh differentiate
//! through their saved output; ReLU through its saved input.

pub mod relu;
pub mod sigmoid;
pub mod tanh;

pub use relu::ReluOp;
pub use sigmoid::SigmoidOp;
pub use tanh::TanhOp;

#[cfg(test)]
#[path = "activation_test.rs"]
mod tests;
