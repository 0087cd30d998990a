pub mod matmul;

pub use matmul::MatMulOp;
