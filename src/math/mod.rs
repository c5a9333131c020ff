//! Exact scalars and the matrices built from them.

mod matrix;
mod rational;

pub use matrix::Matrix;
pub use rational::{ParseRationalError, Rational, MAX_EXPONENT};
