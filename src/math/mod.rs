//! Pure numeric primitives used by the evaluator.
//!
//! Every function here is stateless. Domain restrictions are reported as
//! [`CalcError`](crate::lang::error::CalcError) values rather than NaN.

pub mod advanced;
pub mod arithmetic;
pub mod combinatorics;

pub use advanced::AngleMode;
