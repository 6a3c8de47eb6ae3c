//! Exact-integer linear algebra with optional modular normalization.
//!
//! The crate provides a dense, mutable [`Matrix`] of `i64` values, a
//! [`ModMatrix`] specialization whose cells are kept in `[0, modulus)`
//! after every operation, and the [`Ring`]/[`Norm`] modular-arithmetic
//! layer both are built on.
//!
//! # Example
//!
//! ```
//! use zmatrix::{ModMatrix, ZMatrixError};
//!
//! fn main() -> Result<(), ZMatrixError> {
//!     let mut matrix = ModMatrix::try_with(vec![vec![1, 2], vec![3, 4]], 5)?;
//!     assert_eq!(matrix.determinant()?, 3); // -2 mod 5
//!
//!     matrix.scalar(3).transform(|value, _, _| value + 1);
//!     assert!(matrix.iter().all(|row| row.iter().all(|&v| v < 5)));
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod matrix;
pub mod ring;

pub use errors::ZMatrixError;
pub use matrix::{Grid, Matrix, ModMatrix, Row};
pub use ring::{Norm, Ring};
