//! A matrix with a fixed modulus.

use super::{Grid, Matrix, Row};
use crate::errors::ZMatrixError;
use crate::ring::{Norm, Ring};

use rand::Rng;

use serde::{Deserialize, Serialize};

use std::fmt;
use std::slice;

use tracing::debug;

/// A [`Matrix`] over the ring Z_m, with the modulus fixed at construction.
///
/// Every cell lies in `[0, modulus)` after every public mutating call,
/// including caller-supplied [`ModMatrix::transform`] closures. The modulus
/// is supplied implicitly to every underlying engine operation; callers
/// never pass one.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ModMatrix {
    matrix: Matrix,
    ring: Ring,
}

impl ModMatrix {
    /// Creates a modular matrix, canonicalizing every cell.
    ///
    /// The modulus is validated before the grid is touched.
    ///
    /// # Errors
    ///
    /// * `ZMatrixError::InvalidModulus` unless `modulus >= 1`.
    /// * `ZMatrixError::ShapeMismatch` if the rows have unequal lengths.
    ///
    /// # Example
    ///
    /// ```
    /// # use zmatrix::matrix::ModMatrix;
    /// let matrix = ModMatrix::try_with(vec![vec![1, 2], vec![3, 4]], 3).unwrap();
    /// assert_eq!(matrix.rows(), vec![vec![1, 2], vec![0, 1]]);
    /// ```
    pub fn try_with(rows: Grid, modulus: i64) -> Result<Self, ZMatrixError> {
        let ring = Ring::try_with(modulus)?;
        let matrix = Matrix::try_with_norm(rows, Norm::Modular(ring))?;

        debug!(modulus, size = ?matrix.size(), "modular matrix built");

        Ok(ModMatrix { matrix, ring })
    }

    /// Creates a matrix of the given shape with uniformly random cells in
    /// `[0, modulus)`.
    ///
    /// # Errors
    ///
    /// Returns `ZMatrixError::InvalidModulus` unless `modulus >= 1`.
    pub fn random<R: Rng>(
        rng: &mut R,
        rows: usize,
        columns: usize,
        modulus: i64,
    ) -> Result<Self, ZMatrixError> {
        let ring = Ring::try_with(modulus)?;
        let rows: Grid = (0..rows)
            .map(|_| (0..columns).map(|_| rng.random_range(0..modulus)).collect())
            .collect();

        // sampled values are canonical already
        Ok(ModMatrix {
            matrix: Matrix { rows },
            ring,
        })
    }

    fn norm(&self) -> Norm {
        Norm::Modular(self.ring)
    }

    /// Returns the fixed modulus.
    pub fn modulus(&self) -> i64 {
        self.ring.modulus()
    }

    /// Returns the underlying ring.
    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    /// Borrows the underlying plain matrix.
    pub fn as_matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Unwraps into the underlying plain matrix, dropping the modulus.
    pub fn into_matrix(self) -> Matrix {
        self.matrix
    }

    /// Returns the value at row `i`, column `j`.
    pub fn get(&self, i: usize, j: usize) -> i64 {
        self.matrix.get(i, j)
    }

    /// Returns row `i` as a slice.
    pub fn row(&self, i: usize) -> &[i64] {
        self.matrix.row(i)
    }

    /// Returns the backing grid.
    pub fn rows(&self) -> &[Row] {
        self.matrix.rows()
    }

    /// Returns the `(height, width)` pair.
    pub fn size(&self) -> (usize, usize) {
        self.matrix.size()
    }

    /// Iterates over the rows in order.
    pub fn iter(&self) -> slice::Iter<'_, Row> {
        self.matrix.iter()
    }

    /// Stores `value mod modulus` at row `i`, column `j`.
    pub fn set(&mut self, i: usize, j: usize, value: i64) -> &mut Self {
        self.matrix.set(i, j, value, self.norm());
        self
    }

    /// Inserts a row, canonicalizing each element.
    ///
    /// # Errors
    ///
    /// Returns `ZMatrixError::ShapeMismatch` if the row length does not
    /// match the current width.
    pub fn insert_row(
        &mut self,
        row: Row,
        position: Option<usize>,
    ) -> Result<&mut Self, ZMatrixError> {
        self.matrix.insert_row(row, position, self.norm())?;
        Ok(self)
    }

    /// Removes the row at `index`.
    pub fn delete_row(&mut self, index: usize) -> &mut Self {
        self.matrix.delete_row(index);
        self
    }

    /// Removes the column at `index` from every row.
    pub fn delete_column(&mut self, index: usize) -> &mut Self {
        self.matrix.delete_column(index);
        self
    }

    /// Applies `f(value, i, j)` to every cell in row-major order; every
    /// result is reduced into `[0, modulus)`, whatever the closure returns.
    pub fn transform<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(i64, usize, usize) -> i64,
    {
        self.matrix.transform(f, self.norm());
        self
    }

    /// Cell-wise sum, reduced into `[0, modulus)`.
    ///
    /// # Errors
    ///
    /// Returns `ZMatrixError::ShapeMismatch` unless shapes match.
    pub fn add(&mut self, other: &Matrix) -> Result<&mut Self, ZMatrixError> {
        self.matrix.add(other, self.norm())?;
        Ok(self)
    }

    /// Multiplies every cell by `n`, reduced into `[0, modulus)`.
    pub fn scalar(&mut self, n: i64) -> &mut Self {
        self.matrix.scalar(n, self.norm());
        self
    }

    /// Matrix product, each resulting cell reduced into `[0, modulus)`.
    ///
    /// # Errors
    ///
    /// Returns `ZMatrixError::DimensionMismatch` unless the inner
    /// dimensions match.
    pub fn product(&mut self, other: &Matrix) -> Result<&mut Self, ZMatrixError> {
        self.matrix.product(other, self.norm())?;
        Ok(self)
    }

    /// Replaces the contents with the transpose. Cells are permuted, not
    /// changed, so they stay canonical.
    pub fn transpose(&mut self) -> &mut Self {
        self.matrix.transpose();
        self
    }

    /// Determinant reduced into `[0, modulus)`.
    ///
    /// # Errors
    ///
    /// Returns `ZMatrixError::NotSquare` unless the matrix is square.
    ///
    /// # Example
    ///
    /// ```
    /// # use zmatrix::matrix::ModMatrix;
    /// let matrix = ModMatrix::try_with(vec![vec![1, 2], vec![3, 4]], 5).unwrap();
    /// assert_eq!(matrix.determinant().unwrap(), 3); // -2 mod 5
    /// ```
    pub fn determinant(&self) -> Result<i64, ZMatrixError> {
        self.matrix.determinant(self.norm())
    }

    /// Inverse over Z_m, preserving the modulus.
    ///
    /// # Errors
    ///
    /// * `ZMatrixError::NotSquare` if the matrix is not square.
    /// * `ZMatrixError::NoInverse` if `gcd(det, modulus) != 1`.
    pub fn inverse(&self) -> Result<ModMatrix, ZMatrixError> {
        let matrix = self.matrix.inverse(self.norm())?;
        Ok(ModMatrix {
            matrix,
            ring: self.ring,
        })
    }
}

impl<'a> IntoIterator for &'a ModMatrix {
    type Item = &'a Row;
    type IntoIter = slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.matrix.iter()
    }
}

impl AsRef<Matrix> for ModMatrix {
    fn as_ref(&self) -> &Matrix {
        &self.matrix
    }
}

impl From<ModMatrix> for Matrix {
    fn from(matrix: ModMatrix) -> Self {
        matrix.into_matrix()
    }
}

impl fmt::Display for ModMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.matrix, f)
    }
}
