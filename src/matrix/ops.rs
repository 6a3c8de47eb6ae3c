//! Matrix arithmetic: addition, scalar and matrix products, transposition,
//! determinant and exact inverse.

use super::{Grid, Matrix, Row};
use crate::errors::ZMatrixError;
use crate::ring::Norm;

use tracing::{debug, trace};

impl Matrix {
    /// Cell-wise sum `self + other`, canonicalized under `norm`.
    ///
    /// Mutates the receiver and returns it for chaining.
    ///
    /// # Errors
    ///
    /// Returns `ZMatrixError::ShapeMismatch` unless both matrices have
    /// identical `(height, width)`.
    pub fn add(&mut self, other: &Matrix, norm: Norm) -> Result<&mut Self, ZMatrixError> {
        if self.size() != other.size() {
            return Err(ZMatrixError::ShapeMismatch(format!(
                "Matrix shapes must match for addition ({:?} vs {:?})",
                self.size(),
                other.size()
            )));
        }

        self.transform(|value, i, j| value + other.get(i, j), norm);
        Ok(self)
    }

    /// Multiplies every cell by `n`, canonicalized under `norm`.
    pub fn scalar(&mut self, n: i64, norm: Norm) -> &mut Self {
        self.transform(|value, _, _| value * n, norm)
    }

    /// Standard matrix product `self · other`, replacing the receiver's
    /// contents with the `height × other.width` result.
    ///
    /// The accumulated dot product of each resulting cell is canonicalized
    /// once, per cell.
    ///
    /// # Errors
    ///
    /// Returns `ZMatrixError::DimensionMismatch` unless
    /// `self.width == other.height`.
    pub fn product(&mut self, other: &Matrix, norm: Norm) -> Result<&mut Self, ZMatrixError> {
        let (height, inner) = self.size();
        let (other_height, width) = other.size();
        if inner != other_height {
            return Err(ZMatrixError::DimensionMismatch(format!(
                "Inner dimensions must match for product ({} vs {})",
                inner, other_height
            )));
        }

        trace!(height, inner, width, "matrix product");

        let mut result: Grid = Vec::with_capacity(height);
        for i in 0..height {
            let mut row: Row = Vec::with_capacity(width);
            for j in 0..width {
                let mut sum = 0i64;
                for k in 0..inner {
                    sum += self.rows[i][k] * other.rows[k][j];
                }
                row.push(norm.apply(sum));
            }
            result.push(row);
        }

        self.rows = result;
        Ok(self)
    }

    /// Replaces the receiver's contents with its transpose.
    ///
    /// Handles 1×n, n×1 and empty matrices.
    pub fn transpose(&mut self) -> &mut Self {
        let (height, width) = self.size();
        let mut transposed: Grid = Vec::with_capacity(width);
        for j in 0..width {
            let mut row: Row = Vec::with_capacity(height);
            for i in 0..height {
                row.push(self.rows[i][j]);
            }
            transposed.push(row);
        }

        self.rows = transposed;
        self
    }

    /// Determinant by recursive Laplace expansion along the first row.
    ///
    /// The final sum is canonicalized under `norm` exactly once. The 0×0
    /// determinant is the empty product, 1. Exponential in the matrix size;
    /// there is no pivoting shortcut here.
    ///
    /// # Errors
    ///
    /// Returns `ZMatrixError::NotSquare` unless `height == width`.
    ///
    /// # Example
    ///
    /// ```
    /// # use zmatrix::matrix::Matrix;
    /// # use zmatrix::ring::Norm;
    /// let matrix = Matrix::try_with(vec![vec![1, 2], vec![3, 4]]).unwrap();
    /// assert_eq!(matrix.determinant(Norm::Plain).unwrap(), -2);
    /// ```
    pub fn determinant(&self, norm: Norm) -> Result<i64, ZMatrixError> {
        let (height, width) = self.size();
        if height != width {
            return Err(ZMatrixError::NotSquare(format!(
                "Determinant requires a square matrix, got {}x{}",
                height, width
            )));
        }

        trace!(size = height, "cofactor expansion");

        let mut columns: Vec<usize> = (0..width).collect();
        Ok(norm.apply(Self::cofactor_expand(&self.rows, 0, &mut columns)))
    }

    /// Expansion along row `top` of the minor spanned by rows `top..` and
    /// the column indices in `columns`. The sign of each term is decided by
    /// the entry's position within the remaining columns.
    fn cofactor_expand(rows: &Grid, top: usize, columns: &mut Vec<usize>) -> i64 {
        let size = columns.len();
        if size == 0 {
            return 1;
        }
        if size == 1 {
            return rows[top][columns[0]];
        }
        if size == 2 {
            let (a, b) = (columns[0], columns[1]);
            return rows[top][a] * rows[top + 1][b] - rows[top][b] * rows[top + 1][a];
        }

        let mut det = 0i64;
        for idx in 0..size {
            let entry = rows[top][columns[idx]];
            let column = columns.remove(idx);
            let minor = Self::cofactor_expand(rows, top + 1, columns);
            columns.insert(idx, column);

            if idx % 2 == 0 {
                det += entry * minor;
            } else {
                det -= entry * minor;
            }
        }
        det
    }

    /// Exact inverse via the adjugate.
    ///
    /// Under [`Norm::Modular`] the determinant is inverted in the ring, so
    /// the inverse exists iff `gcd(det, modulus) == 1`. Under
    /// [`Norm::Plain`] an exact integer inverse exists iff the determinant
    /// is `1` or `-1`. Returns a new matrix; the receiver is untouched.
    ///
    /// # Errors
    ///
    /// * `ZMatrixError::NotSquare` if `height != width`.
    /// * `ZMatrixError::NoInverse` if the modular determinant is not a unit
    ///   (this covers the singular case `det ≡ 0`).
    /// * `ZMatrixError::NotInvertible` if the plain determinant is not ±1.
    pub fn inverse(&self, norm: Norm) -> Result<Matrix, ZMatrixError> {
        let (height, width) = self.size();
        if height != width {
            return Err(ZMatrixError::NotSquare(format!(
                "Inverse requires a square matrix, got {}x{}",
                height, width
            )));
        }
        if height == 0 {
            return Ok(Matrix { rows: Vec::new() });
        }

        let det = self.determinant(norm)?;
        debug!(det, "inverting matrix");

        let det_inv = match norm.ring() {
            Some(ring) => ring.inv(det)?,
            None => match det {
                1 | -1 => det,
                _ => {
                    return Err(ZMatrixError::NotInvertible(format!(
                        "Determinant {} is not a unit; no exact integer inverse",
                        det
                    )));
                }
            },
        };

        let mut result: Grid = vec![vec![0; width]; height];
        for i in 0..height {
            for j in 0..width {
                let minor = self.minor_determinant(i, j);
                let cofactor = if (i + j) % 2 == 0 { minor } else { -minor };
                // adjugate is the transposed cofactor grid
                result[j][i] = norm.apply(cofactor * det_inv);
            }
        }

        Ok(Matrix { rows: result })
    }

    /// Determinant of the minor obtained by deleting one row and one column.
    fn minor_determinant(&self, row: usize, column: usize) -> i64 {
        let rows: Grid = self
            .rows
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != row)
            .map(|(_, r)| {
                r.iter()
                    .enumerate()
                    .filter(|(j, _)| *j != column)
                    .map(|(_, &value)| value)
                    .collect()
            })
            .collect();

        let mut columns: Vec<usize> = (0..rows.len()).collect();
        Self::cofactor_expand(&rows, 0, &mut columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add() -> Result<(), ZMatrixError> {
        let mut m1 = Matrix::try_with(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]])?;
        let m2 = Matrix::try_with(vec![vec![9, 8, 7], vec![6, 5, 4], vec![3, 2, 1]])?;

        m1.add(&m2, Norm::Plain)?;
        assert_eq!(m1.rows(), vec![vec![10; 3]; 3]);
        Ok(())
    }

    #[test]
    fn test_add_shape_mismatch() -> Result<(), ZMatrixError> {
        let mut m1 = Matrix::ones(3, 3);
        let m2 = Matrix::ones(2, 2);
        assert!(m1.add(&m2, Norm::Plain).is_err());
        // failed add leaves the receiver untouched
        assert_eq!(m1.rows(), Matrix::ones(3, 3).rows());
        Ok(())
    }

    #[test]
    fn test_scalar() -> Result<(), ZMatrixError> {
        let mut matrix = Matrix::try_with(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]])?;
        matrix.scalar(2, Norm::Plain);
        assert_eq!(
            matrix.rows(),
            vec![vec![2, 4, 6], vec![8, 10, 12], vec![14, 16, 18]]
        );
        Ok(())
    }

    #[test]
    fn test_product() -> Result<(), ZMatrixError> {
        let mut m1 = Matrix::try_with(vec![vec![1, 2], vec![3, 4]])?;
        let m2 = Matrix::try_with(vec![vec![2, 0], vec![1, 2]])?;

        m1.product(&m2, Norm::Plain)?;
        assert_eq!(m1.rows(), vec![vec![4, 4], vec![10, 8]]);
        Ok(())
    }

    #[test]
    fn test_product_reshapes_receiver() -> Result<(), ZMatrixError> {
        let mut m1 = Matrix::ones(2, 3);
        let m2 = Matrix::ones(3, 4);
        m1.product(&m2, Norm::Plain)?;
        assert_eq!(m1.size(), (2, 4));
        assert!(m1.iter().all(|row| row.iter().all(|&v| v == 3)));
        Ok(())
    }

    #[test]
    fn test_product_dimension_mismatch() -> Result<(), ZMatrixError> {
        let mut m1 = Matrix::try_with(vec![vec![1, 2], vec![3, 4]])?;
        let m2 = Matrix::ones(3, 3);
        assert!(m1.product(&m2, Norm::Plain).is_err());

        // compatible non-square pairs are fine
        let mut m3 = Matrix::ones(2, 1);
        let m4 = Matrix::ones(1, 2);
        assert!(m3.product(&m4, Norm::Plain).is_ok());
        Ok(())
    }

    #[test]
    fn test_transpose_rectangular() -> Result<(), ZMatrixError> {
        let mut matrix = Matrix::try_with(vec![vec![1, 2, 3], vec![4, 5, 6]])?;
        matrix.transpose();
        assert_eq!(matrix.rows(), vec![vec![1, 4], vec![2, 5], vec![3, 6]]);
        Ok(())
    }

    #[test]
    fn test_transpose_square() -> Result<(), ZMatrixError> {
        let mut matrix = Matrix::try_with(vec![vec![1, 2], vec![3, 4]])?;
        matrix.transpose();
        assert_eq!(matrix.rows(), vec![vec![1, 3], vec![2, 4]]);
        Ok(())
    }

    #[test]
    fn test_transpose_single_row_and_column() -> Result<(), ZMatrixError> {
        let mut row = Matrix::try_with(vec![vec![1, 2, 3]])?;
        row.transpose();
        assert_eq!(row.rows(), vec![vec![1], vec![2], vec![3]]);

        let mut column = Matrix::try_with(vec![vec![1], vec![2], vec![3]])?;
        column.transpose();
        assert_eq!(column.rows(), vec![vec![1, 2, 3]]);
        Ok(())
    }

    #[test]
    fn test_double_transpose_is_identity() -> Result<(), ZMatrixError> {
        let original = Matrix::try_with(vec![vec![1, 2, 3], vec![4, 5, 6]])?;
        let mut matrix = original.clone();
        matrix.transpose().transpose();
        assert_eq!(matrix, original);
        Ok(())
    }

    #[test]
    fn test_determinant_1x1() -> Result<(), ZMatrixError> {
        let matrix = Matrix::try_with(vec![vec![5]])?;
        assert_eq!(matrix.determinant(Norm::Plain)?, 5);
        Ok(())
    }

    #[test]
    fn test_determinant_2x2() -> Result<(), ZMatrixError> {
        let matrix = Matrix::try_with(vec![vec![1, 2], vec![3, 4]])?;
        assert_eq!(matrix.determinant(Norm::Plain)?, -2);
        Ok(())
    }

    #[test]
    fn test_determinant_3x3() -> Result<(), ZMatrixError> {
        let matrix = Matrix::try_with(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]])?;
        assert_eq!(matrix.determinant(Norm::Plain)?, 0);
        Ok(())
    }

    #[test]
    fn test_determinant_4x4() -> Result<(), ZMatrixError> {
        // upper-triangular with a row swap: det = -(2 * 3 * 1 * 4)
        let matrix = Matrix::try_with(vec![
            vec![0, 3, 1, 5],
            vec![2, 1, 7, 2],
            vec![0, 0, 1, 6],
            vec![0, 0, 0, 4],
        ])?;
        assert_eq!(matrix.determinant(Norm::Plain)?, -24);
        Ok(())
    }

    #[test]
    fn test_determinant_not_square() -> Result<(), ZMatrixError> {
        let matrix = Matrix::try_with(vec![vec![1, 2, 3], vec![4, 5, 6]])?;
        assert!(matrix.determinant(Norm::Plain).is_err());
        Ok(())
    }

    #[test]
    fn test_determinant_of_identity() {
        for size in 0..5 {
            assert_eq!(Matrix::identity(size).determinant(Norm::Plain).unwrap(), 1);
        }
    }

    #[test]
    fn test_inverse_unimodular() -> Result<(), ZMatrixError> {
        let matrix = Matrix::try_with(vec![vec![2, 1], vec![1, 1]])?;
        let inverse = matrix.inverse(Norm::Plain)?;
        assert_eq!(inverse.rows(), vec![vec![1, -1], vec![-1, 2]]);

        let mut product = matrix.clone();
        product.product(&inverse, Norm::Plain)?;
        assert_eq!(product, Matrix::identity(2));
        Ok(())
    }

    #[test]
    fn test_inverse_negative_unit_determinant() -> Result<(), ZMatrixError> {
        let matrix = Matrix::try_with(vec![vec![0, 1], vec![1, 0]])?;
        let inverse = matrix.inverse(Norm::Plain)?;
        assert_eq!(inverse.rows(), vec![vec![0, 1], vec![1, 0]]);
        Ok(())
    }

    #[test]
    fn test_inverse_requires_unit_determinant() -> Result<(), ZMatrixError> {
        let matrix = Matrix::try_with(vec![vec![2, 0], vec![0, 2]])?;
        assert!(matches!(
            matrix.inverse(Norm::Plain),
            Err(ZMatrixError::NotInvertible(_))
        ));
        Ok(())
    }

    #[test]
    fn test_inverse_not_square() -> Result<(), ZMatrixError> {
        let matrix = Matrix::ones(2, 3);
        assert!(matches!(
            matrix.inverse(Norm::Plain),
            Err(ZMatrixError::NotSquare(_))
        ));
        Ok(())
    }

    #[test]
    fn test_chaining() -> Result<(), ZMatrixError> {
        let mut matrix = Matrix::identity(2);
        let other = Matrix::ones(2, 2);
        matrix.add(&other, Norm::Plain)?.scalar(3, Norm::Plain).transpose();
        assert_eq!(matrix.rows(), vec![vec![6, 3], vec![3, 6]]);
        Ok(())
    }
}
