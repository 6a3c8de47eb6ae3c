#[derive(thiserror::Error, Debug)]
pub enum ZMatrixError {
    /// Error when building a ring or normalization policy with a modulus
    /// that is not a positive integer.
    #[error("InvalidModulus: {0}")]
    InvalidModulus(String),
    /// Rows of unequal length at construction, a row-length mismatch on
    /// insertion, or mismatched shapes on addition.
    #[error("ShapeMismatch: {0}")]
    ShapeMismatch(String),
    /// Incompatible inner dimensions for a matrix product.
    #[error("DimensionMismatch: {0}")]
    DimensionMismatch(String),
    #[error("NotSquare: {0}")]
    NotSquare(String),
    /// Error when trying to find a modular inverse that doesn't exist
    /// (gcd(a, m) != 1).
    #[error("NoInverse: {0}")]
    NoInverse(String),
    /// Error when a plain integer matrix has no exact inverse
    /// (determinant is not a unit).
    #[error("NotInvertible: {0}")]
    NotInvertible(String),
}
