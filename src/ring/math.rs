//! Implementation of ring ops using modular arithmetic.

use crate::errors::ZMatrixError;

use super::extended_gcd;

use serde::{Deserialize, Serialize};

/// Represents a finite ring Z_m using modular arithmetic.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    modulus: i64,
}

impl Ring {
    /// Create a new Ring with the given modulus.
    ///
    /// The modulus must be a positive integer.
    pub fn try_with(modulus: i64) -> Result<Self, ZMatrixError> {
        if modulus < 1 {
            return Err(ZMatrixError::InvalidModulus(format!(
                "Modulus must be a positive integer, got {}",
                modulus
            )));
        }

        Ok(Ring { modulus })
    }

    /// Returns the modulus of the ring.
    ///
    /// # Example
    ///
    /// ```
    /// # use zmatrix::ring::Ring;
    /// let ring = Ring::try_with(13).unwrap();
    /// assert_eq!(ring.modulus(), 13);
    /// ```
    pub fn modulus(&self) -> i64 {
        self.modulus
    }

    /// Normalizes a value to its canonical representative in `[0, modulus)`.
    ///
    /// Handles negative values correctly by adding the modulus.
    ///
    /// # Example
    ///
    /// ```
    /// # use zmatrix::ring::Ring;
    /// let ring = Ring::try_with(10).unwrap();
    /// assert_eq!(ring.normalize(15), 5);
    /// assert_eq!(ring.normalize(-3), 7);
    /// assert_eq!(ring.normalize(0), 0);
    /// assert_eq!(ring.normalize(10), 0);
    /// ```
    pub fn normalize(&self, value: i64) -> i64 {
        let rem = value % self.modulus;
        if rem < 0 {
            return rem + self.modulus;
        }

        rem
    }

    /// Computes `(a + b) mod modulus`.
    ///
    /// # Example
    ///
    /// ```
    /// # use zmatrix::ring::Ring;
    /// let ring = Ring::try_with(10).unwrap();
    /// assert_eq!(ring.add(7, 5), 2);
    /// assert_eq!(ring.add(-2, 5), 3);
    /// ```
    pub fn add(&self, a: i64, b: i64) -> i64 {
        let a_norm = self.normalize(a);
        let b_norm = self.normalize(b);

        self.normalize(a_norm.wrapping_add(b_norm))
    }

    /// Computes `(a - b) mod modulus`.
    ///
    /// # Example
    ///
    /// ```
    /// # use zmatrix::ring::Ring;
    /// let ring = Ring::try_with(10).unwrap();
    /// assert_eq!(ring.sub(7, 5), 2);
    /// assert_eq!(ring.sub(3, 5), 8);
    /// ```
    pub fn sub(&self, a: i64, b: i64) -> i64 {
        let a_norm = self.normalize(a);
        let b_norm = self.normalize(b);

        self.normalize(a_norm.wrapping_sub(b_norm))
    }

    /// Computes `(a * b) mod modulus`.
    ///
    /// Uses `i128` internally to prevent overflow during multiplication
    /// before the modulo operation.
    ///
    /// # Example
    ///
    /// ```
    /// # use zmatrix::ring::Ring;
    /// let ring = Ring::try_with(10).unwrap();
    /// assert_eq!(ring.mul(7, 5), 5);
    /// assert_eq!(ring.mul(-2, 6), 8);
    /// ```
    pub fn mul(&self, a: i64, b: i64) -> i64 {
        let a_norm = self.normalize(a);
        let b_norm = self.normalize(b);

        let result = (a_norm as i128 * b_norm as i128) % (self.modulus as i128);

        self.normalize(result as i64)
    }

    /// Computes the additive inverse `-a mod modulus`.
    ///
    /// # Example
    ///
    /// ```
    /// # use zmatrix::ring::Ring;
    /// let ring = Ring::try_with(10).unwrap();
    /// assert_eq!(ring.neg(3), 7);
    /// assert_eq!(ring.neg(0), 0);
    /// ```
    pub fn neg(&self, a: i64) -> i64 {
        self.sub(0, a)
    }

    /// Computes the modular multiplicative inverse `a^-1 mod modulus`.
    ///
    /// The inverse exists if and only if `gcd(a, modulus) == 1`.
    /// Uses the Extended Euclidean Algorithm.
    ///
    /// # Errors
    ///
    /// Returns `ZMatrixError::NoInverse` if the inverse does not exist
    /// (i.e., `gcd(a, modulus) != 1`), or if `a` is 0.
    ///
    /// # Example
    ///
    /// ```
    /// # use zmatrix::ring::Ring;
    /// let ring = Ring::try_with(10).unwrap();
    /// assert_eq!(ring.inv(3).unwrap(), 7); // 3 * 7 = 21 = 1 mod 10
    /// assert_eq!(ring.inv(9).unwrap(), 9); // 9 * 9 = 81 = 1 mod 10
    /// assert!(ring.inv(2).is_err()); // gcd(2, 10) = 2
    /// assert!(ring.inv(0).is_err());
    /// ```
    pub fn inv(&self, a: i64) -> Result<i64, ZMatrixError> {
        let a_norm = self.normalize(a);
        if a_norm == 0 && self.modulus > 1 {
            return Err(ZMatrixError::NoInverse(format!(
                "Cannot invert 0 in mod {}",
                self.modulus
            )));
        }

        let (g, x, _) = extended_gcd(a_norm, self.modulus);
        if g != 1 {
            return Err(ZMatrixError::NoInverse(format!(
                "Modular inverse does not exist for {} mod {} (gcd={})",
                a_norm, self.modulus, g
            )));
        }

        Ok(self.normalize(x))
    }
}

/// Normalization applied to every cell a matrix operation touches.
///
/// `Plain` leaves values untouched. `Modular` reduces each value to its
/// canonical representative in `[0, modulus)`.
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Norm {
    #[default]
    Plain,
    Modular(Ring),
}

impl Norm {
    /// Builds a modular policy, validating the modulus.
    ///
    /// # Errors
    ///
    /// Returns `ZMatrixError::InvalidModulus` unless `modulus >= 1`.
    pub fn modular(modulus: i64) -> Result<Self, ZMatrixError> {
        Ok(Norm::Modular(Ring::try_with(modulus)?))
    }

    /// Canonicalizes a single value under this policy.
    ///
    /// # Example
    ///
    /// ```
    /// # use zmatrix::ring::Norm;
    /// assert_eq!(Norm::Plain.apply(-7), -7);
    /// assert_eq!(Norm::modular(5).unwrap().apply(-7), 3);
    /// ```
    pub fn apply(&self, value: i64) -> i64 {
        match self {
            Norm::Plain => value,
            Norm::Modular(ring) => ring.normalize(value),
        }
    }

    /// The underlying ring, if this policy is modular.
    pub fn ring(&self) -> Option<&Ring> {
        match self {
            Norm::Plain => None,
            Norm::Modular(ring) => Some(ring),
        }
    }
}
