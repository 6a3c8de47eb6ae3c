//! # Ring Module
//!
//! Provides the [`Ring`] struct for representing finite rings Z_m and
//! performing modular arithmetic, and the [`Norm`] policy that decides
//! whether matrix cells are reduced into `[0, modulus)` or left untouched.

pub mod helper;
pub mod math;

pub use helper::{extended_gcd, gcd};
pub use math::{Norm, Ring};
