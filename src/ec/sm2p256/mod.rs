//! SM2 recommended curve primitives
//!
//! The 256-bit prime curve from GM/T 0003.5: y² = x³ − 3x + b over 𝔽ₚ,
//! cofactor 1. Implements:
//! - generalized-Mersenne reduction for 𝔽ₚ,
//! - Jacobian projective coordinates for point operations,
//! - fixed-iteration scalar multiplication,
//! - uncompressed and compressed point serialization.

mod constants;
mod field;
mod point;
mod scalar;

pub use constants::{
    SM2_A, SM2_B, SM2_FIELD_ELEMENT_SIZE, SM2_GX, SM2_GY, SM2_N, SM2_P,
    SM2_POINT_COMPRESSED_SIZE, SM2_POINT_UNCOMPRESSED_SIZE, SM2_SCALAR_SIZE,
};
pub use field::FieldElement;
pub use point::{Point, PointFormat};
pub use scalar::Scalar;

use crate::error::Result;
use rand::{CryptoRng, RngCore};

/// The standard base point G of the SM2 curve
pub fn base_point_g() -> Point {
    Point::new_uncompressed(&SM2_GX, &SM2_GY).expect("standard base point is valid")
}

/// Scalar multiplication with the base point: scalar · G
pub fn scalar_mult_base_g(scalar: &Scalar) -> Point {
    base_point_g().mul(scalar)
}

/// General scalar multiplication: scalar · point
pub fn scalar_mult(scalar: &Scalar, point: &Point) -> Point {
    if point.is_identity() {
        Point::identity()
    } else {
        point.mul(scalar)
    }
}

/// Generate a keypair: d uniform in [1, n−1], P = d·G
pub fn generate_keypair<R: CryptoRng + RngCore>(rng: &mut R) -> Result<(Scalar, Point)> {
    let d = Scalar::random(rng)?;
    let public = scalar_mult_base_g(&d);
    Ok((d, public))
}

#[cfg(test)]
mod tests;
