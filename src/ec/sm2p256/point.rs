//! Point operations on the SM2 curve
//!
//! Affine points carry an identity flag; arithmetic runs in Jacobian
//! coordinates (x = X/Z², y = Y/Z³) so that only the final conversion
//! back to affine pays for a field inversion.

use subtle::Choice;

use crate::ec::sm2p256::{
    constants::{SM2_B, SM2_FIELD_ELEMENT_SIZE, SM2_POINT_COMPRESSED_SIZE,
        SM2_POINT_UNCOMPRESSED_SIZE},
    field::FieldElement,
    scalar::Scalar,
};
use crate::error::{validate, Error, Result};

/// Format of a serialized curve point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointFormat {
    /// Uncompressed: 0x04 ∥ x ∥ y (65 bytes)
    Uncompressed,
    /// Compressed: 0x02/0x03 ∥ x (33 bytes)
    Compressed,
}

/// Affine point (x, y) on the SM2 curve, or the point at infinity
#[derive(Clone, Debug)]
pub struct Point {
    pub(crate) is_identity: Choice,
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
}

/// Jacobian coordinates (X : Y : Z) for intermediate arithmetic
#[derive(Clone, Debug)]
pub(crate) struct ProjectivePoint {
    pub(crate) is_identity: Choice,
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        let a_id: bool = self.is_identity.into();
        let b_id: bool = other.is_identity.into();
        if a_id || b_id {
            return a_id == b_id;
        }
        self.x == other.x && self.y == other.y
    }
}

impl Eq for Point {}

impl Point {
    /// Create an affine point from coordinate bytes, verifying the curve
    /// equation
    pub fn new_uncompressed(
        x_bytes: &[u8; SM2_FIELD_ELEMENT_SIZE],
        y_bytes: &[u8; SM2_FIELD_ELEMENT_SIZE],
    ) -> Result<Self> {
        let x = FieldElement::from_bytes(x_bytes).map_err(|_| Error::Key {
            context: "SM2 point",
            reason: "x-coordinate not in the field",
        })?;
        let y = FieldElement::from_bytes(y_bytes).map_err(|_| Error::Key {
            context: "SM2 point",
            reason: "y-coordinate not in the field",
        })?;
        if !Self::is_on_curve(&x, &y) {
            return Err(Error::Key {
                context: "SM2 point",
                reason: "point not on curve",
            });
        }
        Ok(Point {
            is_identity: Choice::from(0),
            x,
            y,
        })
    }

    /// The point at infinity
    pub fn identity() -> Self {
        Point {
            is_identity: Choice::from(1),
            x: FieldElement::zero(),
            y: FieldElement::zero(),
        }
    }

    /// Is this the point at infinity?
    pub fn is_identity(&self) -> bool {
        self.is_identity.into()
    }

    /// x-coordinate as big-endian bytes
    pub fn x_coordinate_bytes(&self) -> [u8; SM2_FIELD_ELEMENT_SIZE] {
        self.x.to_bytes()
    }

    /// y-coordinate as big-endian bytes
    pub fn y_coordinate_bytes(&self) -> [u8; SM2_FIELD_ELEMENT_SIZE] {
        self.y.to_bytes()
    }

    /// Classify a serialized point by prefix and length
    pub fn detect_format(bytes: &[u8]) -> Result<PointFormat> {
        if bytes.is_empty() {
            return Err(Error::Encoding {
                context: "SM2 point",
                reason: "empty encoding",
            });
        }
        match (bytes[0], bytes.len()) {
            (0x04, SM2_POINT_UNCOMPRESSED_SIZE) => Ok(PointFormat::Uncompressed),
            (0x02 | 0x03, SM2_POINT_COMPRESSED_SIZE) => Ok(PointFormat::Compressed),
            _ => Err(Error::Encoding {
                context: "SM2 point",
                reason: "unknown or malformed point format",
            }),
        }
    }

    /// Parse either serialized form, dispatching on the prefix
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        match Self::detect_format(bytes)? {
            PointFormat::Uncompressed => Self::deserialize_uncompressed(bytes),
            PointFormat::Compressed => Self::deserialize_compressed(bytes),
        }
    }

    /// Serialize as 0x04 ∥ x ∥ y
    ///
    /// The identity has no defined wire form and must not reach here.
    pub fn serialize_uncompressed(&self) -> [u8; SM2_POINT_UNCOMPRESSED_SIZE] {
        let mut out = [0u8; SM2_POINT_UNCOMPRESSED_SIZE];
        out[0] = 0x04;
        out[1..1 + SM2_FIELD_ELEMENT_SIZE].copy_from_slice(&self.x.to_bytes());
        out[1 + SM2_FIELD_ELEMENT_SIZE..].copy_from_slice(&self.y.to_bytes());
        out
    }

    /// Parse 0x04 ∥ x ∥ y, rejecting the identity and off-curve points
    pub fn deserialize_uncompressed(bytes: &[u8]) -> Result<Self> {
        validate::length("SM2 point", bytes.len(), SM2_POINT_UNCOMPRESSED_SIZE)?;
        if bytes[0] != 0x04 {
            return Err(Error::Encoding {
                context: "SM2 point",
                reason: "invalid prefix for uncompressed point",
            });
        }
        let mut xb = [0u8; SM2_FIELD_ELEMENT_SIZE];
        let mut yb = [0u8; SM2_FIELD_ELEMENT_SIZE];
        xb.copy_from_slice(&bytes[1..1 + SM2_FIELD_ELEMENT_SIZE]);
        yb.copy_from_slice(&bytes[1 + SM2_FIELD_ELEMENT_SIZE..]);
        Self::new_uncompressed(&xb, &yb)
    }

    /// Serialize as 0x02/0x03 ∥ x with the prefix carrying y's parity
    pub fn serialize_compressed(&self) -> [u8; SM2_POINT_COMPRESSED_SIZE] {
        let mut out = [0u8; SM2_POINT_COMPRESSED_SIZE];
        out[0] = if self.y.is_odd() { 0x03 } else { 0x02 };
        out[1..].copy_from_slice(&self.x.to_bytes());
        out
    }

    /// Parse 0x02/0x03 ∥ x, recovering y from the curve equation
    pub fn deserialize_compressed(bytes: &[u8]) -> Result<Self> {
        validate::length("SM2 compressed point", bytes.len(), SM2_POINT_COMPRESSED_SIZE)?;
        let tag = bytes[0];
        if tag != 0x02 && tag != 0x03 {
            return Err(Error::Encoding {
                context: "SM2 point",
                reason: "invalid prefix for compressed point",
            });
        }
        let mut xb = [0u8; SM2_FIELD_ELEMENT_SIZE];
        xb.copy_from_slice(&bytes[1..]);
        let x = FieldElement::from_bytes(&xb).map_err(|_| Error::Key {
            context: "SM2 point",
            reason: "x-coordinate not in the field",
        })?;

        let rhs = Self::curve_rhs(&x);
        let y_candidate = rhs.sqrt().map_err(|_| Error::Key {
            context: "SM2 point",
            reason: "x-coordinate has no point on the curve",
        })?;
        let y = if y_candidate.is_odd() == (tag == 0x03) {
            y_candidate
        } else {
            y_candidate.negate()
        };
        Ok(Point {
            is_identity: Choice::from(0),
            x,
            y,
        })
    }

    /// Group addition
    pub fn add(&self, other: &Self) -> Self {
        self.to_projective().add(&other.to_projective()).to_affine()
    }

    /// Point doubling: 2P
    pub fn double(&self) -> Self {
        self.to_projective().double().to_affine()
    }

    /// Group negation: (x, −y)
    pub fn negate(&self) -> Self {
        Point {
            is_identity: self.is_identity,
            x: self.x.clone(),
            y: self.y.negate(),
        }
    }

    /// Scalar multiplication: scalar · self
    ///
    /// Left-to-right binary ladder over all 256 scalar bits. The loop
    /// runs a fixed number of iterations regardless of the scalar value;
    /// the per-bit conditional add still branches on scalar bits, so this
    /// is balanced at the iteration level only.
    pub fn mul(&self, scalar: &Scalar) -> Self {
        let base = self.to_projective();
        let mut acc = ProjectivePoint::identity();
        for &byte in scalar.as_secret_buffer().as_ref().iter() {
            for bit in (0..8).rev() {
                acc = acc.double();
                if (byte >> bit) & 1 == 1 {
                    acc = acc.add(&base);
                }
            }
        }
        acc.to_affine()
    }

    /// Right-hand side of the curve equation: x³ + ax + b
    fn curve_rhs(x: &FieldElement) -> FieldElement {
        let x3 = x.square().mul(x);
        let a = FieldElement(FieldElement::A_M3);
        let mut bb = [0u8; SM2_FIELD_ELEMENT_SIZE];
        bb.copy_from_slice(&SM2_B);
        let b = FieldElement::from_bytes(&bb).expect("curve coefficient b is canonical");
        x3.add(&a.mul(x)).add(&b)
    }

    /// Does (x, y) satisfy the curve equation?
    fn is_on_curve(x: &FieldElement, y: &FieldElement) -> bool {
        y.square() == Self::curve_rhs(x)
    }

    fn to_projective(&self) -> ProjectivePoint {
        if self.is_identity() {
            ProjectivePoint::identity()
        } else {
            ProjectivePoint {
                is_identity: Choice::from(0),
                x: self.x.clone(),
                y: self.y.clone(),
                z: FieldElement::one(),
            }
        }
    }
}

impl ProjectivePoint {
    /// Identity in Jacobian form: (0 : 1 : 0)
    pub fn identity() -> Self {
        ProjectivePoint {
            is_identity: Choice::from(1),
            x: FieldElement::zero(),
            y: FieldElement::one(),
            z: FieldElement::zero(),
        }
    }

    /// Jacobian point addition
    pub fn add(&self, other: &Self) -> Self {
        if self.is_identity.into() {
            return other.clone();
        }
        if other.is_identity.into() {
            return self.clone();
        }

        let z1_sq = self.z.square();
        let z2_sq = other.z.square();
        let z1_cu = z1_sq.mul(&self.z);
        let z2_cu = z2_sq.mul(&other.z);

        let u1 = self.x.mul(&z2_sq); // X₁·Z₂²
        let u2 = other.x.mul(&z1_sq); // X₂·Z₁²
        let s1 = self.y.mul(&z2_cu); // Y₁·Z₂³
        let s2 = other.y.mul(&z1_cu); // Y₂·Z₁³

        let h = u2.sub(&u1);
        let r = s2.sub(&s1);

        if h.is_zero() {
            if r.is_zero() {
                return self.double();
            }
            return ProjectivePoint::identity();
        }

        let h2 = h.square();
        let h3 = h2.mul(&h);
        let v = u1.mul(&h2);

        // X₃ = r² − h³ − 2v
        let two_v = v.add(&v);
        let x3 = r.square().sub(&h3).sub(&two_v);

        // Y₃ = r·(v − X₃) − s₁·h³
        let y3 = r.mul(&v.sub(&x3)).sub(&s1.mul(&h3));

        // Z₃ = Z₁·Z₂·h
        let z3 = self.z.mul(&other.z).mul(&h);

        ProjectivePoint {
            is_identity: Choice::from(0),
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Jacobian point doubling with the a = −3 formulas
    pub fn double(&self) -> Self {
        if self.is_identity.into() {
            return self.clone();
        }
        if self.y.is_zero() {
            return ProjectivePoint::identity();
        }

        //   δ = Z², γ = Y², β = X·γ, α = 3·(X − δ)·(X + δ)
        let delta = self.z.square();
        let gamma = self.y.square();
        let beta = self.x.mul(&gamma);

        let t1 = self.x.add(&delta);
        let t2 = self.x.sub(&delta);
        let alpha = t1.mul(&t2).mul(&FieldElement::from_u32(3));

        // X₃ = α² − 8β
        let four_beta = beta.add(&beta).add(&beta.add(&beta));
        let eight_beta = four_beta.add(&four_beta);
        let x3 = alpha.square().sub(&eight_beta);

        // Z₃ = (Y + Z)² − γ − δ
        let z3 = self.y.add(&self.z).square().sub(&gamma).sub(&delta);

        // Y₃ = α·(4β − X₃) − 8γ²
        let gamma_sq = gamma.square();
        let four_gamma_sq = gamma_sq.add(&gamma_sq).add(&gamma_sq.add(&gamma_sq));
        let eight_gamma_sq = four_gamma_sq.add(&four_gamma_sq);
        let y3 = alpha.mul(&four_beta.sub(&x3)).sub(&eight_gamma_sq);

        ProjectivePoint {
            is_identity: Choice::from(0),
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Convert back to affine coordinates
    pub fn to_affine(&self) -> Point {
        if self.is_identity.into() {
            return Point::identity();
        }
        let z_inv = self.z.invert().expect("nonzero Z is invertible");
        let z_inv_sq = z_inv.square();
        let z_inv_cu = z_inv_sq.mul(&z_inv);
        Point {
            is_identity: Choice::from(0),
            x: self.x.mul(&z_inv_sq),
            y: self.y.mul(&z_inv_cu),
        }
    }
}
