//! SM2 digital signature (GM/T 0003.2)
//!
//! Signing binds the signer's identifier into the hashed message via the
//! Z value, then produces `(r, s)` over the group order. Verification
//! reports forgery as `Ok(false)`; errors are reserved for malformed
//! inputs and unusable keys.

use rand::{CryptoRng, RngCore};

use crate::ec::sm2p256::{scalar_mult, scalar_mult_base_g, Point, Scalar, SM2_SCALAR_SIZE};
use crate::error::{validate, Error, Result};
use crate::hash::{HashFunction, Sm3};
use crate::sm2::distid::z_value;

mod der;

/// An SM2 signature: the pair (r, s), each in [1, n−1]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    r: Scalar,
    s: Scalar,
}

impl Signature {
    /// Raw serialized length: r ‖ s as two 32-byte big-endian fields
    pub const BYTE_SIZE: usize = 2 * SM2_SCALAR_SIZE;

    pub(crate) fn new(r: Scalar, s: Scalar) -> Self {
        Signature { r, s }
    }

    /// r component as big-endian bytes
    pub fn r_bytes(&self) -> [u8; SM2_SCALAR_SIZE] {
        self.r.to_bytes()
    }

    /// s component as big-endian bytes
    pub fn s_bytes(&self) -> [u8; SM2_SCALAR_SIZE] {
        self.s.to_bytes()
    }

    /// Serialize as r ‖ s (64 bytes)
    pub fn to_bytes(&self) -> [u8; Self::BYTE_SIZE] {
        let mut out = [0u8; Self::BYTE_SIZE];
        out[..SM2_SCALAR_SIZE].copy_from_slice(&self.r.to_bytes());
        out[SM2_SCALAR_SIZE..].copy_from_slice(&self.s.to_bytes());
        out
    }

    /// Parse an r ‖ s serialization; components must be in [1, n−1]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        validate::length("SM2 signature", bytes.len(), Self::BYTE_SIZE)?;
        let r = Scalar::from_slice(&bytes[..SM2_SCALAR_SIZE])?;
        let s = Scalar::from_slice(&bytes[SM2_SCALAR_SIZE..])?;
        if r.is_zero() || s.is_zero() {
            return Err(Error::Encoding {
                context: "SM2 signature",
                reason: "signature component is zero",
            });
        }
        Ok(Signature { r, s })
    }

    /// Serialize as lowercase hex of r ‖ s
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Parse the hex form of r ‖ s
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let bytes = hex::decode(hex_str).map_err(|_| Error::Encoding {
            context: "SM2 signature",
            reason: "invalid hexadecimal",
        })?;
        Self::from_bytes(&bytes)
    }
}

/// Hash `msg` with the signer's Z value: e = SM3(Z ‖ msg)
fn message_digest(msg: &[u8], public: &Point, id: Option<&[u8]>) -> Result<[u8; 32]> {
    let z = z_value(id, public)?;
    let mut hasher = Sm3::new();
    hasher.update(&z)?;
    hasher.update(msg)?;
    Ok(hasher.finalize()?.into_bytes())
}

/// Sign `msg` with the private key `d`, prepending the Z value for `id`
pub fn sign<R: CryptoRng + RngCore>(
    rng: &mut R,
    msg: &[u8],
    d: &Scalar,
    id: Option<&[u8]>,
) -> Result<Signature> {
    let public = scalar_mult_base_g(d);
    let digest = message_digest(msg, &public, id)?;
    sign_prehashed(rng, &digest, d)
}

/// Sign a caller-computed SM3 digest directly (no Z value is prepended)
pub fn sign_prehashed<R: CryptoRng + RngCore>(
    rng: &mut R,
    digest: &[u8; 32],
    d: &Scalar,
) -> Result<Signature> {
    loop {
        let k = Scalar::random(rng)?;
        if let Some(sig) = sign_with_k(digest, d, &k)? {
            return Ok(sig);
        }
    }
}

/// One signing attempt with a fixed nonce; `None` requests a retry
///
/// Split out so known-answer tests can drive the standard's fixed-k
/// vectors through the exact production path.
fn sign_with_k(digest: &[u8; 32], d: &Scalar, k: &Scalar) -> Result<Option<Signature>> {
    if d.is_zero() {
        return Err(Error::Key {
            context: "SM2 sign",
            reason: "private key is zero",
        });
    }
    // (1 + d) must be invertible; d = n − 1 has no valid signatures.
    let inv_1d = Scalar::one().add_mod_n(d).invert().map_err(|_| Error::Key {
        context: "SM2 sign",
        reason: "private key admits no signature",
    })?;

    let e = Scalar::reduce_bytes(digest);

    let p1 = scalar_mult_base_g(k);
    let x1 = Scalar::reduce_bytes(&p1.x_coordinate_bytes());

    let r = e.add_mod_n(&x1);
    // Retry when r = 0 or r + k = n (the latter makes r + k vanish mod n).
    if r.is_zero() || r.add_mod_n(k).is_zero() {
        return Ok(None);
    }

    let s = inv_1d.mul_mod_n(&k.sub_mod_n(&r.mul_mod_n(d)));
    if s.is_zero() {
        return Ok(None);
    }

    Ok(Some(Signature::new(r, s)))
}

/// Verify `sig` over `msg` against `public`, using the Z value for `id`
///
/// Returns `Ok(false)` for any failed cryptographic check; `Err` only
/// for unusable inputs such as an identity public key.
pub fn verify(msg: &[u8], sig: &Signature, public: &Point, id: Option<&[u8]>) -> Result<bool> {
    let digest = message_digest(msg, public, id)?;
    verify_prehashed(&digest, sig, public)
}

/// Verify against a caller-computed SM3 digest (no Z value is prepended)
pub fn verify_prehashed(digest: &[u8; 32], sig: &Signature, public: &Point) -> Result<bool> {
    if public.is_identity() {
        return Err(Error::Key {
            context: "SM2 verify",
            reason: "public key is the point at infinity",
        });
    }
    if sig.r.is_zero() || sig.s.is_zero() {
        return Ok(false);
    }

    let e = Scalar::reduce_bytes(digest);

    let t = sig.r.add_mod_n(&sig.s);
    if t.is_zero() {
        return Ok(false);
    }

    let p = scalar_mult_base_g(&sig.s).add(&scalar_mult(&t, public));
    if p.is_identity() {
        return Ok(false);
    }

    let x1 = Scalar::reduce_bytes(&p.x_coordinate_bytes());
    Ok(e.add_mod_n(&x1) == sig.r)
}

#[cfg(test)]
mod tests;
