//! SM2 public-key encryption (GM/T 0003.4)
//!
//! A ciphertext carries an ephemeral point C1, an SM3 integrity tag C3
//! over `x₂ ‖ M ‖ y₂`, and the KDF-masked message C2. The current
//! standard orders them C1 ‖ C3 ‖ C2; the legacy C1 ‖ C2 ‖ C3 layout is
//! still selectable for interoperability, and nothing in the ciphertext
//! records which was used.

use rand::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;

use crate::ec::sm2p256::{
    scalar_mult, scalar_mult_base_g, Point, Scalar, SM2_POINT_UNCOMPRESSED_SIZE,
};
use crate::error::{Error, Result};
use crate::hash::{HashFunction, Sm3};
use crate::sm2::kdf::{is_all_zero, kdf};

/// SM3 tag length in a ciphertext
const C3_SIZE: usize = 32;

/// Ordering of the C1/C2/C3 components on the wire
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CiphertextLayout {
    /// C1 ‖ C3 ‖ C2, mandated by the current standard
    #[default]
    C1C3C2,
    /// C1 ‖ C2 ‖ C3, the legacy ordering
    C1C2C3,
}

/// Encrypt `msg` to the public key `public`
pub fn encrypt<R: CryptoRng + RngCore>(
    rng: &mut R,
    msg: &[u8],
    public: &Point,
    layout: CiphertextLayout,
) -> Result<Vec<u8>> {
    if public.is_identity() {
        return Err(Error::Key {
            context: "SM2 encrypt",
            reason: "public key is the point at infinity",
        });
    }

    loop {
        let k = Scalar::random(rng)?;
        if let Some(ct) = encrypt_with_k(msg, public, layout, &k)? {
            return Ok(ct);
        }
    }
}

/// One encryption attempt with a fixed ephemeral scalar; `None` requests
/// a retry (the KDF produced an all-zero mask)
fn encrypt_with_k(
    msg: &[u8],
    public: &Point,
    layout: CiphertextLayout,
    k: &Scalar,
) -> Result<Option<Vec<u8>>> {
    let c1 = scalar_mult_base_g(k);

    let shared = scalar_mult(k, public);
    if shared.is_identity() {
        return Err(Error::Key {
            context: "SM2 encrypt",
            reason: "shared point is the point at infinity",
        });
    }
    let x2 = shared.x_coordinate_bytes();
    let y2 = shared.y_coordinate_bytes();

    let mut z = Vec::with_capacity(64);
    z.extend_from_slice(&x2);
    z.extend_from_slice(&y2);
    let t = kdf(&z, msg.len())?;
    if is_all_zero(&t) {
        return Ok(None);
    }

    let mut c2 = Vec::with_capacity(msg.len());
    for (m, mask) in msg.iter().zip(t.iter()) {
        c2.push(m ^ mask);
    }

    let mut hasher = Sm3::new();
    hasher.update(&x2)?;
    hasher.update(msg)?;
    hasher.update(&y2)?;
    let c3 = hasher.finalize()?;

    let mut out = Vec::with_capacity(SM2_POINT_UNCOMPRESSED_SIZE + C3_SIZE + c2.len());
    out.extend_from_slice(&c1.serialize_uncompressed());
    match layout {
        CiphertextLayout::C1C3C2 => {
            out.extend_from_slice(c3.as_ref());
            out.extend_from_slice(&c2);
        }
        CiphertextLayout::C1C2C3 => {
            out.extend_from_slice(&c2);
            out.extend_from_slice(c3.as_ref());
        }
    }
    Ok(Some(out))
}

/// Decrypt `ct` with the private key `d`
pub fn decrypt(d: &Scalar, ct: &[u8], layout: CiphertextLayout) -> Result<Vec<u8>> {
    if ct.len() < SM2_POINT_UNCOMPRESSED_SIZE + C3_SIZE {
        return Err(Error::Ciphertext {
            context: "SM2 decrypt",
            reason: "ciphertext shorter than C1 and C3",
        });
    }
    if d.is_zero() {
        return Err(Error::Key {
            context: "SM2 decrypt",
            reason: "private key is zero",
        });
    }

    let c1 = Point::deserialize_uncompressed(&ct[..SM2_POINT_UNCOMPRESSED_SIZE]).map_err(|_| {
        Error::Ciphertext {
            context: "SM2 decrypt",
            reason: "C1 is not a valid curve point",
        }
    })?;

    let rest = &ct[SM2_POINT_UNCOMPRESSED_SIZE..];
    let (c3, c2) = match layout {
        CiphertextLayout::C1C3C2 => {
            let (c3, c2) = rest.split_at(C3_SIZE);
            (c3, c2)
        }
        CiphertextLayout::C1C2C3 => {
            let (c2, c3) = rest.split_at(rest.len() - C3_SIZE);
            (c3, c2)
        }
    };

    let shared = scalar_mult(d, &c1);
    if shared.is_identity() {
        return Err(Error::Ciphertext {
            context: "SM2 decrypt",
            reason: "shared point is the point at infinity",
        });
    }
    let x2 = shared.x_coordinate_bytes();
    let y2 = shared.y_coordinate_bytes();

    let mut z = Vec::with_capacity(64);
    z.extend_from_slice(&x2);
    z.extend_from_slice(&y2);
    let t = kdf(&z, c2.len())?;
    if is_all_zero(&t) {
        return Err(Error::Ciphertext {
            context: "SM2 decrypt",
            reason: "derived mask is all zero",
        });
    }

    let mut msg = Vec::with_capacity(c2.len());
    for (c, mask) in c2.iter().zip(t.iter()) {
        msg.push(c ^ mask);
    }

    let mut hasher = Sm3::new();
    hasher.update(&x2)?;
    hasher.update(&msg)?;
    hasher.update(&y2)?;
    let expected = hasher.finalize()?;

    if expected.as_ref().ct_eq(c3).unwrap_u8() != 1 {
        return Err(Error::Ciphertext {
            context: "SM2 decrypt",
            reason: "integrity tag mismatch",
        });
    }

    Ok(msg)
}
