//! SM2 public-key algorithms (GM/T 0003)
//!
//! Keypair handling plus the protocols built on the recommended curve:
//! signatures ([`dsa`]), public-key encryption ([`pke`]), authenticated
//! key agreement ([`exchange`]), the identifier hash ([`distid`]) and
//! the counter-mode KDF ([`kdf`]).
//!
//! Keys cross the API either as byte arrays (32-byte big-endian scalars,
//! 65-byte uncompressed points) or as lowercase hex of the same.

pub mod distid;
pub mod dsa;
pub mod exchange;
pub mod kdf;
pub mod pke;

pub use distid::DEFAULT_ID;
pub use dsa::Signature;
pub use pke::CiphertextLayout;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::ec::sm2p256::{
    scalar_mult, scalar_mult_base_g, Point, Scalar, SM2_POINT_UNCOMPRESSED_SIZE, SM2_SCALAR_SIZE,
};
use crate::error::{Error, Result};

/// An SM2 keypair: secret scalar d and public point P = d·G
#[derive(Clone, Debug)]
pub struct KeyPair {
    secret: Scalar,
    public: Point,
}

impl KeyPair {
    /// Generate a keypair from the platform CSPRNG
    ///
    /// Fails rather than degrades when the generator cannot supply
    /// entropy.
    pub fn generate() -> Result<Self> {
        Self::generate_with(&mut OsRng)
    }

    /// Generate a keypair from the supplied cryptographic RNG
    pub fn generate_with<R: CryptoRng + RngCore>(rng: &mut R) -> Result<Self> {
        let (secret, public) = crate::ec::sm2p256::generate_keypair(rng)?;
        Ok(KeyPair { secret, public })
    }

    /// Rebuild a keypair from a stored 32-byte private key
    pub fn from_secret_bytes(bytes: &[u8]) -> Result<Self> {
        let secret = Scalar::from_slice(bytes)?;
        if secret.is_zero() {
            return Err(Error::Key {
                context: "SM2 keypair",
                reason: "private key is zero",
            });
        }
        let public = scalar_mult_base_g(&secret);
        Ok(KeyPair { secret, public })
    }

    /// Rebuild a keypair from a private key in hex
    pub fn from_secret_hex(hex_str: &str) -> Result<Self> {
        let mut bytes = hex::decode(hex_str).map_err(|_| Error::Encoding {
            context: "SM2 private key",
            reason: "invalid hexadecimal",
        })?;
        let result = Self::from_secret_bytes(&bytes);
        bytes.zeroize();
        result
    }

    /// The secret scalar
    pub fn secret_scalar(&self) -> &Scalar {
        &self.secret
    }

    /// The public point
    pub fn public_point(&self) -> &Point {
        &self.public
    }

    /// Private key as 32 big-endian bytes
    pub fn secret_bytes(&self) -> [u8; SM2_SCALAR_SIZE] {
        self.secret.to_bytes()
    }

    /// Private key as lowercase hex
    pub fn secret_hex(&self) -> String {
        hex::encode(self.secret_bytes())
    }

    /// Public key in uncompressed form (04 ‖ x ‖ y)
    pub fn public_bytes(&self) -> [u8; SM2_POINT_UNCOMPRESSED_SIZE] {
        self.public.serialize_uncompressed()
    }

    /// Public key as lowercase hex of the uncompressed form
    pub fn public_hex(&self) -> String {
        hex::encode(self.public_bytes())
    }
}

/// Parse a public key from its uncompressed or compressed serialization
pub fn public_key_from_bytes(bytes: &[u8]) -> Result<Point> {
    Point::deserialize(bytes)
}

/// Parse a public key from hex (uncompressed or compressed form)
pub fn public_key_from_hex(hex_str: &str) -> Result<Point> {
    let bytes = hex::decode(hex_str).map_err(|_| Error::Encoding {
        context: "SM2 public key",
        reason: "invalid hexadecimal",
    })?;
    Point::deserialize(&bytes)
}

/// Raw elliptic-curve Diffie–Hellman: the x-coordinate of d·P
///
/// A building block for callers that run their own KDF; the full
/// authenticated exchange lives in [`exchange`].
pub fn ecdh(secret: &Scalar, peer_public: &Point) -> Result<[u8; 32]> {
    if secret.is_zero() {
        return Err(Error::Key {
            context: "SM2 ECDH",
            reason: "private key is zero",
        });
    }
    if peer_public.is_identity() {
        return Err(Error::Key {
            context: "SM2 ECDH",
            reason: "peer public key is the point at infinity",
        });
    }
    let shared = scalar_mult(secret, peer_public);
    if shared.is_identity() {
        return Err(Error::Key {
            context: "SM2 ECDH",
            reason: "shared point is the point at infinity",
        });
    }
    Ok(shared.x_coordinate_bytes())
}

#[cfg(test)]
mod tests;
