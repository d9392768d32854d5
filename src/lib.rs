//! GM/T commercial cryptography suite
//!
//! Implements the Chinese commercial cryptographic algorithms for
//! interoperability with systems that mandate them:
//!
//! - **SM3** (GM/T 0004): 256-bit hash, plus HMAC-SM3 and HKDF-SM3
//! - **SM4** (GM/T 0002): 128-bit block cipher with ECB/CBC modes and
//!   PKCS#7 padding
//! - **SM2** (GM/T 0003): elliptic-curve keypairs, signatures with the
//!   identifier-binding Z value, public-key encryption (C1C3C2 and the
//!   legacy C1C2C3 layout), two-party authenticated key agreement, and
//!   raw ECDH
//!
//! All cryptographic inputs and outputs cross the API as byte slices;
//! hex helpers sit alongside for callers that interchange hex strings.
//! Curve parameters and cipher tables are compile-time constants; the
//! library keeps no process-wide state and every operation is reentrant.
//!
//! Key-producing operations are generic over `rand`'s `CryptoRng` and
//! the convenience entry points bind the operating system's CSPRNG. An
//! entropy failure surfaces as [`Error::Random`](error::Error::Random);
//! nothing falls back to a weaker generator.
//!
//! # Side-channel posture
//!
//! Field and scalar arithmetic avoid secret-dependent early exits and
//! the scalar-multiplication ladder always walks all 256 bits, but the
//! per-bit conditional add, the SM4 S-box table and the retry loops in
//! signing and encryption still branch on or index by secret-derived
//! data. Machine-level constant-time guarantees are out of scope.
//!
//! # Example
//!
//! ```
//! use gmcrypt::sm2::{self, KeyPair, CiphertextLayout};
//! use rand::rngs::OsRng;
//!
//! # fn main() -> gmcrypt::error::Result<()> {
//! let alice = KeyPair::generate()?;
//!
//! let sig = sm2::dsa::sign(&mut OsRng, b"payload", alice.secret_scalar(), None)?;
//! assert!(sm2::dsa::verify(b"payload", &sig, alice.public_point(), None)?);
//!
//! let ct = sm2::pke::encrypt(
//!     &mut OsRng,
//!     b"secret",
//!     alice.public_point(),
//!     CiphertextLayout::C1C3C2,
//! )?;
//! assert_eq!(
//!     sm2::pke::decrypt(alice.secret_scalar(), &ct, CiphertextLayout::C1C3C2)?,
//!     b"secret"
//! );
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(rust_2018_idioms, unused_qualifications)]

pub mod error;
pub use error::{Error, Result};

pub mod security;
pub use security::{EphemeralSecret, SecretBuffer};

pub mod types;
pub use types::{Digest, Nonce, SecretBytes};

pub mod hash;
pub use hash::{HashFunction, Sm3};

pub mod mac;
pub use mac::Hmac;

pub mod kdf;
pub use kdf::Hkdf;

pub mod block;
pub use block::{Cbc, Ecb, Padding, Sm4};

pub mod ec;

pub mod sm2;
pub use sm2::{CiphertextLayout, KeyPair, Signature};

pub mod encoding;
