//! Key derivation functions
//!
//! HKDF (RFC 5869) over any [`HashFunction`](crate::hash::HashFunction);
//! the GM/T 0003.4 counter-mode KDF used by the SM2 protocols lives in
//! [`crate::sm2::kdf`] next to its callers.

pub mod hkdf;

pub use hkdf::Hkdf;
