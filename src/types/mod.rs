//! Small value types shared across the primitives
//!
//! Fixed-size wrappers with compile-time length guarantees: hash outputs
//! ([`Digest`]), initialization vectors ([`Nonce`]), and symmetric keys
//! ([`SecretBytes`]).

mod digest;
mod key;
mod nonce;

pub use digest::Digest;
pub use key::SecretBytes;
pub use nonce::Nonce;
