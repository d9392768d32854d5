//! Hash function traits and implementations
//!
//! The crate ships the GM/T 0004 SM3 hash. The trait surface is generic so
//! that the HMAC and HKDF layers stay independent of the concrete hash.

pub mod sm3;

pub use sm3::Sm3;

use crate::error::Result;

/// Marker trait describing a hash algorithm's static parameters
pub trait HashAlgorithm {
    /// Digest size in bytes
    const OUTPUT_SIZE: usize;

    /// Internal block size in bytes
    const BLOCK_SIZE: usize;

    /// Human-readable algorithm identifier
    const ALGORITHM_ID: &'static str;
}

/// Trait for streaming cryptographic hash functions
pub trait HashFunction {
    /// The algorithm this hash implements
    type Algorithm: HashAlgorithm;

    /// Digest type produced by [`finalize`](HashFunction::finalize)
    type Output: AsRef<[u8]> + Clone;

    /// Create a fresh hash state
    fn new() -> Self;

    /// Absorb `data` into the state
    fn update(&mut self, data: &[u8]) -> Result<&mut Self>;

    /// Finish the computation and emit the digest
    ///
    /// The state is scrubbed afterwards; reuse requires a new instance.
    fn finalize(&mut self) -> Result<Self::Output>;

    /// Digest size in bytes
    fn output_size() -> usize {
        <Self::Algorithm as HashAlgorithm>::OUTPUT_SIZE
    }

    /// Block size in bytes
    fn block_size() -> usize {
        <Self::Algorithm as HashAlgorithm>::BLOCK_SIZE
    }

    /// Algorithm name
    fn name() -> &'static str {
        <Self::Algorithm as HashAlgorithm>::ALGORITHM_ID
    }

    /// Hash `data` in a single call
    fn digest(data: &[u8]) -> Result<Self::Output>
    where
        Self: Sized,
    {
        let mut hasher = Self::new();
        hasher.update(data)?;
        hasher.finalize()
    }
}
