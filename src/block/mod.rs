//! Block cipher traits and implementations
//!
//! The crate ships the GM/T 0002 SM4 cipher plus generic ECB/CBC modes
//! and PKCS#7 padding. The trait surface keeps the modes independent of
//! the concrete cipher.

pub mod modes;
pub mod padding;
pub mod sm4;

pub use modes::{Cbc, Ecb};
pub use padding::Padding;
pub use sm4::Sm4;

use crate::error::Result;

/// Marker trait describing a block cipher's static parameters
pub trait CipherAlgorithm {
    /// Key size in bytes
    const KEY_SIZE: usize;

    /// Block size in bytes
    const BLOCK_SIZE: usize;

    /// Human-readable algorithm identifier
    fn name() -> &'static str;

    /// Block size in bytes
    fn block_size() -> usize {
        Self::BLOCK_SIZE
    }

    /// Key size in bytes
    fn key_size() -> usize {
        Self::KEY_SIZE
    }
}

/// Trait for block ciphers operating on a single block in place
pub trait BlockCipher: CipherAlgorithm {
    /// Marker type describing the algorithm this cipher implements
    type Algorithm: CipherAlgorithm;

    /// Key type accepted by [`new`](BlockCipher::new)
    type Key;

    /// Expand `key` into a cipher instance
    fn new(key: &Self::Key) -> Self;

    /// Encrypt one block in place; `block` must be exactly
    /// [`BLOCK_SIZE`](CipherAlgorithm::BLOCK_SIZE) bytes
    fn encrypt_block(&self, block: &mut [u8]) -> Result<()>;

    /// Decrypt one block in place
    fn decrypt_block(&self, block: &mut [u8]) -> Result<()>;
}
