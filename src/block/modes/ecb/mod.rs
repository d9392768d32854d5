//! Electronic Codebook (ECB) mode
//!
//! Encrypts each block independently. No IV, no diffusion between blocks;
//! identical plaintext blocks produce identical ciphertext blocks. Input
//! must already be block-aligned; padding is the caller's concern.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::block::{BlockCipher, CipherAlgorithm};
use crate::error::{Error, Result};

/// ECB mode over the block cipher `B`
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Ecb<B: BlockCipher + Zeroize + ZeroizeOnDrop> {
    cipher: B,
}

impl<B: BlockCipher + CipherAlgorithm + Zeroize + ZeroizeOnDrop> Ecb<B> {
    /// Create an ECB instance
    pub fn new(cipher: B) -> Self {
        Self { cipher }
    }

    /// Encrypt a block-aligned message
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let block_size = B::block_size();
        if plaintext.len() % block_size != 0 {
            return Err(Error::Length {
                context: "ECB plaintext",
                expected: plaintext.len().next_multiple_of(block_size),
                actual: plaintext.len(),
            });
        }

        let mut ciphertext = Vec::with_capacity(plaintext.len());
        for chunk in plaintext.chunks(block_size) {
            let mut block = [0u8; 16]; // SM4 block size
            block[..chunk.len()].copy_from_slice(chunk);
            self.cipher.encrypt_block(&mut block)?;
            ciphertext.extend_from_slice(&block);
        }

        Ok(ciphertext)
    }

    /// Decrypt a block-aligned message
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let block_size = B::block_size();
        if ciphertext.len() % block_size != 0 {
            return Err(Error::Length {
                context: "ECB ciphertext",
                expected: ciphertext.len().next_multiple_of(block_size),
                actual: ciphertext.len(),
            });
        }

        let mut plaintext = Vec::with_capacity(ciphertext.len());
        for chunk in ciphertext.chunks(block_size) {
            let mut block = [0u8; 16]; // SM4 block size
            block[..chunk.len()].copy_from_slice(chunk);
            self.cipher.decrypt_block(&mut block)?;
            plaintext.extend_from_slice(&block);
        }

        Ok(plaintext)
    }
}

#[cfg(test)]
mod tests;
