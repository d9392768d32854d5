//! Cipher Block Chaining (CBC) mode
//!
//! Each plaintext block is XORed with the previous ciphertext block (the
//! IV for the first block) before encryption. Input must already be
//! block-aligned; padding is the caller's concern.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::block::{BlockCipher, CipherAlgorithm};
use crate::error::{validate, Error, Result};
use crate::types::Nonce;

/// CBC mode over the block cipher `B`
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Cbc<B: BlockCipher + Zeroize + ZeroizeOnDrop> {
    cipher: B,
    iv: Vec<u8>,
}

impl<B: BlockCipher + CipherAlgorithm + Zeroize + ZeroizeOnDrop> Cbc<B> {
    /// Create a CBC instance; the IV size must match the cipher block size
    pub fn new<const N: usize>(cipher: B, iv: &Nonce<N>) -> Result<Self> {
        validate::length("CBC initialization vector", N, B::block_size())?;

        Ok(Self {
            cipher,
            iv: iv.as_ref().to_vec(),
        })
    }

    /// Encrypt a block-aligned message
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let block_size = B::block_size();
        if plaintext.len() % block_size != 0 {
            return Err(Error::Length {
                context: "CBC plaintext",
                expected: plaintext.len().next_multiple_of(block_size),
                actual: plaintext.len(),
            });
        }

        let mut ciphertext = Vec::with_capacity(plaintext.len());
        let mut prev = self.iv.clone();

        for chunk in plaintext.chunks(block_size) {
            let mut block = [0u8; 16]; // SM4 block size
            block[..chunk.len()].copy_from_slice(chunk);

            for (b, p) in block.iter_mut().zip(prev.iter()) {
                *b ^= p;
            }

            self.cipher.encrypt_block(&mut block)?;

            ciphertext.extend_from_slice(&block);
            prev.copy_from_slice(&block);
        }

        Ok(ciphertext)
    }

    /// Decrypt a block-aligned message
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let block_size = B::block_size();
        if ciphertext.len() % block_size != 0 {
            return Err(Error::Length {
                context: "CBC ciphertext",
                expected: ciphertext.len().next_multiple_of(block_size),
                actual: ciphertext.len(),
            });
        }

        let mut plaintext = Vec::with_capacity(ciphertext.len());
        let mut prev = self.iv.clone();

        for chunk in ciphertext.chunks(block_size) {
            let mut block = [0u8; 16]; // SM4 block size
            block[..chunk.len()].copy_from_slice(chunk);
            let current = block;

            self.cipher.decrypt_block(&mut block)?;

            for (b, p) in block.iter_mut().zip(prev.iter()) {
                *b ^= p;
            }

            plaintext.extend_from_slice(&block);
            prev.copy_from_slice(&current);
        }

        Ok(plaintext)
    }
}
