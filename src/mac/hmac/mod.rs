//! HMAC (RFC 2104) over any [`HashFunction`]
//!
//! Instantiated with SM3 this is the HMAC-SM3 construction used by the
//! HKDF layer: 64-byte block, 32-byte tag, inner/outer pads 0x36/0x5C.

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};
use crate::hash::HashFunction;
use crate::security::SecretBuffer;

// Largest block size among the hashes this crate ships (SM3).
const MAX_BLOCK: usize = 64;

/// Streaming HMAC state
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Hmac<H: HashFunction + Clone> {
    #[zeroize(skip)] // hash state scrubs itself on drop
    inner: H,
    opad: SecretBuffer<MAX_BLOCK>,
    block_size: usize,
    is_finalized: bool,
}

impl<H> Hmac<H>
where
    H: HashFunction + Clone,
    H::Output: AsRef<[u8]> + Clone,
{
    const IPAD_BYTE: u8 = 0x36;
    const OPAD_BYTE: u8 = 0x5C;

    /// Create a new HMAC instance keyed with `key`
    pub fn new(key: &[u8]) -> Result<Self> {
        let bs = H::block_size();
        debug_assert!(bs <= MAX_BLOCK);

        // Hash the key unconditionally so the running time depends only on
        // the public key length, then select key-or-digest with a mask.
        let mut hasher = H::new();
        hasher.update(key)?;
        let hashed = hasher.finalize()?;

        let mut k_prime = [0u8; MAX_BLOCK];
        let long = (key.len() > bs) as u8;
        let mask = long.wrapping_neg();
        for (i, slot) in k_prime.iter_mut().enumerate().take(bs) {
            let k = key.get(i).copied().unwrap_or(0);
            let h = hashed.as_ref().get(i).copied().unwrap_or(0);
            *slot = (h & mask) | (k & !mask);
        }

        let mut ipad = [0u8; MAX_BLOCK];
        let mut opad = [0u8; MAX_BLOCK];
        for i in 0..bs {
            ipad[i] = k_prime[i] ^ Self::IPAD_BYTE;
            opad[i] = k_prime[i] ^ Self::OPAD_BYTE;
        }
        k_prime.zeroize();

        let mut inner = H::new();
        inner.update(&ipad[..bs])?;
        ipad.zeroize();

        Ok(Self {
            inner,
            opad: SecretBuffer::new(opad),
            block_size: bs,
            is_finalized: false,
        })
    }

    /// Feed additional `data` into the MAC
    pub fn update(&mut self, data: &[u8]) -> Result<()> {
        if self.is_finalized {
            return Err(Error::param("hmac_state", "Cannot update after finalization"));
        }
        self.inner.update(data).map(|_| ())
    }

    /// Finish the computation and return the tag
    pub fn finalize(&mut self) -> Result<Vec<u8>> {
        if self.is_finalized {
            return Err(Error::param("hmac_state", "HMAC already finalized"));
        }
        self.is_finalized = true;

        let inner_hash = self.inner.finalize()?;

        let mut outer = H::new();
        outer.update(&self.opad.as_ref()[..self.block_size])?;
        outer.update(inner_hash.as_ref())?;

        outer.finalize().map(|out| out.as_ref().to_vec())
    }

    /// One-shot MAC helper
    pub fn mac(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
        let mut mac = Self::new(key)?;
        mac.update(data)?;
        mac.finalize()
    }

    /// Constant-time verification of `tag` against `key` / `data`
    pub fn verify(key: &[u8], data: &[u8], tag: &[u8]) -> Result<bool> {
        let expected = Self::mac(key, data)?;

        // Iterate over the fixed, public digest length so a short caller
        // tag cannot shorten the comparison.
        let mut diff = 0u8;
        for i in 0..H::output_size() {
            let a = expected.get(i).copied().unwrap_or(0);
            let b = tag.get(i).copied().unwrap_or(0);
            diff |= a ^ b;
        }
        diff |= (tag.len() ^ H::output_size()) as u8;

        Ok(diff.ct_eq(&0u8).unwrap_u8() == 1)
    }
}
