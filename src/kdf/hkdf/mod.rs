//! HMAC-based Key Derivation Function (RFC 5869)
//!
//! Extract-then-expand construction over any hash. Instantiated with SM3
//! this is the HKDF-SM3 used for deriving working keys from shared secrets.

use core::marker::PhantomData;
use zeroize::Zeroizing;

use crate::error::{validate, Result};
use crate::hash::HashFunction;
use crate::mac::hmac::Hmac;

/// HKDF over the hash function `H`
pub struct Hkdf<H: HashFunction + Clone> {
    _hash: PhantomData<H>,
}

impl<H> Hkdf<H>
where
    H: HashFunction + Clone,
    H::Output: AsRef<[u8]> + Clone,
{
    /// HKDF-Extract: derive a pseudorandom key from input keying material
    pub fn extract(salt: Option<&[u8]>, ikm: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        let salt = salt.unwrap_or(&[]);
        let prk = Hmac::<H>::mac(salt, ikm)?;
        Ok(Zeroizing::new(prk))
    }

    /// HKDF-Expand: stretch a pseudorandom key to `length` output bytes
    pub fn expand(prk: &[u8], info: Option<&[u8]>, length: usize) -> Result<Zeroizing<Vec<u8>>> {
        let hash_len = H::output_size();
        let max_len = 255 * hash_len;

        validate::max_length("HKDF-Expand output", length, max_len)?;
        validate::min_length("PRK for HKDF-Expand", prk.len(), hash_len)?;

        let n = length.div_ceil(hash_len);
        let info = info.unwrap_or(&[]);

        let mut okm = Zeroizing::new(vec![0u8; n * hash_len]);
        let mut t = Zeroizing::new(vec![0u8; hash_len]);

        for i in 1..=n {
            let mut mac = Hmac::<H>::new(prk)?;
            if i > 1 {
                mac.update(&t)?;
            }
            mac.update(info)?;
            mac.update(&[i as u8])?;
            let block = mac.finalize()?;
            t.copy_from_slice(&block);
            let start = (i - 1) * hash_len;
            okm[start..start + hash_len].copy_from_slice(&t);
        }

        okm.truncate(length);
        Ok(okm)
    }

    /// Full HKDF (Extract followed by Expand)
    pub fn derive(
        salt: Option<&[u8]>,
        ikm: &[u8],
        info: Option<&[u8]>,
        length: usize,
    ) -> Result<Zeroizing<Vec<u8>>> {
        let prk = Self::extract(salt, ikm)?;
        Self::expand(&prk, info, length)
    }
}
