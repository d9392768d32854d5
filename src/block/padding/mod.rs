//! Block padding schemes
//!
//! PKCS#7 for arbitrary-length input, or no padding at all (in which case
//! input lengths must already be a multiple of the block size).

use crate::error::{Error, Result};

/// Padding selector for the one-shot cipher APIs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Padding {
    /// PKCS#7: append `n` bytes of value `n`, `n` in `[1, block_size]`
    Pkcs7,
    /// No padding; input must be block-aligned
    None,
}

impl Padding {
    /// Pad `data` out to a multiple of `block_size`
    pub fn apply(&self, data: &[u8], block_size: usize) -> Result<Vec<u8>> {
        match self {
            Padding::Pkcs7 => {
                let pad = block_size - data.len() % block_size;
                let mut out = Vec::with_capacity(data.len() + pad);
                out.extend_from_slice(data);
                out.resize(data.len() + pad, pad as u8);
                Ok(out)
            }
            Padding::None => {
                if data.len() % block_size != 0 {
                    return Err(Error::Length {
                        context: "unpadded block input",
                        expected: data.len().next_multiple_of(block_size),
                        actual: data.len(),
                    });
                }
                Ok(data.to_vec())
            }
        }
    }

    /// Strip and verify padding from decrypted `data`
    ///
    /// For PKCS#7 every pad byte must equal the pad length and the length
    /// must be in `[1, block_size]`; anything else is rejected.
    pub fn remove(&self, mut data: Vec<u8>, block_size: usize) -> Result<Vec<u8>> {
        match self {
            Padding::Pkcs7 => {
                let pad = match data.last() {
                    Some(&b) => b as usize,
                    None => return Err(Error::Padding { context: "PKCS#7" }),
                };
                if pad == 0 || pad > block_size || pad > data.len() {
                    return Err(Error::Padding { context: "PKCS#7" });
                }
                let body = data.len() - pad;
                if data[body..].iter().any(|&b| b as usize != pad) {
                    return Err(Error::Padding { context: "PKCS#7" });
                }
                data.truncate(body);
                Ok(data)
            }
            Padding::None => Ok(data),
        }
    }
}

#[cfg(test)]
mod tests;
