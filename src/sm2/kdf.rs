//! Counter-mode key derivation per GM/T 0003.4
//!
//! Stretches a shared-secret byte string into `klen` bytes by hashing
//! `Z ‖ ct(i)` with SM3 for a 4-byte big-endian counter starting at 1.
//! An all-zero result must be treated as failure by the caller; the
//! retry/abort decision belongs to the protocol layer.

use byteorder::{BigEndian, ByteOrder};

use crate::error::Result;
use crate::hash::{HashFunction, Sm3};

/// Derive `klen` bytes from the shared secret `z`
pub fn kdf(z: &[u8], klen: usize) -> Result<Vec<u8>> {
    kdf_with_suffix(z, None, klen)
}

/// Derive `klen` bytes from `z`, appending `suffix` after the counter
/// in every hash invocation
pub fn kdf_with_suffix(z: &[u8], suffix: Option<&[u8]>, klen: usize) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(klen);
    let mut counter: u32 = 1;
    let mut ct = [0u8; 4];

    while out.len() < klen {
        BigEndian::write_u32(&mut ct, counter);
        let mut hasher = Sm3::new();
        hasher.update(z)?;
        hasher.update(&ct)?;
        if let Some(suffix) = suffix {
            hasher.update(suffix)?;
        }
        let block = hasher.finalize()?;

        let take = core::cmp::min(klen - out.len(), block.len());
        out.extend_from_slice(&block.as_ref()[..take]);
        counter += 1;
    }

    Ok(out)
}

/// Does the derived key consist entirely of zero bytes?
///
/// An empty output is not considered all-zero.
pub(crate) fn is_all_zero(bytes: &[u8]) -> bool {
    !bytes.is_empty() && bytes.iter().all(|&b| b == 0)
}
