//! Fixed-size hash output type

use core::fmt;
use core::ops::Deref;
use zeroize::Zeroize;

use crate::error::{validate, Result};

/// A cryptographic digest with a compile-time size
#[derive(Clone, Zeroize, PartialEq, Eq)]
pub struct Digest<const N: usize> {
    data: [u8; N],
}

impl<const N: usize> Digest<N> {
    /// Create a digest from an existing array
    pub fn new(data: [u8; N]) -> Self {
        Self { data }
    }

    /// Create from a slice, if it has the correct length
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        validate::length("Digest", slice.len(), N)?;
        let mut data = [0u8; N];
        data.copy_from_slice(slice);
        Ok(Self { data })
    }

    /// Length of the digest in bytes
    pub fn len(&self) -> usize {
        N
    }

    /// Whether the digest is empty (true only for `N = 0`)
    pub fn is_empty(&self) -> bool {
        N == 0
    }

    /// Consume the digest, returning the raw array
    pub fn into_bytes(self) -> [u8; N] {
        self.data
    }

    /// Render as lowercase hexadecimal
    pub fn to_hex(&self) -> String {
        hex::encode(self.data)
    }
}

impl<const N: usize> AsRef<[u8]> for Digest<N> {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl<const N: usize> Deref for Digest<N> {
    type Target = [u8; N];

    fn deref(&self) -> &[u8; N] {
        &self.data
    }
}

impl<const N: usize> fmt::Debug for Digest<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest<{}>({})", N, self.to_hex())
    }
}
