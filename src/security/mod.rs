//! Secret data containers with guaranteed zeroization
//!
//! Wrappers for sensitive byte material that scrub their contents when
//! dropped. Fixed-size secrets live in [`SecretBuffer`], short-lived
//! working values in [`EphemeralSecret`].

use core::fmt;
use core::ops::{Deref, DerefMut};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Fixed-size secret buffer that zeroizes on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretBuffer<const N: usize> {
    data: [u8; N],
}

impl<const N: usize> SecretBuffer<N> {
    /// Create a new secret buffer taking ownership of `data`
    pub fn new(data: [u8; N]) -> Self {
        Self { data }
    }

    /// Create a zero-filled secret buffer
    pub fn zeroed() -> Self {
        Self { data: [0u8; N] }
    }

    /// Length of the buffer in bytes
    pub fn len(&self) -> usize {
        N
    }

    /// Whether the buffer holds zero bytes (true only for `N = 0`)
    pub fn is_empty(&self) -> bool {
        N == 0
    }
}

impl<const N: usize> AsRef<[u8]> for SecretBuffer<N> {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl<const N: usize> AsMut<[u8]> for SecretBuffer<N> {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl<const N: usize> fmt::Debug for SecretBuffer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretBuffer<{}>([REDACTED])", N)
    }
}

/// Short-lived secret working value, scrubbed when it leaves scope
///
/// Used for message schedules and similar intermediates that hold
/// key-derived state only for the duration of one computation.
pub struct EphemeralSecret<T: Zeroize> {
    value: T,
}

impl<T: Zeroize> EphemeralSecret<T> {
    /// Wrap a working value
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: Zeroize> Deref for EphemeralSecret<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: Zeroize> DerefMut for EphemeralSecret<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T: Zeroize> Drop for EphemeralSecret<T> {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}
