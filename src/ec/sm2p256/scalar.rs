//! Scalar arithmetic modulo the SM2 group order
//!
//! Scalars hold private keys and signature components, so the byte
//! representation lives in a zeroizing buffer. Unlike field elements,
//! zero is a representable value here: protocol intermediates such as
//! `r + s mod n` may legitimately vanish and the protocol layers apply
//! their own range checks.

use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::ec::sm2p256::constants::SM2_SCALAR_SIZE;
use crate::error::{validate, Error, Result};
use crate::security::SecretBuffer;

const NLIMBS: usize = 8;

/// SM2 scalar: an integer modulo the group order n
#[derive(Clone, Zeroize, ZeroizeOnDrop, Debug)]
pub struct Scalar(SecretBuffer<SM2_SCALAR_SIZE>);

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        // Scalars compared here are signature components, not secrets.
        self.0.as_ref() == other.0.as_ref()
    }
}

impl Eq for Scalar {}

impl Scalar {
    /// Group order n in little-endian limbs
    const N_LIMBS: [u32; NLIMBS] = [
        0x39D5_4123, // least significant
        0x53BB_F409,
        0x21C6_052B,
        0x7203_DF6B,
        0xFFFF_FFFF,
        0xFFFF_FFFF,
        0xFFFF_FFFF,
        0xFFFF_FFFE, // most significant
    ];

    /// n − 1 in little-endian limbs
    const N_MINUS_1_LIMBS: [u32; NLIMBS] = [
        0x39D5_4122,
        0x53BB_F409,
        0x21C6_052B,
        0x7203_DF6B,
        0xFFFF_FFFF,
        0xFFFF_FFFF,
        0xFFFF_FFFF,
        0xFFFF_FFFE,
    ];

    /// The scalar 0
    pub fn zero() -> Self {
        Scalar(SecretBuffer::zeroed())
    }

    /// The scalar 1
    pub fn one() -> Self {
        let mut bytes = [0u8; SM2_SCALAR_SIZE];
        bytes[SM2_SCALAR_SIZE - 1] = 1;
        Scalar(SecretBuffer::new(bytes))
    }

    /// Parse big-endian bytes as a canonical scalar; rejects values ≥ n
    pub fn from_bytes(bytes: &[u8; SM2_SCALAR_SIZE]) -> Result<Self> {
        let limbs = Self::to_le_limbs(bytes);
        if Self::geq(&limbs, &Self::N_LIMBS) {
            return Err(Error::Key {
                context: "SM2 scalar",
                reason: "value not below the group order",
            });
        }
        Ok(Scalar(SecretBuffer::new(*bytes)))
    }

    /// Parse a slice as a canonical scalar (length-checked)
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        validate::length("SM2 scalar", bytes.len(), SM2_SCALAR_SIZE)?;
        let mut tmp = [0u8; SM2_SCALAR_SIZE];
        tmp.copy_from_slice(bytes);
        Self::from_bytes(&tmp)
    }

    /// Interpret big-endian bytes as an integer and reduce it mod n
    ///
    /// Used for hash outputs that enter the signature equations; any
    /// 256-bit value is below 2n, so one conditional subtraction settles it.
    pub fn reduce_bytes(bytes: &[u8; SM2_SCALAR_SIZE]) -> Self {
        let mut limbs = Self::to_le_limbs(bytes);
        if Self::geq(&limbs, &Self::N_LIMBS) {
            Self::sub_in_place(&mut limbs, &Self::N_LIMBS);
        }
        Scalar(SecretBuffer::new(Self::limbs_to_be(&limbs)))
    }

    /// Draw a uniform scalar in [1, n−1] from the CSPRNG
    ///
    /// 32 raw bytes are reduced as `(raw mod (n−1)) + 1`, which lands in
    /// the private-key range without a rejection loop. A short read from
    /// the generator is surfaced as an error, never papered over.
    pub fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Result<Self> {
        let mut raw = [0u8; SM2_SCALAR_SIZE];
        rng.try_fill_bytes(&mut raw).map_err(|_| Error::Random {
            context: "SM2 scalar generation",
        })?;

        let mut limbs = Self::to_le_limbs(&raw);
        raw.zeroize();
        if Self::geq(&limbs, &Self::N_MINUS_1_LIMBS) {
            Self::sub_in_place(&mut limbs, &Self::N_MINUS_1_LIMBS);
        }
        // + 1; cannot carry out of 256 bits because the value is ≤ n − 2
        let mut carry = 1u64;
        for limb in limbs.iter_mut() {
            let tmp = u64::from(*limb) + carry;
            *limb = tmp as u32;
            carry = tmp >> 32;
        }
        Ok(Scalar(SecretBuffer::new(Self::limbs_to_be(&limbs))))
    }

    /// Serialize to big-endian bytes
    pub fn to_bytes(&self) -> [u8; SM2_SCALAR_SIZE] {
        let mut out = [0u8; SM2_SCALAR_SIZE];
        out.copy_from_slice(self.0.as_ref());
        out
    }

    /// Borrow the underlying secret buffer
    pub fn as_secret_buffer(&self) -> &SecretBuffer<SM2_SCALAR_SIZE> {
        &self.0
    }

    /// Is this scalar zero?
    pub fn is_zero(&self) -> bool {
        self.0.as_ref().iter().all(|&b| b == 0)
    }

    /// (self + other) mod n
    pub fn add_mod_n(&self, other: &Self) -> Self {
        let a = Self::to_le_limbs(&self.to_bytes());
        let b = Self::to_le_limbs(&other.to_bytes());
        let mut r = [0u32; NLIMBS];
        let mut carry = 0u64;
        for i in 0..NLIMBS {
            let tmp = u64::from(a[i]) + u64::from(b[i]) + carry;
            r[i] = tmp as u32;
            carry = tmp >> 32;
        }
        if carry == 1 || Self::geq(&r, &Self::N_LIMBS) {
            Self::sub_in_place(&mut r, &Self::N_LIMBS);
        }
        Scalar(SecretBuffer::new(Self::limbs_to_be(&r)))
    }

    /// (self − other) mod n
    pub fn sub_mod_n(&self, other: &Self) -> Self {
        let a = Self::to_le_limbs(&self.to_bytes());
        let b = Self::to_le_limbs(&other.to_bytes());
        let mut r = [0u32; NLIMBS];
        let mut borrow = 0u64;
        for i in 0..NLIMBS {
            let a64 = u64::from(a[i]);
            let b64 = u64::from(b[i]) + borrow;
            r[i] = a64.wrapping_sub(b64) as u32;
            borrow = u64::from(a64 < b64);
        }
        if borrow == 1 {
            let mut carry = 0u64;
            for i in 0..NLIMBS {
                let tmp = u64::from(r[i]) + u64::from(Self::N_LIMBS[i]) + carry;
                r[i] = tmp as u32;
                carry = tmp >> 32;
            }
        }
        Scalar(SecretBuffer::new(Self::limbs_to_be(&r)))
    }

    /// (self · other) mod n via most-significant-first double-and-add
    pub fn mul_mod_n(&self, other: &Self) -> Self {
        let mut acc = Scalar::zero();
        for &byte in other.to_bytes().iter() {
            for bit in (0..8).rev() {
                acc = acc.add_mod_n(&acc);
                if (byte >> bit) & 1 == 1 {
                    acc = acc.add_mod_n(self);
                }
            }
        }
        acc
    }

    /// Multiplicative inverse mod n via Fermat: self^(n−2)
    pub fn invert(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::Field {
                context: "SM2 scalar",
                reason: "inverse of zero",
            });
        }

        // n − 2
        const N_MINUS_2: [u8; 32] = [
            0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
            0xFF, 0xFF, 0x72, 0x03, 0xDF, 0x6B, 0x21, 0xC6, 0x05, 0x2B, 0x53, 0xBB, 0xF4, 0x09,
            0x39, 0xD5, 0x41, 0x21,
        ];

        let mut result = Scalar::one();
        for &byte in N_MINUS_2.iter() {
            for bit in (0..8).rev() {
                result = result.mul_mod_n(&result);
                if (byte >> bit) & 1 == 1 {
                    result = result.mul_mod_n(self);
                }
            }
        }
        Ok(result)
    }

    /* ----------------------------------------------------------------- */
    /*  Limb helpers                                                     */
    /* ----------------------------------------------------------------- */

    #[inline(always)]
    fn to_le_limbs(bytes_be: &[u8; SM2_SCALAR_SIZE]) -> [u32; NLIMBS] {
        let mut limbs = [0u32; NLIMBS];
        for (i, limb) in limbs.iter_mut().enumerate() {
            let offset = (NLIMBS - 1 - i) * 4;
            *limb = u32::from_be_bytes([
                bytes_be[offset],
                bytes_be[offset + 1],
                bytes_be[offset + 2],
                bytes_be[offset + 3],
            ]);
        }
        limbs
    }

    #[inline(always)]
    fn limbs_to_be(limbs: &[u32; NLIMBS]) -> [u8; SM2_SCALAR_SIZE] {
        let mut out = [0u8; SM2_SCALAR_SIZE];
        for (i, &limb) in limbs.iter().enumerate() {
            let offset = (NLIMBS - 1 - i) * 4;
            out[offset..offset + 4].copy_from_slice(&limb.to_be_bytes());
        }
        out
    }

    /// a ≥ b on little-endian limb arrays
    #[inline(always)]
    fn geq(a: &[u32; NLIMBS], b: &[u32; NLIMBS]) -> bool {
        for i in (0..NLIMBS).rev() {
            if a[i] > b[i] {
                return true;
            }
            if a[i] < b[i] {
                return false;
            }
        }
        true
    }

    /// a ← a − b, ignoring the final borrow
    #[inline(always)]
    fn sub_in_place(a: &mut [u32; NLIMBS], b: &[u32; NLIMBS]) {
        let mut borrow = 0u64;
        for i in 0..NLIMBS {
            let tmp = u64::from(a[i])
                .wrapping_sub(u64::from(b[i]))
                .wrapping_sub(borrow);
            a[i] = tmp as u32;
            borrow = (tmp >> 63) & 1;
        }
    }
}
