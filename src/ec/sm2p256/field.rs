//! Field arithmetic over the SM2 prime
//!
//! The modulus p = 2²⁵⁶ − 2²²⁴ − 2⁹⁶ + 2⁶⁴ − 1 is a generalized-Mersenne
//! prime, so the wide product of a multiplication reduces with a fixed
//! signed-coefficient fold instead of a division.

use subtle::{Choice, ConditionallySelectable};

use crate::ec::sm2p256::constants::SM2_FIELD_ELEMENT_SIZE;
use crate::error::{Error, Result};

/// Number of 32-bit limbs in a field element (8 × 32 = 256 bits)
const NLIMBS: usize = 8;

/// SM2 field element in 𝔽ₚ, stored as 8 little-endian 32-bit limbs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldElement(pub(crate) [u32; NLIMBS]);

impl FieldElement {
    /// p = FFFFFFFE FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF 00000000 FFFFFFFF FFFFFFFF,
    /// little-endian limbs
    pub(crate) const MOD_LIMBS: [u32; NLIMBS] = [
        0xFFFF_FFFF, // least significant
        0xFFFF_FFFF,
        0x0000_0000,
        0xFFFF_FFFF,
        0xFFFF_FFFF,
        0xFFFF_FFFF,
        0xFFFF_FFFF,
        0xFFFF_FFFE, // most significant
    ];

    /// a = p − 3 in little-endian limbs
    pub(crate) const A_M3: [u32; NLIMBS] = [
        0xFFFF_FFFC,
        0xFFFF_FFFF,
        0x0000_0000,
        0xFFFF_FFFF,
        0xFFFF_FFFF,
        0xFFFF_FFFF,
        0xFFFF_FFFF,
        0xFFFF_FFFE,
    ];

    /// Signed coefficients of 2^(32·(8+i)) mod p over the limb positions.
    /// Row i gives the fold weights of wide limb 8+i onto limbs 0..8.
    const FOLD: [[i64; NLIMBS]; 8] = [
        [1, 0, -1, 1, 0, 0, 0, 1],
        [1, 1, -1, 0, 1, 0, 0, 1],
        [1, 1, 0, 0, 0, 1, 0, 1],
        [1, 1, 0, 1, 0, 0, 1, 1],
        [1, 1, 0, 1, 1, 0, 0, 2],
        [2, 1, -1, 2, 1, 1, 0, 2],
        [2, 2, -1, 1, 2, 1, 1, 2],
        [2, 2, 0, 1, 1, 2, 1, 3],
    ];

    /// Build a field element from a small literal
    #[inline]
    pub fn from_u32(n: u32) -> Self {
        let mut limbs = [0u32; NLIMBS];
        limbs[0] = n;
        FieldElement(limbs)
    }

    /// The additive identity
    #[inline]
    pub fn zero() -> Self {
        FieldElement([0u32; NLIMBS])
    }

    /// The multiplicative identity
    #[inline]
    pub fn one() -> Self {
        Self::from_u32(1)
    }

    /// Create a field element from big-endian bytes; rejects values ≥ p
    pub fn from_bytes(bytes: &[u8; SM2_FIELD_ELEMENT_SIZE]) -> Result<Self> {
        let mut limbs = [0u32; NLIMBS];
        for (i, limb) in limbs.iter_mut().enumerate() {
            let offset = (NLIMBS - 1 - i) * 4;
            *limb = u32::from_be_bytes([
                bytes[offset],
                bytes[offset + 1],
                bytes[offset + 2],
                bytes[offset + 3],
            ]);
        }
        let (_, borrow) = Self::sbb8(limbs, Self::MOD_LIMBS);
        if borrow == 0 {
            // limbs ≥ p
            return Err(Error::Field {
                context: "SM2 field element",
                reason: "value not below the field modulus",
            });
        }
        Ok(FieldElement(limbs))
    }

    /// Interpret big-endian bytes as an integer and reduce it mod p
    ///
    /// Any 256-bit value is below 2p, so one conditional subtraction
    /// settles it.
    pub fn reduce_bytes(bytes: &[u8; SM2_FIELD_ELEMENT_SIZE]) -> Self {
        let mut limbs = [0u32; NLIMBS];
        for (i, limb) in limbs.iter_mut().enumerate() {
            let offset = (NLIMBS - 1 - i) * 4;
            *limb = u32::from_be_bytes([
                bytes[offset],
                bytes[offset + 1],
                bytes[offset + 2],
                bytes[offset + 3],
            ]);
        }
        let (reduced, borrow) = Self::sbb8(limbs, Self::MOD_LIMBS);
        Self::conditional_select(&limbs, &reduced, Choice::from((borrow ^ 1) as u8))
    }

    /// Convert to big-endian bytes
    pub fn to_bytes(&self) -> [u8; SM2_FIELD_ELEMENT_SIZE] {
        let mut out = [0u8; SM2_FIELD_ELEMENT_SIZE];
        for (i, &limb) in self.0.iter().enumerate() {
            let offset = (NLIMBS - 1 - i) * 4;
            out[offset..offset + 4].copy_from_slice(&limb.to_be_bytes());
        }
        out
    }

    /// Is this element zero?
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&w| w == 0)
    }

    /// Is the canonical representative odd?
    pub fn is_odd(&self) -> bool {
        (self.0[0] & 1) == 1
    }

    /// Constant-time addition mod p
    pub fn add(&self, other: &Self) -> Self {
        let (sum, carry) = Self::adc8(self.0, other.0);
        let (reduced, borrow) = Self::sbb8(sum, Self::MOD_LIMBS);
        // Reduce when the raw sum overflowed 2²⁵⁶ or reached p.
        let need_reduce = (carry | (borrow ^ 1)) & 1;
        Self::conditional_select(&sum, &reduced, Choice::from(need_reduce as u8))
    }

    /// Constant-time subtraction mod p
    pub fn sub(&self, other: &Self) -> Self {
        let (diff, borrow) = Self::sbb8(self.0, other.0);
        let (diff_plus_p, _) = Self::adc8(diff, Self::MOD_LIMBS);
        Self::conditional_select(&diff, &diff_plus_p, Choice::from(borrow as u8))
    }

    /// Multiplication mod p: schoolbook 8×8 → 16 limbs, then fold
    pub fn mul(&self, other: &Self) -> Self {
        // Accumulate partial products; 8 terms of (2³²−1)² fit in u128.
        let mut t = [0u128; NLIMBS * 2];
        for i in 0..NLIMBS {
            for j in 0..NLIMBS {
                t[i + j] += u128::from(self.0[i]) * u128::from(other.0[j]);
            }
        }

        let mut wide = [0u32; NLIMBS * 2];
        let mut carry: u128 = 0;
        for (w, acc) in wide.iter_mut().zip(t.iter()) {
            let v = acc + carry;
            *w = (v & 0xFFFF_FFFF) as u32;
            carry = v >> 32;
        }

        Self::reduce_wide(wide)
    }

    /// Squaring mod p
    #[inline(always)]
    pub fn square(&self) -> Self {
        self.mul(self)
    }

    /// Raise to the power given as big-endian bytes (square-and-multiply)
    pub fn pow(&self, exp: &[u8; SM2_FIELD_ELEMENT_SIZE]) -> Self {
        let mut result = FieldElement::one();
        let base = self.clone();
        for &byte in exp.iter() {
            for bit in (0..8).rev() {
                result = result.square();
                if (byte >> bit) & 1 == 1 {
                    result = result.mul(&base);
                }
            }
        }
        result
    }

    /// Multiplicative inverse via Fermat: a^(p−2) mod p
    pub fn invert(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::Field {
                context: "SM2 field element",
                reason: "inverse of zero",
            });
        }

        // p − 2
        const P_MINUS_2: [u8; 32] = [
            0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
            0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF,
            0xFF, 0xFF, 0xFF, 0xFD,
        ];

        Ok(self.pow(&P_MINUS_2))
    }

    /// Invert a batch with a single field inversion (prefix products)
    pub fn batch_invert(elements: &[FieldElement]) -> Result<Vec<FieldElement>> {
        if elements.is_empty() {
            return Ok(Vec::new());
        }

        // prefix[i] = e[0]·…·e[i]
        let mut prefix = Vec::with_capacity(elements.len());
        let mut acc = FieldElement::one();
        for e in elements {
            if e.is_zero() {
                return Err(Error::Field {
                    context: "SM2 field element",
                    reason: "inverse of zero",
                });
            }
            acc = acc.mul(e);
            prefix.push(acc.clone());
        }

        // Invert the full product once, then peel back.
        let mut inv_acc = prefix[elements.len() - 1].invert()?;
        let mut out = vec![FieldElement::zero(); elements.len()];
        for i in (1..elements.len()).rev() {
            out[i] = inv_acc.mul(&prefix[i - 1]);
            inv_acc = inv_acc.mul(&elements[i]);
        }
        out[0] = inv_acc;
        Ok(out)
    }

    /// Additive inverse: p − self for nonzero values
    pub fn negate(&self) -> Self {
        if self.is_zero() {
            self.clone()
        } else {
            FieldElement::zero().sub(self)
        }
    }

    /// Square root for p ≡ 3 (mod 4): candidate = self^((p+1)/4),
    /// verified by squaring
    pub fn sqrt(&self) -> Result<Self> {
        if self.is_zero() {
            return Ok(FieldElement::zero());
        }

        // (p + 1) / 4
        const SQRT_EXP: [u8; 32] = [
            0x3F, 0xFF, 0xFF, 0xFF, 0xBF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
            0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xC0, 0x00, 0x00, 0x00, 0x40, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
        ];

        let candidate = self.pow(&SQRT_EXP);
        if candidate.square() == *self {
            Ok(candidate)
        } else {
            Err(Error::Field {
                context: "SM2 field element",
                reason: "not a quadratic residue",
            })
        }
    }

    /* ----------------------------------------------------------------- */
    /*  Limb helpers                                                     */
    /* ----------------------------------------------------------------- */

    /// 8-limb addition with carry out
    #[inline(always)]
    fn adc8(a: [u32; NLIMBS], b: [u32; NLIMBS]) -> ([u32; NLIMBS], u32) {
        let mut r = [0u32; NLIMBS];
        let mut carry = 0u64;
        for ((&ai, &bi), ri) in a.iter().zip(b.iter()).zip(r.iter_mut()) {
            let tmp = u64::from(ai) + u64::from(bi) + carry;
            *ri = (tmp & 0xFFFF_FFFF) as u32;
            carry = tmp >> 32;
        }
        (r, carry as u32)
    }

    /// 8-limb subtraction with borrow out
    #[inline(always)]
    fn sbb8(a: [u32; NLIMBS], b: [u32; NLIMBS]) -> ([u32; NLIMBS], u32) {
        let mut r = [0u32; NLIMBS];
        let mut borrow = 0u32;
        for ((&ai, &bi), ri) in a.iter().zip(b.iter()).zip(r.iter_mut()) {
            let a64 = u64::from(ai);
            let b64 = u64::from(bi) + u64::from(borrow);
            *ri = a64.wrapping_sub(b64) as u32;
            borrow = (a64 < b64) as u32;
        }
        (r, borrow)
    }

    /// Constant-time select: `a` when flag is 0, `b` when flag is 1
    fn conditional_select(a: &[u32; NLIMBS], b: &[u32; NLIMBS], flag: Choice) -> Self {
        let mut out = [0u32; NLIMBS];
        for ((ai, bi), oi) in a.iter().zip(b.iter()).zip(out.iter_mut()) {
            *oi = u32::conditional_select(ai, bi, flag);
        }
        FieldElement(out)
    }

    /// Reduce a 16-limb (512-bit) value mod p.
    ///
    /// Folds each high limb through the precomputed residues of
    /// 2^(32k) mod p, propagates carries in signed 64-bit accumulators,
    /// folds the residual top limb through 2²⁵⁶ ≡ 2²²⁴ + 2⁹⁶ − 2⁶⁴ + 1,
    /// and finishes with two conditional subtractions of p.
    fn reduce_wide(t: [u32; NLIMBS * 2]) -> FieldElement {
        let mut acc = [0i64; NLIMBS + 1];
        for j in 0..NLIMBS {
            acc[j] = i64::from(t[j]);
            for i in 0..NLIMBS {
                acc[j] += i64::from(t[NLIMBS + i]) * Self::FOLD[i][j];
            }
        }

        fn propagate(acc: &mut [i64; NLIMBS + 1]) {
            for i in 0..NLIMBS {
                let carry = acc[i] >> 32;
                acc[i] &= 0xFFFF_FFFF;
                acc[i + 1] += carry;
            }
        }

        propagate(&mut acc);

        // The top limb carries at most a few bits; fold it back through
        // 2²⁵⁶ ≡ 2²²⁴ + 2⁹⁶ − 2⁶⁴ + 1 (mod p). Two passes settle it.
        for _ in 0..2 {
            let overflow = acc[NLIMBS];
            if overflow != 0 {
                acc[NLIMBS] = 0;
                acc[0] += overflow;
                acc[2] -= overflow;
                acc[3] += overflow;
                acc[7] += overflow;
                propagate(&mut acc);
            }
        }

        // Settle any borrows left by the negative fold coefficients.
        for i in 0..NLIMBS {
            while acc[i] < 0 {
                acc[i] += 1i64 << 32;
                acc[i + 1] -= 1;
            }
        }
        debug_assert_eq!(acc[NLIMBS], 0);

        let mut out = [0u32; NLIMBS];
        for (o, &a) in out.iter_mut().zip(acc.iter()) {
            *o = a as u32;
        }

        for _ in 0..2 {
            let (sub, borrow) = Self::sbb8(out, Self::MOD_LIMBS);
            let selected = Self::conditional_select(&out, &sub, Choice::from((borrow ^ 1) as u8));
            out = selected.0;
        }

        FieldElement(out)
    }
}
