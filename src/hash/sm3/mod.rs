//! SM3 hash function
//!
//! Implements the SM3 cryptographic hash as specified in GM/T 0004-2012:
//! 256-bit digest, 512-bit blocks, Merkle–Damgård construction over a
//! 64-round compression function.

use byteorder::{BigEndian, ByteOrder};
use std::sync::atomic::{compiler_fence, Ordering};
use zeroize::Zeroize;

use crate::error::{validate, Result};
use crate::hash::{HashAlgorithm, HashFunction};
use crate::security::EphemeralSecret;
use crate::types::Digest;

/// SM3 digest size in bytes
pub const SM3_OUTPUT_SIZE: usize = 32;

/// SM3 block size in bytes
pub const SM3_BLOCK_SIZE: usize = 64;

/// Round constant for rounds 0..16
const T0: u32 = 0x79CC_4519;
/// Round constant for rounds 16..64
const T1: u32 = 0x7A87_9D8A;

/// Initialization vector from GM/T 0004 section 4.1
const SM3_IV: [u32; 8] = [
    0x7380_166F, 0x4914_B2B9, 0x1724_42D7, 0xDA8A_0600, 0xA96F_30BC, 0x1631_38AA, 0xE38D_EE4D,
    0xB0FB_0E4E,
];

#[inline(always)]
fn p0(x: u32) -> u32 {
    x ^ x.rotate_left(9) ^ x.rotate_left(17)
}

#[inline(always)]
fn p1(x: u32) -> u32 {
    x ^ x.rotate_left(15) ^ x.rotate_left(23)
}

#[inline(always)]
fn ff(j: usize, x: u32, y: u32, z: u32) -> u32 {
    if j < 16 {
        x ^ y ^ z
    } else {
        (x & y) | (x & z) | (y & z)
    }
}

#[inline(always)]
fn gg(j: usize, x: u32, y: u32, z: u32) -> u32 {
    if j < 16 {
        x ^ y ^ z
    } else {
        (x & y) | ((!x) & z)
    }
}

/// Marker type for the SM3 algorithm
pub enum Sm3Algorithm {}

impl HashAlgorithm for Sm3Algorithm {
    const OUTPUT_SIZE: usize = SM3_OUTPUT_SIZE;
    const BLOCK_SIZE: usize = SM3_BLOCK_SIZE;
    const ALGORITHM_ID: &'static str = "SM3";
}

/// SM3 hash state
#[derive(Clone, Zeroize)]
pub struct Sm3 {
    state: [u32; 8],
    buffer: [u8; SM3_BLOCK_SIZE],
    buffer_idx: usize,
    total_bytes: u64,
}

impl Drop for Sm3 {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Default for Sm3 {
    fn default() -> Self {
        Self::new()
    }
}

impl Sm3 {
    /// Create a fresh SM3 state
    pub fn new() -> Self {
        Sm3 {
            state: SM3_IV,
            buffer: [0u8; SM3_BLOCK_SIZE],
            buffer_idx: 0,
            total_bytes: 0,
        }
    }

    fn compress(state: &mut [u32; 8], block: &[u8; SM3_BLOCK_SIZE]) -> Result<()> {
        // Message schedule lives in a scrubbed buffer; W covers j = 0..68,
        // W' is derived on the fly as W[j] ^ W[j+4].
        let mut w = EphemeralSecret::new([0u32; 68]);

        compiler_fence(Ordering::SeqCst);

        for i in 0..16 {
            let start = i * 4;
            validate::max_length("SM3 block read", start + 4, SM3_BLOCK_SIZE)?;
            w[i] = BigEndian::read_u32(&block[start..]);
        }

        for j in 16..68 {
            w[j] = p1(w[j - 16] ^ w[j - 9] ^ w[j - 3].rotate_left(15))
                ^ w[j - 13].rotate_left(7)
                ^ w[j - 6];
        }

        let mut a = state[0];
        let mut b = state[1];
        let mut c = state[2];
        let mut d = state[3];
        let mut e = state[4];
        let mut f = state[5];
        let mut g = state[6];
        let mut h = state[7];

        for j in 0..64 {
            let t = if j < 16 { T0 } else { T1 };
            let ss1 = a
                .rotate_left(12)
                .wrapping_add(e)
                .wrapping_add(t.rotate_left(j as u32))
                .rotate_left(7);
            let ss2 = ss1 ^ a.rotate_left(12);
            let w_prime = w[j] ^ w[j + 4];
            let tt1 = ff(j, a, b, c)
                .wrapping_add(d)
                .wrapping_add(ss2)
                .wrapping_add(w_prime);
            let tt2 = gg(j, e, f, g)
                .wrapping_add(h)
                .wrapping_add(ss1)
                .wrapping_add(w[j]);

            d = c;
            c = b.rotate_left(9);
            b = a;
            a = tt1;
            h = g;
            g = f.rotate_left(19);
            f = e;
            e = p0(tt2);
        }

        state[0] ^= a;
        state[1] ^= b;
        state[2] ^= c;
        state[3] ^= d;
        state[4] ^= e;
        state[5] ^= f;
        state[6] ^= g;
        state[7] ^= h;

        compiler_fence(Ordering::SeqCst);

        Ok(())
    }

    fn update_internal(&mut self, mut input: &[u8]) -> Result<()> {
        while !input.is_empty() {
            let fill = core::cmp::min(input.len(), SM3_BLOCK_SIZE - self.buffer_idx);
            self.buffer[self.buffer_idx..self.buffer_idx + fill].copy_from_slice(&input[..fill]);
            self.buffer_idx += fill;
            input = &input[fill..];
            if self.buffer_idx == SM3_BLOCK_SIZE {
                let mut block = [0u8; SM3_BLOCK_SIZE];
                block.copy_from_slice(&self.buffer);
                Self::compress(&mut self.state, &block)?;
                self.total_bytes += SM3_BLOCK_SIZE as u64;
                self.buffer_idx = 0;
            }
        }
        Ok(())
    }

    fn finalize_internal(&mut self) -> Result<[u8; SM3_OUTPUT_SIZE]> {
        self.total_bytes += self.buffer_idx as u64;
        let bit_len = self.total_bytes.wrapping_mul(8);

        self.buffer[self.buffer_idx] = 0x80;
        if self.buffer_idx >= 56 {
            for b in &mut self.buffer[self.buffer_idx + 1..] {
                *b = 0;
            }
            let mut block = [0u8; SM3_BLOCK_SIZE];
            block.copy_from_slice(&self.buffer);
            Self::compress(&mut self.state, &block)?;
            self.buffer = [0u8; SM3_BLOCK_SIZE];
        } else {
            for b in &mut self.buffer[self.buffer_idx + 1..56] {
                *b = 0;
            }
        }

        BigEndian::write_u64(&mut self.buffer[56..], bit_len);
        let mut block = [0u8; SM3_BLOCK_SIZE];
        block.copy_from_slice(&self.buffer);
        Self::compress(&mut self.state, &block)?;

        let mut out = [0u8; SM3_OUTPUT_SIZE];
        for (i, &word) in self.state.iter().enumerate() {
            BigEndian::write_u32(&mut out[i * 4..], word);
        }
        self.zeroize();
        Ok(out)
    }
}

impl HashFunction for Sm3 {
    type Algorithm = Sm3Algorithm;
    type Output = Digest<SM3_OUTPUT_SIZE>;

    fn new() -> Self {
        Sm3::new()
    }

    fn update(&mut self, data: &[u8]) -> Result<&mut Self> {
        self.update_internal(data)?;
        Ok(self)
    }

    fn finalize(&mut self) -> Result<Self::Output> {
        let out = self.finalize_internal()?;
        Ok(Digest::new(out))
    }
}
