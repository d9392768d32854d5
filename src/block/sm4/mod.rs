//! SM4 block cipher
//!
//! Implements the SM4 cipher as specified in GM/T 0002-2012: 128-bit
//! blocks, 128-bit keys, 32 rounds over four 32-bit state words.
//!
//! The S-box is a read-only table. Table lookups are not hardened against
//! cache-timing observation; see the crate documentation for the
//! side-channel posture.

use byteorder::{BigEndian, ByteOrder};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::block::modes::{Cbc, Ecb};
use crate::block::padding::Padding;
use crate::block::{BlockCipher, CipherAlgorithm};
use crate::error::{validate, Result};
use crate::security::SecretBuffer;
use crate::types::{Nonce, SecretBytes};

/// SM4 key size in bytes
pub const SM4_KEY_SIZE: usize = 16;

/// SM4 block size in bytes
pub const SM4_BLOCK_SIZE: usize = 16;

/// SM4 S-box from GM/T 0002 section 6.2
const SBOX: [u8; 256] = [
    0xD6, 0x90, 0xE9, 0xFE, 0xCC, 0xE1, 0x3D, 0xB7, 0x16, 0xB6, 0x14, 0xC2, 0x28, 0xFB, 0x2C,
    0x05, 0x2B, 0x67, 0x9A, 0x76, 0x2A, 0xBE, 0x04, 0xC3, 0xAA, 0x44, 0x13, 0x26, 0x49, 0x86,
    0x06, 0x99, 0x9C, 0x42, 0x50, 0xF4, 0x91, 0xEF, 0x98, 0x7A, 0x33, 0x54, 0x0B, 0x43, 0xED,
    0xCF, 0xAC, 0x62, 0xE4, 0xB3, 0x1C, 0xA9, 0xC9, 0x08, 0xE8, 0x95, 0x80, 0xDF, 0x94, 0xFA,
    0x75, 0x8F, 0x3F, 0xA6, 0x47, 0x07, 0xA7, 0xFC, 0xF3, 0x73, 0x17, 0xBA, 0x83, 0x59, 0x3C,
    0x19, 0xE6, 0x85, 0x4F, 0xA8, 0x68, 0x6B, 0x81, 0xB2, 0x71, 0x64, 0xDA, 0x8B, 0xF8, 0xEB,
    0x0F, 0x4B, 0x70, 0x56, 0x9D, 0x35, 0x1E, 0x24, 0x0E, 0x5E, 0x63, 0x58, 0xD1, 0xA2, 0x25,
    0x22, 0x7C, 0x3B, 0x01, 0x21, 0x78, 0x87, 0xD4, 0x00, 0x46, 0x57, 0x9F, 0xD3, 0x27, 0x52,
    0x4C, 0x36, 0x02, 0xE7, 0xA0, 0xC4, 0xC8, 0x9E, 0xEA, 0xBF, 0x8A, 0xD2, 0x40, 0xC7, 0x38,
    0xB5, 0xA3, 0xF7, 0xF2, 0xCE, 0xF9, 0x61, 0x15, 0xA1, 0xE0, 0xAE, 0x5D, 0xA4, 0x9B, 0x34,
    0x1A, 0x55, 0xAD, 0x93, 0x32, 0x30, 0xF5, 0x8C, 0xB1, 0xE3, 0x1D, 0xF6, 0xE2, 0x2E, 0x82,
    0x66, 0xCA, 0x60, 0xC0, 0x29, 0x23, 0xAB, 0x0D, 0x53, 0x4E, 0x6F, 0xD5, 0xDB, 0x37, 0x45,
    0xDE, 0xFD, 0x8E, 0x2F, 0x03, 0xFF, 0x6A, 0x72, 0x6D, 0x6C, 0x5B, 0x51, 0x8D, 0x1B, 0xAF,
    0x92, 0xBB, 0xDD, 0xBC, 0x7F, 0x11, 0xD9, 0x5C, 0x41, 0x1F, 0x10, 0x5A, 0xD8, 0x0A, 0xC1,
    0x31, 0x88, 0xA5, 0xCD, 0x7B, 0xBD, 0x2D, 0x74, 0xD0, 0x12, 0xB8, 0xE5, 0xB4, 0xB0, 0x89,
    0x69, 0x97, 0x4A, 0x0C, 0x96, 0x77, 0x7E, 0x65, 0xB9, 0xF1, 0x09, 0xC5, 0x6E, 0xC6, 0x84,
    0x18, 0xF0, 0x7D, 0xEC, 0x3A, 0xDC, 0x4D, 0x20, 0x79, 0xEE, 0x5F, 0x3E, 0xD7, 0xCB, 0x39,
    0x48,
];

/// System parameter FK from GM/T 0002 section 7.3
const FK: [u32; 4] = [0xA3B1_BAC6, 0x56AA_3350, 0x677D_9197, 0xB270_22DC];

/// Fixed parameters CK from GM/T 0002 section 7.3
const CK: [u32; 32] = [
    0x0007_0E15, 0x1C23_2A31, 0x383F_464D, 0x545B_6269, 0x7077_7E85, 0x8C93_9AA1, 0xA8AF_B6BD,
    0xC4CB_D2D9, 0xE0E7_EEF5, 0xFC03_0A11, 0x181F_262D, 0x343B_4249, 0x5057_5E65, 0x6C73_7A81,
    0x888F_969D, 0xA4AB_B2B9, 0xC0C7_CED5, 0xDCE3_EAF1, 0xF8FF_060D, 0x141B_2229, 0x3037_3E45,
    0x4C53_5A61, 0x686F_767D, 0x848B_9299, 0xA0A7_AEB5, 0xBCC3_CAD1, 0xD8DF_E6ED, 0xF4FB_0209,
    0x1017_1E25, 0x2C33_3A41, 0x484F_565D, 0x646B_7279,
];

/// Nonlinear substitution τ applied bytewise to a word
#[inline(always)]
fn tau(x: u32) -> u32 {
    u32::from(SBOX[(x >> 24) as usize]) << 24
        | u32::from(SBOX[((x >> 16) & 0xFF) as usize]) << 16
        | u32::from(SBOX[((x >> 8) & 0xFF) as usize]) << 8
        | u32::from(SBOX[(x & 0xFF) as usize])
}

/// Round transform T = L ∘ τ used during encryption
#[inline(always)]
fn t_enc(x: u32) -> u32 {
    let b = tau(x);
    b ^ b.rotate_left(2) ^ b.rotate_left(10) ^ b.rotate_left(18) ^ b.rotate_left(24)
}

/// Key-schedule transform T' = L' ∘ τ
#[inline(always)]
fn t_key(x: u32) -> u32 {
    let b = tau(x);
    b ^ b.rotate_left(13) ^ b.rotate_left(23)
}

/// Marker type for the SM4 algorithm
pub enum Sm4Algorithm {}

impl CipherAlgorithm for Sm4Algorithm {
    const KEY_SIZE: usize = SM4_KEY_SIZE;
    const BLOCK_SIZE: usize = SM4_BLOCK_SIZE;

    fn name() -> &'static str {
        "SM4"
    }
}

/// SM4 block cipher with an expanded round-key schedule
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Sm4 {
    round_keys: SecretBuffer<128>, // 32 rounds × 4 bytes
}

impl CipherAlgorithm for Sm4 {
    const KEY_SIZE: usize = SM4_KEY_SIZE;
    const BLOCK_SIZE: usize = SM4_BLOCK_SIZE;

    fn name() -> &'static str {
        "SM4"
    }
}

impl Sm4 {
    /// Key expansion per GM/T 0002 section 7.3
    fn expand_key(key: &[u8]) -> Result<SecretBuffer<128>> {
        validate::length("SM4 key", key.len(), SM4_KEY_SIZE)?;

        let mut k = [0u32; 36];
        for (i, item) in k.iter_mut().enumerate().take(4) {
            *item = BigEndian::read_u32(&key[i * 4..]) ^ FK[i];
        }
        for i in 0..32 {
            k[i + 4] = k[i] ^ t_key(k[i + 1] ^ k[i + 2] ^ k[i + 3] ^ CK[i]);
        }

        let mut bytes = [0u8; 128];
        for i in 0..32 {
            BigEndian::write_u32(&mut bytes[i * 4..], k[i + 4]);
        }
        k.zeroize();

        Ok(SecretBuffer::new(bytes))
    }

    #[inline]
    fn round_key(&self, i: usize) -> u32 {
        BigEndian::read_u32(&self.round_keys.as_ref()[i * 4..])
    }

    fn crypt_block(&self, block: &mut [u8], reverse_keys: bool) -> Result<()> {
        validate::length("SM4 block", block.len(), SM4_BLOCK_SIZE)?;

        let mut x = [0u32; 4];
        for (i, word) in x.iter_mut().enumerate() {
            *word = BigEndian::read_u32(&block[i * 4..]);
        }

        for round in 0..32 {
            let rk = if reverse_keys {
                self.round_key(31 - round)
            } else {
                self.round_key(round)
            };
            let next = x[0] ^ t_enc(x[1] ^ x[2] ^ x[3] ^ rk);
            x[0] = x[1];
            x[1] = x[2];
            x[2] = x[3];
            x[3] = next;
        }

        // Output is the reverse of the final four state words.
        BigEndian::write_u32(&mut block[0..], x[3]);
        BigEndian::write_u32(&mut block[4..], x[2]);
        BigEndian::write_u32(&mut block[8..], x[1]);
        BigEndian::write_u32(&mut block[12..], x[0]);

        x.zeroize();
        Ok(())
    }
}

impl BlockCipher for Sm4 {
    type Algorithm = Sm4Algorithm;
    type Key = SecretBytes<SM4_KEY_SIZE>;

    fn new(key: &Self::Key) -> Self {
        let round_keys =
            Self::expand_key(key.as_ref()).expect("SM4 key expansion cannot fail on a sized key");
        Sm4 { round_keys }
    }

    fn encrypt_block(&self, block: &mut [u8]) -> Result<()> {
        self.crypt_block(block, false)
    }

    fn decrypt_block(&self, block: &mut [u8]) -> Result<()> {
        self.crypt_block(block, true)
    }
}

/// Mode of operation for the one-shot SM4 API
#[derive(Clone, Debug)]
pub enum Sm4Mode {
    /// Electronic codebook, no IV
    Ecb,
    /// Cipher block chaining with a 16-byte IV
    Cbc(Nonce<SM4_BLOCK_SIZE>),
}

/// Encrypt `data` under `key` with the selected mode and padding
pub fn encrypt(
    data: &[u8],
    key: &SecretBytes<SM4_KEY_SIZE>,
    mode: &Sm4Mode,
    padding: Padding,
) -> Result<Vec<u8>> {
    let input = padding.apply(data, SM4_BLOCK_SIZE)?;
    let cipher = Sm4::new(key);
    match mode {
        Sm4Mode::Ecb => Ecb::new(cipher).encrypt(&input),
        Sm4Mode::Cbc(iv) => Cbc::new(cipher, iv)?.encrypt(&input),
    }
}

/// Decrypt `data` under `key` with the selected mode and padding
pub fn decrypt(
    data: &[u8],
    key: &SecretBytes<SM4_KEY_SIZE>,
    mode: &Sm4Mode,
    padding: Padding,
) -> Result<Vec<u8>> {
    let cipher = Sm4::new(key);
    let output = match mode {
        Sm4Mode::Ecb => Ecb::new(cipher).decrypt(data)?,
        Sm4Mode::Cbc(iv) => Cbc::new(cipher, iv)?.decrypt(data)?,
    };
    padding.remove(output, SM4_BLOCK_SIZE)
}

#[cfg(test)]
mod tests;
