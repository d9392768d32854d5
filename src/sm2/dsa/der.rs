//! ASN.1 DER envelope for SM2 signatures
//!
//! `SEQUENCE { r INTEGER, s INTEGER }` with minimal positive integer
//! encoding: leading zero bytes are stripped, and a single 0x00 is
//! prefixed when the magnitude's high bit is set.

use crate::ec::sm2p256::{Scalar, SM2_SCALAR_SIZE};
use crate::error::{Error, Result};
use crate::sm2::dsa::Signature;

const SEQUENCE_TAG: u8 = 0x30;
const INTEGER_TAG: u8 = 0x02;

fn malformed(reason: &'static str) -> Error {
    Error::Encoding {
        context: "SM2 DER signature",
        reason,
    }
}

/// Encode a scalar as a minimal DER INTEGER body
fn encode_integer(bytes: &[u8; SM2_SCALAR_SIZE]) -> Vec<u8> {
    let first = bytes.iter().position(|&b| b != 0).unwrap_or(SM2_SCALAR_SIZE - 1);
    let magnitude = &bytes[first..];
    let mut out = Vec::with_capacity(magnitude.len() + 1);
    if magnitude[0] & 0x80 != 0 {
        out.push(0x00);
    }
    out.extend_from_slice(magnitude);
    out
}

/// Parse one DER INTEGER at `pos`, returning the scalar and the new offset
fn parse_integer(der: &[u8], mut pos: usize) -> Result<(Scalar, usize)> {
    if der.len() < pos + 2 {
        return Err(malformed("truncated INTEGER header"));
    }
    if der[pos] != INTEGER_TAG {
        return Err(malformed("expected INTEGER tag"));
    }
    pos += 1;
    let len = der[pos] as usize;
    pos += 1;
    if len == 0 || len > SM2_SCALAR_SIZE + 1 || der.len() < pos + len {
        return Err(malformed("bad INTEGER length"));
    }
    let body = &der[pos..pos + len];
    if body[0] & 0x80 != 0 {
        return Err(malformed("negative INTEGER"));
    }
    if len > 1 && body[0] == 0 && body[1] & 0x80 == 0 {
        return Err(malformed("non-minimal INTEGER"));
    }
    let magnitude = if body[0] == 0 { &body[1..] } else { body };
    if magnitude.len() > SM2_SCALAR_SIZE {
        return Err(malformed("INTEGER too large"));
    }

    let mut bytes = [0u8; SM2_SCALAR_SIZE];
    bytes[SM2_SCALAR_SIZE - magnitude.len()..].copy_from_slice(magnitude);
    let scalar = Scalar::from_bytes(&bytes).map_err(|_| malformed("INTEGER above group order"))?;
    Ok((scalar, pos + len))
}

impl Signature {
    /// Encode as DER `SEQUENCE { r INTEGER, s INTEGER }`
    pub fn to_der(&self) -> Vec<u8> {
        let r = encode_integer(&self.r_bytes());
        let s = encode_integer(&self.s_bytes());

        // Body is at most 2·(2 + 33) = 70 bytes, so single-byte lengths.
        let body_len = 2 + r.len() + 2 + s.len();
        let mut der = Vec::with_capacity(2 + body_len);
        der.push(SEQUENCE_TAG);
        der.push(body_len as u8);
        der.push(INTEGER_TAG);
        der.push(r.len() as u8);
        der.extend_from_slice(&r);
        der.push(INTEGER_TAG);
        der.push(s.len() as u8);
        der.extend_from_slice(&s);
        der
    }

    /// Parse a DER `SEQUENCE { r INTEGER, s INTEGER }`
    pub fn from_der(der: &[u8]) -> Result<Self> {
        if der.len() < 8 {
            return Err(malformed("too short"));
        }
        if der[0] != SEQUENCE_TAG {
            return Err(malformed("expected SEQUENCE tag"));
        }
        let body_len = der[1] as usize;
        if body_len & 0x80 != 0 || der.len() != 2 + body_len {
            return Err(malformed("bad SEQUENCE length"));
        }

        let (r, pos) = parse_integer(der, 2)?;
        let (s, pos) = parse_integer(der, pos)?;
        if pos != der.len() {
            return Err(malformed("trailing bytes after SEQUENCE"));
        }
        if r.is_zero() || s.is_zero() {
            return Err(malformed("signature component is zero"));
        }
        Ok(Signature::new(r, s))
    }
}
