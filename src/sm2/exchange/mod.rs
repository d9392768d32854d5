//! SM2 two-party authenticated key agreement (GM/T 0003.3)
//!
//! Both parties combine their static and ephemeral keys, the peer's
//! public counterparts, and the two identifier hashes into a shared
//! point, then derive the session key with the counter-mode KDF. The
//! optional confirmation hashes S1/S2/SA/SB of the standard are not
//! produced; the derived key alone is returned.

use crate::ec::sm2p256::{scalar_mult, Point, Scalar, SM2_SCALAR_SIZE};
use crate::error::{Error, Result};
use crate::sm2::distid::z_value;
use crate::sm2::kdf::{is_all_zero, kdf};
use crate::sm2::KeyPair;

/// Reduced x-coordinate: x̄ = 2^w + (x mod 2^w) with w = 127
///
/// Keeps the low 127 bits of the coordinate and forces bit 127, so the
/// result always lies in [2¹²⁷, 2¹²⁸) and well below the group order.
fn reduced_x(point: &Point) -> Scalar {
    let x = point.x_coordinate_bytes();
    let mut bytes = [0u8; SM2_SCALAR_SIZE];
    bytes[16..].copy_from_slice(&x[16..]);
    bytes[16] |= 0x80;
    // value < 2¹²⁸ < n, so parsing cannot fail
    Scalar::from_bytes(&bytes).expect("reduced coordinate is below the group order")
}

/// Derive a `klen`-byte shared key on one side of the exchange
///
/// `own` and `own_ephemeral` are this party's static and ephemeral
/// keypairs; `peer_public` and `peer_ephemeral_public` the peer's public
/// counterparts. `is_recipient` states whether this party is the
/// responder of the exchange: the identifier hashes always enter the KDF
/// in initiator-then-responder order, so both sides derive the same key.
#[allow(clippy::too_many_arguments)]
pub fn derive_shared_key(
    own: &KeyPair,
    own_ephemeral: &KeyPair,
    peer_public: &Point,
    peer_ephemeral_public: &Point,
    klen: usize,
    is_recipient: bool,
    own_id: Option<&[u8]>,
    peer_id: Option<&[u8]>,
) -> Result<Vec<u8>> {
    if peer_public.is_identity() || peer_ephemeral_public.is_identity() {
        return Err(Error::Key {
            context: "SM2 key agreement",
            reason: "peer key is the point at infinity",
        });
    }

    // t = (d + x̄₁·r) mod n from our own keys
    let x1_bar = reduced_x(own_ephemeral.public_point());
    let t = own
        .secret_scalar()
        .add_mod_n(&x1_bar.mul_mod_n(own_ephemeral.secret_scalar()));

    // U = t·(P_peer + x̄₂·R_peer); cofactor 1, no extra multiply
    let x2_bar = reduced_x(peer_ephemeral_public);
    let combined = peer_public.add(&scalar_mult(&x2_bar, peer_ephemeral_public));
    let u = scalar_mult(&t, &combined);
    if u.is_identity() {
        return Err(Error::Key {
            context: "SM2 key agreement",
            reason: "agreed point is the point at infinity",
        });
    }

    let z_own = z_value(own_id, own.public_point())?;
    let z_peer = z_value(peer_id, peer_public)?;
    let (z_initiator, z_responder) = if is_recipient {
        (z_peer, z_own)
    } else {
        (z_own, z_peer)
    };

    let mut z = Vec::with_capacity(64 + 64);
    z.extend_from_slice(&u.x_coordinate_bytes());
    z.extend_from_slice(&u.y_coordinate_bytes());
    z.extend_from_slice(&z_initiator);
    z.extend_from_slice(&z_responder);

    let key = kdf(&z, klen)?;
    if is_all_zero(&key) {
        return Err(Error::Ciphertext {
            context: "SM2 key agreement",
            reason: "derived key is all zero",
        });
    }
    Ok(key)
}
