//! Distinguishing-identifier hash (the Z value)
//!
//! GM/T 0003.2 binds a signer's identifier to their public key before
//! hashing the message proper:
//!
//! `Z = SM3(ENTL ‖ ID ‖ a ‖ b ‖ Gx ‖ Gy ‖ Px ‖ Py)`
//!
//! where ENTL is the 16-bit big-endian bit length of the identifier.

use byteorder::{BigEndian, ByteOrder};

use crate::ec::sm2p256::{Point, SM2_A, SM2_B, SM2_GX, SM2_GY};
use crate::error::{Error, Result};
use crate::hash::{HashFunction, Sm3};

/// Default distinguishing identifier from GM/T 0009
pub const DEFAULT_ID: &[u8] = b"1234567812345678";

/// Compute the Z value for `id` (the default identifier when `None`)
/// and the public key `public`
pub fn z_value(id: Option<&[u8]>, public: &Point) -> Result<[u8; 32]> {
    let id = id.unwrap_or(DEFAULT_ID);
    if id.len() > 0xFFFF / 8 {
        return Err(Error::param("id", "identifier longer than 8191 bytes"));
    }
    if public.is_identity() {
        return Err(Error::Key {
            context: "SM2 Z value",
            reason: "public key is the point at infinity",
        });
    }

    let mut entl = [0u8; 2];
    BigEndian::write_u16(&mut entl, (id.len() * 8) as u16);

    let mut hasher = Sm3::new();
    hasher.update(&entl)?;
    hasher.update(id)?;
    hasher.update(&SM2_A)?;
    hasher.update(&SM2_B)?;
    hasher.update(&SM2_GX)?;
    hasher.update(&SM2_GY)?;
    hasher.update(&public.x_coordinate_bytes())?;
    hasher.update(&public.y_coordinate_bytes())?;

    Ok(hasher.finalize()?.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ec::sm2p256::{scalar_mult_base_g, Scalar};

    fn public_from_hex(d_hex: &str) -> Point {
        let mut d = [0u8; 32];
        d.copy_from_slice(&hex::decode(d_hex).unwrap());
        scalar_mult_base_g(&Scalar::from_bytes(&d).unwrap())
    }

    #[test]
    fn test_z_value_gbt_32918_2() {
        // Signer key from the GB/T 32918.2 appendix; ZA from the standard.
        let public = public_from_hex(
            "3945208f7b2144b13f36e38ac6d39f95889393692860b51a42fb81ef4df7c5b8",
        );
        let z = z_value(None, &public).unwrap();
        assert_eq!(
            hex::encode(z),
            "b2e14c5c79c6df5b85f4fe7ed8db7a262b9da7e07ccb0ea9f4747b8ccda8a4f3"
        );
    }

    #[test]
    fn test_z_value_depends_on_id() {
        let public = public_from_hex(
            "81eb26e941bb5af16df116495f90695272ae2cd63d6c4ae1678418be48230029",
        );
        let default_z = z_value(None, &public).unwrap();
        let explicit = z_value(Some(DEFAULT_ID), &public).unwrap();
        assert_eq!(default_z, explicit);

        let other = z_value(Some(b"alice@example.com"), &public).unwrap();
        assert_ne!(default_z, other);
    }

    #[test]
    fn test_z_value_rejects_oversized_id() {
        let public = public_from_hex(
            "81eb26e941bb5af16df116495f90695272ae2cd63d6c4ae1678418be48230029",
        );
        let id = vec![b'x'; 8192];
        assert!(z_value(Some(&id), &public).is_err());
        let id = vec![b'x'; 8191];
        assert!(z_value(Some(&id), &public).is_ok());
    }

    #[test]
    fn test_z_value_rejects_identity_key() {
        assert!(z_value(None, &Point::identity()).is_err());
    }
}
