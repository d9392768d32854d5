use super::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

const D_SIGN: &str = "3945208f7b2144b13f36e38ac6d39f95889393692860b51a42fb81ef4df7c5b8";
const K_FIXED: &str = "59276e27d506861a16680f3ad9c02dccef3cc1fa3cdbe4ce6d54b80deac1bc21";

fn scalar(hex_str: &str) -> Scalar {
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hex::decode(hex_str).unwrap());
    Scalar::from_bytes(&bytes).unwrap()
}

#[test]
fn test_sign_gbt_32918_2_fixed_k() {
    // GB/T 32918.2 appendix A.2: M = "message digest", default identifier.
    let d = scalar(D_SIGN);
    let public = scalar_mult_base_g(&d);
    let digest = message_digest(b"message digest", &public, None).unwrap();

    let sig = sign_with_k(&digest, &d, &scalar(K_FIXED))
        .unwrap()
        .expect("standard vector does not hit a retry condition");

    assert_eq!(
        hex::encode(sig.r_bytes()),
        "f5a03b0648d2c4630eeac513e1bb81a15944da3827d5b74143ac7eaceee720b3"
    );
    assert_eq!(
        hex::encode(sig.s_bytes()),
        "b1b6aa29df212fd8763182bc0d421ca1bb9038fd1f7f42d4840b69c485bbc1aa"
    );

    assert!(verify(b"message digest", &sig, &public, None).unwrap());
}

#[test]
fn test_sign_verify_round_trip() {
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let d = Scalar::random(&mut rng).unwrap();
    let public = scalar_mult_base_g(&d);

    let sig = sign(&mut rng, b"round trip message", &d, None).unwrap();
    assert!(verify(b"round trip message", &sig, &public, None).unwrap());
}

#[test]
fn test_verify_rejects_wrong_message_key_and_id() {
    let mut rng = ChaCha20Rng::seed_from_u64(2);
    let d = Scalar::random(&mut rng).unwrap();
    let public = scalar_mult_base_g(&d);
    let sig = sign(&mut rng, b"genuine", &d, Some(b"alice")).unwrap();

    assert!(verify(b"genuine", &sig, &public, Some(b"alice")).unwrap());
    assert!(!verify(b"forged", &sig, &public, Some(b"alice")).unwrap());
    assert!(!verify(b"genuine", &sig, &public, Some(b"mallory")).unwrap());

    let other = scalar_mult_base_g(&Scalar::random(&mut rng).unwrap());
    assert!(!verify(b"genuine", &sig, &other, Some(b"alice")).unwrap());
}

#[test]
fn test_prehashed_path_skips_z_value() {
    let mut rng = ChaCha20Rng::seed_from_u64(3);
    let d = Scalar::random(&mut rng).unwrap();
    let public = scalar_mult_base_g(&d);

    // A pre-hashed signature verifies against the same digest only.
    let digest = message_digest(b"interop message", &public, None).unwrap();
    let sig = sign_prehashed(&mut rng, &digest, &d).unwrap();
    assert!(verify_prehashed(&digest, &sig, &public).unwrap());
    assert!(verify(b"interop message", &sig, &public, None).unwrap());

    let mut other = digest;
    other[0] ^= 1;
    assert!(!verify_prehashed(&other, &sig, &public).unwrap());
}

#[test]
fn test_signature_byte_round_trip() {
    let mut rng = ChaCha20Rng::seed_from_u64(4);
    let d = Scalar::random(&mut rng).unwrap();
    let sig = sign(&mut rng, b"serialize me", &d, None).unwrap();

    let bytes = sig.to_bytes();
    assert_eq!(bytes.len(), Signature::BYTE_SIZE);
    assert_eq!(Signature::from_bytes(&bytes).unwrap(), sig);

    let hex_form = sig.to_hex();
    assert_eq!(hex_form.len(), 128);
    assert_eq!(Signature::from_hex(&hex_form).unwrap(), sig);
    // Case-tolerant input.
    assert_eq!(Signature::from_hex(&hex_form.to_uppercase()).unwrap(), sig);

    assert!(Signature::from_bytes(&bytes[..63]).is_err());
    assert!(Signature::from_bytes(&[0u8; 64]).is_err());
}

#[test]
fn test_signature_der_round_trip() {
    let mut rng = ChaCha20Rng::seed_from_u64(5);
    let d = Scalar::random(&mut rng).unwrap();
    let public = scalar_mult_base_g(&d);

    for i in 0..8u8 {
        let msg = [b'm', i];
        let sig = sign(&mut rng, &msg, &d, None).unwrap();
        let der = sig.to_der();

        assert_eq!(der[0], 0x30);
        let parsed = Signature::from_der(&der).unwrap();
        assert_eq!(parsed, sig);
        assert!(verify(&msg, &parsed, &public, None).unwrap());
    }
}

#[test]
fn test_der_high_bit_gets_zero_prefix() {
    // The fixed-k vector has r ≥ 2²⁵⁵, so its DER INTEGER needs a 0x00 pad.
    let d = scalar(D_SIGN);
    let public = scalar_mult_base_g(&d);
    let digest = message_digest(b"message digest", &public, None).unwrap();
    let sig = sign_with_k(&digest, &d, &scalar(K_FIXED)).unwrap().unwrap();

    let der = sig.to_der();
    assert_eq!(der[2], 0x02);
    assert_eq!(der[3], 33);
    assert_eq!(der[4], 0x00);
    assert_eq!(der[5], 0xF5);
    assert_eq!(Signature::from_der(&der).unwrap(), sig);
}

#[test]
fn test_der_rejects_malformed() {
    let mut rng = ChaCha20Rng::seed_from_u64(6);
    let d = Scalar::random(&mut rng).unwrap();
    let der = sign(&mut rng, b"msg", &d, None).unwrap().to_der();

    // Wrong outer tag
    let mut bad = der.clone();
    bad[0] = 0x31;
    assert!(Signature::from_der(&bad).is_err());

    // Truncated
    assert!(Signature::from_der(&der[..der.len() - 1]).is_err());

    // Trailing garbage
    let mut bad = der.clone();
    bad.push(0x00);
    assert!(Signature::from_der(&bad).is_err());

    // Inner tag corrupted
    let mut bad = der;
    bad[2] = 0x03;
    assert!(Signature::from_der(&bad).is_err());
}

#[test]
fn test_sign_rejects_unusable_keys() {
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    assert!(sign(&mut rng, b"m", &Scalar::zero(), None).is_err());

    // d = n − 1 makes (1 + d) ≡ 0, which has no inverse.
    let n_minus_1 = scalar("fffffffeffffffffffffffffffffffff7203df6b21c6052b53bbf40939d54122");
    assert!(sign_prehashed(&mut rng, &[0x42u8; 32], &n_minus_1).is_err());
}
