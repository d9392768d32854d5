use super::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

const D_A: &str = "81eb26e941bb5af16df116495f90695272ae2cd63d6c4ae1678418be48230029";
const P_A_HEX: &str = "04160e12897df4edb61dd812feb96748fbd3ccf4ffe26aa6f6db9540af49c942324a7dad08bb9a459531694beb20aa489d6649975e1bfcf8c4741b78b4b223007f";
const D_B: &str = "785129917d45a9ea5437a59356b82338eaadda6ceb199088f14ae10defa229b5";
const P_B_HEX: &str = "046ae848c57c53c7b1b5fa99eb2286af078ba64c64591b8b566f7357d576f16dfbee489d771621a27b36c5c7992062e9cd09a9264386f3fbea54dff69305621c4d";

#[test]
fn test_keypair_from_secret() {
    let kp = KeyPair::from_secret_hex(D_A).unwrap();
    assert_eq!(kp.secret_hex(), D_A);
    assert_eq!(kp.public_hex(), P_A_HEX);
    assert_eq!(kp.public_bytes()[0], 0x04);
}

#[test]
fn test_keypair_generate() {
    let mut rng = ChaCha20Rng::seed_from_u64(31);
    let kp = KeyPair::generate_with(&mut rng).unwrap();

    // Hex boundary: 64-char scalar, 130-char uncompressed point, lowercase.
    assert_eq!(kp.secret_hex().len(), 64);
    assert_eq!(kp.public_hex().len(), 130);
    assert_eq!(kp.secret_hex(), kp.secret_hex().to_lowercase());

    let restored = KeyPair::from_secret_hex(&kp.secret_hex()).unwrap();
    assert_eq!(restored.public_hex(), kp.public_hex());
}

#[test]
fn test_keypair_rejects_invalid_secrets() {
    assert!(KeyPair::from_secret_bytes(&[0u8; 32]).is_err());
    assert!(KeyPair::from_secret_bytes(&[0u8; 31]).is_err());
    assert!(KeyPair::from_secret_hex("not hex").is_err());
    // The group order is out of range.
    assert!(KeyPair::from_secret_hex(
        "fffffffeffffffffffffffffffffffff7203df6b21c6052b53bbf40939d54123"
    )
    .is_err());
}

#[test]
fn test_public_key_parsing() {
    let p = public_key_from_hex(P_A_HEX).unwrap();
    assert_eq!(hex::encode(p.serialize_uncompressed()), P_A_HEX);

    // Uppercase input is tolerated, output stays lowercase.
    let p2 = public_key_from_hex(&P_A_HEX.to_uppercase()).unwrap();
    assert_eq!(p, p2);

    // Compressed round trip through the byte parser.
    let compressed = p.serialize_compressed();
    assert_eq!(public_key_from_bytes(&compressed).unwrap(), p);

    assert!(public_key_from_hex("04deadbeef").is_err());
    assert!(public_key_from_hex("zz").is_err());
}

#[test]
fn test_ecdh_symmetry_gbt_keys() {
    let a = KeyPair::from_secret_hex(D_A).unwrap();
    let b = KeyPair::from_secret_hex(D_B).unwrap();

    let shared_a = ecdh(a.secret_scalar(), b.public_point()).unwrap();
    let shared_b = ecdh(b.secret_scalar(), a.public_point()).unwrap();
    assert_eq!(shared_a, shared_b);
    assert_eq!(
        hex::encode(shared_a),
        "4adbf6fcd7474aef1a59306bec8c4943365d46ee45d528c3ae0a8deec45da8d4"
    );
}

#[test]
fn test_ecdh_rejects_degenerate_inputs() {
    let a = KeyPair::from_secret_hex(D_A).unwrap();
    assert!(ecdh(a.secret_scalar(), &Point::identity()).is_err());
    assert!(ecdh(&Scalar::zero(), a.public_point()).is_err());
}
