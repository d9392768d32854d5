use super::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn fe(hex_str: &str) -> FieldElement {
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hex::decode(hex_str).unwrap());
    FieldElement::from_bytes(&bytes).unwrap()
}

fn scalar(hex_str: &str) -> Scalar {
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hex::decode(hex_str).unwrap());
    Scalar::from_bytes(&bytes).unwrap()
}

const D_A: &str = "81eb26e941bb5af16df116495f90695272ae2cd63d6c4ae1678418be48230029";
const D_B: &str = "785129917d45a9ea5437a59356b82338eaadda6ceb199088f14ae10defa229b5";
const P_A_X: &str = "160e12897df4edb61dd812feb96748fbd3ccf4ffe26aa6f6db9540af49c94232";
const P_A_Y: &str = "4a7dad08bb9a459531694beb20aa489d6649975e1bfcf8c4741b78b4b223007f";

#[test]
fn test_base_point_on_curve() {
    let g = base_point_g();
    assert!(!g.is_identity());
    assert_eq!(g.x_coordinate_bytes().as_slice(), &SM2_GX);
    assert_eq!(g.y_coordinate_bytes().as_slice(), &SM2_GY);
}

#[test]
fn test_point_double_and_add() {
    let g = base_point_g();
    let two_g = g.double();
    assert_eq!(
        hex::encode(two_g.x_coordinate_bytes()),
        "56cefd60d7c87c000d58ef57fa73ba4d9c0dfa08c08a7331495c2e1da3f2bd52"
    );
    assert_eq!(
        hex::encode(two_g.y_coordinate_bytes()),
        "31b7e7e6cc8189f668535ce0f8eaf1bd6de84c182f6c8e716f780d3a970a23c3"
    );

    let three_g = two_g.add(&g);
    assert_eq!(
        hex::encode(three_g.x_coordinate_bytes()),
        "a97f7cd4b3c993b4be2daa8cdb41e24ca13f6bd945302244e26918f1d0509ebf"
    );

    // Addition is commutative and consistent with doubling.
    assert_eq!(g.add(&two_g), three_g);
    assert_eq!(g.add(&g), two_g);
}

#[test]
fn test_scalar_mult_known_answer() {
    // GB/T 32918.3 static key A: P_A = d_A · G
    let p_a = scalar_mult_base_g(&scalar(D_A));
    assert_eq!(hex::encode(p_a.x_coordinate_bytes()), P_A_X);
    assert_eq!(hex::encode(p_a.y_coordinate_bytes()), P_A_Y);
}

#[test]
fn test_scalar_mult_order_boundaries() {
    // (n − 1) · G = −G, and the ladder yields the identity for zero.
    let n_minus_1 = scalar("fffffffeffffffffffffffffffffffff7203df6b21c6052b53bbf40939d54122");
    let neg_g = scalar_mult_base_g(&n_minus_1);
    assert_eq!(neg_g.x_coordinate_bytes(), SM2_GX);
    assert_eq!(
        hex::encode(neg_g.y_coordinate_bytes()),
        "43c8c95c0b098863a642311c9496deac2f56788239d5b8c0fd20cd1adec60f5f"
    );
    assert_eq!(neg_g.add(&base_point_g()), Point::identity());
    assert_eq!(base_point_g().negate(), neg_g);
    assert!(Point::identity().negate().is_identity());

    assert!(scalar_mult_base_g(&Scalar::zero()).is_identity());
}

#[test]
fn test_point_serialization_round_trip() {
    let p = scalar_mult_base_g(&scalar(D_B));

    let uncompressed = p.serialize_uncompressed();
    assert_eq!(uncompressed[0], 0x04);
    assert_eq!(Point::deserialize_uncompressed(&uncompressed).unwrap(), p);

    let compressed = p.serialize_compressed();
    assert!(compressed[0] == 0x02 || compressed[0] == 0x03);
    assert_eq!(Point::deserialize_compressed(&compressed).unwrap(), p);

    // The generic parser dispatches on the prefix.
    assert_eq!(Point::deserialize(&uncompressed).unwrap(), p);
    assert_eq!(Point::deserialize(&compressed).unwrap(), p);
}

#[test]
fn test_point_deserialize_rejects_malformed() {
    let p = base_point_g();

    let mut bad = p.serialize_uncompressed();
    bad[0] = 0x05;
    assert!(Point::deserialize(&bad).is_err());

    // Corrupted y: no longer on the curve.
    let mut bad = p.serialize_uncompressed();
    bad[64] ^= 0x01;
    assert!(Point::deserialize_uncompressed(&bad).is_err());

    assert!(Point::deserialize(&[]).is_err());
    assert!(Point::deserialize(&bad[..64]).is_err());
}

#[test]
fn test_field_mul_and_invert() {
    let d_a = fe(D_A);
    let inv = d_a.invert().unwrap();
    assert_eq!(
        hex::encode(inv.to_bytes()),
        "65bd09047dcb5b5a70742898eedd638a3ab6fe87644606b592edcc6e3287921f"
    );
    assert_eq!(d_a.mul(&inv), FieldElement::one());

    assert!(FieldElement::zero().invert().is_err());
}

#[test]
fn test_field_add_sub_negate() {
    let a = fe(D_A);
    let b = fe(D_B);
    assert_eq!(a.add(&b).sub(&b), a);
    assert_eq!(a.sub(&a), FieldElement::zero());
    assert_eq!(a.add(&a.negate()), FieldElement::zero());
    assert_eq!(FieldElement::zero().negate(), FieldElement::zero());
}

#[test]
fn test_field_sqrt() {
    let two = FieldElement::from_u32(2);
    let root = two.sqrt().unwrap();
    assert_eq!(
        hex::encode(root.to_bytes()),
        "41ed9ab234dd73a6f5f7960816b15aad6e13f7163a595ed5913c00abecf73fba"
    );
    assert_eq!(root.square(), two);

    assert_eq!(
        FieldElement::from_u32(4).sqrt().unwrap().square(),
        FieldElement::from_u32(4)
    );

    // 13 is the smallest quadratic non-residue mod p.
    assert!(FieldElement::from_u32(13).sqrt().is_err());

    assert_eq!(FieldElement::zero().sqrt().unwrap(), FieldElement::zero());
}

#[test]
fn test_field_batch_invert() {
    let elements = vec![
        FieldElement::from_u32(2),
        fe(D_A),
        fe(D_B),
        FieldElement::from_u32(0xDEADBEEF),
    ];
    let inverses = FieldElement::batch_invert(&elements).unwrap();
    for (e, inv) in elements.iter().zip(inverses.iter()) {
        assert_eq!(e.mul(inv), FieldElement::one());
    }

    assert!(FieldElement::batch_invert(&[FieldElement::zero()]).is_err());
    assert!(FieldElement::batch_invert(&[]).unwrap().is_empty());
}

#[test]
fn test_field_from_bytes_rejects_modulus() {
    assert!(FieldElement::from_bytes(&SM2_P).is_err());
    let mut above = SM2_P;
    above[31] = 0xFF;
    assert!(FieldElement::from_bytes(&above).is_err());
}

#[test]
fn test_field_reduce_bytes() {
    // p reduces to zero; 2²⁵⁶ − 1 to 2²²⁴ + 2⁹⁶ − 2⁶⁴; canonical values
    // pass through.
    assert_eq!(FieldElement::reduce_bytes(&SM2_P), FieldElement::zero());
    assert_eq!(
        FieldElement::reduce_bytes(&[0xFFu8; 32]),
        fe("0000000100000000000000000000000000000000ffffffff0000000000000000")
    );
    assert_eq!(FieldElement::reduce_bytes(&SM2_GX), fe(
        "32c4ae2c1f1981195f9904466a39c9948fe30bbff2660be1715a4589334c74c7"
    ));
}

#[test]
fn test_scalar_arithmetic_known_answers() {
    let d_a = scalar(D_A);
    let d_b = scalar(D_B);

    assert_eq!(
        hex::encode(d_a.add_mod_n(&d_b).to_bytes()),
        "fa3c507abf0104dbc228bbdcb6488c8b5d5c07432885db6a58cef9cc37c529de"
    );
    assert_eq!(
        hex::encode(d_a.mul_mod_n(&d_b).to_bytes()),
        "47af5f1c83f226b2e7792c73da1d47a7d29438965c998fed935c69f3f87740b7"
    );
    assert_eq!(
        hex::encode(d_a.invert().unwrap().to_bytes()),
        "6c31be45c53e40d06b2d2fa985b45860b79eab5f56b1d4f90114b0e7ed61cad0"
    );
    assert_eq!(d_a.invert().unwrap().mul_mod_n(&d_a), Scalar::one());

    assert_eq!(d_a.sub_mod_n(&d_a), Scalar::zero());
    assert_eq!(d_a.add_mod_n(&d_b).sub_mod_n(&d_b), d_a);
    assert!(Scalar::zero().invert().is_err());
}

#[test]
fn test_scalar_from_bytes_range() {
    // The group order itself is out of range; order − 1 is fine.
    assert!(Scalar::from_bytes(&SM2_N).is_err());
    let n_minus_1 = scalar("fffffffeffffffffffffffffffffffff7203df6b21c6052b53bbf40939d54122");
    assert!(!n_minus_1.is_zero());

    // Reduction maps n to zero and n + 1 to one.
    assert!(Scalar::reduce_bytes(&SM2_N).is_zero());
    let mut n_plus_1 = SM2_N;
    n_plus_1[31] += 1;
    assert_eq!(Scalar::reduce_bytes(&n_plus_1), Scalar::one());
}

#[test]
fn test_generate_keypair_is_valid() {
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    for _ in 0..8 {
        let (d, public) = generate_keypair(&mut rng).unwrap();
        assert!(!d.is_zero());
        assert!(!public.is_identity());
        // d·G recomputed must match, and the point round-trips the codec.
        assert_eq!(scalar_mult_base_g(&d), public);
        let enc = public.serialize_uncompressed();
        assert_eq!(Point::deserialize_uncompressed(&enc).unwrap(), public);
    }
}

#[test]
fn test_scalar_mult_distributes() {
    // (a + b)·G = a·G + b·G exercises add, double and the ladder together.
    let mut rng = ChaCha20Rng::seed_from_u64(99);
    let a = Scalar::random(&mut rng).unwrap();
    let b = Scalar::random(&mut rng).unwrap();
    let lhs = scalar_mult_base_g(&a.add_mod_n(&b));
    let rhs = scalar_mult_base_g(&a).add(&scalar_mult_base_g(&b));
    assert_eq!(lhs, rhs);
}
