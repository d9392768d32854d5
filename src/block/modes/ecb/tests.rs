use super::*;
use crate::block::sm4::Sm4;
use crate::types::SecretBytes;

fn cipher() -> Sm4 {
    Sm4::new(&SecretBytes::new([0x22u8; 16]))
}

#[test]
fn test_ecb_round_trip() {
    let ecb = Ecb::new(cipher());
    let plaintext = [0x3Cu8; 64];
    let ct = ecb.encrypt(&plaintext).unwrap();
    assert_eq!(ct.len(), 64);
    assert_eq!(ecb.decrypt(&ct).unwrap(), plaintext);
}

#[test]
fn test_ecb_identical_blocks_identical_ciphertext() {
    let ecb = Ecb::new(cipher());
    let ct = ecb.encrypt(&[0x99u8; 32]).unwrap();
    assert_eq!(ct[..16], ct[16..32]);
}

#[test]
fn test_ecb_rejects_unaligned_input() {
    let ecb = Ecb::new(cipher());
    assert!(ecb.encrypt(&[0u8; 1]).is_err());
    assert!(ecb.decrypt(&[0u8; 33]).is_err());
}

#[test]
fn test_ecb_empty_input() {
    let ecb = Ecb::new(cipher());
    assert!(ecb.encrypt(&[]).unwrap().is_empty());
    assert!(ecb.decrypt(&[]).unwrap().is_empty());
}
