use super::*;

#[test]
fn test_pkcs7_apply() {
    let padded = Padding::Pkcs7.apply(b"abc", 16).unwrap();
    assert_eq!(padded.len(), 16);
    assert_eq!(&padded[..3], b"abc");
    assert!(padded[3..].iter().all(|&b| b == 13));

    // Aligned input gains a full block of padding.
    let padded = Padding::Pkcs7.apply(&[0u8; 16], 16).unwrap();
    assert_eq!(padded.len(), 32);
    assert!(padded[16..].iter().all(|&b| b == 16));
}

#[test]
fn test_pkcs7_remove() {
    let mut data = b"abc".to_vec();
    data.extend_from_slice(&[13u8; 13]);
    assert_eq!(Padding::Pkcs7.remove(data, 16).unwrap(), b"abc");
}

#[test]
fn test_pkcs7_round_trip_all_lengths() {
    for len in 0..48usize {
        let data: Vec<u8> = (0..len).map(|i| i as u8).collect();
        let padded = Padding::Pkcs7.apply(&data, 16).unwrap();
        assert_eq!(padded.len() % 16, 0);
        assert_eq!(Padding::Pkcs7.remove(padded, 16).unwrap(), data);
    }
}

#[test]
fn test_pkcs7_rejects_bad_padding() {
    // Pad length zero
    assert!(Padding::Pkcs7.remove(vec![0u8; 16], 16).is_err());
    // Pad length over block size
    let mut data = vec![0u8; 16];
    data[15] = 17;
    assert!(Padding::Pkcs7.remove(data, 16).is_err());
    // Inconsistent pad bytes
    let mut data = vec![4u8; 16];
    data[13] = 3;
    assert!(Padding::Pkcs7.remove(data, 16).is_err());
    // Empty input
    assert!(Padding::Pkcs7.remove(Vec::new(), 16).is_err());
}

#[test]
fn test_none_requires_alignment() {
    assert!(Padding::None.apply(&[0u8; 16], 16).is_ok());
    assert!(Padding::None.apply(&[0u8; 20], 16).is_err());
    assert_eq!(Padding::None.remove(vec![1, 2, 3], 16).unwrap(), [1, 2, 3]);
}
