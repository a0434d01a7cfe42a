//! Encoding round-trip and decoder hostility across every codec this crate
//! exposes.

use snowid::{CodecError, Identifier};

const SAMPLE_WORDS: [i64; 6] = [0, 1, 42, 4095, 1 << 40, i64::MAX];

#[test]
fn every_codec_round_trips() {
    for &word in &SAMPLE_WORDS {
        let id = Identifier::from_i64(word);

        assert_eq!(Identifier::from_base2(&id.to_base2()).unwrap(), id);
        assert_eq!(Identifier::from_base32(&id.to_base32()).unwrap(), id);
        assert_eq!(Identifier::from_base36(&id.to_base36()).unwrap(), id);
        assert_eq!(Identifier::from_base58(&id.to_base58()).unwrap(), id);
        assert_eq!(Identifier::from_base62(&id.to_base62()).unwrap(), id);
        assert_eq!(Identifier::from_base64(&id.to_base64()).unwrap(), id);
        assert_eq!(Identifier::from_base64url(&id.to_base64url()).unwrap(), id);
        assert_eq!(Identifier::from_hex(&id.to_hex()).unwrap(), id);
        assert_eq!(Identifier::from_decimal_string(&id.to_decimal_string()).unwrap(), id);
        assert_eq!(Identifier::from_be_bytes(id.to_be_bytes()).unwrap(), id);
    }
}

#[test]
fn invalid_character_is_rejected_by_every_textual_codec() {
    assert!(matches!(Identifier::from_base2("102"), Err(CodecError::InvalidCharacter { .. })));
    assert!(matches!(Identifier::from_base32("!!!"), Err(CodecError::InvalidCharacter { .. })));
    assert!(matches!(Identifier::from_base36("ABC"), Err(CodecError::InvalidCharacter { .. })));
    assert!(matches!(Identifier::from_base58("0"), Err(CodecError::InvalidCharacter { .. })));
    assert!(matches!(Identifier::from_base62("12-34"), Err(CodecError::InvalidCharacter { .. })));
    assert!(matches!(Identifier::from_hex("12g4"), Err(CodecError::InvalidCharacter { .. })));
    assert!(matches!(Identifier::from_decimal_string("12a4"), Err(CodecError::InvalidCharacter { .. })));
}

#[test]
fn too_long_input_is_rejected() {
    assert!(matches!(Identifier::from_base2(&"1".repeat(65)), Err(CodecError::TooLong { .. })));
    assert!(matches!(Identifier::from_base32(&"y".repeat(14)), Err(CodecError::TooLong { .. })));
    assert!(matches!(Identifier::from_base36(&"1".repeat(14)), Err(CodecError::TooLong { .. })));
    assert!(matches!(Identifier::from_base58(&"1".repeat(12)), Err(CodecError::TooLong { .. })));
    assert!(matches!(Identifier::from_base62(&"Z".repeat(12)), Err(CodecError::TooLong { .. })));
    assert!(matches!(Identifier::from_hex(&"0".repeat(17)), Err(CodecError::TooLong { .. })));
    assert!(matches!(Identifier::from_decimal_string(&"9".repeat(20)), Err(CodecError::TooLong { .. })));
}

#[test]
fn numeric_overflow_is_rejected() {
    assert_eq!(Identifier::from_hex("8000000000000000").unwrap_err(), CodecError::Overflow);
    assert_eq!(Identifier::from_base58(&"Z".repeat(11)).unwrap_err(), CodecError::Overflow);
    assert_eq!(
        Identifier::from_decimal_string(&(i64::MAX as u64 + 1).to_string()).unwrap_err(),
        CodecError::Overflow
    );
}
