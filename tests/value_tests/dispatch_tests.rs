//! Tests for type-tag dispatch
//!
//! These tests verify:
//! - Every known tag decodes to the matching variant
//! - Unknown and reserved tags are rejected
//! - Tagged re-encoding reproduces the input bytes
//! - Dynamic array operations on the tagged union

use std::io::Cursor;

use ntwire::value::{decode_entry_type, decode_value_of};
use ntwire::{
    decode_value, BooleanArray, BooleanValue, DoubleValue, EntryType, EntryValue, RawValue,
    StringArray, StringValue, WireError,
};

fn cursor(bytes: &[u8]) -> Cursor<Vec<u8>> {
    Cursor::new(bytes.to_vec())
}

// =============================================================================
// Tags
// =============================================================================

#[test]
fn test_entry_type_from_byte() {
    assert_eq!(EntryType::try_from(0x00u8).unwrap(), EntryType::Boolean);
    assert_eq!(EntryType::try_from(0x03u8).unwrap(), EntryType::RawData);
    assert_eq!(EntryType::try_from(0x12u8).unwrap(), EntryType::StringArray);
    assert_eq!(EntryType::try_from(0x20u8).unwrap(), EntryType::RpcDefinition);

    assert!(matches!(EntryType::try_from(0x04u8), Err(WireError::NoSuchType(0x04))));
    assert!(matches!(
        EntryType::try_from(EntryType::UNDEFINED),
        Err(WireError::NoSuchType(0xff))
    ));
}

#[test]
fn test_entry_type_is_array() {
    assert!(EntryType::DoubleArray.is_array());
    assert!(!EntryType::Double.is_array());
    assert!(!EntryType::RpcDefinition.is_array());
}

#[test]
fn test_decode_entry_type_empty_stream() {
    let err = decode_entry_type(&mut cursor(&[])).unwrap_err();
    assert!(err.is_truncated());
}

// =============================================================================
// Dispatch
// =============================================================================

#[test]
fn test_decode_each_variant() {
    let cases: Vec<(Vec<u8>, EntryType)> = vec![
        (vec![0x00, 0x01], EntryType::Boolean),
        (vec![0x01, 0x3f, 0xf0, 0, 0, 0, 0, 0, 0], EntryType::Double),
        (vec![0x02, 0x02, b'h', b'i'], EntryType::String),
        (vec![0x03, 0x01, 0xfe], EntryType::RawData),
        (vec![0x10, 0x01, 0x00], EntryType::BooleanArray),
        (vec![0x11, 0x01, 0x3f, 0xf0, 0, 0, 0, 0, 0, 0], EntryType::DoubleArray),
        (vec![0x12, 0x01, 0x01, b'z'], EntryType::StringArray),
    ];

    for (bytes, expected) in cases {
        let (value, entry_type) = decode_value(&mut cursor(&bytes)).unwrap();
        assert_eq!(entry_type, expected);
        assert_eq!(value.entry_type(), expected);
        assert_eq!(&value.encode_tagged()[..], &bytes[..]);
        assert_eq!(value.encoded_len() + 1, bytes.len());
    }
}

#[test]
fn test_boolean_array_end_to_end() {
    let bytes = [0x10, 0x02, 0x01, 0x00];
    let (value, entry_type) = decode_value(&mut cursor(&bytes)).unwrap();

    assert_eq!(entry_type, EntryType::BooleanArray);
    match &value {
        EntryValue::BooleanArray(array) => assert_eq!(array.values(), vec![true, false]),
        other => panic!("Expected BooleanArray, got {:?}", other),
    }
    assert_eq!(&value.encode_tagged()[..], &bytes);
}

#[test]
fn test_unknown_tag() {
    let err = decode_value(&mut cursor(&[0x07, 0x00])).unwrap_err();
    assert!(matches!(err, WireError::NoSuchType(0x07)));
}

#[test]
fn test_rpc_definition_has_no_decoder() {
    let err = decode_value(&mut cursor(&[0x20, 0x00])).unwrap_err();
    assert!(matches!(err, WireError::NoSuchType(0x20)));
}

#[test]
fn test_decode_value_of_known_type() {
    let value = decode_value_of(&mut cursor(&[0x01]), EntryType::Boolean).unwrap();
    assert_eq!(value.as_bool(), Some(true));
}

#[test]
fn test_decode_failure_propagates() {
    let err = decode_value(&mut cursor(&[0x00, 0x09])).unwrap_err();
    assert!(matches!(err, WireError::InvalidData(_)));

    let err = decode_value(&mut cursor(&[0x02, 0x04, b'a'])).unwrap_err();
    assert!(err.is_truncated());
}

// =============================================================================
// Tagged union operations
// =============================================================================

#[test]
fn test_logical_accessors() {
    let b: EntryValue = BooleanValue::new(true).into();
    let d: EntryValue = DoubleValue::new(0.25).into();
    let s: EntryValue = StringValue::new("name").unwrap().into();
    let r: EntryValue = RawValue::new([7u8]).unwrap().into();

    assert_eq!(b.as_bool(), Some(true));
    assert_eq!(d.as_f64(), Some(0.25));
    assert_eq!(s.as_str(), Some("name"));
    assert_eq!(r.as_bytes(), Some(&[7u8][..]));
    assert_eq!(b.as_str(), None);
    assert_eq!(s.array_len(), None);
}

#[test]
fn test_array_ops_through_union() {
    let mut value: EntryValue = StringArray::from_strs(&["a"]).unwrap().into();

    value
        .array_add(StringValue::new("b").unwrap().into())
        .unwrap();
    value
        .array_update(0, StringValue::new("A").unwrap().into())
        .unwrap();

    assert_eq!(value.array_len(), Some(2));
    assert_eq!(value.array_get(0).unwrap().as_str(), Some("A"));
    assert_eq!(value.array_get(1).unwrap().as_str(), Some("b"));
    assert!(matches!(
        value.array_get(2),
        Err(WireError::IndexOutOfBounds { index: 2, len: 2 })
    ));
}

#[test]
fn test_array_ops_reject_wrong_element() {
    let mut value: EntryValue = BooleanArray::from_bools(&[false]).unwrap().into();
    let before = value.clone();

    let err = value.array_add(DoubleValue::new(1.0).into()).unwrap_err();
    assert!(matches!(err, WireError::TypeMismatch { .. }));

    let err = value
        .array_update(0, DoubleValue::new(1.0).into())
        .unwrap_err();
    assert!(matches!(err, WireError::TypeMismatch { .. }));

    assert_eq!(value, before);
}

#[test]
fn test_array_ops_on_scalar() {
    let mut value: EntryValue = DoubleValue::new(1.0).into();

    assert!(matches!(
        value.array_get(0),
        Err(WireError::NotAnArray(EntryType::Double))
    ));
    assert!(matches!(
        value.array_add(DoubleValue::new(2.0).into()),
        Err(WireError::NotAnArray(EntryType::Double))
    ));
}

#[test]
fn test_union_update_raw_keeps_type() {
    let mut value: EntryValue = DoubleValue::new(1.0).into();
    value
        .update_raw(&mut cursor(&2.0f64.to_be_bytes()))
        .unwrap();
    assert_eq!(value.as_f64(), Some(2.0));

    let err = value.update_raw(&mut cursor(&[0x00])).unwrap_err();
    assert!(err.is_truncated());
    assert_eq!(value.as_f64(), Some(2.0));
}
