//! Tests for the stream reader and writer
//!
//! These tests verify:
//! - Byte accounting on read and write
//! - Back-to-back values and entries on one stream
//! - File-backed streams
//! - Config limits applied by the reader

use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor};

use ntwire::{
    BooleanArray, BooleanValue, Config, DoubleValue, Entry, EntryFlag, EntryReader, EntryType,
    EntryValue, EntryWriter, StringArray, StringValue, WireError,
};
use tempfile::tempdir;

// =============================================================================
// Values
// =============================================================================

#[test]
fn test_read_value_reports_consumed_bytes() {
    let mut reader = EntryReader::new(Cursor::new(vec![0x10u8, 0x02, 0x01, 0x00, 0x00, 0x01]));

    let (value, entry_type, consumed) = reader.read_value().unwrap();
    assert_eq!(entry_type, EntryType::BooleanArray);
    assert_eq!(consumed, 4);
    assert_eq!(value.array_len(), Some(2));

    let (value, entry_type, consumed) = reader.read_value().unwrap();
    assert_eq!(entry_type, EntryType::Boolean);
    assert_eq!(consumed, 2);
    assert_eq!(value.as_bool(), Some(true));

    assert_eq!(reader.bytes_read(), 6);
}

#[test]
fn test_read_value_of_known_type() {
    let mut reader = EntryReader::new(Cursor::new(1.5f64.to_be_bytes().to_vec()));
    let value = reader.read_value_of(EntryType::Double).unwrap();

    assert_eq!(value.as_f64(), Some(1.5));
    assert_eq!(reader.bytes_read(), 8);
}

#[test]
fn test_read_flag() {
    let mut reader = EntryReader::new(Cursor::new(vec![0x01u8, 0x09]));

    assert_eq!(reader.read_flag().unwrap(), EntryFlag::Persistent);
    assert!(matches!(reader.read_flag(), Err(WireError::NoSuchFlag(0x09))));
}

#[test]
fn test_write_then_read_values() {
    let values: Vec<EntryValue> = vec![
        DoubleValue::new(9.81).into(),
        StringValue::new("gravity").unwrap().into(),
        BooleanArray::from_bools(&[false, true]).unwrap().into(),
    ];

    let mut writer = EntryWriter::new(Vec::<u8>::new());
    for value in &values {
        writer.write_value(value).unwrap();
    }
    let expected_len: usize = values.iter().map(|v| 1 + v.encoded_len()).sum();
    assert_eq!(writer.bytes_written(), expected_len as u64);

    let mut reader = EntryReader::new(Cursor::new(writer.into_inner()));
    for value in &values {
        let (decoded, entry_type, _) = reader.read_value().unwrap();
        assert_eq!(&decoded, value);
        assert_eq!(entry_type, value.entry_type());
    }
    assert_eq!(reader.bytes_read(), expected_len as u64);
}

#[test]
fn test_reader_end_of_stream_is_truncated() {
    let mut reader = EntryReader::new(Cursor::new(Vec::<u8>::new()));
    let err = reader.read_value().unwrap_err();
    assert!(err.is_truncated());
}

#[test]
fn test_reader_applies_config() {
    let config = Config::builder().max_payload_len(2).build();
    let mut reader =
        EntryReader::with_config(Cursor::new(vec![0x02u8, 0x03, b'a', b'b', b'c']), config);

    let err = reader.read_value().unwrap_err();
    assert!(matches!(err, WireError::PayloadTooLarge { len: 3, max: 2 }));
    assert_eq!(reader.config().max_payload_len, 2);
}

// =============================================================================
// Entries
// =============================================================================

fn sample_entries() -> Vec<Entry> {
    vec![
        Entry::new("/a", 1, 1, EntryFlag::Temporary, BooleanValue::new(true)).unwrap(),
        Entry::new("/b", 2, 100, EntryFlag::Persistent, DoubleValue::new(-1.0)).unwrap(),
        Entry::new(
            "/c",
            3,
            65535,
            EntryFlag::Reserved,
            StringArray::from_strs(&["x", "yz"]).unwrap(),
        )
        .unwrap(),
    ]
}

#[test]
fn test_write_then_read_entries() {
    let entries = sample_entries();

    let mut writer = EntryWriter::new(Vec::<u8>::new());
    for entry in &entries {
        writer.write_entry(entry).unwrap();
    }
    writer.flush().unwrap();
    let bytes = writer.into_inner();

    let mut reader = EntryReader::new(Cursor::new(bytes.clone()));
    for entry in &entries {
        assert_eq!(&reader.read_entry().unwrap(), entry);
    }
    assert_eq!(reader.bytes_read(), bytes.len() as u64);
    assert!(reader.read_entry().unwrap_err().is_truncated());
}

#[test]
fn test_entries_through_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("entries.bin");
    let entries = sample_entries();

    {
        let mut writer = EntryWriter::new(BufWriter::new(File::create(&path).unwrap()));
        for entry in &entries {
            writer.write_entry(entry).unwrap();
        }
        writer.flush().unwrap();
    }

    let mut reader = EntryReader::new(BufReader::new(File::open(&path).unwrap()));
    for entry in &entries {
        let decoded = reader.read_entry().unwrap();
        assert_eq!(decoded.name(), entry.name());
        assert_eq!(decoded.encode(), entry.encode());
    }

    let file_len = std::fs::metadata(&path).unwrap().len();
    assert_eq!(reader.bytes_read(), file_len);
}
