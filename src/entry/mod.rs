//! Entry Module
//!
//! The envelope that carries a named, typed, flagged value.
//!
//! ## Wire Format
//! ```text
//! ┌────────────┬──────────┬────────┬─────────┬──────────┬──────────────┐
//! │ Name (str) │ Type (1) │ ID (2) │ Seq (2) │ Flag (1) │    Value     │
//! └────────────┴──────────┴────────┴─────────┴──────────┴──────────────┘
//! ```
//!
//! ID and sequence number are big-endian. The name uses the String value
//! encoding (uleb128 length + UTF-8).

mod flag;

use std::io::Read;

use bytes::{BufMut, Bytes, BytesMut};

use crate::config::Config;
use crate::error::Result;
use crate::value::{decode_entry_type, decode_value_of_with, EntryType, EntryValue, StringValue, WireValue};

pub use flag::{decode_entry_flag, EntryFlag};

/// Type (1) + ID (2) + Seq (2) + Flag (1)
pub const FIXED_HEADER_LEN: usize = 6;

/// A single network table entry
///
/// The type tag is always derived from `value`, so the two cannot disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Entry name
    pub name: StringValue,

    /// Identifier assigned by the server
    pub id: u16,

    /// Update sequence number (wraps)
    pub sequence: u16,

    /// Persistence flag
    pub flags: EntryFlag,

    /// The value itself
    pub value: EntryValue,
}

impl Entry {
    /// Create a new entry
    pub fn new(
        name: impl Into<String>,
        id: u16,
        sequence: u16,
        flags: EntryFlag,
        value: impl Into<EntryValue>,
    ) -> Result<Self> {
        Ok(Self {
            name: StringValue::new(name)?,
            id,
            sequence,
            flags,
            value: value.into(),
        })
    }

    pub fn name(&self) -> &str {
        self.name.value()
    }

    pub fn entry_type(&self) -> EntryType {
        self.value.entry_type()
    }

    // -------------------------------------------------------------------------
    // Decoding
    // -------------------------------------------------------------------------

    /// Decode an entry from `reader`
    ///
    /// Fields are read in wire order and the first failure is returned; no
    /// entry exists unless every field decoded.
    pub fn decode<R: Read>(reader: &mut R) -> Result<Self> {
        Self::decode_with(reader, &Config::default())
    }

    pub fn decode_with<R: Read>(reader: &mut R, config: &Config) -> Result<Self> {
        let name = StringValue::decode_with(reader, config)?;
        let entry_type = decode_entry_type(reader)?;

        let mut fixed = [0u8; 4];
        reader.read_exact(&mut fixed)?;
        let id = u16::from_be_bytes([fixed[0], fixed[1]]);
        let sequence = u16::from_be_bytes([fixed[2], fixed[3]]);

        let flags = decode_entry_flag(reader)?;
        let value = decode_value_of_with(reader, entry_type, config)?;

        tracing::trace!(
            "Decoded entry {:?} id={} seq={} type={:?}",
            name.value(),
            id,
            sequence,
            entry_type
        );

        Ok(Self {
            name,
            id,
            sequence,
            flags,
            value,
        })
    }

    // -------------------------------------------------------------------------
    // Encoding
    // -------------------------------------------------------------------------

    /// Exact number of bytes `write_to` emits
    pub fn encoded_len(&self) -> usize {
        self.name.encoded_len() + FIXED_HEADER_LEN + self.value.encoded_len()
    }

    pub fn write_to<B: BufMut>(&self, buf: &mut B) {
        self.name.write_to(buf);
        buf.put_u8(self.entry_type().as_u8());
        buf.put_u16(self.id);
        buf.put_u16(self.sequence);
        buf.put_u8(self.flags.as_u8());
        self.value.write_to(buf);
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.write_to(&mut buf);
        buf.freeze()
    }

    // -------------------------------------------------------------------------
    // Updates
    // -------------------------------------------------------------------------

    /// Decode a value of this entry's current type and swap it in
    pub fn update_value_raw<R: Read>(&mut self, reader: &mut R) -> Result<()> {
        self.value.update_raw(reader)
    }

    pub fn update_value_raw_with<R: Read>(&mut self, reader: &mut R, config: &Config) -> Result<()> {
        self.value.update_raw_with(reader, config)
    }

    /// Replace the value; the entry type follows the new value
    pub fn set_value(&mut self, value: impl Into<EntryValue>) {
        self.value = value.into();
    }

    pub fn set_sequence(&mut self, sequence: u16) {
        self.sequence = sequence;
    }

    /// Whether `candidate` is newer than the current sequence number
    ///
    /// Sequence numbers wrap, so "newer" means ahead by less than half the
    /// number space (RFC 1982 serial arithmetic).
    pub fn is_newer_sequence(&self, candidate: u16) -> bool {
        candidate != self.sequence && candidate.wrapping_sub(self.sequence) < 0x8000
    }
}
