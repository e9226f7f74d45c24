//! Value Module
//!
//! Typed entry values and the type-tag dispatcher.
//!
//! ## Wire Format
//! ```text
//! ┌──────────┬─────────────────────────────┐
//! │ Type (1) │           Payload           │
//! └──────────┴─────────────────────────────┘
//! ```
//!
//! ### Types
//! - 0x00: Boolean       - 1 byte, 0x00 / 0x01
//! - 0x01: Double        - 8 bytes, IEEE-754 big-endian
//! - 0x02: String        - uleb128 len + UTF-8 bytes
//! - 0x03: Raw           - uleb128 len + bytes
//! - 0x10: BooleanArray  - count (1) + N x Boolean
//! - 0x11: DoubleArray   - count (1) + N x Double
//! - 0x12: StringArray   - count (1) + N x String
//! - 0x20: RpcDefinition - reserved, no decoder here
//!
//! Every value keeps the exact bytes it was decoded from (or built into)
//! next to its logical value; the two are only ever replaced together.

mod array;
mod scalar;

use std::io::Read;

use bytes::{BufMut, Bytes, BytesMut};

use crate::config::Config;
use crate::error::{Result, WireError};

pub use array::{ArrayElement, BooleanArray, DoubleArray, StringArray, ValueArray, MAX_ARRAY_LEN};
pub use scalar::{BooleanValue, DoubleValue, RawValue, StringValue};

// =============================================================================
// Entry Type Tag
// =============================================================================

/// Type tag identifying the value variant on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EntryType {
    Boolean = 0x00,
    Double = 0x01,
    String = 0x02,
    RawData = 0x03,
    BooleanArray = 0x10,
    DoubleArray = 0x11,
    StringArray = 0x12,
    RpcDefinition = 0x20,
}

impl EntryType {
    /// Tag byte peers use to mean "no type"; never written by this codec
    pub const UNDEFINED: u8 = 0xff;

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn is_array(self) -> bool {
        matches!(
            self,
            EntryType::BooleanArray | EntryType::DoubleArray | EntryType::StringArray
        )
    }
}

impl TryFrom<u8> for EntryType {
    type Error = WireError;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            0x00 => Ok(EntryType::Boolean),
            0x01 => Ok(EntryType::Double),
            0x02 => Ok(EntryType::String),
            0x03 => Ok(EntryType::RawData),
            0x10 => Ok(EntryType::BooleanArray),
            0x11 => Ok(EntryType::DoubleArray),
            0x12 => Ok(EntryType::StringArray),
            0x20 => Ok(EntryType::RpcDefinition),
            other => Err(WireError::NoSuchType(other)),
        }
    }
}

// =============================================================================
// Codec Trait
// =============================================================================

/// A value with a fixed wire representation
pub trait WireValue: Sized {
    /// Tag written in front of this value when it is sent on its own
    const ENTRY_TYPE: EntryType;

    /// Decode one value from `reader`, honoring the limits in `config`
    fn decode_with<R: Read>(reader: &mut R, config: &Config) -> Result<Self>;

    /// Exact number of bytes `write_to` emits
    fn encoded_len(&self) -> usize;

    /// Append the wire bytes (without the type tag)
    fn write_to<B: BufMut>(&self, buf: &mut B);

    fn decode<R: Read>(reader: &mut R) -> Result<Self> {
        Self::decode_with(reader, &Config::default())
    }

    fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.write_to(&mut buf);
        buf.freeze()
    }

    /// Replace this value with one decoded from `reader`
    ///
    /// The decode runs to completion before anything is assigned, so a
    /// failure leaves `self` exactly as it was.
    fn update_raw<R: Read>(&mut self, reader: &mut R) -> Result<()> {
        self.update_raw_with(reader, &Config::default())
    }

    fn update_raw_with<R: Read>(&mut self, reader: &mut R, config: &Config) -> Result<()> {
        let fresh = Self::decode_with(reader, config)?;
        *self = fresh;
        Ok(())
    }
}

// =============================================================================
// Tagged Union
// =============================================================================

/// Any value an entry can carry
#[derive(Debug, Clone, PartialEq)]
pub enum EntryValue {
    Boolean(BooleanValue),
    Double(DoubleValue),
    String(StringValue),
    Raw(RawValue),
    BooleanArray(BooleanArray),
    DoubleArray(DoubleArray),
    StringArray(StringArray),
}

impl EntryValue {
    /// Get the type tag for this value
    pub fn entry_type(&self) -> EntryType {
        match self {
            EntryValue::Boolean(_) => EntryType::Boolean,
            EntryValue::Double(_) => EntryType::Double,
            EntryValue::String(_) => EntryType::String,
            EntryValue::Raw(_) => EntryType::RawData,
            EntryValue::BooleanArray(_) => EntryType::BooleanArray,
            EntryValue::DoubleArray(_) => EntryType::DoubleArray,
            EntryValue::StringArray(_) => EntryType::StringArray,
        }
    }

    /// Payload length, excluding the type tag
    pub fn encoded_len(&self) -> usize {
        match self {
            EntryValue::Boolean(v) => v.encoded_len(),
            EntryValue::Double(v) => v.encoded_len(),
            EntryValue::String(v) => v.encoded_len(),
            EntryValue::Raw(v) => v.encoded_len(),
            EntryValue::BooleanArray(v) => v.encoded_len(),
            EntryValue::DoubleArray(v) => v.encoded_len(),
            EntryValue::StringArray(v) => v.encoded_len(),
        }
    }

    /// Append the payload bytes (no type tag)
    pub fn write_to<B: BufMut>(&self, buf: &mut B) {
        match self {
            EntryValue::Boolean(v) => v.write_to(buf),
            EntryValue::Double(v) => v.write_to(buf),
            EntryValue::String(v) => v.write_to(buf),
            EntryValue::Raw(v) => v.write_to(buf),
            EntryValue::BooleanArray(v) => v.write_to(buf),
            EntryValue::DoubleArray(v) => v.write_to(buf),
            EntryValue::StringArray(v) => v.write_to(buf),
        }
    }

    /// Payload bytes (no type tag)
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.write_to(&mut buf);
        buf.freeze()
    }

    /// Append the type tag followed by the payload
    pub fn write_tagged<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(self.entry_type().as_u8());
        self.write_to(buf);
    }

    /// Type tag followed by the payload; the inverse of [`decode_value`]
    pub fn encode_tagged(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(1 + self.encoded_len());
        self.write_tagged(&mut buf);
        buf.freeze()
    }

    /// Replace this value with a freshly decoded one of the same type
    pub fn update_raw<R: Read>(&mut self, reader: &mut R) -> Result<()> {
        self.update_raw_with(reader, &Config::default())
    }

    pub fn update_raw_with<R: Read>(&mut self, reader: &mut R, config: &Config) -> Result<()> {
        match self {
            EntryValue::Boolean(v) => v.update_raw_with(reader, config),
            EntryValue::Double(v) => v.update_raw_with(reader, config),
            EntryValue::String(v) => v.update_raw_with(reader, config),
            EntryValue::Raw(v) => v.update_raw_with(reader, config),
            EntryValue::BooleanArray(v) => v.update_raw_with(reader, config),
            EntryValue::DoubleArray(v) => v.update_raw_with(reader, config),
            EntryValue::StringArray(v) => v.update_raw_with(reader, config),
        }
    }

    // -------------------------------------------------------------------------
    // Array access
    // -------------------------------------------------------------------------

    /// Element count, or `None` for scalar values
    pub fn array_len(&self) -> Option<usize> {
        match self {
            EntryValue::BooleanArray(a) => Some(a.len()),
            EntryValue::DoubleArray(a) => Some(a.len()),
            EntryValue::StringArray(a) => Some(a.len()),
            _ => None,
        }
    }

    /// Copy of the element at `index`
    pub fn array_get(&self, index: usize) -> Result<EntryValue> {
        match self {
            EntryValue::BooleanArray(a) => a.get(index).map(|v| v.clone().into()),
            EntryValue::DoubleArray(a) => a.get(index).map(|v| v.clone().into()),
            EntryValue::StringArray(a) => a.get(index).map(|v| v.clone().into()),
            other => Err(WireError::NotAnArray(other.entry_type())),
        }
    }

    /// Overwrite the element at `index`; `value` must match the element type
    pub fn array_update(&mut self, index: usize, value: EntryValue) -> Result<()> {
        match self {
            EntryValue::BooleanArray(a) => a.update_entry(index, value),
            EntryValue::DoubleArray(a) => a.update_entry(index, value),
            EntryValue::StringArray(a) => a.update_entry(index, value),
            other => Err(WireError::NotAnArray(other.entry_type())),
        }
    }

    /// Append `value`; it must match the element type
    pub fn array_add(&mut self, value: EntryValue) -> Result<()> {
        match self {
            EntryValue::BooleanArray(a) => a.add_entry(value),
            EntryValue::DoubleArray(a) => a.add_entry(value),
            EntryValue::StringArray(a) => a.add_entry(value),
            other => Err(WireError::NotAnArray(other.entry_type())),
        }
    }

    // -------------------------------------------------------------------------
    // Logical accessors
    // -------------------------------------------------------------------------

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            EntryValue::Boolean(v) => Some(v.value()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            EntryValue::Double(v) => Some(v.value()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            EntryValue::String(v) => Some(v.value()),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            EntryValue::Raw(v) => Some(v.value()),
            _ => None,
        }
    }
}

impl From<BooleanValue> for EntryValue {
    fn from(v: BooleanValue) -> Self {
        EntryValue::Boolean(v)
    }
}

impl From<DoubleValue> for EntryValue {
    fn from(v: DoubleValue) -> Self {
        EntryValue::Double(v)
    }
}

impl From<StringValue> for EntryValue {
    fn from(v: StringValue) -> Self {
        EntryValue::String(v)
    }
}

impl From<RawValue> for EntryValue {
    fn from(v: RawValue) -> Self {
        EntryValue::Raw(v)
    }
}

impl From<BooleanArray> for EntryValue {
    fn from(v: BooleanArray) -> Self {
        EntryValue::BooleanArray(v)
    }
}

impl From<DoubleArray> for EntryValue {
    fn from(v: DoubleArray) -> Self {
        EntryValue::DoubleArray(v)
    }
}

impl From<StringArray> for EntryValue {
    fn from(v: StringArray) -> Self {
        EntryValue::StringArray(v)
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// Read a single type tag byte
pub fn decode_entry_type<R: Read>(reader: &mut R) -> Result<EntryType> {
    let mut tag = [0u8; 1];
    reader.read_exact(&mut tag)?;
    EntryType::try_from(tag[0])
}

/// Read a type tag and the value that follows it
pub fn decode_value<R: Read>(reader: &mut R) -> Result<(EntryValue, EntryType)> {
    decode_value_with(reader, &Config::default())
}

pub fn decode_value_with<R: Read>(reader: &mut R, config: &Config) -> Result<(EntryValue, EntryType)> {
    let entry_type = decode_entry_type(reader)?;
    let value = decode_value_of_with(reader, entry_type, config)?;
    Ok((value, entry_type))
}

/// Decode a value whose tag has already been read
pub fn decode_value_of<R: Read>(reader: &mut R, entry_type: EntryType) -> Result<EntryValue> {
    decode_value_of_with(reader, entry_type, &Config::default())
}

pub fn decode_value_of_with<R: Read>(
    reader: &mut R,
    entry_type: EntryType,
    config: &Config,
) -> Result<EntryValue> {
    let value: EntryValue = match entry_type {
        EntryType::Boolean => BooleanValue::decode_with(reader, config)?.into(),
        EntryType::Double => DoubleValue::decode_with(reader, config)?.into(),
        EntryType::String => StringValue::decode_with(reader, config)?.into(),
        EntryType::RawData => RawValue::decode_with(reader, config)?.into(),
        EntryType::BooleanArray => BooleanArray::decode_with(reader, config)?.into(),
        EntryType::DoubleArray => DoubleArray::decode_with(reader, config)?.into(),
        EntryType::StringArray => StringArray::decode_with(reader, config)?.into(),
        // RPC definitions have their own shape, handled outside this codec
        EntryType::RpcDefinition => return Err(WireError::NoSuchType(entry_type.as_u8())),
    };

    tracing::trace!(
        "Decoded {:?} value ({} bytes)",
        entry_type,
        value.encoded_len()
    );

    Ok(value)
}
