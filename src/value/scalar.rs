//! Scalar values
//!
//! Boolean, Double, String and Raw. Each holds its logical value next to the
//! exact wire bytes that encode it.

use std::io::{self, Read};

use bytes::{BufMut, Bytes};

use crate::config::Config;
use crate::error::{Result, WireError};
use crate::leb128::{decode_uleb128, encode_uleb128};

use super::{EntryType, WireValue};

const BOOL_FALSE: u8 = 0x00;
const BOOL_TRUE: u8 = 0x01;

/// Size of an encoded double
pub const DOUBLE_LEN: usize = 8;

const READ_CHUNK_HINT: usize = 64 * 1024;

// =============================================================================
// Boolean
// =============================================================================

/// Single byte: 0x00 false, 0x01 true
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanValue {
    value: bool,
    raw: [u8; 1],
}

impl BooleanValue {
    pub fn new(value: bool) -> Self {
        let byte = if value { BOOL_TRUE } else { BOOL_FALSE };
        Self { value, raw: [byte] }
    }

    pub fn value(&self) -> bool {
        self.value
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn update_value(&mut self, value: bool) {
        *self = Self::new(value);
    }
}

impl WireValue for BooleanValue {
    const ENTRY_TYPE: EntryType = EntryType::Boolean;

    fn decode_with<R: Read>(reader: &mut R, _config: &Config) -> Result<Self> {
        let mut raw = [0u8; 1];
        reader.read_exact(&mut raw)?;
        let value = match raw[0] {
            BOOL_FALSE => false,
            BOOL_TRUE => true,
            other => {
                return Err(WireError::InvalidData(format!(
                    "boolean byte must be 0x00 or 0x01, got 0x{:02x}",
                    other
                )))
            }
        };
        Ok(Self { value, raw })
    }

    fn encoded_len(&self) -> usize {
        self.raw.len()
    }

    fn write_to<B: BufMut>(&self, buf: &mut B) {
        buf.put_slice(&self.raw);
    }
}

impl From<bool> for BooleanValue {
    fn from(value: bool) -> Self {
        Self::new(value)
    }
}

// =============================================================================
// Double
// =============================================================================

/// IEEE-754 binary64, big-endian
///
/// Equality compares the wire bytes, so NaN payloads and signed zeros are
/// told apart exactly as they travel.
#[derive(Debug, Clone)]
pub struct DoubleValue {
    value: f64,
    raw: [u8; DOUBLE_LEN],
}

impl DoubleValue {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            raw: value.to_be_bytes(),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn update_value(&mut self, value: f64) {
        *self = Self::new(value);
    }
}

impl PartialEq for DoubleValue {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl WireValue for DoubleValue {
    const ENTRY_TYPE: EntryType = EntryType::Double;

    fn decode_with<R: Read>(reader: &mut R, _config: &Config) -> Result<Self> {
        let mut raw = [0u8; DOUBLE_LEN];
        reader.read_exact(&mut raw)?;
        Ok(Self {
            value: f64::from_be_bytes(raw),
            raw,
        })
    }

    fn encoded_len(&self) -> usize {
        DOUBLE_LEN
    }

    fn write_to<B: BufMut>(&self, buf: &mut B) {
        buf.put_slice(&self.raw);
    }
}

impl From<f64> for DoubleValue {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

// =============================================================================
// Length-prefixed payloads
// =============================================================================

/// Build `uleb128(len) + payload`
fn frame_payload(payload: &[u8]) -> Result<(Bytes, usize)> {
    let len = u32::try_from(payload.len()).map_err(|_| WireError::PayloadTooLarge {
        len: payload.len() as u64,
        max: u64::from(u32::MAX),
    })?;
    let prefix = encode_uleb128(len);
    let prefix_len = prefix.len();

    let mut wire = Vec::with_capacity(prefix_len + payload.len());
    wire.extend_from_slice(&prefix);
    wire.extend_from_slice(payload);
    Ok((Bytes::from(wire), prefix_len))
}

/// Read `uleb128(len) + payload`, returning the full wire bytes and the
/// prefix length
fn read_payload<R: Read>(reader: &mut R, config: &Config) -> Result<(Bytes, usize)> {
    let (len, prefix) = decode_uleb128(reader)?;
    if len > config.max_payload_len {
        return Err(WireError::PayloadTooLarge {
            len: u64::from(len),
            max: u64::from(config.max_payload_len),
        });
    }

    let len = len as usize;
    let prefix_len = prefix.len();
    // Grown as bytes arrive; the prefix alone never sizes a big allocation
    let mut wire = Vec::with_capacity(prefix_len + len.min(READ_CHUNK_HINT));
    wire.extend_from_slice(&prefix);

    let got = Read::take(&mut *reader, len as u64).read_to_end(&mut wire)?;
    if got < len {
        return Err(WireError::Truncated(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("payload declared {} bytes, stream held {}", len, got),
        )));
    }

    Ok((Bytes::from(wire), prefix_len))
}

// =============================================================================
// String
// =============================================================================

/// uleb128 byte length followed by UTF-8 text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringValue {
    value: String,
    raw: Bytes,
}

impl StringValue {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let (raw, _) = frame_payload(value.as_bytes())?;
        Ok(Self { value, raw })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn update_value(&mut self, value: impl Into<String>) -> Result<()> {
        *self = Self::new(value)?;
        Ok(())
    }
}

impl WireValue for StringValue {
    const ENTRY_TYPE: EntryType = EntryType::String;

    fn decode_with<R: Read>(reader: &mut R, config: &Config) -> Result<Self> {
        let (raw, prefix_len) = read_payload(reader, config)?;
        let value = std::str::from_utf8(&raw[prefix_len..])
            .map_err(|e| WireError::InvalidData(format!("string is not valid UTF-8: {}", e)))?
            .to_owned();
        Ok(Self { value, raw })
    }

    fn encoded_len(&self) -> usize {
        self.raw.len()
    }

    fn write_to<B: BufMut>(&self, buf: &mut B) {
        buf.put_slice(&self.raw);
    }
}

// =============================================================================
// Raw
// =============================================================================

/// uleb128 byte length followed by opaque bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawValue {
    /// Payload view into `raw`
    value: Bytes,
    raw: Bytes,
}

impl RawValue {
    pub fn new(value: impl AsRef<[u8]>) -> Result<Self> {
        let (raw, prefix_len) = frame_payload(value.as_ref())?;
        Ok(Self {
            value: raw.slice(prefix_len..),
            raw,
        })
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn update_value(&mut self, value: impl AsRef<[u8]>) -> Result<()> {
        *self = Self::new(value)?;
        Ok(())
    }
}

impl WireValue for RawValue {
    const ENTRY_TYPE: EntryType = EntryType::RawData;

    fn decode_with<R: Read>(reader: &mut R, config: &Config) -> Result<Self> {
        let (raw, prefix_len) = read_payload(reader, config)?;
        Ok(Self {
            value: raw.slice(prefix_len..),
            raw,
        })
    }

    fn encoded_len(&self) -> usize {
        self.raw.len()
    }

    fn write_to<B: BufMut>(&self, buf: &mut B) {
        buf.put_slice(&self.raw);
    }
}
