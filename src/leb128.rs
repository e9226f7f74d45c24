//! ULEB128 Codec
//!
//! Unsigned little-endian base-128 integers, used as length prefixes for
//! String and Raw payloads.
//!
//! ## Format
//! ```text
//! ┌───────────┬───────────┬─────┬───────────┐
//! │ 1 ddddddd │ 1 ddddddd │ ... │ 0 ddddddd │
//! └───────────┴───────────┴─────┴───────────┘
//!   low group                      high group
//! ```
//!
//! Values are capped at 32 bits: at most five bytes, and the fifth byte may
//! only carry the top four bits.

use std::io::Read;

use bytes::BufMut;

use crate::error::{Result, WireError};

/// Longest encoding of a u32 (5 x 7 bits >= 32 bits)
pub const MAX_ENCODED_LEN: usize = 5;

const CONTINUATION: u8 = 0x80;
const DATA_MASK: u8 = 0x7f;

/// Bits of the final byte that must be clear in a five-byte encoding
const LAST_BYTE_OVERFLOW_MASK: u8 = 0xf0;

/// Encode `value` into its minimal ULEB128 form
pub fn encode_uleb128(value: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(value));
    put_uleb128(&mut out, value);
    out
}

/// Append the minimal ULEB128 form of `value` to `buf`
pub fn put_uleb128<B: BufMut>(buf: &mut B, mut value: u32) {
    loop {
        let byte = (value as u8) & DATA_MASK;
        value >>= 7;
        if value == 0 {
            buf.put_u8(byte);
            break;
        }
        buf.put_u8(byte | CONTINUATION);
    }
}

/// Number of bytes the minimal encoding of `value` takes
pub fn encoded_len(value: u32) -> usize {
    let bits = 32 - value.leading_zeros() as usize;
    bits.div_ceil(7).max(1)
}

/// Decode a ULEB128 value from `reader`
///
/// Returns the value together with the exact bytes consumed, so callers can
/// keep the original framing (including non-minimal encodings) verbatim.
pub fn decode_uleb128<R: Read>(reader: &mut R) -> Result<(u32, Vec<u8>)> {
    let mut result: u32 = 0;
    let mut raw = Vec::with_capacity(MAX_ENCODED_LEN);
    let mut byte = [0u8; 1];

    loop {
        reader.read_exact(&mut byte)?;
        let b = byte[0];

        if raw.len() == MAX_ENCODED_LEN - 1 && b & LAST_BYTE_OVERFLOW_MASK != 0 {
            return Err(WireError::Uleb128Overflow);
        }

        let shift = 7 * raw.len() as u32;
        result |= u32::from(b & DATA_MASK) << shift;
        raw.push(b);

        if b & CONTINUATION == 0 {
            return Ok((result, raw));
        }
    }
}
