//! Entry flags
//!
//! One byte describing persistence semantics.

use std::io::Read;

use crate::error::{Result, WireError};

/// Persistence flag carried by every entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum EntryFlag {
    #[default]
    Temporary = 0x00,
    Persistent = 0x01,
    Reserved = 0xfe,
}

impl EntryFlag {
    /// Flag byte peers use to mean "no flag"; never written by this codec
    pub const UNDEFINED: u8 = 0xff;

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn is_persistent(self) -> bool {
        self == EntryFlag::Persistent
    }
}

impl TryFrom<u8> for EntryFlag {
    type Error = WireError;

    fn try_from(byte: u8) -> Result<Self> {
        match byte {
            0x00 => Ok(EntryFlag::Temporary),
            0x01 => Ok(EntryFlag::Persistent),
            0xfe => Ok(EntryFlag::Reserved),
            other => Err(WireError::NoSuchFlag(other)),
        }
    }
}

/// Read and validate a single flag byte
pub fn decode_entry_flag<R: Read>(reader: &mut R) -> Result<EntryFlag> {
    let mut byte = [0u8; 1];
    reader.read_exact(&mut byte)?;
    EntryFlag::try_from(byte[0])
}
