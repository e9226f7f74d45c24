//! # ntwire
//!
//! Typed-value wire codec for network table entries:
//! - ULEB128 length framing
//! - Boolean, Double, String and Raw scalars
//! - Bounded (255-element) Boolean/Double/String arrays
//! - Tagged dispatch and the entry envelope
//!
//! Every value keeps its exact wire bytes next to its logical value, so
//! re-encoding reproduces the received bytes verbatim.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                EntryReader / EntryWriter                     │
//! │                    (byte streams)                            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Entry                                  │
//! │        (name, type, id, sequence, flag, value)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Type-tag dispatch                           │
//! └──────────┬──────────────────────────────────┬───────────────┘
//!            │                                  │
//!            ▼                                  ▼
//!   ┌─────────────────┐                ┌─────────────────┐
//!   │     Scalars     │◄───────────────│     Arrays      │
//!   └────────┬────────┘                └─────────────────┘
//!            │
//!            ▼
//!   ┌─────────────────┐
//!   │     ULEB128     │
//!   └─────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod leb128;
pub mod value;
pub mod entry;
pub mod stream;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{WireError, Result};
pub use config::{ArrayOverflow, Config};
pub use entry::{Entry, EntryFlag};
pub use value::{
    decode_value, BooleanArray, BooleanValue, DoubleArray, DoubleValue, EntryType, EntryValue,
    RawValue, StringArray, StringValue, WireValue,
};
pub use stream::{EntryReader, EntryWriter};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of ntwire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
