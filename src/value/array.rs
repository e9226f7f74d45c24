//! Array values
//!
//! Homogeneous, insertion-ordered sequences of Boolean, Double or String
//! values, capped at 255 elements so the count fits in one byte.
//!
//! ## Format
//! ```text
//! ┌───────────┬───────────┬───────────┬─────┐
//! │ Count (1) │ Element 0 │ Element 1 │ ... │
//! └───────────┴───────────┴───────────┴─────┘
//! ```

use std::io::Read;

use bytes::BufMut;

use crate::config::{ArrayOverflow, Config};
use crate::error::{Result, WireError};

use super::scalar::{BooleanValue, DoubleValue, StringValue};
use super::{EntryType, EntryValue, WireValue};

/// Most elements an array can hold (one-byte count)
pub const MAX_ARRAY_LEN: usize = u8::MAX as usize;

/// A scalar type that can live inside an array
pub trait ArrayElement: WireValue + Clone + Into<EntryValue> {
    /// Tag of the array holding this element type
    const ARRAY_TYPE: EntryType;

    /// Unwrap a dynamically typed value, failing on a variant mismatch
    fn from_entry_value(value: EntryValue) -> Result<Self>;
}

fn mismatch<T: ArrayElement>(found: &EntryValue) -> WireError {
    WireError::TypeMismatch {
        expected: T::ENTRY_TYPE,
        found: found.entry_type(),
    }
}

impl ArrayElement for BooleanValue {
    const ARRAY_TYPE: EntryType = EntryType::BooleanArray;

    fn from_entry_value(value: EntryValue) -> Result<Self> {
        match value {
            EntryValue::Boolean(v) => Ok(v),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl ArrayElement for DoubleValue {
    const ARRAY_TYPE: EntryType = EntryType::DoubleArray;

    fn from_entry_value(value: EntryValue) -> Result<Self> {
        match value {
            EntryValue::Double(v) => Ok(v),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl ArrayElement for StringValue {
    const ARRAY_TYPE: EntryType = EntryType::StringArray;

    fn from_entry_value(value: EntryValue) -> Result<Self> {
        match value {
            EntryValue::String(v) => Ok(v),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

/// Bounded array of one element type
#[derive(Debug, Clone, PartialEq)]
pub struct ValueArray<T> {
    elements: Vec<T>,
}

pub type BooleanArray = ValueArray<BooleanValue>;
pub type DoubleArray = ValueArray<DoubleValue>;
pub type StringArray = ValueArray<StringValue>;

impl<T: ArrayElement> ValueArray<T> {
    /// Create an empty array
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Build from elements, rejecting more than 255
    pub fn from_elements(elements: Vec<T>) -> Result<Self> {
        Self::from_elements_with(elements, &Config::default())
    }

    /// Build from elements, applying the configured overflow policy
    pub fn from_elements_with(mut elements: Vec<T>, config: &Config) -> Result<Self> {
        if elements.len() > MAX_ARRAY_LEN {
            match config.array_overflow {
                ArrayOverflow::Reject => {
                    return Err(WireError::CapacityExceeded {
                        capacity: MAX_ARRAY_LEN,
                        attempted: elements.len(),
                    });
                }
                ArrayOverflow::Truncate => {
                    tracing::warn!(
                        "Truncating {:?} from {} to {} elements",
                        T::ARRAY_TYPE,
                        elements.len(),
                        MAX_ARRAY_LEN
                    );
                    elements.truncate(MAX_ARRAY_LEN);
                }
            }
        }
        Ok(Self { elements })
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.elements.len() >= MAX_ARRAY_LEN
    }

    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    /// Element at a 0-based index
    pub fn get(&self, index: usize) -> Result<&T> {
        self.elements.get(index).ok_or(WireError::IndexOutOfBounds {
            index,
            len: self.elements.len(),
        })
    }

    /// Overwrite the element at `index`
    pub fn update(&mut self, index: usize, value: T) -> Result<()> {
        let len = self.elements.len();
        let slot = self
            .elements
            .get_mut(index)
            .ok_or(WireError::IndexOutOfBounds { index, len })?;
        *slot = value;
        Ok(())
    }

    /// Append an element; refuses the 256th
    pub fn add(&mut self, value: T) -> Result<()> {
        if self.is_full() {
            return Err(WireError::CapacityExceeded {
                capacity: MAX_ARRAY_LEN,
                attempted: self.elements.len() + 1,
            });
        }
        self.elements.push(value);
        Ok(())
    }

    /// `update` for a dynamically typed value
    pub fn update_entry(&mut self, index: usize, value: EntryValue) -> Result<()> {
        let value = T::from_entry_value(value)?;
        self.update(index, value)
    }

    /// `add` for a dynamically typed value
    pub fn add_entry(&mut self, value: EntryValue) -> Result<()> {
        let value = T::from_entry_value(value)?;
        self.add(value)
    }
}

impl<T: ArrayElement> Default for ValueArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a ValueArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<T: ArrayElement> WireValue for ValueArray<T> {
    const ENTRY_TYPE: EntryType = T::ARRAY_TYPE;

    fn decode_with<R: Read>(reader: &mut R, config: &Config) -> Result<Self> {
        let mut count = [0u8; 1];
        reader.read_exact(&mut count)?;
        let count = count[0] as usize;

        let mut elements = Vec::with_capacity(count);
        for _ in 0..count {
            elements.push(T::decode_with(reader, config)?);
        }
        Ok(Self { elements })
    }

    fn encoded_len(&self) -> usize {
        1 + self.elements.iter().map(|e| e.encoded_len()).sum::<usize>()
    }

    fn write_to<B: BufMut>(&self, buf: &mut B) {
        // len <= 255 is upheld by every constructor and by `add`
        buf.put_u8(self.elements.len() as u8);
        for element in &self.elements {
            element.write_to(buf);
        }
    }
}

// =============================================================================
// Logical constructors
// =============================================================================

fn check_capacity(len: usize) -> Result<()> {
    if len > MAX_ARRAY_LEN {
        return Err(WireError::CapacityExceeded {
            capacity: MAX_ARRAY_LEN,
            attempted: len,
        });
    }
    Ok(())
}

impl ValueArray<BooleanValue> {
    pub fn from_bools(values: &[bool]) -> Result<Self> {
        check_capacity(values.len())?;
        Ok(Self {
            elements: values.iter().copied().map(BooleanValue::new).collect(),
        })
    }

    pub fn values(&self) -> Vec<bool> {
        self.elements.iter().map(BooleanValue::value).collect()
    }
}

impl ValueArray<DoubleValue> {
    pub fn from_f64s(values: &[f64]) -> Result<Self> {
        check_capacity(values.len())?;
        Ok(Self {
            elements: values.iter().copied().map(DoubleValue::new).collect(),
        })
    }

    pub fn values(&self) -> Vec<f64> {
        self.elements.iter().map(DoubleValue::value).collect()
    }
}

impl ValueArray<StringValue> {
    pub fn from_strs<S: AsRef<str>>(values: &[S]) -> Result<Self> {
        check_capacity(values.len())?;
        let elements = values
            .iter()
            .map(|s| StringValue::new(s.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { elements })
    }

    pub fn values(&self) -> Vec<&str> {
        self.elements.iter().map(StringValue::value).collect()
    }
}
