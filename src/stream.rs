//! Stream adapters
//!
//! Blocking reader/writer wrappers that decode and encode values and
//! entries directly on a byte stream, keeping count of the bytes moved.

use std::io::{self, Read, Write};

use bytes::BytesMut;

use crate::config::Config;
use crate::entry::{decode_entry_flag, Entry, EntryFlag};
use crate::error::{Result, WireError};
use crate::value::{decode_entry_type, decode_value_of_with, EntryType, EntryValue};

/// Counts every byte pulled through it
struct CountingReader<R> {
    inner: R,
    count: u64,
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.count += n as u64;
        Ok(n)
    }
}

// =============================================================================
// Reader
// =============================================================================

/// Decodes values and entries from a byte stream
pub struct EntryReader<R> {
    reader: CountingReader<R>,
    config: Config,
}

impl<R: Read> EntryReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, Config::default())
    }

    pub fn with_config(reader: R, config: Config) -> Self {
        Self {
            reader: CountingReader {
                inner: reader,
                count: 0,
            },
            config,
        }
    }

    /// Total bytes consumed from the stream so far
    pub fn bytes_read(&self) -> u64 {
        self.reader.count
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn get_ref(&self) -> &R {
        &self.reader.inner
    }

    pub fn into_inner(self) -> R {
        self.reader.inner
    }

    /// Read a tagged value
    ///
    /// Returns the value, its type and the number of bytes it occupied
    /// (tag included).
    pub fn read_value(&mut self) -> Result<(EntryValue, EntryType, u64)> {
        let start = self.bytes_read();
        let result = decode_entry_type(&mut self.reader)
            .and_then(|ty| decode_value_of_with(&mut self.reader, ty, &self.config).map(|v| (v, ty)));
        let (value, entry_type) = self.log_failure(start, "value", result)?;
        Ok((value, entry_type, self.bytes_read() - start))
    }

    /// Read an untagged value of a known type
    pub fn read_value_of(&mut self, entry_type: EntryType) -> Result<EntryValue> {
        let start = self.bytes_read();
        let result = decode_value_of_with(&mut self.reader, entry_type, &self.config);
        self.log_failure(start, "value", result)
    }

    /// Read a full entry
    pub fn read_entry(&mut self) -> Result<Entry> {
        let start = self.bytes_read();
        let result = Entry::decode_with(&mut self.reader, &self.config);
        self.log_failure(start, "entry", result)
    }

    pub fn read_flag(&mut self) -> Result<EntryFlag> {
        let start = self.bytes_read();
        let result = decode_entry_flag(&mut self.reader);
        self.log_failure(start, "flag", result)
    }

    fn log_failure<T>(&self, start: u64, what: &str, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            match e {
                WireError::Truncated(_) => {
                    tracing::debug!("Stream ended mid-{} at offset {}", what, start)
                }
                _ => tracing::debug!("Failed to decode {} at offset {}: {}", what, start, e),
            }
        }
        result
    }
}

// =============================================================================
// Writer
// =============================================================================

/// Encodes values and entries onto a byte stream
pub struct EntryWriter<W> {
    writer: W,
    buf: BytesMut,
    bytes_written: u64,
}

impl<W: Write> EntryWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buf: BytesMut::with_capacity(256),
            bytes_written: 0,
        }
    }

    /// Total bytes handed to the underlying writer
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write a value preceded by its type tag
    pub fn write_value(&mut self, value: &EntryValue) -> Result<()> {
        self.buf.clear();
        value.write_tagged(&mut self.buf);
        self.flush_buf()
    }

    pub fn write_entry(&mut self, entry: &Entry) -> Result<()> {
        self.buf.clear();
        entry.write_to(&mut self.buf);
        self.flush_buf()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.writer.write_all(&self.buf)?;
        self.bytes_written += self.buf.len() as u64;
        tracing::trace!("Wrote {} bytes", self.buf.len());
        Ok(())
    }
}
