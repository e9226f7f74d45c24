//! Configuration for ntwire
//!
//! Decode limits and array construction policy, with sensible defaults.

/// Default ceiling for a single ULEB128-prefixed payload (16 MiB)
pub const DEFAULT_MAX_PAYLOAD_LEN: u32 = 16 * 1024 * 1024;

/// Codec configuration
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Decode Limits
    // -------------------------------------------------------------------------
    /// Largest String/Raw payload accepted from a length prefix (in bytes).
    /// Checked before the payload is read, so a hostile prefix cannot force
    /// a large allocation.
    pub max_payload_len: u32,

    // -------------------------------------------------------------------------
    // Array Construction
    // -------------------------------------------------------------------------
    /// What to do when an array is built from more than 255 elements
    pub array_overflow: ArrayOverflow,
}

/// Policy for building an array from an oversized element list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrayOverflow {
    /// Fail with `CapacityExceeded`
    #[default]
    Reject,

    /// Keep the first 255 elements and log a warning
    Truncate,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_payload_len: DEFAULT_MAX_PAYLOAD_LEN,
            array_overflow: ArrayOverflow::Reject,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the largest accepted payload length (in bytes)
    pub fn max_payload_len(mut self, len: u32) -> Self {
        self.config.max_payload_len = len;
        self
    }

    /// Set the array overflow policy
    pub fn array_overflow(mut self, policy: ArrayOverflow) -> Self {
        self.config.array_overflow = policy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
