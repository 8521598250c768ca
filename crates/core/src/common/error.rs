//! Error definitions.
//!
//! This module defines every failure the simulator reports:
//! 1. **Configuration Errors:** Rejected construction parameters; no model is produced.
//! 2. **Address Errors:** An access outside `[0, memory_size)`; the model is left untouched.
//! 3. **Parse Errors:** Malformed hexadecimal tokens in an address sequence.
//! 4. **Harness Errors:** A top-level error wrapping the above plus configuration I/O.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid cache construction parameters.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Memory size was zero.
    #[error("memory size must be positive")]
    ZeroMemorySize,

    /// Cache size was zero.
    #[error("cache size must be positive")]
    ZeroCacheSize,

    /// Block size was zero.
    #[error("block size must be positive")]
    ZeroBlockSize,

    /// Block size was not a power of two.
    #[error("block size {0} is not a power of two")]
    BlockSizeNotPowerOfTwo(u64),

    /// Block size does not evenly divide the (clamped) cache size.
    #[error("block size {block_size} does not evenly divide cache size {cache_size}")]
    BlockSizeNotDivisor {
        /// Configured block size in bytes.
        block_size: u64,
        /// Cache size in bytes after clamping to the memory size.
        cache_size: u64,
    },

    /// Associativity was zero.
    #[error("associativity must be positive")]
    ZeroAssociativity,

    /// The cache has fewer lines than one set needs.
    #[error("{num_lines} cache line(s) cannot form a single {associativity}-way set")]
    TooFewLinesForSet {
        /// Number of lines in the cache.
        num_lines: u64,
        /// Requested lines per set.
        associativity: usize,
    },

    /// Unrecognized mapping policy name.
    #[error("unknown mapping policy `{0}` (expected direct, set, or full)")]
    UnknownMapping(String),
}

/// An access outside the addressable range `[0, memory_size)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("Invalid memory address: {address:#x} (memory size {memory_size:#x})")]
pub struct InvalidAddress {
    /// The offending address.
    pub address: u64,
    /// Configured memory size; valid addresses are strictly below it.
    pub memory_size: u64,
}

/// Malformed address-sequence input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A token was not a valid hexadecimal number.
    #[error("invalid hex address `{token}`")]
    InvalidToken {
        /// The trimmed token as it appeared in the input.
        token: String,
    },

    /// The input held no addresses at all.
    #[error("address sequence is empty")]
    Empty,
}

/// Top-level error reported by the replay harness and configuration loaders.
#[derive(Debug, Error)]
pub enum SimError {
    /// Configuration was rejected.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// An access fell outside memory.
    #[error(transparent)]
    Address(#[from] InvalidAddress),

    /// The address sequence could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A JSON document could not be read or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration file could not be read.
    #[error("could not read '{}': {source}", path.display())]
    Io {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
