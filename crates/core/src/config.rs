//! Configuration system for the cache simulator.
//!
//! This module defines the configuration record used to parameterize a
//! [`CacheModel`](crate::cache::CacheModel). It provides:
//! 1. **Defaults:** The baseline geometry (256-byte memory, 32-byte cache, 4-byte blocks, 2 ways).
//! 2. **Structures:** A flat `CacheConfig` record, deserializable from JSON.
//! 3. **Enums:** The mapping policy, parseable from CLI strings and the long display labels.
//!
//! Validation happens in [`CacheConfig::geometry`], which is the only way a
//! record becomes usable geometry.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cache::Geometry;
use crate::common::{ConfigError, SimError};

/// Default configuration constants for the simulator.
mod defaults {
    /// Total addressable memory in bytes.
    pub const MEMORY_SIZE: u64 = 256;

    /// Cache capacity in bytes.
    pub const CACHE_SIZE: u64 = 32;

    /// Block (line) size in bytes.
    pub const BLOCK_SIZE: u64 = 4;

    /// Lines per set under set-associative mapping.
    pub const ASSOCIATIVITY: usize = 2;
}

/// Cache mapping (placement) policies.
///
/// Selects where a block may live in the cache and therefore how a hit is
/// detected and which entry is evicted on a miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum MappingPolicy {
    /// Each block maps to exactly one line, selected by the index field.
    #[default]
    #[serde(alias = "Direct Mapped", alias = "direct")]
    DirectMapped,
    /// Each block maps to one set of `associativity` lines.
    #[serde(alias = "Set Associative", alias = "set")]
    SetAssociative,
    /// A block may occupy any line.
    #[serde(alias = "Associative", alias = "Fully Associative", alias = "full")]
    FullyAssociative,
}

impl MappingPolicy {
    /// All policies, in display order.
    pub const ALL: [Self; 3] = [
        Self::DirectMapped,
        Self::SetAssociative,
        Self::FullyAssociative,
    ];
}

impl fmt::Display for MappingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectMapped => write!(f, "Direct Mapped"),
            Self::SetAssociative => write!(f, "Set Associative"),
            Self::FullyAssociative => write!(f, "Fully Associative"),
        }
    }
}

impl FromStr for MappingPolicy {
    type Err = ConfigError;

    /// Parses a policy name, ignoring case, spaces, dashes, and underscores.
    ///
    /// Accepts `direct`/`dm`/`direct-mapped`, `set`/`sa`/`set-associative`,
    /// and `full`/`fa`/`associative`/`fully-associative`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "direct" | "dm" | "directmapped" => Ok(Self::DirectMapped),
            "set" | "sa" | "setassociative" => Ok(Self::SetAssociative),
            "full" | "fa" | "associative" | "fullyassociative" => Ok(Self::FullyAssociative),
            _ => Err(ConfigError::UnknownMapping(s.to_string())),
        }
    }
}

/// Root configuration record for one simulation run.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{CacheConfig, MappingPolicy};
///
/// let json = r#"{ "cache_size": 64, "mapping": "Set Associative" }"#;
/// let config = CacheConfig::from_json(json).unwrap();
/// assert_eq!(config.memory_size, 256);
/// assert_eq!(config.cache_size, 64);
/// assert_eq!(config.mapping, MappingPolicy::SetAssociative);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Total addressable memory in bytes.
    #[serde(default = "CacheConfig::default_memory_size")]
    pub memory_size: u64,

    /// Cache capacity in bytes; clamped to `memory_size` during validation.
    #[serde(default = "CacheConfig::default_cache_size")]
    pub cache_size: u64,

    /// Block size in bytes; a power of two dividing the cache size.
    #[serde(default = "CacheConfig::default_block_size")]
    pub block_size: u64,

    /// Lines per set (only meaningful for set-associative mapping).
    #[serde(default = "CacheConfig::default_associativity")]
    pub associativity: usize,

    /// Placement policy.
    #[serde(default)]
    pub mapping: MappingPolicy,
}

impl CacheConfig {
    fn default_memory_size() -> u64 {
        defaults::MEMORY_SIZE
    }

    fn default_cache_size() -> u64 {
        defaults::CACHE_SIZE
    }

    fn default_block_size() -> u64 {
        defaults::BLOCK_SIZE
    }

    fn default_associativity() -> usize {
        defaults::ASSOCIATIVITY
    }

    /// Deserializes a configuration from a JSON document.
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed JSON or unknown policy names.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads and deserializes a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if the file cannot be read and
    /// [`SimError::Json`] if its contents are malformed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_json(&text)?)
    }

    /// Cache size after clamping to the memory size.
    pub fn effective_cache_size(&self) -> u64 {
        self.cache_size.min(self.memory_size)
    }

    /// Validates the record and derives the bit-field geometry.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when any size is zero, when the block size is
    /// not a power of two or does not divide the clamped cache size, when the
    /// associativity is zero, or when set-associative mapping has fewer lines
    /// than a single set.
    pub fn geometry(&self) -> Result<Geometry, ConfigError> {
        if self.memory_size == 0 {
            return Err(ConfigError::ZeroMemorySize);
        }
        if self.cache_size == 0 {
            return Err(ConfigError::ZeroCacheSize);
        }
        if self.block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        if !self.block_size.is_power_of_two() {
            return Err(ConfigError::BlockSizeNotPowerOfTwo(self.block_size));
        }

        let cache_size = self.effective_cache_size();
        if cache_size % self.block_size != 0 {
            return Err(ConfigError::BlockSizeNotDivisor {
                block_size: self.block_size,
                cache_size,
            });
        }
        if self.associativity == 0 {
            return Err(ConfigError::ZeroAssociativity);
        }

        let num_lines = cache_size / self.block_size;
        if self.mapping == MappingPolicy::SetAssociative && num_lines < self.associativity as u64 {
            return Err(ConfigError::TooFewLinesForSet {
                num_lines,
                associativity: self.associativity,
            });
        }

        Ok(Geometry::new(self.memory_size, cache_size, self.block_size))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            memory_size: defaults::MEMORY_SIZE,
            cache_size: defaults::CACHE_SIZE,
            block_size: defaults::BLOCK_SIZE,
            associativity: defaults::ASSOCIATIVITY,
            mapping: MappingPolicy::default(),
        }
    }
}
