//! Address bit-field geometry.
//!
//! Derives the tag/index/offset split from the configured sizes:
//! - `offset_bits = ceil(log2(block_size))`
//! - `index_bits  = ceil(log2(cache_size / block_size))`
//! - `tag_bits    = ceil(log2(memory_size)) - index_bits - offset_bits`
//!
//! The split is the same for every mapping policy. Fully associative lookup
//! ignores the index, but the tag is still the bits above `index + offset`.

use std::fmt;

use serde::Serialize;

use crate::common::{ceil_log2, to_fixed_binary};

/// Validated cache geometry. Built by [`CacheConfig::geometry`](crate::config::CacheConfig::geometry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Geometry {
    memory_size: u64,
    cache_size: u64,
    block_size: u64,
    num_lines: u64,
    address_bits: u32,
    index_bits: u32,
    offset_bits: u32,
}

/// Widths of the three address fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldWidths {
    /// High-order bits identifying the memory block.
    pub tag_bits: u32,
    /// Bits selecting the line (or set).
    pub index_bits: u32,
    /// Low-order bits selecting the byte within a block.
    pub offset_bits: u32,
}

impl FieldWidths {
    /// Total width, equal to `ceil(log2(memory_size))`.
    pub const fn total(&self) -> u32 {
        self.tag_bits + self.index_bits + self.offset_bits
    }
}

/// An address rendered as binary and cut into its three fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decomposition {
    /// Tag field digits.
    pub tag_bin: String,
    /// Index field digits.
    pub index_bin: String,
    /// Offset field digits.
    pub offset_bin: String,
}

impl Decomposition {
    /// The fields concatenated back into one fixed-width binary string.
    pub fn concat(&self) -> String {
        [
            self.tag_bin.as_str(),
            self.index_bin.as_str(),
            self.offset_bin.as_str(),
        ]
        .concat()
    }
}

impl fmt::Display for Decomposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}", self.tag_bin, self.index_bin, self.offset_bin)
    }
}

/// Index and tag extracted from one address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineAddress {
    /// The full byte address.
    pub address: u64,
    /// Line index, `(address >> offset_bits) & index_mask`.
    pub index: u64,
    /// Tag, `address >> (index_bits + offset_bits)`.
    pub tag: u64,
}

impl Geometry {
    /// Derives the geometry from already-validated sizes.
    ///
    /// `cache_size` must already be clamped and divisible by `block_size`.
    pub(crate) const fn new(memory_size: u64, cache_size: u64, block_size: u64) -> Self {
        let num_lines = cache_size / block_size;
        Self {
            memory_size,
            cache_size,
            block_size,
            num_lines,
            address_bits: ceil_log2(memory_size),
            index_bits: ceil_log2(num_lines),
            offset_bits: ceil_log2(block_size),
        }
    }

    /// Total addressable memory in bytes.
    pub const fn memory_size(&self) -> u64 {
        self.memory_size
    }

    /// Effective (clamped) cache size in bytes.
    pub const fn cache_size(&self) -> u64 {
        self.cache_size
    }

    /// Block size in bytes.
    pub const fn block_size(&self) -> u64 {
        self.block_size
    }

    /// Number of cache lines, `cache_size / block_size`.
    pub const fn num_lines(&self) -> u64 {
        self.num_lines
    }

    /// Width of a fixed-width address, `ceil(log2(memory_size))`.
    pub const fn address_bits(&self) -> u32 {
        self.address_bits
    }

    /// Whether `address` lies in `[0, memory_size)`.
    pub const fn contains(&self, address: u64) -> bool {
        address < self.memory_size
    }

    /// Field widths for display. Independent of any address.
    pub const fn field_widths(&self) -> FieldWidths {
        FieldWidths {
            tag_bits: self
                .address_bits
                .saturating_sub(self.index_bits + self.offset_bits),
            index_bits: self.index_bits,
            offset_bits: self.offset_bits,
        }
    }

    /// Extracts the index and tag of `address`.
    pub const fn locate(&self, address: u64) -> LineAddress {
        let index_mask = match 1u64.checked_shl(self.index_bits) {
            Some(bit) => bit - 1,
            None => u64::MAX,
        };
        let index = match address.checked_shr(self.offset_bits) {
            Some(block) => block & index_mask,
            None => 0,
        };
        let tag = match address.checked_shr(self.index_bits + self.offset_bits) {
            Some(tag) => tag,
            None => 0,
        };
        LineAddress {
            address,
            index,
            tag,
        }
    }

    /// Renders `address` at the fixed address width and cuts it into fields.
    ///
    /// The caller is responsible for range-checking `address`.
    pub fn decompose(&self, address: u64) -> Decomposition {
        let widths = self.field_widths();
        let bin = to_fixed_binary(address, self.address_bits);
        let tag_end = (widths.tag_bits as usize).min(bin.len());
        let index_end = (tag_end + widths.index_bits as usize).min(bin.len());
        Decomposition {
            tag_bin: bin[..tag_end].to_string(),
            index_bin: bin[tag_end..index_end].to_string(),
            offset_bin: bin[index_end..].to_string(),
        }
    }
}
