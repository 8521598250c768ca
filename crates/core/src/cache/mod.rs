//! Cache Model.
//!
//! This module implements the cache simulator proper. A [`CacheModel`] owns a
//! validated configuration, the placement state for one mapping policy, the
//! hit/miss/eviction counters, and the access history. Each call to
//! [`CacheModel::access`] resolves one read and updates everything atomically:
//! an invalid address is rejected before any state is touched.

/// Insertion-ordered map backing oldest-fill eviction.
mod fill_order;

/// Address bit-field geometry (tag, index, offset).
pub mod geometry;

/// Placement state for each mapping policy.
mod mapping;

use std::fmt;

use serde::Serialize;

pub use self::geometry::{Decomposition, FieldWidths, Geometry, LineAddress};
pub use self::mapping::{LineEntry, SetEntry, Snapshot};

use self::mapping::{DirectMapped, FullyAssociative, MappingState, SetAssociative};
use crate::common::{ConfigError, InvalidAddress};
use crate::config::{CacheConfig, MappingPolicy};
use crate::stats::{CacheStats, SimReport};

/// Outcome of a single access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessOutcome {
    /// Address that was accessed.
    pub address: u64,
    /// Whether the block was already cached.
    pub hit: bool,
    /// Whether the fill evicted an older occupant.
    pub evicted: bool,
}

impl fmt::Display for AccessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = if self.hit { "Hit" } else { "Miss" };
        write!(f, "{:#x}: {}", self.address, result)
    }
}

/// Cache simulator for one run with a fixed configuration.
///
/// # Examples
///
/// ```
/// use cachesim_core::{CacheModel, MappingPolicy};
///
/// let mut cache = CacheModel::new(256, 32, 4, MappingPolicy::DirectMapped).unwrap();
/// assert!(!cache.access(0x0).unwrap().hit);
/// assert!(cache.access(0x0).unwrap().hit);
/// assert_eq!(cache.hit_count(), 1);
/// assert_eq!(cache.miss_count(), 1);
/// ```
#[derive(Debug)]
pub struct CacheModel {
    config: CacheConfig,
    geometry: Geometry,
    state: Box<dyn MappingState>,
    stats: CacheStats,
    history: Vec<AccessOutcome>,
}

impl CacheModel {
    /// Creates a cache model with the default associativity of 2.
    ///
    /// `cache_size` is silently clamped to `memory_size`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any size is zero, or if `block_size` is not
    /// a power of two dividing the clamped cache size.
    pub fn new(
        memory_size: u64,
        cache_size: u64,
        block_size: u64,
        mapping: MappingPolicy,
    ) -> Result<Self, ConfigError> {
        Self::from_config(&CacheConfig {
            memory_size,
            cache_size,
            block_size,
            mapping,
            ..CacheConfig::default()
        })
    }

    /// Creates a cache model from a configuration record.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`CacheConfig::geometry`].
    pub fn from_config(config: &CacheConfig) -> Result<Self, ConfigError> {
        let geometry = config.geometry()?;
        let num_lines = geometry.num_lines() as usize;

        let state: Box<dyn MappingState> = match config.mapping {
            MappingPolicy::DirectMapped => Box::new(DirectMapped::new(num_lines)),
            MappingPolicy::SetAssociative => {
                let num_sets = geometry.num_lines() / config.associativity as u64;
                Box::new(SetAssociative::new(num_sets, config.associativity))
            }
            MappingPolicy::FullyAssociative => Box::new(FullyAssociative::new(num_lines)),
        };

        let widths = geometry.field_widths();
        tracing::debug!(
            mapping = %config.mapping,
            memory_size = geometry.memory_size(),
            cache_size = geometry.cache_size(),
            block_size = geometry.block_size(),
            num_lines = geometry.num_lines(),
            tag_bits = widths.tag_bits,
            index_bits = widths.index_bits,
            offset_bits = widths.offset_bits,
            "cache model configured"
        );

        Ok(Self {
            config: CacheConfig {
                cache_size: geometry.cache_size(),
                ..config.clone()
            },
            geometry,
            state,
            stats: CacheStats::default(),
            history: Vec::new(),
        })
    }

    fn check_address(&self, address: u64) -> Result<(), InvalidAddress> {
        if self.geometry.contains(address) {
            Ok(())
        } else {
            Err(InvalidAddress {
                address,
                memory_size: self.geometry.memory_size(),
            })
        }
    }

    /// Resolves one read of `address`.
    ///
    /// Looks the block up under the configured mapping policy. On a miss, fills
    /// it and evicts the oldest fill first if the line, set, or cache is full.
    /// Exactly one of the hit/miss counters is incremented, the eviction
    /// counter at most once, and the outcome is appended to the history.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidAddress`] if `address >= memory_size`; no state changes.
    pub fn access(&mut self, address: u64) -> Result<AccessOutcome, InvalidAddress> {
        self.check_address(address)?;

        let line = self.geometry.locate(address);
        let fill = self.state.lookup_or_fill(&line);

        if let Some(victim) = fill.victim {
            tracing::debug!(
                address = format_args!("{address:#x}"),
                victim_key = victim.key,
                victim_tag = victim.tag,
                "evicted oldest fill"
            );
        }

        let outcome = AccessOutcome {
            address,
            hit: fill.hit,
            evicted: fill.victim.is_some(),
        };
        self.stats.record(&outcome);
        self.history.push(outcome);

        tracing::trace!(
            address = format_args!("{address:#x}"),
            index = line.index,
            tag = line.tag,
            hit = outcome.hit,
            "access"
        );
        Ok(outcome)
    }

    /// Number of hits so far.
    pub const fn hit_count(&self) -> u64 {
        self.stats.hits
    }

    /// Number of misses so far.
    pub const fn miss_count(&self) -> u64 {
        self.stats.misses
    }

    /// Number of evictions so far.
    pub const fn eviction_count(&self) -> u64 {
        self.stats.evictions
    }

    /// `hits / (hits + misses)`, or 0 before the first access.
    pub fn hit_rate(&self) -> f64 {
        self.stats.hit_rate()
    }

    /// `misses / (hits + misses)`, or 0 before the first access.
    pub fn miss_rate(&self) -> f64 {
        self.stats.miss_rate()
    }

    /// Counter snapshot.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Number of occupied lines.
    pub fn occupancy(&self) -> usize {
        self.state.occupancy()
    }

    /// Current occupancy, in a policy-appropriate shape.
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Every access outcome so far, in order.
    pub fn history(&self) -> &[AccessOutcome] {
        &self.history
    }

    /// Addresses that hit, in access order.
    pub fn hit_addresses(&self) -> impl Iterator<Item = u64> + '_ {
        self.history.iter().filter(|o| o.hit).map(|o| o.address)
    }

    /// Addresses that missed, in access order.
    pub fn miss_addresses(&self) -> impl Iterator<Item = u64> + '_ {
        self.history.iter().filter(|o| !o.hit).map(|o| o.address)
    }

    /// Effective configuration (cache size already clamped).
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Derived geometry.
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Tag, index, and offset widths.
    pub const fn field_widths(&self) -> FieldWidths {
        self.geometry.field_widths()
    }

    /// Splits `address` into binary tag, index, and offset strings.
    ///
    /// Does not touch cache state and does not depend on earlier accesses.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidAddress`] if `address >= memory_size`.
    pub fn decompose(&self, address: u64) -> Result<Decomposition, InvalidAddress> {
        self.check_address(address)?;
        Ok(self.geometry.decompose(address))
    }

    /// Builds the end-of-run report from the current counters and contents.
    pub fn report(&self) -> SimReport {
        SimReport::new(&self.stats, self.snapshot(), self.history.clone())
    }
}
