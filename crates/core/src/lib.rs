//! Cache organization simulator library.
//!
//! This crate models how a CPU cache resolves a stream of memory-address reads:
//! 1. **Geometry:** Splits an address into tag, index, and offset fields from the configured sizes.
//! 2. **Mapping:** Direct-mapped, 2-way set-associative, and fully associative placement with oldest-fill eviction.
//! 3. **Statistics:** Hit, miss, and eviction counters plus a per-access history.
//! 4. **Simulation:** A replay harness that parses hex address sequences and drives the model one access at a time.

/// Common types (error definitions and bit-width helpers).
pub mod common;
/// Simulator configuration (defaults, mapping policy, serde-deserializable config record).
pub mod config;
/// The cache model (geometry, mapping state, access outcomes).
pub mod cache;
/// Address-sequence parsing and the step/run replay harness.
pub mod sim;
/// Hit/miss/eviction counters and the end-of-run report.
pub mod stats;

/// Configuration record; use `CacheConfig::default()` or deserialize from JSON.
pub use crate::config::{CacheConfig, MappingPolicy};
/// The cache model; construct with `CacheModel::new` or `CacheModel::from_config`.
pub use crate::cache::{AccessOutcome, CacheModel};
/// Replay harness owning one model and an address sequence.
pub use crate::sim::Simulator;
