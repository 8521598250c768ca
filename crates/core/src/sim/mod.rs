//! Simulation harness and address-sequence input.
//!
//! Provides the driving side of a simulation: parsing the comma-separated hex
//! address list and stepping a [`CacheModel`](crate::cache::CacheModel)
//! through it one access at a time.

/// Hex address-sequence parsing.
pub mod sequence;

/// Step/run replay over one model.
pub mod simulator;

pub use sequence::{parse_address_sequence, parse_hex_address};
pub use simulator::Simulator;
