//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides the building blocks shared by the model, the
//! configuration layer, and the replay harness:
//! 1. **Bit Widths:** Integer ceiling-log2 and fixed-width binary rendering.
//! 2. **Error Handling:** Configuration, address, parse, and harness error types.

/// Integer bit-width helpers.
pub mod bits;

/// Error types.
pub mod error;

pub use bits::{ceil_log2, to_fixed_binary};
pub use error::{ConfigError, InvalidAddress, ParseError, SimError};
