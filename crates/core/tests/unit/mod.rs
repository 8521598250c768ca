//! # Unit Components
//!
//! Organizes the tests by simulator module: the cache model and its mapping
//! policies, configuration, shared types, the replay harness, and statistics.




/// Tests for sequence parsing and the replay harness.
pub mod sim;

/// Tests for counters, rates, and the report.
pub mod stats;
