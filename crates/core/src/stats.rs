//! Simulation statistics collection and reporting.
//!
//! This module tracks the aggregate outcome of a simulation. It provides:
//! 1. **Counters:** Hits, misses, and evictions; each access bumps exactly one of hits/misses.
//! 2. **Rates:** Hit/miss ratios and percentages, defined as 0 before the first access.
//! 3. **Report:** The end-of-run summary with cache contents and the per-access log.

use std::fmt;

use serde::Serialize;

use crate::cache::{AccessOutcome, Snapshot};

/// Aggregate hit/miss/eviction counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Accesses that found their block cached.
    pub hits: u64,
    /// Accesses that had to fill a line.
    pub misses: u64,
    /// Misses that first removed an older fill.
    pub evictions: u64,
}

impl CacheStats {
    pub(crate) const fn record(&mut self, outcome: &AccessOutcome) {
        if outcome.hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        if outcome.evicted {
            self.evictions += 1;
        }
    }

    /// Total accesses recorded.
    pub const fn total(&self) -> u64 {
        self.hits + self.misses
    }

    /// `hits / total`, or 0 with no accesses.
    pub fn hit_rate(&self) -> f64 {
        ratio(self.hits, self.total())
    }

    /// `misses / total`, or 0 with no accesses.
    pub fn miss_rate(&self) -> f64 {
        ratio(self.misses, self.total())
    }

    /// Hit rate scaled to 0–100.
    pub fn hit_percentage(&self) -> f64 {
        self.hit_rate() * 100.0
    }

    /// Miss rate scaled to 0–100.
    pub fn miss_percentage(&self) -> f64 {
        self.miss_rate() * 100.0
    }
}

fn ratio(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}

/// End-of-run summary handed to the presentation layer.
///
/// The `Display` form lists the counters with percentages, the cache
/// contents, and then every access as `0x..: Hit|Miss`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimReport {
    /// Final counters.
    pub stats: CacheStats,
    /// Hit percentage, 0–100.
    pub hit_percentage: f64,
    /// Miss percentage, 0–100.
    pub miss_percentage: f64,
    /// Final cache contents.
    pub contents: Snapshot,
    /// Every access outcome in order.
    pub accesses: Vec<AccessOutcome>,
}

impl SimReport {
    pub(crate) fn new(stats: &CacheStats, contents: Snapshot, accesses: Vec<AccessOutcome>) -> Self {
        Self {
            stats: *stats,
            hit_percentage: stats.hit_percentage(),
            miss_percentage: stats.miss_percentage(),
            contents,
            accesses,
        }
    }
}

impl fmt::Display for SimReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Hits: {} ({:.2}%)", self.stats.hits, self.hit_percentage)?;
        writeln!(
            f,
            "Misses: {} ({:.2}%)",
            self.stats.misses, self.miss_percentage
        )?;
        writeln!(f, "Evictions: {}", self.stats.evictions)?;
        writeln!(f, "Cache Contents:")?;
        write!(f, "{}", self.contents)?;
        writeln!(f)?;
        writeln!(f, "Memory Accesses:")?;
        for access in &self.accesses {
            writeln!(f, "{access}")?;
        }
        Ok(())
    }
}
