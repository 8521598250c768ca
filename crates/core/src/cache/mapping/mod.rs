//! Cache Mapping Policies.
//!
//! Implements the placement state behind each mapping policy.
//!
//! # Policies
//!
//! - `DirectMapped`: one line per index, keyed by index.
//! - `SetAssociative`: `associativity` lines per set, keyed by tag within the set.
//! - `FullyAssociative`: any line, keyed by the address that filled it.
//!
//! Every policy evicts the oldest-filled entry of the full structure on a miss.

/// Direct-mapped placement.
mod direct;

/// Fully associative placement.
mod fully_associative;

/// Set-associative placement.
mod set_associative;

use std::fmt;

use serde::Serialize;

use super::geometry::LineAddress;

pub(crate) use direct::DirectMapped;
pub(crate) use fully_associative::FullyAssociative;
pub(crate) use set_associative::SetAssociative;

/// An entry removed to make room for a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Victim {
    /// Line index, slot key, or set index, depending on the policy.
    pub key: u64,
    /// Tag the victim held.
    pub tag: u64,
}

/// Result of one lookup-or-fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Fill {
    pub hit: bool,
    pub victim: Option<Victim>,
}

impl Fill {
    pub(crate) const fn hit() -> Self {
        Self {
            hit: true,
            victim: None,
        }
    }

    pub(crate) const fn miss(victim: Option<Victim>) -> Self {
        Self { hit: false, victim }
    }
}

/// Trait for the placement state of a mapping policy.
///
/// Implementations own all occupancy state; the model owns counters and history.
pub(crate) trait MappingState: Send + Sync + fmt::Debug {
    /// Looks `line` up and, on a miss, fills it, evicting the oldest entry if full.
    fn lookup_or_fill(&mut self, line: &LineAddress) -> Fill;

    /// Number of occupied lines.
    fn occupancy(&self) -> usize;

    /// Current contents, oldest-first.
    fn snapshot(&self) -> Snapshot;
}

/// One occupied line of a direct-mapped or fully associative cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineEntry {
    /// Line index (direct-mapped) or the address that filled the slot (fully associative).
    pub index: u64,
    /// Stored tag.
    pub tag: u64,
}

/// One occupied line of a set-associative cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SetEntry {
    /// Set index.
    pub set: u64,
    /// Stored tag.
    pub tag: u64,
    /// Address whose miss filled this line.
    pub address: u64,
}

/// Immutable view of cache occupancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "entries", rename_all = "snake_case")]
pub enum Snapshot {
    /// Direct-mapped or fully associative lines, oldest fill first.
    Lines(Vec<LineEntry>),
    /// Set-associative lines, by ascending set then oldest fill first.
    Sets(Vec<SetEntry>),
}

impl Snapshot {
    /// Number of occupied lines.
    pub fn len(&self) -> usize {
        match self {
            Self::Lines(lines) => lines.len(),
            Self::Sets(entries) => entries.len(),
        }
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lines(lines) => {
                for line in lines {
                    writeln!(f, "Index: {}, Tag: {}", line.index, line.tag)?;
                }
            }
            Self::Sets(entries) => {
                for entry in entries {
                    writeln!(
                        f,
                        "Set: {}, Tag: {}, Address: {:#x}",
                        entry.set, entry.tag, entry.address
                    )?;
                }
            }
        }
        Ok(())
    }
}
