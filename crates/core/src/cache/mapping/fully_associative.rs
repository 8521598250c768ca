//! Fully Associative Placement.
//!
//! Slots are keyed by the address whose miss filled them and store that
//! address's tag. A hit is any slot whose stored tag equals the incoming
//! tag, so lookup scans every occupied slot's value rather than the keys.
//!
//! # Performance
//!
//! - `lookup_or_fill()`: O(L) for L occupied lines (value scan)
//! - eviction: O(1)

use super::{Fill, LineAddress, LineEntry, MappingState, Snapshot, Victim};
use crate::cache::fill_order::FillOrder;

/// Fully associative state: filling address -> tag, in fill order.
#[derive(Debug, Clone)]
pub(crate) struct FullyAssociative {
    slots: FillOrder<u64, u64>,
    num_lines: usize,
}

impl FullyAssociative {
    pub(crate) fn new(num_lines: usize) -> Self {
        Self {
            slots: FillOrder::new(),
            num_lines,
        }
    }
}

impl MappingState for FullyAssociative {
    fn lookup_or_fill(&mut self, line: &LineAddress) -> Fill {
        if self.slots.values().any(|&tag| tag == line.tag) {
            return Fill::hit();
        }

        let victim = if self.slots.len() >= self.num_lines {
            self.slots
                .pop_oldest()
                .map(|(address, tag)| Victim { key: address, tag })
        } else {
            None
        };
        self.slots.insert(line.address, line.tag);
        Fill::miss(victim)
    }

    fn occupancy(&self) -> usize {
        self.slots.len()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::Lines(
            self.slots
                .iter()
                .map(|(index, &tag)| LineEntry { index, tag })
                .collect(),
        )
    }
}
