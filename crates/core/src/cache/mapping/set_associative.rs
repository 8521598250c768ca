//! Set-Associative Placement.
//!
//! The line index selects a set (`index % num_sets`). Within a set, a hit is
//! any stored entry with the same tag. A miss into a full set evicts that
//! set's oldest fill.
//!
//! Sets are created on first touch, so memory use follows the sets actually
//! referenced rather than the configured cache size.

use std::collections::BTreeMap;

use super::{Fill, LineAddress, MappingState, SetEntry, Snapshot, Victim};
use crate::cache::fill_order::FillOrder;

/// Set-associative state: set -> (tag -> filling address), in fill order.
#[derive(Debug, Clone)]
pub(crate) struct SetAssociative {
    sets: BTreeMap<u64, FillOrder<u64, u64>>,
    num_sets: u64,
    ways: usize,
}

impl SetAssociative {
    /// `num_sets` must be non-zero; configuration validation guarantees it.
    pub(crate) fn new(num_sets: u64, ways: usize) -> Self {
        Self {
            sets: BTreeMap::new(),
            num_sets: num_sets.max(1),
            ways,
        }
    }
}

impl MappingState for SetAssociative {
    fn lookup_or_fill(&mut self, line: &LineAddress) -> Fill {
        let set_index = line.index % self.num_sets;
        let set = self.sets.entry(set_index).or_insert_with(FillOrder::new);

        if set.contains_key(&line.tag) {
            return Fill::hit();
        }

        let victim = if set.len() >= self.ways {
            set.pop_oldest().map(|(tag, _)| Victim {
                key: set_index,
                tag,
            })
        } else {
            None
        };
        set.insert(line.tag, line.address);
        Fill::miss(victim)
    }

    fn occupancy(&self) -> usize {
        self.sets.values().map(FillOrder::len).sum()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::Sets(
            self.sets
                .iter()
                .flat_map(|(&set, lines)| {
                    lines
                        .iter()
                        .map(move |(tag, &address)| SetEntry { set, tag, address })
                })
                .collect(),
        )
    }
}
