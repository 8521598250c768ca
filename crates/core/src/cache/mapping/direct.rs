//! Direct-Mapped Placement.
//!
//! Each index holds at most one tag. A miss overwrites the line at its index.
//! When every line is occupied, the oldest-filled line is evicted first, so
//! capacity eviction and index-collision replacement happen on the same miss.

use super::{Fill, LineAddress, LineEntry, MappingState, Snapshot, Victim};
use crate::cache::fill_order::FillOrder;

/// Direct-mapped state: index -> tag, in fill order.
#[derive(Debug, Clone)]
pub(crate) struct DirectMapped {
    lines: FillOrder<u64, u64>,
    num_lines: usize,
}

impl DirectMapped {
    pub(crate) fn new(num_lines: usize) -> Self {
        Self {
            lines: FillOrder::new(),
            num_lines,
        }
    }
}

impl MappingState for DirectMapped {
    fn lookup_or_fill(&mut self, line: &LineAddress) -> Fill {
        if self.lines.get(&line.index) == Some(&line.tag) {
            return Fill::hit();
        }

        let victim = if self.lines.len() >= self.num_lines {
            self.lines
                .pop_oldest()
                .map(|(index, tag)| Victim { key: index, tag })
        } else {
            None
        };
        self.lines.insert(line.index, line.tag);
        Fill::miss(victim)
    }

    fn occupancy(&self) -> usize {
        self.lines.len()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::Lines(
            self.lines
                .iter()
                .map(|(index, &tag)| LineEntry { index, tag })
                .collect(),
        )
    }
}
