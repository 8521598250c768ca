//! Set-Associative Cache Unit Tests.
//!
//! 8 lines, 2 ways, so 4 sets. Set = ((addr >> 2) & 7) % 4, tag = addr >> 5.
//!
//! Addresses 0x0, 0x20, 0x40 all land in set 0 with tags 0, 1, 2.

use cachesim_core::config::{CacheConfig, MappingPolicy};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::harness::TestContext;

fn ctx() -> TestContext {
    TestContext::new(MappingPolicy::SetAssociative)
}

/// A third distinct tag into a 2-way set evicts exactly once.
#[test]
fn third_tag_in_set_evicts_once() {
    let mut ctx = ctx();
    let outcomes = ctx.replay(&[0x0, 0x20, 0x40]);

    assert_eq!(
        outcomes.iter().map(|o| o.evicted).collect::<Vec<_>>(),
        vec![false, false, true]
    );
    assert_eq!(ctx.counters(), (0, 3, 1));
    assert_eq!(ctx.set_entries(), vec![(0, 1, 0x20), (0, 2, 0x40)]);
}

/// Hits do not refresh fill order: the oldest fill is evicted even if it was
/// just read.
#[test]
fn eviction_is_oldest_fill_not_least_recent() {
    let mut ctx = ctx();
    assert_eq!(
        ctx.hits(&[0x0, 0x20, 0x0, 0x40, 0x0]),
        vec![false, false, true, false, false]
    );
    assert_eq!(ctx.model.eviction_count(), 2);
}

#[test]
fn sets_fill_independently() {
    let mut ctx = ctx();
    // Sets 0, 1, 2, 3 each get one line.
    let _ = ctx.replay(&[0x0, 0x4, 0x8, 0xc]);
    // Second way of each set.
    let _ = ctx.replay(&[0x20, 0x24, 0x28, 0x2c]);

    assert_eq!(ctx.counters(), (0, 8, 0));
    assert_eq!(ctx.model.occupancy(), 8);
}

/// Index 4 folds onto set 0 and 0x10 has tag 0, so it hits the line
/// filled by 0x0.
#[test]
fn folded_index_with_same_tag_hits() {
    let mut ctx = ctx();
    assert_eq!(ctx.hits(&[0x0, 0x10]), vec![false, true]);
}

#[test]
fn snapshot_orders_by_set_then_fill() {
    let mut ctx = ctx();
    let _ = ctx.replay(&[0x24, 0x0, 0x44, 0x20]);
    assert_eq!(
        ctx.set_entries(),
        vec![(0, 0, 0x0), (0, 1, 0x20), (1, 1, 0x24), (1, 2, 0x44)]
    );
}

/// The first filling address is kept; a later hit on the same tag leaves it.
#[test]
fn hit_keeps_original_fill_address() {
    let mut ctx = ctx();
    let _ = ctx.replay(&[0x1, 0x3]);
    assert_eq!(ctx.set_entries(), vec![(0, 0, 0x1)]);
}

#[rstest]
#[case(1, 8)]
#[case(2, 4)]
#[case(4, 2)]
#[case(8, 1)]
fn associativity_bounds_each_set(#[case] ways: usize, #[case] sets: u64) {
    let mut ctx = TestContext::with_config(&CacheConfig {
        memory_size: 1024,
        cache_size: 32,
        block_size: 4,
        associativity: ways,
        mapping: MappingPolicy::SetAssociative,
    });

    // 16 distinct blocks that all fold onto set 0.
    let stride = sets * 4;
    let addrs: Vec<u64> = (0..16).map(|i| i * stride).collect();
    let _ = ctx.replay(&addrs);

    let per_set = ctx
        .set_entries()
        .iter()
        .filter(|(set, _, _)| *set == 0)
        .count();
    assert!(per_set <= ways);
    assert!(ctx.model.eviction_count() <= ctx.model.miss_count());
}
