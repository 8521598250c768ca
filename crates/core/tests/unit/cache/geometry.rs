//! Geometry Unit Tests.
//!
//! Field widths come from integer ceil-log2 of the configured sizes, and
//! `decompose` cuts the fixed-width binary address at those widths.

use cachesim_core::cache::{CacheModel, Decomposition, FieldWidths};
use cachesim_core::common::{InvalidAddress, to_fixed_binary};
use cachesim_core::config::MappingPolicy;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
#[case(256, 32, 4, (3, 3, 2))]
#[case(1024, 64, 8, (4, 3, 3))]
#[case(200, 32, 4, (3, 3, 2))]
#[case(256, 24, 4, (3, 3, 2))]
#[case(4096, 4096, 1, (0, 12, 0))]
#[case(64, 64, 64, (0, 0, 6))]
fn field_widths_from_sizes(
    #[case] memory: u64,
    #[case] cache: u64,
    #[case] block: u64,
    #[case] expected: (u32, u32, u32),
) {
    let model = CacheModel::new(memory, cache, block, MappingPolicy::DirectMapped).unwrap();
    let (tag_bits, index_bits, offset_bits) = expected;
    assert_eq!(
        model.field_widths(),
        FieldWidths {
            tag_bits,
            index_bits,
            offset_bits,
        }
    );
}

#[test]
fn widths_are_policy_independent() {
    let widths: Vec<FieldWidths> = MappingPolicy::ALL
        .iter()
        .map(|&p| CacheModel::new(256, 32, 4, p).unwrap().field_widths())
        .collect();
    assert!(widths.windows(2).all(|w| w[0] == w[1]));
}

/// 0xb5 = 1011_0101 -> tag 101, index 101, offset 01.
#[test]
fn decompose_splits_fixed_width_binary() {
    let model = CacheModel::new(256, 32, 4, MappingPolicy::DirectMapped).unwrap();
    assert_eq!(
        model.decompose(0xb5).unwrap(),
        Decomposition {
            tag_bin: "101".to_string(),
            index_bin: "101".to_string(),
            offset_bin: "01".to_string(),
        }
    );
    assert_eq!(model.decompose(0x1).unwrap().to_string(), "000|000|01");
}

#[test]
fn decompose_rejects_out_of_range() {
    let model = CacheModel::new(256, 32, 4, MappingPolicy::SetAssociative).unwrap();
    assert_eq!(
        model.decompose(0x100),
        Err(InvalidAddress {
            address: 0x100,
            memory_size: 256,
        })
    );
}

#[test]
fn decompose_does_not_touch_state() {
    let mut model = CacheModel::new(256, 32, 4, MappingPolicy::FullyAssociative).unwrap();
    let before = model.decompose(0x7c).unwrap();
    assert_eq!(model.history().len(), 0);
    assert_eq!(model.occupancy(), 0);

    let _ = model.access(0x7c).unwrap();
    assert_eq!(model.decompose(0x7c).unwrap(), before);
}

#[test]
fn cache_size_is_clamped_to_memory() {
    let model = CacheModel::new(16, 64, 4, MappingPolicy::DirectMapped).unwrap();
    assert_eq!(model.config().cache_size, 16);
    assert_eq!(model.geometry().num_lines(), 4);
    assert_eq!(model.field_widths().total(), 4);
}

proptest! {
    #[test]
    fn decompose_concatenates_to_fixed_width(
        (memory, addr) in (1u64..=4096).prop_flat_map(|m| (Just(m), 0..m)),
    ) {
        // Block 1 divides any cache size; cache == memory covers the widest index.
        let model = CacheModel::new(memory, memory, 1, MappingPolicy::DirectMapped).unwrap();
        let width = model.geometry().address_bits();
        let fields = model.decompose(addr).unwrap();
        prop_assert_eq!(fields.concat(), to_fixed_binary(addr, width));
    }

    #[test]
    fn decompose_fields_match_locate(addr in 0u64..1024) {
        let model = CacheModel::new(1024, 64, 8, MappingPolicy::DirectMapped).unwrap();
        let fields = model.decompose(addr).unwrap();
        let line = model.geometry().locate(addr);
        prop_assert_eq!(u64::from_str_radix(&fields.tag_bin, 2).unwrap(), line.tag);
        prop_assert_eq!(u64::from_str_radix(&fields.index_bin, 2).unwrap(), line.index);
    }
}
