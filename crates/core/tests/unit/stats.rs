//! # Statistics and Report Tests
//!
//! Verifies the counters, derived rates, and the end-of-run report layout.

use cachesim_core::Simulator;
use cachesim_core::config::{CacheConfig, MappingPolicy};
use cachesim_core::stats::CacheStats;
use pretty_assertions::assert_eq;

/// The reference front-end's default input.
const REFERENCE_SEQUENCE: &str = "11, 11, 11, 12, 13, 15, 21, 29, 56, 57";

#[test]
fn test_empty_stats_rates_are_zero() {
    let stats = CacheStats::default();
    assert_eq!(stats.total(), 0);
    assert_eq!(stats.hit_rate(), 0.0);
    assert_eq!(stats.miss_rate(), 0.0);
    assert_eq!(stats.hit_percentage(), 0.0);
}

#[test]
fn test_percentages() {
    let stats = CacheStats {
        hits: 1,
        misses: 3,
        evictions: 0,
    };
    assert_eq!(stats.total(), 4);
    assert!((stats.hit_percentage() - 25.0).abs() < 1e-9);
    assert!((stats.miss_percentage() - 75.0).abs() < 1e-9);
}

/// Direct-mapped walk of the reference sequence (index = (a >> 2) & 7, tag = a >> 5):
///
/// | addr | index | tag | result |
/// |------|-------|-----|--------|
/// | 0x11 | 4     | 0   | miss   |
/// | 0x11 | 4     | 0   | hit x2 |
/// | 0x12 | 4     | 0   | hit    |
/// | 0x13 | 4     | 0   | hit    |
/// | 0x15 | 5     | 0   | miss   |
/// | 0x21 | 0     | 1   | miss   |
/// | 0x29 | 2     | 1   | miss   |
/// | 0x56 | 5     | 2   | miss (overwrites index 5 in place) |
/// | 0x57 | 5     | 2   | hit    |
#[test]
fn test_report_text_layout() {
    let mut sim = Simulator::from_config(&CacheConfig::default(), REFERENCE_SEQUENCE).unwrap();
    sim.run().unwrap();

    let expected = "\
Hits: 5 (50.00%)
Misses: 5 (50.00%)
Evictions: 0
Cache Contents:
Index: 4, Tag: 0
Index: 5, Tag: 2
Index: 0, Tag: 1
Index: 2, Tag: 1

Memory Accesses:
0x11: Miss
0x11: Hit
0x11: Hit
0x12: Hit
0x13: Hit
0x15: Miss
0x21: Miss
0x29: Miss
0x56: Miss
0x57: Hit
";
    assert_eq!(sim.report().to_string(), expected);
}

#[test]
fn test_report_lists_sets_for_set_associative() {
    let config = CacheConfig {
        mapping: MappingPolicy::SetAssociative,
        ..CacheConfig::default()
    };
    let mut sim = Simulator::from_config(&config, "0, 24").unwrap();
    sim.run().unwrap();

    let text = sim.report().to_string();
    assert!(text.contains("Set: 0, Tag: 0, Address: 0x0\n"));
    assert!(text.contains("Set: 1, Tag: 1, Address: 0x24\n"));
}

#[test]
fn test_report_serializes_to_json() {
    let mut sim = Simulator::from_config(&CacheConfig::default(), "0, 0, 4").unwrap();
    sim.run().unwrap();

    let value = serde_json::to_value(sim.report()).unwrap();
    assert_eq!(value["stats"]["hits"], 1);
    assert_eq!(value["stats"]["misses"], 2);
    assert_eq!(value["contents"]["kind"], "lines");
    assert_eq!(value["contents"]["entries"][1]["index"], 1);
    assert_eq!(value["accesses"][1]["hit"], true);
}

#[test]
fn test_model_stats_match_report() {
    let mut sim = Simulator::from_config(&CacheConfig::default(), REFERENCE_SEQUENCE).unwrap();
    sim.run().unwrap();
    let report = sim.report();
    assert_eq!(&report.stats, sim.model().stats());
    assert_eq!(report.accesses.as_slice(), sim.model().history());
}
