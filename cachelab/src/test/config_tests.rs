use std::path::PathBuf;
use crate::config::{Geometry, SimulationConfig};
use crate::error::SimError;

#[test]
fn zero_lines_per_set_is_rejected() {
    let err = Geometry::new(4, 0, 4).unwrap_err();
    assert!(matches!(err, SimError::Configuration(_)));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn split_wider_than_address_is_rejected() {
    assert!(Geometry::new(40, 1, 25).is_err());
    assert!(Geometry::new(u32::MAX, 1, 1).is_err());
    assert!(Geometry::new(32, 1, 32).is_ok());
}

#[test]
fn decompose_splits_tag_and_set() {
    let geometry = Geometry::new(2, 1, 4).unwrap();
    // 0x50 = 0b101_0000: offset 0000, set 01, tag 1
    assert_eq!(geometry.decompose(0x50), (1, 1));
    assert_eq!(geometry.decompose(0x2f), (0, 2));
    assert_eq!(geometry.decompose(u64::MAX), (u64::MAX >> 6, 3));
}

#[test]
fn decompose_without_set_bits_uses_single_set() {
    let geometry = Geometry::new(0, 1, 0).unwrap();
    assert_eq!(geometry.decompose(0), (0, 0));
    assert_eq!(geometry.decompose(0x7ff000388), (0x7ff000388, 0));
    assert_eq!(geometry.set_count(), Some(1));
}

#[test]
fn decompose_at_full_address_width() {
    let all_offset = Geometry::new(0, 1, 64).unwrap();
    assert_eq!(all_offset.decompose(u64::MAX), (0, 0));
    let all_set = Geometry::new(64, 1, 0).unwrap();
    assert_eq!(all_set.decompose(0xdead_beef), (0, 0xdead_beef));
    assert_eq!(all_set.set_count(), None);
}

#[test]
fn missing_parameters_short_circuit() {
    let trace = Some(PathBuf::from("traces/yi.trace"));
    assert!(SimulationConfig::from_parts(None, Some(1), Some(4), trace.clone(), false).is_err());
    assert!(SimulationConfig::from_parts(Some(4), None, Some(4), trace.clone(), false).is_err());
    assert!(SimulationConfig::from_parts(Some(4), Some(1), None, trace.clone(), false).is_err());
    assert!(SimulationConfig::from_parts(Some(4), Some(1), Some(4), None, false).is_err());
    assert!(SimulationConfig::from_parts(Some(4), Some(0), Some(4), trace.clone(), false).is_err());

    let config = SimulationConfig::from_parts(Some(4), Some(2), Some(4), trace, true).unwrap();
    assert_eq!(config.geometry, Geometry::new(4, 2, 4).unwrap());
    assert!(config.verbose);
}

#[test]
fn geometry_json_is_validated() {
    let geometry: Geometry =
        serde_json::from_str(r#"{"set_index_bits": 5, "lines_per_set": 1, "block_offset_bits": 5}"#).unwrap();
    assert_eq!(geometry.set_count(), Some(32));
    assert!(serde_json::from_str::<Geometry>(r#"{"set_index_bits": 5, "lines_per_set": 0, "block_offset_bits": 5}"#).is_err());
}
