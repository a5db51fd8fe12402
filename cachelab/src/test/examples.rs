use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use crate::config::Geometry;
use crate::error::SimError;
use crate::io::open_trace;
use crate::simulator::{Simulator, Summary};
use crate::util::get_configs;
use super::init_test;

#[test]
fn run_all_examples() -> Result<(), Box<dyn Error>> {
    init_test();
    let cases = get_configs()?;
    assert!(!cases.is_empty(), "no fixtures were discovered");
    for case in cases {
        println!("Running test for {}", case.name);
        let expected = case.expected_summary()?;
        let mut simulator = Simulator::new(case.geometry, false)?;
        let result = simulator.simulate_quiet(open_trace(&case.trace)?)?;
        assert_eq!(*result, expected, "{}", case.name);
        println!("Success for {}, time: {}", case.name, simulator.execution_time().as_nanos() as f64 / 1e9);
    }
    Ok(())
}

#[test]
fn mapped_and_buffered_readers_agree() -> Result<(), Box<dyn Error>> {
    for case in get_configs()? {
        let mut mapped = Simulator::new(case.geometry, false)?;
        let mut buffered = Simulator::new(case.geometry, false)?;
        let from_map = *mapped.simulate_quiet(open_trace(&case.trace)?)?;
        let from_buffer = *buffered.simulate_quiet(BufReader::new(File::open(&case.trace)?))?;
        assert_eq!(from_map, from_buffer, "{}", case.name);
    }
    Ok(())
}

#[test]
fn open_missing_trace_is_file_access_error() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("traces/does-not-exist.trace");
    let err = open_trace(&path).err().unwrap();
    match &err {
        SimError::FileAccess { path: failed, .. } => assert_eq!(failed, &path),
        other => panic!("expected a file access error, got {other:?}"),
    }
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn empty_trace_counts_nothing() -> Result<(), Box<dyn Error>> {
    init_test();
    let path = std::env::temp_dir().join(format!("cachelab-empty-{}.trace", std::process::id()));
    File::create(&path)?;
    let mut simulator = Simulator::new(Geometry::new(4, 1, 4)?, false)?;
    let result = simulator.simulate_quiet(open_trace(&path)?).map(|summary| *summary);
    std::fs::remove_file(&path)?;
    assert_eq!(result?, Summary::default());
    assert_eq!(simulator.state().clock(), 0);
    Ok(())
}
