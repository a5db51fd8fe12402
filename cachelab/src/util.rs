use std::error::Error;
use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use regex::Regex;
use crate::config::Geometry;
use crate::simulator::Summary;

pub const TRACE_FILES_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/traces");
pub const EXPECTED_OUTPUTS_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/traces/expected");

/// A trace replay with a known result
pub struct TestCase {
    pub name: String,
    pub trace: PathBuf,
    pub geometry: Geometry,
    pub expected: PathBuf,
}

impl TestCase {
    pub fn expected_summary(&self) -> Result<Summary, Box<dyn Error>> {
        let file = File::open(&self.expected)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

/// Discovers the bundled fixtures
pub fn get_configs() -> Result<Vec<TestCase>, Box<dyn Error>> {
    get_configs_in(Path::new(TRACE_FILES_PATH), Path::new(EXPECTED_OUTPUTS_PATH))
}

/// Discovers fixtures from an expected output directory
///
/// Each expected output is named `<trace>-s<s>E<E>b<b>.json` and holds the summary for replaying
/// `<trace>.trace` from the trace directory with that geometry
pub fn get_configs_in(trace_dir: &Path, expected_dir: &Path) -> Result<Vec<TestCase>, Box<dyn Error>> {
    let output_pattern = Regex::new(r"^(?P<trace>[0-9a-zA-Z_]+)-s(?P<s>[0-9]+)E(?P<e>[0-9]+)b(?P<b>[0-9]+)\.json$")?;
    let mut files = Vec::new();
    for entry in fs::read_dir(expected_dir)? {
        let entry = entry?;
        let file_name = entry
            .file_name()
            .into_string()
            .map_err(|e| format!("Can't convert OS string ({e:?}) to standard string"))?;
        if output_pattern.is_match(&file_name) {
            files.push(file_name);
        }
    }
    files.sort();
    let mut out = Vec::new();
    for file_name in files {
        let tokens = output_pattern.captures(&file_name).ok_or("Couldn't parse the file name")?;
        let trace_name = &tokens["trace"];
        let geometry = Geometry::new(tokens["s"].parse()?, tokens["e"].parse()?, tokens["b"].parse()?)?;
        out.push(TestCase {
            name: file_name.trim_end_matches(".json").to_string(),
            trace: trace_dir.join(format!("{trace_name}.trace")),
            geometry,
            expected: expected_dir.join(&file_name),
        })
    }
    Ok(out)
}
