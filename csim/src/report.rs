use std::fs;
use std::io::{self, Write};
use log::warn;
use serde::Serialize;
use cachelab::config::{Geometry, SimulationConfig};
use cachelab::simulator::Summary;

/// File the grading scripts read the three counters from
pub const RESULTS_FILE: &str = ".csim_results";

#[derive(Serialize)]
struct RunReport<'a> {
    trace: String,
    geometry: &'a Geometry,
    #[serde(flatten)]
    summary: &'a Summary,
}

pub fn print_summary<W: Write>(out: &mut W, summary: &Summary) -> io::Result<()> {
    writeln!(out, "hits:{} misses:{} evictions:{}", summary.hits, summary.misses, summary.evictions)
}

pub fn print_json<W: Write>(out: &mut W, config: &SimulationConfig, summary: &Summary) -> io::Result<()> {
    let report = RunReport {
        trace: config.trace_path.display().to_string(),
        geometry: &config.geometry,
        summary,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)
}

/// Records the counters for graders. Not being able to write the file doesn't fail the run
pub fn write_results_file(summary: &Summary) {
    let contents = format!("{} {} {}\n", summary.hits, summary.misses, summary.evictions);
    if let Err(e) = fs::write(RESULTS_FILE, contents) {
        warn!("Couldn't write {RESULTS_FILE}: {e}");
    }
}
