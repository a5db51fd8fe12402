mod report;

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use clap::Parser;
use log::debug;
use cachelab::config::SimulationConfig;
use cachelab::error::SimError;
use cachelab::io::open_trace;
use cachelab::simulator::Simulator;

#[derive(Parser, Debug)]
#[command(
    about = String::from("Set-associative LRU cache simulator for memory traces"),
    after_help = "Examples:\n  csim -s 4 -E 1 -b 4 -t traces/yi.trace\n  csim -v -s 8 -E 2 -b 4 -t traces/yi.trace"
)]
struct Args {
    /// Number of set index bits
    #[arg(short = 's', value_name = "num")]
    set_index_bits: Option<u32>,

    /// Number of lines per set
    #[arg(short = 'E', value_name = "num")]
    lines_per_set: Option<u32>,

    /// Number of block offset bits
    #[arg(short = 'b', value_name = "num")]
    block_offset_bits: Option<u32>,

    /// Trace file
    #[arg(short = 't', value_name = "file")]
    trace: Option<PathBuf>,

    /// Echo every simulated record with its outcome
    #[arg(short, long)]
    verbose: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Print how long the simulation took
    #[arg(short, long)]
    performance: bool,

    /// Print the parsed configuration and the number of lines never filled
    #[arg(short, long)]
    debug: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            if let SimError::Configuration(_) = e {
                eprintln!("Usage: csim [-hv] -s <num> -E <num> -b <num> -t <file>");
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(args: &Args) -> Result<(), SimError> {
    let start = Instant::now();
    let config = SimulationConfig::from_parts(
        args.set_index_bits,
        args.lines_per_set,
        args.block_offset_bits,
        args.trace.clone(),
        args.verbose,
    )?;
    debug!("running with {config:?}");
    let mut simulator = Simulator::new(config.geometry, config.verbose)?;
    let trace_reader = open_trace(&config.trace_path)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let summary = *simulator.simulate(trace_reader, &mut out)?;
    if args.json {
        report::print_json(&mut out, &config, &summary)?;
    } else {
        report::print_summary(&mut out, &summary)?;
    }
    report::write_results_file(&summary);
    if args.performance {
        let total_time = start.elapsed();
        writeln!(out, "Simulation time: {}s", simulator.execution_time().as_nanos() as f64 / 1e9)?;
        writeln!(out, "Total execution time (includes parsing, configuration, and output): {}s", total_time.as_nanos() as f64 / 1e9)?;
    }
    if args.debug {
        if cfg!(debug_assertions) {
            writeln!(out, "Running the debug binary. If benchmarking, re-compile with the --release argument when using cargo run")?;
        }
        writeln!(out, "Parsed input configuration: {config:?}")?;
        writeln!(out, "Cache lines never filled: {}", simulator.invalid_line_count())?;
    }
    out.flush()?;
    Ok(())
}
