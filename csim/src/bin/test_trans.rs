use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use clap::Parser;
use log::info;
use cachelab::error::SimError;
use cachelab::transpose::{evaluate, registered_functions, SUBMISSION_DESCRIPTION};

#[derive(Parser, Debug)]
#[command(about = String::from("Scores the registered transpose functions on a simulated 1KB direct-mapped cache"))]
struct Args {
    /// Number of matrix columns
    #[arg(short = 'M', value_name = "cols")]
    m: usize,

    /// Number of matrix rows
    #[arg(short = 'N', value_name = "rows")]
    n: usize,

    /// Seed for the contents of the source matrix
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Directory to write each function's access trace to, as trace.f<index>
    #[arg(long, value_name = "dir")]
    trace_dir: Option<PathBuf>,

    /// Print the scores as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}

/// Returns whether the submission was correct
fn run(args: &Args) -> Result<bool, SimError> {
    if let Some(dir) = &args.trace_dir {
        fs::create_dir_all(dir)?;
    }
    let mut scores = Vec::new();
    let mut submission_correct = true;
    for (index, function) in registered_functions().iter().enumerate() {
        let evaluation = evaluate(function, args.m, args.n, args.seed)?;
        if let Some(dir) = &args.trace_dir {
            let path = dir.join(format!("trace.f{index}"));
            let mut out = BufWriter::new(File::create(&path)?);
            for record in &evaluation.accesses {
                writeln!(out, "{record}")?;
            }
            out.flush()?;
            info!("written {}", path.display());
        }
        let score = evaluation.score;
        if score.description == SUBMISSION_DESCRIPTION {
            submission_correct = score.correct;
        }
        if !args.json {
            println!(
                "Function {index} ({}): correctness={} hits:{} misses:{} evictions:{}",
                score.description, score.correct as u8, score.summary.hits, score.summary.misses, score.summary.evictions
            );
        }
        scores.push(score);
    }
    if args.json {
        let json = serde_json::to_string_pretty(&scores).map_err(|e| SimError::Io(e.into()))?;
        println!("{json}");
    }
    Ok(submission_correct)
}
