use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use crate::cache::Cache;
use crate::config::Geometry;
use crate::error::SimError;
use crate::replacement::Outcome;
use crate::trace::{AccessKind, AccessRecord};

/// Hit, miss and eviction totals for a run. Can be serialised for reporting
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl Summary {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Hit => self.hits += 1,
            Outcome::Miss => self.misses += 1,
            Outcome::MissEviction => {
                self.misses += 1;
                self.evictions += 1;
            }
        }
    }

    /// Every simulated access is either a hit or a miss
    pub fn accesses(&self) -> u64 {
        self.hits + self.misses
    }
}

/// The outcomes of the (at most two) cache accesses driven by one record, in order
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct Outcomes {
    outcomes: [Option<Outcome>; 2],
}

impl Outcomes {
    fn push(&mut self, outcome: Outcome) {
        if let Some(slot) = self.outcomes.iter_mut().find(|slot| slot.is_none()) {
            *slot = Some(outcome);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Outcome> + '_ {
        self.outcomes.iter().flatten().copied()
    }
}

/// Everything a run mutates: the cache store, the logical clock and the counters
///
/// There is no ambient state, a run owns exactly one of these and drops it at the end
pub struct SimulationState {
    cache: Cache,
    clock: u64,
    summary: Summary,
}

impl SimulationState {
    pub fn new(geometry: Geometry) -> Result<Self, SimError> {
        Ok(Self {
            cache: Cache::new(geometry)?,
            clock: 0,
            summary: Summary::default(),
        })
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// The logical time of the most recent trace line
    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// Consumes one trace line. The clock advances whether or not the line parses
    ///
    /// Returns the record and its outcomes, or `None` for malformed lines and instruction fetches,
    /// neither of which touch the cache
    pub fn replay_line(&mut self, line: &str) -> Option<(AccessRecord, Outcomes)> {
        self.clock += 1;
        let Some(record) = AccessRecord::parse(line) else {
            trace!("skipping malformed trace line {:?}", line.trim_end());
            return None;
        };
        if record.kind == AccessKind::Instruction {
            return None;
        }
        Some((record, self.dispatch(&record)))
    }

    /// Applies a record as if it were the next trace line
    pub fn apply(&mut self, record: &AccessRecord) -> Outcomes {
        self.clock += 1;
        self.dispatch(record)
    }

    fn dispatch(&mut self, record: &AccessRecord) -> Outcomes {
        let mut outcomes = Outcomes::default();
        // A modify reuses the clock value for its store, which always hits the line just loaded
        for _ in 0..record.kind.access_count() {
            let outcome = self.cache.access(record.address, self.clock);
            self.summary.record(outcome);
            outcomes.push(outcome);
        }
        outcomes
    }
}

/// The simulator replays a trace line by line against a single cache and collects the results.
///
/// It supports calling simulate multiple times, the cache state, clock and counters carry over
/// and the time taken to simulate accumulates
pub struct Simulator {
    state: SimulationState,
    verbose: bool,
    simulation_time: Duration,
}

impl Simulator {
    /// Creates a new simulator, allocating the cache for the given geometry
    pub fn new(geometry: Geometry, verbose: bool) -> Result<Self, SimError> {
        Ok(Self {
            state: SimulationState::new(geometry)?,
            verbose,
            simulation_time: Duration::new(0, 0),
        })
    }

    /// Replays a trace, one line at a time
    ///
    /// In verbose mode every simulated record is echoed to `out` followed by its outcome tokens.
    /// Malformed lines and instruction fetches produce no output. Nothing is written to `out`
    /// otherwise
    ///
    /// # Arguments
    ///
    /// * `reader`: The trace
    /// * `out`: Sink for verbose annotations
    ///
    /// returns: Result<&Summary, SimError>
    pub fn simulate<R: BufRead, W: Write>(&mut self, mut reader: R, out: &mut W) -> Result<&Summary, SimError> {
        let start = Instant::now();
        let mut buffer = Vec::new();
        let mut lines = 0u64;
        loop {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            lines += 1;
            // Non UTF-8 lines can't match the grammar, they only advance the clock
            let line = std::str::from_utf8(&buffer).unwrap_or("");
            let Some((record, outcomes)) = self.state.replay_line(line) else {
                continue;
            };
            if self.verbose {
                write!(out, "{} {:x},{}", record.kind.op(), record.address, record.size)?;
                for outcome in outcomes.iter() {
                    write!(out, " {outcome}")?;
                }
                writeln!(out)?;
            }
        }
        self.simulation_time += start.elapsed();
        debug!("replayed {lines} trace lines: {:?}", self.state.summary());
        Ok(self.state.summary())
    }

    /// Replays a trace without any verbose output
    pub fn simulate_quiet<R: BufRead>(&mut self, reader: R) -> Result<&Summary, SimError> {
        let verbose = std::mem::replace(&mut self.verbose, false);
        let result = self.simulate(reader, &mut io::sink()).map(|_| ());
        self.verbose = verbose;
        result.map(|()| self.state.summary())
    }

    pub fn summary(&self) -> &Summary {
        self.state.summary()
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Gets the wall-clock execution time for processing
    pub fn execution_time(&self) -> &Duration {
        &self.simulation_time
    }

    /// Gets the number of cache lines that were never filled
    pub fn invalid_line_count(&self) -> usize {
        self.state.cache().invalid_line_count()
    }
}
