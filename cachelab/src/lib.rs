//! # CacheLab
//!
//! Cachelab simulates a single set-associative cache with least recently used replacement,
//! replaying memory traces and counting hits, misses and evictions
//!
//! It also provides cache-blocked matrix transposes, and an evaluator which scores them by
//! replaying their memory accesses through the same cache model

/// Contains the cache store and its lines
pub mod cache;

/// Contains the cache geometry, address decomposition and run configuration
pub mod config;

/// Contains the error type shared by the library
pub mod error;

/// Contains helpers for opening trace files
pub mod io;

/// Contains the least recently used replacement engine
pub mod replacement;

/// Contains the simulator used to replay a trace against a cache
pub mod simulator;

/// Contains the trace record format
pub mod trace;

/// Contains the blocked transposes and their evaluator
pub mod transpose;

#[cfg(test)]
mod test;

/// Contains utilities for running tests and benchmarks.
pub mod util;
