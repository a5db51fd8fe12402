use std::path::PathBuf;

/// Everything that can stop a simulation run.
///
/// Malformed trace lines are deliberately absent: they are skipped by the replayer and never
/// surface to the caller
#[derive(thiserror::Error, Debug)]
pub enum SimError {
    /// A required parameter is missing or out of range. Raised before any cache storage exists
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The cache store could not be allocated for the requested geometry
    #[error("failed to allocate cache storage for 2^{set_index_bits} sets of {lines_per_set} lines")]
    Allocation { set_index_bits: u32, lines_per_set: u32 },

    #[error("couldn't open the trace file at path {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read the trace: {0}")]
    Io(#[from] std::io::Error),
}

impl SimError {
    /// The process exit status a binary should terminate with for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            SimError::Configuration(_) => 2,
            SimError::Allocation { .. } => 3,
            SimError::FileAccess { .. } | SimError::Io(_) => 1,
        }
    }
}
