use log::info;
use serde::Serialize;
use crate::config::Geometry;
use crate::error::SimError;
use crate::simulator::{SimulationState, Summary};
use crate::trace::AccessRecord;
use super::{is_transpose, TransposeFunction, Workspace};

/// The cache transposes are scored against: 32 sets, direct-mapped, 32 byte lines
pub fn evaluation_geometry() -> Result<Geometry, SimError> {
    Geometry::new(5, 1, 5)
}

/// How a transpose routine fared on one matrix shape
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct TransposeScore {
    pub description: String,
    pub m: usize,
    pub n: usize,
    pub correct: bool,
    #[serde(flatten)]
    pub summary: Summary,
}

/// A score together with the accesses it was computed from
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub score: TransposeScore,
    pub accesses: Vec<AccessRecord>,
}

/// Runs a transpose routine on a random `N x M` matrix and scores it
///
/// Every recorded access is replayed, one record per trace line, through a fresh simulator using
/// `evaluation_geometry`. Correctness is checked independently of the cache counts
///
/// # Arguments
///
/// * `function`: The routine to evaluate
/// * `m`: Columns of `A`
/// * `n`: Rows of `A`
/// * `seed`: Seed for the contents of `A`, so runs are repeatable
///
/// returns: Result<Evaluation, SimError>
pub fn evaluate(function: &TransposeFunction, m: usize, n: usize, seed: u64) -> Result<Evaluation, SimError> {
    let mut workspace = Workspace::new(m, n)?;
    workspace.fill_a(&mut fastrand::Rng::with_seed(seed));
    (function.run)(&mut workspace);
    let correct = is_transpose(&workspace);

    let mut state = SimulationState::new(evaluation_geometry()?)?;
    let accesses = workspace.into_accesses();
    for record in &accesses {
        state.apply(record);
    }
    let score = TransposeScore {
        description: function.description.to_string(),
        m,
        n,
        correct,
        summary: *state.summary(),
    };
    info!(
        "{} ({m}x{n}): hits:{} misses:{} evictions:{} correct:{}",
        score.description, score.summary.hits, score.summary.misses, score.summary.evictions, correct
    );
    Ok(Evaluation { score, accesses })
}
