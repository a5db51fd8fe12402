use crate::error::SimError;
use crate::trace::{AccessKind, AccessRecord};

pub use blocking::{transpose_blocked, transpose_row_wise, transpose_submit};
pub use eval::{evaluate, evaluation_geometry, Evaluation, TransposeScore};

mod blocking;
mod eval;

/// Largest supported matrix dimension
pub const MAX_DIM: usize = 256;

/// Size of a matrix element in bytes
pub const ELEMENT_SIZE: u32 = 4;

/// Simulated address of `A[0][0]`
pub const A_BASE: u64 = 0x0010_0000;

/// Simulated address of `B[0][0]`. Both matrices are line aligned and a whole number of cache
/// sizes apart, so `A[i][j]` and `B[i][j]` land in the same set
pub const B_BASE: u64 = A_BASE + (MAX_DIM * MAX_DIM) as u64 * ELEMENT_SIZE as u64;

/// A transpose routine. It reads `A` and writes `B` only through the workspace
pub type TransposeFn = fn(&mut Workspace);

/// A transpose routine registered for evaluation, with the description it is reported under
#[derive(Debug, Copy, Clone)]
pub struct TransposeFunction {
    pub description: &'static str,
    pub run: TransposeFn,
}

pub const SUBMISSION_DESCRIPTION: &str = "Transpose submission";
pub const ROW_WISE_DESCRIPTION: &str = "Simple row-wise scan transpose";

/// Every routine the evaluation driver scores, the graded submission first
pub fn registered_functions() -> Vec<TransposeFunction> {
    vec![
        TransposeFunction {
            description: SUBMISSION_DESCRIPTION,
            run: transpose_submit,
        },
        TransposeFunction {
            description: ROW_WISE_DESCRIPTION,
            run: transpose_row_wise,
        },
    ]
}

/// An `N x M` source matrix `A` and an `M x N` destination matrix `B`, stored row-major at fixed
/// simulated addresses
///
/// Element reads and writes made through `a`, `b` and `set_b` are recorded as 4 byte loads and
/// stores in program order, which is what the evaluator replays against the cache. Values held
/// in locals are free
pub struct Workspace {
    m: usize,
    n: usize,
    a: Vec<i32>,
    b: Vec<i32>,
    accesses: Vec<AccessRecord>,
}

impl Workspace {
    /// Creates a zeroed workspace for an `M`-column, `N`-row source matrix
    pub fn new(m: usize, n: usize) -> Result<Self, SimError> {
        if m == 0 || n == 0 || m > MAX_DIM || n > MAX_DIM {
            return Err(SimError::Configuration(format!(
                "matrix dimensions must be between 1 and {MAX_DIM}, got {m}x{n}"
            )));
        }
        Ok(Self {
            m,
            n,
            a: vec![0; m * n],
            b: vec![0; m * n],
            accesses: Vec::new(),
        })
    }

    /// Columns of `A`, rows of `B`
    pub fn m(&self) -> usize {
        self.m
    }

    /// Rows of `A`, columns of `B`
    pub fn n(&self) -> usize {
        self.n
    }

    /// Reads `A[i][j]`
    pub fn a(&mut self, i: usize, j: usize) -> i32 {
        debug_assert!(i < self.n && j < self.m, "A[{i}][{j}] is out of bounds");
        let index = i * self.m + j;
        self.record(AccessKind::Load, A_BASE, index);
        self.a[index]
    }

    /// Reads `B[i][j]`
    pub fn b(&mut self, i: usize, j: usize) -> i32 {
        debug_assert!(i < self.m && j < self.n, "B[{i}][{j}] is out of bounds");
        let index = i * self.n + j;
        self.record(AccessKind::Load, B_BASE, index);
        self.b[index]
    }

    /// Writes `B[i][j]`
    pub fn set_b(&mut self, i: usize, j: usize, value: i32) {
        debug_assert!(i < self.m && j < self.n, "B[{i}][{j}] is out of bounds");
        let index = i * self.n + j;
        self.record(AccessKind::Store, B_BASE, index);
        self.b[index] = value;
    }

    /// Fills `A` with random values, without recording any accesses
    pub fn fill_a(&mut self, rng: &mut fastrand::Rng) {
        self.fill_a_with(|_, _| rng.i32(..));
    }

    /// Sets every `A[i][j]` to `value(i, j)`, without recording any accesses
    pub fn fill_a_with<F: FnMut(usize, usize) -> i32>(&mut self, mut value: F) {
        let m = self.m;
        for (index, element) in self.a.iter_mut().enumerate() {
            *element = value(index / m, index % m);
        }
    }

    /// The accesses recorded so far, in program order
    pub fn accesses(&self) -> &[AccessRecord] {
        &self.accesses
    }

    pub fn into_accesses(self) -> Vec<AccessRecord> {
        self.accesses
    }

    fn record(&mut self, kind: AccessKind, base: u64, index: usize) {
        let address = base + index as u64 * ELEMENT_SIZE as u64;
        self.accesses.push(AccessRecord::new(kind, address, ELEMENT_SIZE));
    }
}

/// Checks that `B` is the transpose of `A`. Reads the matrices directly, nothing is recorded
pub fn is_transpose(workspace: &Workspace) -> bool {
    let (m, n) = (workspace.m, workspace.n);
    (0..n).all(|i| (0..m).all(|j| workspace.a[i * m + j] == workspace.b[j * n + i]))
}
