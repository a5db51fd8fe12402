use log::debug;
use crate::config::Geometry;
use crate::error::SimError;

/// A single cache line. Only metadata is modelled, there is no data payload
///
/// `recency` is the logical time of the last access and is only meaningful while `valid` is set
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct CacheLine {
    pub valid: bool,
    pub tag: u64,
    pub recency: u64,
}

/// The cache store: `2^s` sets of `E` lines
///
/// Lines live in one flat vector with a stride of `E` per set, so a set is a contiguous slice.
/// Lines within a set are always scanned in ascending index order, which the replacement engine
/// relies on for tie breaking
///
/// All lines start invalid and only become valid through the replacement engine's miss path. The
/// store is dropped with its owner at the end of a run
pub struct Cache {
    geometry: Geometry,
    lines: Vec<CacheLine>,
}

impl Cache {
    /// Allocates the store for a geometry, with every line invalid
    ///
    /// Fails with `SimError::Allocation` rather than aborting if the storage can't be obtained,
    /// and no partially built cache is returned in that case
    pub fn new(geometry: Geometry) -> Result<Self, SimError> {
        let lines_per_set = geometry.lines_per_set();
        let allocation_error = || SimError::Allocation {
            set_index_bits: geometry.set_index_bits(),
            lines_per_set,
        };
        let total_lines = geometry
            .set_count()
            .and_then(|sets| usize::try_from(sets).ok())
            .and_then(|sets| sets.checked_mul(lines_per_set as usize))
            .ok_or_else(allocation_error)?;
        let mut lines = Vec::new();
        lines.try_reserve_exact(total_lines).map_err(|_| allocation_error())?;
        lines.resize(total_lines, CacheLine::default());
        debug!(
            "allocated cache: {} sets x {} lines, {} byte blocks",
            total_lines / lines_per_set as usize,
            lines_per_set,
            1u128 << geometry.block_offset_bits()
        );
        Ok(Self { geometry, lines })
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The lines of one set, in scan order
    ///
    /// # Panics
    ///
    /// If `set_index` is not below `2^s`. Indices produced by `Geometry::decompose` always are
    pub fn set(&self, set_index: u64) -> &[CacheLine] {
        let range = self.set_range(set_index);
        &self.lines[range]
    }

    pub(crate) fn set_mut(&mut self, set_index: u64) -> &mut [CacheLine] {
        let range = self.set_range(set_index);
        &mut self.lines[range]
    }

    /// Iterates over every set, in set index order
    pub fn sets(&self) -> impl Iterator<Item = &[CacheLine]> {
        self.lines.chunks(self.geometry.lines_per_set() as usize)
    }

    /// Gets the number of lines that have never been filled. Useful for analysing cache
    /// performance or debugging
    pub fn invalid_line_count(&self) -> usize {
        self.lines.iter().filter(|line| !line.valid).count()
    }

    fn set_range(&self, set_index: u64) -> std::ops::Range<usize> {
        let stride = self.geometry.lines_per_set() as usize;
        let lower = set_index as usize * stride;
        lower..lower + stride
    }
}
