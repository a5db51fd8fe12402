use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use crate::error::SimError;

/// Width of a simulated address in bits
pub const ADDRESS_BITS: u32 = u64::BITS;

/// The shape of a cache: `2^s` sets of `E` lines, each line holding `2^b` bytes
///
/// Geometry is validated on construction and immutable afterwards, so any `Geometry` value can be
/// handed to the cache store without further checks
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeometry")]
pub struct Geometry {
    set_index_bits: u32,
    lines_per_set: u32,
    block_offset_bits: u32,
}

/// Unchecked geometry as it appears in JSON, funnelled through `Geometry::new` on deserialisation
#[derive(Deserialize)]
struct RawGeometry {
    set_index_bits: u32,
    lines_per_set: u32,
    block_offset_bits: u32,
}

impl TryFrom<RawGeometry> for Geometry {
    type Error = SimError;

    fn try_from(raw: RawGeometry) -> Result<Self, Self::Error> {
        Geometry::new(raw.set_index_bits, raw.lines_per_set, raw.block_offset_bits)
    }
}

impl Geometry {
    /// Creates a geometry, rejecting `E = 0` and any split that doesn't fit a 64-bit address
    ///
    /// # Arguments
    ///
    /// * `set_index_bits`: `s`, the number of set index bits
    /// * `lines_per_set`: `E`, the associativity
    /// * `block_offset_bits`: `b`, the number of block offset bits
    ///
    /// returns: Result<Geometry, SimError>
    pub fn new(set_index_bits: u32, lines_per_set: u32, block_offset_bits: u32) -> Result<Self, SimError> {
        if lines_per_set == 0 {
            return Err(SimError::Configuration("the number of lines per set (E) must be at least 1".to_string()));
        }
        if set_index_bits.checked_add(block_offset_bits).map_or(true, |bits| bits > ADDRESS_BITS) {
            return Err(SimError::Configuration(format!(
                "set index bits ({set_index_bits}) and block offset bits ({block_offset_bits}) exceed the {ADDRESS_BITS}-bit address"
            )));
        }
        Ok(Self {
            set_index_bits,
            lines_per_set,
            block_offset_bits,
        })
    }

    pub fn set_index_bits(&self) -> u32 {
        self.set_index_bits
    }

    pub fn lines_per_set(&self) -> u32 {
        self.lines_per_set
    }

    pub fn block_offset_bits(&self) -> u32 {
        self.block_offset_bits
    }

    /// The number of sets, `2^s`. `None` if that doesn't fit in 64 bits
    pub fn set_count(&self) -> Option<u64> {
        1u64.checked_shl(self.set_index_bits)
    }

    /// Splits an address into `(tag, set index)`
    ///
    /// Any address is legal, there is no range check. Shifts by the full address width produce 0
    /// rather than wrapping
    ///
    /// # Examples
    ///
    /// ```
    /// use cachelab::config::Geometry;
    /// let geometry = Geometry::new(4, 1, 4).unwrap();
    /// assert_eq!(geometry.decompose(0x210), (2, 1));
    /// ```
    pub fn decompose(&self, address: u64) -> (u64, u64) {
        let set_mask = match 1u64.checked_shl(self.set_index_bits) {
            Some(count) => count - 1,
            None => u64::MAX,
        };
        let set_index = address.checked_shr(self.block_offset_bits).unwrap_or(0) & set_mask;
        let tag = address.checked_shr(self.set_index_bits + self.block_offset_bits).unwrap_or(0);
        (tag, set_index)
    }
}

/// Everything needed for one simulator run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub geometry: Geometry,
    pub trace_path: PathBuf,
    pub verbose: bool,
}

impl SimulationConfig {
    /// Assembles a run configuration from possibly missing parameters, as handed over by an
    /// argument parser. Any missing value short-circuits before a cache is allocated
    pub fn from_parts(
        set_index_bits: Option<u32>,
        lines_per_set: Option<u32>,
        block_offset_bits: Option<u32>,
        trace_path: Option<PathBuf>,
        verbose: bool,
    ) -> Result<Self, SimError> {
        let missing = |flag: &str| SimError::Configuration(format!("missing required command line argument -{flag}"));
        let s = set_index_bits.ok_or_else(|| missing("s"))?;
        let e = lines_per_set.ok_or_else(|| missing("E"))?;
        let b = block_offset_bits.ok_or_else(|| missing("b"))?;
        let trace_path = trace_path.ok_or_else(|| missing("t"))?;
        Ok(Self {
            geometry: Geometry::new(s, e, b)?,
            trace_path,
            verbose,
        })
    }
}
