use std::fmt;
use crate::cache::{Cache, CacheLine};

/// What a single cache access did
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Outcome {
    Hit,
    /// Miss filled into an empty line
    Miss,
    /// Miss that had to replace the least recently used line of a full set
    MissEviction,
}

impl Outcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, Outcome::Hit)
    }

    pub fn evicted(&self) -> bool {
        matches!(self, Outcome::MissEviction)
    }
}

impl fmt::Display for Outcome {
    /// The verbose annotation tokens, in the order they occur
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Hit => write!(f, "hit"),
            Outcome::Miss => write!(f, "miss"),
            Outcome::MissEviction => write!(f, "miss eviction"),
        }
    }
}

/// Least recently used replacement
///
/// Recency lives on each line as a logical timestamp supplied by the caller. The target set is
/// scanned once, collecting the matching line, the first empty line and the valid line with the
/// oldest timestamp. Priority is strict: hit, then empty line, then eviction
impl Cache {
    /// Accesses the line containing `address` at logical time `now`
    ///
    /// On a hit only the matching line's recency changes. On a miss the first empty line in scan
    /// order is filled; if there is none the valid line with the smallest recency is replaced in
    /// place, the first one in scan order winning ties
    ///
    /// # Arguments
    ///
    /// * `address`: The address of the access. Only the line it falls in matters, hence no size
    /// * `now`: The logical time of the access
    ///
    /// returns: Outcome
    pub fn access(&mut self, address: u64, now: u64) -> Outcome {
        let (tag, set_index) = self.geometry().decompose(address);
        let set = self.set_mut(set_index);

        let mut hit_line = None;
        let mut empty_line = None;
        // (index, recency) of the oldest valid line seen so far
        let mut lru_line: Option<(usize, u64)> = None;
        for (index, line) in set.iter().enumerate() {
            if line.valid {
                if line.tag == tag {
                    hit_line = Some(index);
                }
                if lru_line.map_or(true, |(_, oldest)| line.recency < oldest) {
                    lru_line = Some((index, line.recency));
                }
            } else if empty_line.is_none() {
                empty_line = Some(index);
            }
        }

        if let Some(index) = hit_line {
            set[index].recency = now;
            return Outcome::Hit;
        }
        let filled = CacheLine {
            valid: true,
            tag,
            recency: now,
        };
        if let Some(index) = empty_line {
            set[index] = filled;
            Outcome::Miss
        } else if let Some((index, _)) = lru_line {
            set[index] = filled;
            Outcome::MissEviction
        } else {
            unreachable!("geometry guarantees at least one line per set")
        }
    }
}
