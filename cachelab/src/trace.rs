use std::fmt;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Leading whitespace, op, optional whitespace, hex address with an optional 0x prefix, a
    // comma, then a decimal size. Anything after the size is ignored
    static ref TRACE_LINE: Regex =
        Regex::new(r"^\s*(?P<op>\S)\s*(?:0[xX])?(?P<address>[0-9a-fA-F]+),\s*\+?(?P<size>[0-9]+)").unwrap();
}

/// The kind of memory reference a trace record describes
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum AccessKind {
    /// Instruction fetch, parsed but never simulated
    Instruction,
    Load,
    Store,
    /// A load followed by a store to the same address
    Modify,
}

impl AccessKind {
    pub fn from_op(op: char) -> Option<Self> {
        match op {
            'I' => Some(AccessKind::Instruction),
            'L' => Some(AccessKind::Load),
            'S' => Some(AccessKind::Store),
            'M' => Some(AccessKind::Modify),
            _ => None,
        }
    }

    pub fn op(&self) -> char {
        match self {
            AccessKind::Instruction => 'I',
            AccessKind::Load => 'L',
            AccessKind::Store => 'S',
            AccessKind::Modify => 'M',
        }
    }

    /// How many cache accesses a record of this kind drives
    pub fn access_count(&self) -> u32 {
        match self {
            AccessKind::Instruction => 0,
            AccessKind::Load | AccessKind::Store => 1,
            AccessKind::Modify => 2,
        }
    }
}

/// One parsed trace line
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct AccessRecord {
    pub kind: AccessKind,
    pub address: u64,
    pub size: u32,
}

impl AccessRecord {
    pub fn new(kind: AccessKind, address: u64, size: u32) -> Self {
        Self { kind, address, size }
    }

    /// Parses one trace line, returning `None` if it doesn't follow the grammar
    ///
    /// Malformed lines are not errors, callers are expected to skip them
    ///
    /// # Examples
    ///
    /// ```
    /// use cachelab::trace::{AccessKind, AccessRecord};
    /// let record = AccessRecord::parse(" M 0421c7f0,4").unwrap();
    /// assert_eq!(record, AccessRecord::new(AccessKind::Modify, 0x0421c7f0, 4));
    /// assert_eq!(AccessRecord::parse("garbage text"), None);
    /// ```
    pub fn parse(line: &str) -> Option<Self> {
        let captures = TRACE_LINE.captures(line)?;
        let op = captures.name("op")?.as_str().chars().next()?;
        let kind = AccessKind::from_op(op)?;
        let address = u64::from_str_radix(captures.name("address")?.as_str(), 16).ok()?;
        let size = captures.name("size")?.as_str().parse::<u32>().ok()?;
        Some(Self { kind, address, size })
    }
}

impl fmt::Display for AccessRecord {
    /// Formats the record as a trace line, the inverse of `parse`. Data accesses are indented by
    /// one space, instruction fetches are not
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind != AccessKind::Instruction {
            write!(f, " ")?;
        }
        write!(f, "{} {:x},{}", self.kind.op(), self.address, self.size)
    }
}
