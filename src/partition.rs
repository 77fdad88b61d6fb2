use crate::error::BenchError;
use std::ops::Range;

/// A half-open interval `[start, end)` of work items owned by one process.
///
/// Depending on the task an item is an integration step, a series term or a
/// candidate integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: u64,
    pub end: u64,
}

impl Interval {
    pub fn new(start: u64, end: u64) -> Result<Self, BenchError> {
        if start > end {
            return Err(BenchError::InvalidInterval { start, end });
        }
        Ok(Interval { start, end })
    }

    /// Rebuilds an interval from the two bounds sent over the wire.
    pub fn from_bounds(bounds: [u64; 2]) -> Result<Self, BenchError> {
        Interval::new(bounds[0], bounds[1])
    }

    pub fn bounds(&self) -> [u64; 2] {
        [self.start, self.end]
    }

    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn iter(&self) -> Range<u64> {
        self.start..self.end
    }
}

/// The interleaved share of one rank: `first, first + step, ...` up to and
/// including `last`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strided {
    pub first: u64,
    pub step: u64,
    pub last: u64,
}

impl Strided {
    pub fn iter(&self) -> impl Iterator<Item = u64> {
        (self.first..=self.last).step_by(self.step as usize)
    }

    pub fn len(&self) -> u64 {
        if self.first > self.last {
            0
        } else {
            (self.last - self.first) / self.step + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Splits `domain` into `parts` contiguous blocks ordered by rank.
///
/// Block lengths differ by at most one: the first `len % parts` blocks
/// carry the extra item.
pub fn blocks(domain: Interval, parts: usize) -> Result<Vec<Interval>, BenchError> {
    if parts == 0 {
        return Err(BenchError::NoProcesses);
    }
    let parts = parts as u64;
    let q = domain.len() / parts;
    let r = domain.len() % parts;

    let mut intervals = Vec::with_capacity(parts as usize);
    let mut start = domain.start;
    for p in 0..parts {
        let len = q + if p < r { 1 } else { 0 };
        intervals.push(Interval::new(start, start + len)?);
        start += len;
    }
    Ok(intervals)
}

/// Interleaved share of `rank` out of `size` over the candidates
/// `first..=last`.
pub fn strided(rank: usize, size: usize, first: u64, last: u64) -> Result<Strided, BenchError> {
    if size == 0 {
        return Err(BenchError::NoProcesses);
    }
    if rank >= size {
        return Err(BenchError::InvalidRank { rank, size });
    }
    Ok(Strided {
        first: first + rank as u64,
        step: size as u64,
        last,
    })
}

/// Checks that `parts` are ordered, contiguous and span `domain` exactly.
pub fn covers_exactly(domain: Interval, parts: &[Interval]) -> bool {
    let mut cursor = domain.start;
    for part in parts {
        if part.start != cursor || part.end < part.start {
            return false;
        }
        cursor = part.end;
    }
    cursor == domain.end
}
