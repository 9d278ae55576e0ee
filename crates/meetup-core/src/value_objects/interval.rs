//! Half-open time intervals `[start, end)` in epoch seconds
//!
//! Every overlap decision in the system (venue capacity windows, per-user
//! join exclusion) uses the single convention defined here: two intervals
//! overlap iff `a.start < b.end && b.start < a.end`. Exact boundary touching
//! does not overlap.

use crate::error::DomainError;

/// A half-open `[start, end)` interval in epoch seconds (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    start: i64,
    end: i64,
}

impl Interval {
    /// Create an interval, requiring `0 < start < end`
    pub fn new(start: i64, end: i64) -> Result<Self, DomainError> {
        if start <= 0 || end <= 0 {
            return Err(DomainError::Validation(
                "interval timestamps must be positive".to_string(),
            ));
        }
        if start >= end {
            return Err(DomainError::Validation(
                "interval start must be before its end".to_string(),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    /// Half-open overlap test; boundary touch is not an overlap
    pub fn overlaps(&self, other: &Interval) -> bool {
        overlaps(self.start, self.end, other.start, other.end)
    }
}

/// Half-open overlap test on raw epoch seconds
///
/// `[a_start, a_end)` overlaps `[b_start, b_end)` iff
/// `a_start < b_end && b_start < a_end`.
pub fn overlaps(a_start: i64, a_end: i64, b_start: i64, b_end: i64) -> bool {
    a_start < b_end && b_start < a_end
}
