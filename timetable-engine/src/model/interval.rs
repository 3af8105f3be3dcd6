//! Closed time intervals.

use std::fmt;

use crate::domain::Minutes;

/// A closed interval `[start, end]` of timetable minutes.
///
/// Zero-width intervals are allowed: a train passing the end of its run
/// occupies the station for a single instant.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    pub start: Minutes,
    pub end: Minutes,
}

impl Interval {
    /// Build an interval, swapping the bounds if given in reverse.
    pub fn new(a: Minutes, b: Minutes) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// A single instant.
    pub fn instant(at: Minutes) -> Self {
        Self { start: at, end: at }
    }

    /// Closed-interval overlap: touching endpoints count.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.end >= other.start && other.end >= self.start
    }

    pub fn is_instant(&self) -> bool {
        self.start == self.end
    }

    pub fn duration(&self) -> i32 {
        self.end - self.start
    }
}

impl fmt::Debug for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
