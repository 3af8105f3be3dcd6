//! Detected conflicts.

use std::fmt;

use serde::Serialize;

use crate::domain::{SegmentKey, StationId, TrainId};

/// Why a pair of trains conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConflictReason {
    /// Both trains occupy a single-track station at the same time.
    Station { station: StationId },
    /// Both trains are in the same single-track section at the same time.
    SingleTrackSegment { segment: SegmentKey },
    /// The runs cross in the time-distance plane while travelling the same way.
    Crossing,
}

impl fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictReason::Station { station } => write!(f, "station {station} occupied"),
            ConflictReason::SingleTrackSegment { segment } => {
                let (a, b) = segment.stations();
                write!(f, "single-track section {a}-{b} occupied")
            }
            ConflictReason::Crossing => write!(f, "paths cross"),
        }
    }
}

/// An unordered pair of conflicting trains.
///
/// `first` always has the lower id, so the same pair compares equal
/// however it was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Conflict {
    pub first: TrainId,
    pub second: TrainId,
    pub reason: ConflictReason,
}

impl Conflict {
    pub fn new(a: TrainId, b: TrainId, reason: ConflictReason) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self {
            first,
            second,
            reason,
        }
    }

    pub fn involves(&self, train: TrainId) -> bool {
        self.first == train || self.second == train
    }

    /// The other train in the pair, if `train` is one of them.
    pub fn other(&self, train: TrainId) -> Option<TrainId> {
        if self.first == train {
            Some(self.second)
        } else if self.second == train {
            Some(self.first)
        } else {
            None
        }
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "train {} / train {}: {}",
            self.first, self.second, self.reason
        )
    }
}
