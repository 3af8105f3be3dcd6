//! Track segments between adjacent stations.

use serde::{Deserialize, Serialize};

use super::ids::StationId;

/// The infrastructure between two adjacent stations.
///
/// A segment is undirected: `from`/`to` only record how it was entered.
/// Pairs of stations without a segment record behave as ordinary
/// (non-single-track) line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSegment {
    pub from_station_id: StationId,
    pub to_station_id: StationId,
    #[serde(default)]
    pub is_single_track: bool,
}

impl TrackSegment {
    /// A single-track block section between two stations.
    pub fn single_track(a: StationId, b: StationId) -> Self {
        Self {
            from_station_id: a,
            to_station_id: b,
            is_single_track: true,
        }
    }

    /// Multi-track line between two stations.
    pub fn multi_track(a: StationId, b: StationId) -> Self {
        Self {
            from_station_id: a,
            to_station_id: b,
            is_single_track: false,
        }
    }

    /// Order-independent key for this segment.
    pub fn key(&self) -> SegmentKey {
        SegmentKey::new(self.from_station_id, self.to_station_id)
    }
}

/// Unordered station pair used to look segments up symmetrically.
///
/// # Examples
///
/// ```
/// use timetable_engine::domain::{SegmentKey, StationId};
///
/// let ab = SegmentKey::new(StationId(1), StationId(2));
/// let ba = SegmentKey::new(StationId(2), StationId(1));
/// assert_eq!(ab, ba);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SegmentKey {
    low: StationId,
    high: StationId,
}

impl SegmentKey {
    /// Build the key for the pair, whatever the argument order.
    pub fn new(a: StationId, b: StationId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// The two stations, lower id first.
    pub fn stations(&self) -> (StationId, StationId) {
        (self.low, self.high)
    }

    /// True if `station` is one end of the segment.
    pub fn touches(&self, station: StationId) -> bool {
        self.low == station || self.high == station
    }
}
