//! Domain error types.
//!
//! These errors represent validation failures in entity records. They are
//! distinct from store (persistence) errors.

use super::Minutes;
use super::ids::{StationId, TrainId};

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Station declares zero main tracks
    #[error("station {0} must have at least one track")]
    InvalidTrackCount(StationId),

    /// Station distance is NaN or infinite
    #[error("station {0} has a non-finite distance")]
    InvalidDistance(StationId),

    /// A time lies outside 00:00..=23:59
    #[error("train {train}: time {time} is outside the timetable day")]
    TimeOutOfDay { train: TrainId, time: Minutes },

    /// Stop departs before it arrives
    #[error("train {train}: stop at station {station} departs before it arrives")]
    NegativeDwell { train: TrainId, station: StationId },

    /// A train's time-distance points go backwards in time
    #[error("train {train}: path goes backwards in time at {at}")]
    NonMonotonicPath { train: TrainId, at: Minutes },
}
