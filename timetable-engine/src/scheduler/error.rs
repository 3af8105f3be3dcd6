//! Scheduler error types.

use crate::domain::{StationId, TrainId};
use crate::store::StoreError;

/// Error from a scheduling operation.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// The train's departure or arrival station is not in the network
    #[error("train {train}: endpoint station {station} is unknown")]
    UnknownEndpoint { train: TrainId, station: StationId },

    /// The station to insert is not in the network
    #[error("station {0} is unknown")]
    UnknownStation(StationId),

    /// The station is not strictly between the train's endpoints
    #[error("train {train} does not pass through station {station}")]
    OutsideRun { train: TrainId, station: StationId },

    /// The train already has a stop at the station
    #[error("train {train} already stops at station {station}")]
    AlreadyStops { train: TrainId, station: StationId },

    /// Reading or writing stops failed
    #[error(transparent)]
    Store(#[from] StoreError),
}
