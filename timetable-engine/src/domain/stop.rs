//! Recorded intermediate stops.

use serde::{Deserialize, Serialize};

use super::Minutes;
use super::error::DomainError;
use super::ids::{StationId, StopId, TrainId};

/// A train's stop at an intermediate station, as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainStop {
    pub id: StopId,
    pub train_id: TrainId,
    pub station_id: StationId,
    pub arrival_time: Minutes,
    pub departure_time: Minutes,
    /// Dwell in minutes, always `departure_time - arrival_time`.
    pub stop_duration: i32,
}

impl TrainStop {
    /// Build a stored stop from a request and its assigned id.
    pub fn from_new(id: StopId, new: NewStop) -> Self {
        Self {
            id,
            train_id: new.train_id,
            station_id: new.station_id,
            arrival_time: new.arrival_time,
            departure_time: new.departure_time,
            stop_duration: new.dwell(),
        }
    }

    /// Dwell computed from the times, ignoring the stored field.
    pub fn dwell(&self) -> i32 {
        self.departure_time - self.arrival_time
    }

    /// Recompute `stop_duration` from the times.
    pub fn refresh_duration(&mut self) {
        self.stop_duration = self.dwell();
    }

    /// Check the stop does not depart before it arrives.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.departure_time < self.arrival_time {
            return Err(DomainError::NegativeDwell {
                train: self.train_id,
                station: self.station_id,
            });
        }
        Ok(())
    }
}

/// A stop to be created. The store assigns the id and the duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStop {
    pub train_id: TrainId,
    pub station_id: StationId,
    pub arrival_time: Minutes,
    pub departure_time: Minutes,
}

impl NewStop {
    pub fn dwell(&self) -> i32 {
        self.departure_time - self.arrival_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_stop(arr: i32, dep: i32) -> NewStop {
        NewStop {
            train_id: TrainId(1),
            station_id: StationId(2),
            arrival_time: Minutes::new(arr),
            departure_time: Minutes::new(dep),
        }
    }

    #[test]
    fn duration_is_derived() {
        let stop = TrainStop::from_new(StopId(10), new_stop(12, 17));
        assert_eq!(stop.stop_duration, 5);
        assert_eq!(stop.dwell(), 5);
    }

    #[test]
    fn refresh_after_edit() {
        let mut stop = TrainStop::from_new(StopId(10), new_stop(12, 17));
        stop.departure_time = Minutes::new(20);
        assert_eq!(stop.stop_duration, 5);
        stop.refresh_duration();
        assert_eq!(stop.stop_duration, 8);
    }

    #[test]
    fn validate_negative_dwell() {
        let ok = TrainStop::from_new(StopId(1), new_stop(12, 12));
        assert!(ok.validate().is_ok());

        let bad = TrainStop::from_new(StopId(2), new_stop(12, 10));
        assert!(matches!(
            bad.validate(),
            Err(DomainError::NegativeDwell { .. })
        ));
    }
}
