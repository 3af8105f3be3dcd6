//! Immutable entity snapshots.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{
    Legend, LegendItem, Line, ScheduleId, Station, TrackSegment, Train, TrainId, TrainStop,
};
use crate::model::Network;

use super::{StoreError, TimetableStore};

/// Everything the engine reads, captured at one point in time.
///
/// Computations take a snapshot and never see later mutations; callers
/// re-fetch after creating or deleting stops.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub stations: Vec<Station>,
    #[serde(default)]
    pub trains: Vec<Train>,
    #[serde(default)]
    pub train_stops: Vec<TrainStop>,
    #[serde(default)]
    pub track_segments: Vec<TrackSegment>,
    #[serde(default)]
    pub lines: Vec<Line>,
    #[serde(default)]
    pub legend: Vec<LegendItem>,
}

impl Snapshot {
    /// Read all collections for one schedule, concurrently.
    pub async fn fetch<S: TimetableStore>(
        store: &S,
        schedule: ScheduleId,
    ) -> Result<Self, StoreError> {
        let (stations, trains, train_stops, track_segments, lines, legend) = futures::try_join!(
            store.get_stations(),
            store.get_trains(schedule),
            store.get_train_stops(None),
            store.get_track_segments(),
            store.get_lines(),
            store.get_legend(schedule),
        )?;

        debug!(
            schedule = %schedule,
            stations = stations.len(),
            trains = trains.len(),
            stops = train_stops.len(),
            segments = track_segments.len(),
            "Fetched snapshot"
        );

        Ok(Self {
            stations,
            trains,
            train_stops,
            track_segments,
            lines,
            legend,
        })
    }

    /// Station and segment index for this snapshot.
    pub fn network(&self) -> Network {
        Network::new(self.stations.iter().cloned(), self.track_segments.iter().cloned())
    }

    /// Legend lookup for this snapshot.
    pub fn legend(&self) -> Legend {
        Legend::new(self.legend.iter().cloned())
    }

    pub fn train(&self, id: TrainId) -> Option<&Train> {
        self.trains.iter().find(|t| t.id == id)
    }

    /// Stops recorded for one train.
    pub fn stops_for(&self, train: TrainId) -> impl Iterator<Item = &TrainStop> + '_ {
        self.train_stops.iter().filter(move |s| s.train_id == train)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_deserializes() {
        let snapshot: Snapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.stations.is_empty());
        assert!(snapshot.trains.is_empty());
        assert!(snapshot.network().is_empty());
        assert!(snapshot.legend().is_empty());
    }
}
