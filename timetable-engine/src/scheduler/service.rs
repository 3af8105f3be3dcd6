//! Applying planned stops through the store.

use tracing::{debug, info, warn};

use crate::domain::{StationId, Train, TrainStop};
use crate::model::Network;
use crate::store::{Snapshot, TimetableStore};

use super::config::SchedulerConfig;
use super::error::ScheduleError;
use super::plan::{plan_insertion, plan_stops};

/// Writes generated stops for trains.
///
/// Each operation reads the train's current stops from the store, plans
/// against the given network and then writes. Callers sequence operations;
/// nothing here runs them concurrently.
pub struct StopScheduler<'a, S: TimetableStore> {
    store: &'a S,
    config: &'a SchedulerConfig,
}

impl<'a, S: TimetableStore> StopScheduler<'a, S> {
    /// Create a new scheduler.
    pub fn new(store: &'a S, config: &'a SchedulerConfig) -> Self {
        Self { store, config }
    }

    /// Replace all of a train's stops with freshly generated ones.
    ///
    /// Existing stops are deleted first, then one stop is created per
    /// intermediate station. A train whose endpoints are not in the network
    /// is left untouched and gets no stops.
    pub async fn recompute_stops(
        &self,
        network: &Network,
        train: &Train,
    ) -> Result<Vec<TrainStop>, ScheduleError> {
        for station in [train.departure_station_id, train.arrival_station_id] {
            if network.station(station).is_none() {
                warn!(
                    train = %train.id,
                    station = %station,
                    "Skipping stop generation: unknown endpoint"
                );
                return Ok(Vec::new());
            }
        }
        if let Err(e) = train.validate() {
            warn!(train = %train.id, error = %e, "Invalid train record");
        }

        let existing = self.store.get_train_stops(Some(train.id)).await?;
        for stop in &existing {
            self.store.delete_stop(stop.id).await?;
        }

        let planned = plan_stops(network, train, self.config);
        let mut created = Vec::with_capacity(planned.len());
        for stop in &planned {
            created.push(self.store.create_stop(stop.to_new_stop(train.id)).await?);
        }

        debug!(
            train = %train.id,
            deleted = existing.len(),
            created = created.len(),
            "Recomputed stops"
        );

        Ok(created)
    }

    /// Add one stop at `station`, timed from the stop before it.
    ///
    /// Stops after the new one keep their times.
    pub async fn insert_stop(
        &self,
        network: &Network,
        train: &Train,
        station: StationId,
    ) -> Result<TrainStop, ScheduleError> {
        let stops = self.store.get_train_stops(Some(train.id)).await?;
        let planned = plan_insertion(network, train, &stops, station, self.config)?;
        let created = self.store.create_stop(planned.to_new_stop(train.id)).await?;

        debug!(
            train = %train.id,
            station = %station,
            arrival = %created.arrival_time,
            departure = %created.departure_time,
            "Inserted stop"
        );

        Ok(created)
    }

    /// Recompute stops for every train in a snapshot.
    ///
    /// Returns the number of stops created.
    pub async fn recompute_all(&self, snapshot: &Snapshot) -> Result<usize, ScheduleError> {
        let network = snapshot.network();
        let mut total = 0;
        for train in &snapshot.trains {
            total += self.recompute_stops(&network, train).await?.len();
        }

        info!(trains = snapshot.trains.len(), stops = total, "Recomputed all stops");
        Ok(total)
    }
}
