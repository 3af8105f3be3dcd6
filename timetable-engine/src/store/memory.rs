//! In-memory store backed by a JSON snapshot document.
//!
//! Loads a [`Snapshot`] from disk (or takes one built in code) and serves it
//! through [`TimetableStore`] as if it were the editor's backend, assigning
//! stop ids and durations the same way.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::{
    LegendItem, Line, NewStop, ScheduleId, Station, StopId, TrackSegment, Train, TrainId,
    TrainStop,
};

use super::error::StoreError;
use super::snapshot::Snapshot;
use super::TimetableStore;

struct Inner {
    snapshot: Snapshot,
    /// Stops keyed by id so listing order is stable.
    stops: BTreeMap<StopId, TrainStop>,
    next_stop_id: i64,
}

impl Inner {
    fn new(mut snapshot: Snapshot) -> Self {
        let stops: BTreeMap<StopId, TrainStop> = snapshot
            .train_stops
            .drain(..)
            .map(|s| (s.id, s))
            .collect();
        let next_stop_id = stops.keys().next_back().map_or(1, |id| id.get() + 1);

        Self {
            snapshot,
            stops,
            next_stop_id,
        }
    }

    fn to_snapshot(&self) -> Snapshot {
        let mut snapshot = self.snapshot.clone();
        snapshot.train_stops = self.stops.values().cloned().collect();
        snapshot
    }
}

/// Store that keeps every collection in memory.
///
/// Cloning is cheap and clones share state.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    /// Create a store serving the given snapshot.
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::new(snapshot))),
        }
    }

    /// Load a store from a JSON snapshot document.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&json)?;

        debug!(
            path = %path.display(),
            stations = snapshot.stations.len(),
            trains = snapshot.trains.len(),
            "Loaded snapshot document"
        );

        Ok(Self::new(snapshot))
    }

    /// Write the current state back as a JSON snapshot document.
    ///
    /// Creates parent directories if they don't exist.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let snapshot = self.inner.read().await.to_snapshot();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&snapshot)?;
        tokio::fs::write(path, json).await?;

        debug!(
            path = %path.display(),
            stops = snapshot.train_stops.len(),
            "Saved snapshot document"
        );
        Ok(())
    }

    /// A full copy of the current state.
    pub async fn snapshot(&self) -> Snapshot {
        self.inner.read().await.to_snapshot()
    }
}

impl TimetableStore for MemoryStore {
    async fn get_stations(&self) -> Result<Vec<Station>, StoreError> {
        let inner = self.inner.read().await;
        let mut stations = inner.snapshot.stations.clone();
        stations.sort_by_key(|s| s.position);
        Ok(stations)
    }

    async fn get_trains(&self, schedule: ScheduleId) -> Result<Vec<Train>, StoreError> {
        let inner = self.inner.read().await;
        let mut trains: Vec<Train> = inner
            .snapshot
            .trains
            .iter()
            .filter(|t| t.schedule_id == schedule)
            .cloned()
            .collect();
        trains.sort_by_key(|t| t.id);
        Ok(trains)
    }

    async fn get_train_stops(&self, train: Option<TrainId>) -> Result<Vec<TrainStop>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .stops
            .values()
            .filter(|s| train.is_none_or(|t| s.train_id == t))
            .cloned()
            .collect())
    }

    async fn get_track_segments(&self) -> Result<Vec<TrackSegment>, StoreError> {
        Ok(self.inner.read().await.snapshot.track_segments.clone())
    }

    async fn get_lines(&self) -> Result<Vec<Line>, StoreError> {
        Ok(self.inner.read().await.snapshot.lines.clone())
    }

    async fn get_legend(&self, schedule: ScheduleId) -> Result<Vec<LegendItem>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .snapshot
            .legend
            .iter()
            .filter(|item| item.schedule_id == schedule)
            .cloned()
            .collect())
    }

    async fn create_stop(&self, stop: NewStop) -> Result<TrainStop, StoreError> {
        let mut inner = self.inner.write().await;

        let id = StopId(inner.next_stop_id);
        let created = TrainStop::from_new(id, stop);
        created.validate()?;

        inner.next_stop_id += 1;
        inner.stops.insert(id, created.clone());
        Ok(created)
    }

    async fn delete_stop(&self, id: StopId) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner
            .stops
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("stop", id.get()))
    }

    async fn update_stop(&self, mut stop: TrainStop) -> Result<TrainStop, StoreError> {
        let mut inner = self.inner.write().await;

        let Some(existing) = inner.stops.get_mut(&stop.id) else {
            return Err(StoreError::not_found("stop", stop.id.get()));
        };

        stop.refresh_duration();
        stop.validate()?;
        *existing = stop.clone();
        Ok(stop)
    }
}
