//! Persistence seam.
//!
//! The engine never owns storage. It reads entity collections and writes
//! stops through [`TimetableStore`], which the hosting application
//! implements on top of whatever backend it uses. [`MemoryStore`] is a
//! self-contained implementation for tests, tools and the command-line
//! binary.

mod error;
mod memory;
mod snapshot;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use snapshot::Snapshot;

use crate::domain::{
    LegendItem, Line, NewStop, ScheduleId, Station, StopId, TrackSegment, Train, TrainId,
    TrainStop,
};

/// Entity collections and stop writes, provided by the host application.
///
/// Failures are returned as-is; the engine does not retry.
#[allow(async_fn_in_trait)]
pub trait TimetableStore {
    /// All stations.
    async fn get_stations(&self) -> Result<Vec<Station>, StoreError>;

    /// Trains belonging to one schedule.
    async fn get_trains(&self, schedule: ScheduleId) -> Result<Vec<Train>, StoreError>;

    /// Stops of one train, or of every train when `train` is `None`.
    async fn get_train_stops(&self, train: Option<TrainId>) -> Result<Vec<TrainStop>, StoreError>;

    /// All track segment records.
    async fn get_track_segments(&self) -> Result<Vec<TrackSegment>, StoreError>;

    /// All lines.
    async fn get_lines(&self) -> Result<Vec<Line>, StoreError>;

    /// Legend of one schedule.
    async fn get_legend(&self, schedule: ScheduleId) -> Result<Vec<LegendItem>, StoreError>;

    /// Persist a new stop. The store assigns the id and `stop_duration`.
    async fn create_stop(&self, stop: NewStop) -> Result<TrainStop, StoreError>;

    /// Remove a stop.
    async fn delete_stop(&self, id: StopId) -> Result<(), StoreError>;

    /// Replace a stop's times. The store recomputes `stop_duration`.
    async fn update_stop(&self, stop: TrainStop) -> Result<TrainStop, StoreError>;
}
