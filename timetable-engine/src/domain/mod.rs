//! Domain types for the timetable engine.
//!
//! These are the plain entity records the editor stores (stations, track
//! segments, trains, stops, lines, legend) plus the small value types the
//! engine computes with. Records are deserialized as-is from the store;
//! `validate` methods check the invariants the engine relies on.

mod error;
mod ids;
mod line;
mod station;
mod stop;
mod time;
mod track;
mod train;

pub use error::DomainError;
pub use ids::{LineId, ScheduleId, StationId, StopId, TrainId};
pub use line::{Legend, LegendItem, Line};
pub use station::Station;
pub use stop::{NewStop, TrainStop};
pub use time::{MINUTES_PER_DAY, Minutes, TimeError};
pub use track::{SegmentKey, TrackSegment};
pub use train::{Direction, LineStyle, Train, TrainType};
