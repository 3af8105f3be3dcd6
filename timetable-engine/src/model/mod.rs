//! Time-distance model.
//!
//! Places stations on a distance axis and turns each train's run into a
//! polyline of `(time, distance)` points. Scheduling, conflict detection
//! and metrics all work on these structures rather than on raw records.

mod interval;
mod network;
mod path;

pub use interval::Interval;
pub use network::Network;
pub use path::{PathPoint, TimeDistancePath, Visit, VisitKind};
