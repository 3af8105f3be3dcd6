//! Stop scheduler.
//!
//! Derives intermediate stop times from a train's endpoints, average speed
//! and default dwell. Stations strictly between the endpoints (by distance)
//! each get a stop; travel between consecutive points takes
//! `round(distance / speed * 60)` minutes from the previous departure.
//!
//! Planning is pure ([`plan_stops`], [`plan_insertion`]). [`StopScheduler`]
//! applies plans through a [`TimetableStore`](crate::store::TimetableStore).

mod config;
mod error;
mod plan;
mod service;

pub use config::SchedulerConfig;
pub use error::ScheduleError;
pub use plan::{
    PlannedStop, effective_speed, intermediate_stations, plan_insertion, plan_stops,
    travel_minutes,
};
pub use service::StopScheduler;
