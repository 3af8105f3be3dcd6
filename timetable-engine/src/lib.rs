//! Schedule geometry and conflict detection for a railway timetable editor.
//!
//! Answers two questions about a timetable: "when does this train call at
//! each station it passes?" and "which trains would run into each other?"
//!
//! Trains are placed on a time-distance plane (time on one axis, the
//! station's distance along the line on the other). The [`scheduler`]
//! derives stop times from average speeds, and the [`conflict`] detector
//! combines line intersection on that plane with station and section
//! capacity rules.
//!
//! Storage belongs to the host application and is reached through
//! [`store::TimetableStore`]. All computation is synchronous over an
//! immutable [`store::Snapshot`].

pub mod conflict;
pub mod domain;
pub mod metrics;
pub mod model;
pub mod scheduler;
pub mod store;
