//! Stations and their track topology.

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::ids::{LineId, StationId};

fn default_tracks_count() -> u32 {
    1
}

/// A station on the route.
///
/// The geometric position of a station is its [`coordinate`](Station::coordinate):
/// `distance_km` when present, otherwise the legacy ordinal `position`.
///
/// # Examples
///
/// ```
/// use timetable_engine::domain::{Station, StationId};
///
/// let mut station = Station::new(StationId(1), "Kirov", 3);
/// assert_eq!(station.coordinate(), 3.0);
///
/// station.distance_km = Some(41.5);
/// assert_eq!(station.coordinate(), 41.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,

    /// Ordinal index, kept as the fallback ordering key.
    #[serde(default)]
    pub position: i32,

    /// Distance along the route in kilometres.
    #[serde(default)]
    pub distance_km: Option<f64>,

    #[serde(default)]
    pub line_id: Option<LineId>,

    /// Number of main tracks through the station. 1 means single-track.
    #[serde(default = "default_tracks_count")]
    pub tracks_count: u32,

    /// Passing siding on a single-track station.
    #[serde(default)]
    pub has_siding: bool,
}

impl Station {
    /// Create a single-track station without siding at an ordinal position.
    pub fn new(id: StationId, name: impl Into<String>, position: i32) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            distance_km: None,
            line_id: None,
            tracks_count: 1,
            has_siding: false,
        }
    }

    /// Set the distance coordinate.
    pub fn with_distance(mut self, distance_km: f64) -> Self {
        self.distance_km = Some(distance_km);
        self
    }

    /// Set the number of main tracks.
    pub fn with_tracks(mut self, tracks_count: u32) -> Self {
        self.tracks_count = tracks_count;
        self
    }

    /// Mark the station as having a passing siding.
    pub fn with_siding(mut self) -> Self {
        self.has_siding = true;
        self
    }

    /// Position of the station on the distance axis.
    pub fn coordinate(&self) -> f64 {
        self.distance_km.unwrap_or(f64::from(self.position))
    }

    /// A station with a single main track.
    pub fn is_single_track(&self) -> bool {
        self.tracks_count <= 1
    }

    /// Opposing trains may both dwell here: single track with a passing siding.
    pub fn allows_passing(&self) -> bool {
        self.is_single_track() && self.has_siding
    }

    /// Check the record's invariants.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.tracks_count == 0 {
            return Err(DomainError::InvalidTrackCount(self.id));
        }
        if self.distance_km.is_some_and(|d| !d.is_finite()) {
            return Err(DomainError::InvalidDistance(self.id));
        }
        Ok(())
    }
}
