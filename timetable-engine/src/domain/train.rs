//! Trains and their direction of travel.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Minutes;
use super::error::DomainError;
use super::ids::{ScheduleId, StationId, TrainId};

/// Kind of train. Only used to look up the legend entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainType {
    Freight,
    Passenger,
    Service,
}

impl fmt::Display for TrainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TrainType::Freight => "freight",
            TrainType::Passenger => "passenger",
            TrainType::Service => "service",
        })
    }
}

/// How a train's run is drawn on the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
    Double,
}

/// Direction of travel.
///
/// Timetables traditionally encode direction in the train number: even
/// numbers run one way, odd numbers the other. `Direction` makes that
/// explicit so the conflict detector never has to look at the number text.
///
/// # Examples
///
/// ```
/// use timetable_engine::domain::Direction;
///
/// assert_eq!(Direction::from_number("2014"), Direction::Even);
/// assert_eq!(Direction::from_number("2015"), Direction::Odd);
/// // The last digit counts, even with a suffix
/// assert_eq!(Direction::from_number("762B"), Direction::Even);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Even,
    Odd,
}

impl Direction {
    /// Derive the direction from the parity of the last digit in a train number.
    ///
    /// A number without any digit has no parity and is classed as `Odd`.
    pub fn from_number(number: &str) -> Self {
        match number.bytes().rev().find(u8::is_ascii_digit) {
            Some(d) if (d - b'0') % 2 == 0 => Direction::Even,
            _ => Direction::Odd,
        }
    }

    /// The other direction.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Even => Direction::Odd,
            Direction::Odd => Direction::Even,
        }
    }
}

/// A scheduled train run between two stations within one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Train {
    pub id: TrainId,

    #[serde(default)]
    pub schedule_id: ScheduleId,

    /// Free-text train number, e.g. "2014" or "762B".
    pub number: String,

    #[serde(rename = "type")]
    pub train_type: TrainType,

    pub departure_station_id: StationId,
    pub arrival_station_id: StationId,
    pub departure_time: Minutes,
    pub arrival_time: Minutes,

    /// Average running speed in km/h, used when generating stops.
    #[serde(default)]
    pub average_speed: Option<f64>,

    /// Dwell at each generated stop, in minutes.
    #[serde(default)]
    pub default_stop_duration: Option<i32>,

    /// Explicit direction. Falls back to the number's parity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,

    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub line_style: Option<LineStyle>,
    #[serde(default)]
    pub line_width: Option<f64>,
}

impl Train {
    /// Create a train with no speed, dwell or styling information.
    pub fn new(
        id: TrainId,
        number: impl Into<String>,
        train_type: TrainType,
        departure: (StationId, Minutes),
        arrival: (StationId, Minutes),
    ) -> Self {
        Self {
            id,
            schedule_id: ScheduleId::default(),
            number: number.into(),
            train_type,
            departure_station_id: departure.0,
            arrival_station_id: arrival.0,
            departure_time: departure.1,
            arrival_time: arrival.1,
            average_speed: None,
            default_stop_duration: None,
            direction: None,
            color: None,
            line_style: None,
            line_width: None,
        }
    }

    /// Set the average speed used for stop generation.
    pub fn with_speed(mut self, km_per_hour: f64) -> Self {
        self.average_speed = Some(km_per_hour);
        self
    }

    /// Set the default dwell used for stop generation.
    pub fn with_dwell(mut self, minutes: i32) -> Self {
        self.default_stop_duration = Some(minutes);
        self
    }

    /// Direction of travel: explicit if set, otherwise from the number.
    pub fn direction(&self) -> Direction {
        self.direction
            .unwrap_or_else(|| Direction::from_number(&self.number))
    }

    /// Scheduled end-to-end time in minutes.
    pub fn total_minutes(&self) -> i32 {
        self.arrival_time.abs_diff(self.departure_time)
    }

    /// Average speed if it is usable for scheduling.
    pub fn usable_speed(&self) -> Option<f64> {
        self.average_speed.filter(|s| s.is_finite() && *s > 0.0)
    }

    /// Check both endpoint times lie within the timetable day.
    pub fn validate(&self) -> Result<(), DomainError> {
        for time in [self.departure_time, self.arrival_time] {
            if !time.is_within_day() {
                return Err(DomainError::TimeOutOfDay {
                    train: self.id,
                    time,
                });
            }
        }
        Ok(())
    }
}
