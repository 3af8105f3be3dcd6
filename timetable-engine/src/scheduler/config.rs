//! Stop scheduler configuration.

use crate::domain::MINUTES_PER_DAY;

/// Fallbacks used when a train record does not carry its own values.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Speed used when a train has none and none can be derived (km/h).
    pub default_speed_kmh: f64,

    /// Dwell at each generated stop when the train has none (minutes).
    pub default_dwell_mins: i32,

    /// Length of the timetable day (minutes).
    /// Planned times past this are logged, never clamped.
    pub minutes_per_day: i32,
}

impl SchedulerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(default_speed_kmh: f64, default_dwell_mins: i32, minutes_per_day: i32) -> Self {
        Self {
            default_speed_kmh,
            default_dwell_mins,
            minutes_per_day,
        }
    }

    /// Set the fallback speed.
    pub fn with_default_speed(mut self, km_per_hour: f64) -> Self {
        self.default_speed_kmh = km_per_hour;
        self
    }

    /// Set the fallback dwell.
    pub fn with_default_dwell(mut self, minutes: i32) -> Self {
        self.default_dwell_mins = minutes;
        self
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            default_speed_kmh: 60.0,
            default_dwell_mins: 1,
            minutes_per_day: MINUTES_PER_DAY,
        }
    }
}
