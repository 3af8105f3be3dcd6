//! Pure stop planning.
//!
//! Everything here computes stop times from a snapshot without touching the
//! store. [`StopScheduler`](super::StopScheduler) applies the results.

use tracing::{debug, trace};

use crate::domain::{Minutes, NewStop, Station, StationId, Train, TrainId, TrainStop};
use crate::model::Network;

use super::config::SchedulerConfig;
use super::error::ScheduleError;

/// A stop time computed by the scheduler, not yet persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedStop {
    pub station_id: StationId,
    pub arrival: Minutes,
    pub departure: Minutes,
}

impl PlannedStop {
    pub fn dwell(&self) -> i32 {
        self.departure - self.arrival
    }

    /// The create request for this stop on `train`.
    pub fn to_new_stop(&self, train: TrainId) -> NewStop {
        NewStop {
            train_id: train,
            station_id: self.station_id,
            arrival_time: self.arrival,
            departure_time: self.departure,
        }
    }
}

/// Stations strictly between a train's endpoints, in travel order.
///
/// Stations at exactly an endpoint's distance are excluded. Empty if either
/// endpoint is unknown.
pub fn intermediate_stations<'a>(network: &'a Network, train: &Train) -> Vec<&'a Station> {
    let (Some(from), Some(to)) = (
        network.coordinate(train.departure_station_id),
        network.coordinate(train.arrival_station_id),
    ) else {
        return Vec::new();
    };
    let (low, high) = if from <= to { (from, to) } else { (to, from) };

    let mut between: Vec<&Station> = network
        .ordered()
        .filter(|s| {
            let d = s.coordinate();
            d > low && d < high
        })
        .collect();
    if from > to {
        between.reverse();
    }
    between
}

/// Minutes needed to cover `distance_km` at `speed_kmh`, rounded to the
/// nearest minute.
///
/// Direction does not matter. A speed that is not positive yields 0, and a
/// vanishingly small one saturates at `i32::MAX`.
///
/// # Examples
///
/// ```
/// use timetable_engine::scheduler::travel_minutes;
///
/// assert_eq!(travel_minutes(10.0, 50.0), 12);
/// assert_eq!(travel_minutes(-15.0, 50.0), 18);
/// assert_eq!(travel_minutes(10.0, 0.0), 0);
/// assert_eq!(travel_minutes(10.0, 1e-9), i32::MAX);
/// ```
pub fn travel_minutes(distance_km: f64, speed_kmh: f64) -> i32 {
    if !(speed_kmh.is_finite() && speed_kmh > 0.0) {
        return 0;
    }
    (distance_km.abs() / speed_kmh * 60.0).round() as i32
}

/// Speed to schedule `train` with.
///
/// The train's own average speed if it is positive. Otherwise derived from
/// the scheduled run: end-to-end distance over the time not spent dwelling
/// at `stops`. Falls back to the configured default when the distance is
/// zero, the moving time is not positive or an endpoint is unknown.
pub fn effective_speed(
    network: &Network,
    train: &Train,
    stops: &[TrainStop],
    config: &SchedulerConfig,
) -> f64 {
    if let Some(speed) = train.usable_speed() {
        return speed;
    }

    let (Some(from), Some(to)) = (
        network.coordinate(train.departure_station_id),
        network.coordinate(train.arrival_station_id),
    ) else {
        return config.default_speed_kmh;
    };

    let distance = (to - from).abs();
    let dwell: i32 = stops
        .iter()
        .filter(|s| s.train_id == train.id)
        .map(TrainStop::dwell)
        .fold(0, i32::saturating_add);
    let moving = train.total_minutes().saturating_sub(dwell);

    if distance > 0.0 && moving > 0 {
        let speed = distance / (f64::from(moving) / 60.0);
        trace!(train = %train.id, speed, "Derived speed from schedule");
        speed
    } else {
        config.default_speed_kmh
    }
}

fn dwell_for(train: &Train, config: &SchedulerConfig) -> i32 {
    train
        .default_stop_duration
        .unwrap_or(config.default_dwell_mins)
        .max(0)
}

/// Stop times for every intermediate station of `train`.
///
/// Used for bulk generation, when all existing stops are about to be
/// replaced, so the speed is derived as if the train had no stops.
/// Repeated calls with the same inputs give the same times.
pub fn plan_stops(network: &Network, train: &Train, config: &SchedulerConfig) -> Vec<PlannedStop> {
    let Some(start) = network.coordinate(train.departure_station_id) else {
        return Vec::new();
    };

    let speed = effective_speed(network, train, &[], config);
    let dwell = dwell_for(train, config);
    trace!(train = %train.id, speed, dwell, "Planning stops");

    let mut running = train.departure_time;
    let mut position = start;
    let mut planned = Vec::new();

    for station in intermediate_stations(network, train) {
        let distance = station.coordinate();
        let arrival = running + travel_minutes(distance - position, speed);
        let departure = arrival + dwell;

        planned.push(PlannedStop {
            station_id: station.id,
            arrival,
            departure,
        });
        running = departure;
        position = distance;
    }

    if let Some(last) = planned.last()
        && last.departure.get() >= config.minutes_per_day
    {
        debug!(
            train = %train.id,
            departure = %last.departure,
            "Planned stops run past the end of the day"
        );
    }

    planned
}

/// Stop time for one new stop at `station`, given the train's current stops.
///
/// The new stop is timed from the nearest point before it in the direction
/// of travel: the preceding stop's departure, or the train's departure when
/// there is none. Later stops are left where they are.
pub fn plan_insertion(
    network: &Network,
    train: &Train,
    stops: &[TrainStop],
    station: StationId,
    config: &SchedulerConfig,
) -> Result<PlannedStop, ScheduleError> {
    let from = network
        .coordinate(train.departure_station_id)
        .ok_or(ScheduleError::UnknownEndpoint {
            train: train.id,
            station: train.departure_station_id,
        })?;
    let to = network
        .coordinate(train.arrival_station_id)
        .ok_or(ScheduleError::UnknownEndpoint {
            train: train.id,
            station: train.arrival_station_id,
        })?;
    let target = network
        .coordinate(station)
        .ok_or(ScheduleError::UnknownStation(station))?;

    let ascending = from <= to;
    let (low, high) = if ascending { (from, to) } else { (to, from) };
    if !(target > low && target < high) {
        return Err(ScheduleError::OutsideRun {
            train: train.id,
            station,
        });
    }

    let own: Vec<&TrainStop> = stops.iter().filter(|s| s.train_id == train.id).collect();
    if own.iter().any(|s| s.station_id == station) {
        return Err(ScheduleError::AlreadyStops {
            train: train.id,
            station,
        });
    }

    // Nearest preceding stop along the direction of travel
    let before = |d: f64| if ascending { d < target } else { d > target };
    let previous = own
        .iter()
        .filter_map(|s| network.coordinate(s.station_id).map(|d| (*s, d)))
        .filter(|(_, d)| before(*d))
        .max_by(|(sa, da), (sb, db)| {
            let closer = if ascending {
                da.total_cmp(db)
            } else {
                db.total_cmp(da)
            };
            closer.then(sa.departure_time.cmp(&sb.departure_time))
        });

    let (prev_time, prev_distance) = match previous {
        Some((stop, distance)) => (stop.departure_time, distance),
        None => (train.departure_time, from),
    };

    let speed = effective_speed(network, train, stops, config);
    let arrival = prev_time + travel_minutes(target - prev_distance, speed);
    let departure = arrival + dwell_for(train, config);

    Ok(PlannedStop {
        station_id: station,
        arrival,
        departure,
    })
}
