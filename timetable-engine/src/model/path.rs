//! A train's run as a polyline in the time-distance plane.

use std::collections::HashMap;

use tracing::trace;

use crate::domain::{DomainError, Minutes, StationId, Train, TrainId, TrainStop};

use super::interval::Interval;
use super::network::Network;

/// One vertex of a time-distance polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    pub time: Minutes,
    pub distance: f64,
}

/// How a train is at a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitKind {
    /// Start of the run, occupied for an instant.
    Origin,
    /// Recorded stop with a dwell.
    Stop,
    /// End of the run, occupied for an instant.
    Destination,
}

/// A train's presence at one station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    pub station_id: StationId,
    pub arrival: Minutes,
    pub departure: Minutes,
    pub kind: VisitKind,
}

impl Visit {
    /// The time window the train occupies the station.
    pub fn occupancy(&self) -> Interval {
        Interval::new(self.arrival, self.departure)
    }

    /// True for a recorded stop (as opposed to a run endpoint).
    pub fn is_recorded_stop(&self) -> bool {
        self.kind == VisitKind::Stop
    }
}

/// A train's run mapped onto the time-distance plane.
///
/// The polyline starts at `(departure_time, distance(departure station))`,
/// has two points per recorded stop (arrival and departure at the stop's
/// distance) and ends at `(arrival_time, distance(arrival station))`.
///
/// Each station appears once in [`visits`](TimeDistancePath::visits). A
/// recorded stop at a station takes precedence over an endpoint visit there.
#[derive(Debug, Clone)]
pub struct TimeDistancePath {
    train_id: TrainId,
    points: Vec<PathPoint>,
    visits: HashMap<StationId, Visit>,
}

impl TimeDistancePath {
    /// Build the path for `train` from the stops recorded for it.
    ///
    /// `stops` may contain other trains' stops; they are ignored. Stops at
    /// unknown stations are skipped. Returns `None` if either endpoint
    /// station is unknown.
    pub fn build(network: &Network, train: &Train, stops: &[TrainStop]) -> Option<Self> {
        let Some(start) = network.coordinate(train.departure_station_id) else {
            trace!(
                train = %train.id,
                station = %train.departure_station_id,
                "Unknown departure station"
            );
            return None;
        };
        let Some(end) = network.coordinate(train.arrival_station_id) else {
            trace!(
                train = %train.id,
                station = %train.arrival_station_id,
                "Unknown arrival station"
            );
            return None;
        };

        let mut own: Vec<(&TrainStop, f64)> = stops
            .iter()
            .filter(|s| s.train_id == train.id)
            .filter_map(|s| match network.coordinate(s.station_id) {
                Some(distance) => Some((s, distance)),
                None => {
                    trace!(train = %train.id, stop = %s.id, "Skipping stop at unknown station");
                    None
                }
            })
            .collect();
        own.sort_by_key(|(s, _)| (s.arrival_time, s.departure_time, s.id));

        let mut points = Vec::with_capacity(own.len() * 2 + 2);
        points.push(PathPoint {
            time: train.departure_time,
            distance: start,
        });
        for (stop, distance) in &own {
            points.push(PathPoint {
                time: stop.arrival_time,
                distance: *distance,
            });
            points.push(PathPoint {
                time: stop.departure_time,
                distance: *distance,
            });
        }
        points.push(PathPoint {
            time: train.arrival_time,
            distance: end,
        });

        let mut visits = HashMap::with_capacity(own.len() + 2);
        visits.insert(
            train.departure_station_id,
            Visit {
                station_id: train.departure_station_id,
                arrival: train.departure_time,
                departure: train.departure_time,
                kind: VisitKind::Origin,
            },
        );
        visits.insert(
            train.arrival_station_id,
            Visit {
                station_id: train.arrival_station_id,
                arrival: train.arrival_time,
                departure: train.arrival_time,
                kind: VisitKind::Destination,
            },
        );
        for (stop, _) in &own {
            visits.insert(
                stop.station_id,
                Visit {
                    station_id: stop.station_id,
                    arrival: stop.arrival_time,
                    departure: stop.departure_time,
                    kind: VisitKind::Stop,
                },
            );
        }

        Some(Self {
            train_id: train.id,
            points,
            visits,
        })
    }

    pub fn train_id(&self) -> TrainId {
        self.train_id
    }

    /// Polyline vertices in time order.
    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    /// First and last vertex: the run drawn as a single straight segment.
    pub fn chord(&self) -> (PathPoint, PathPoint) {
        // `build` always pushes the two endpoints
        (self.points[0], self.points[self.points.len() - 1])
    }

    /// The visit at a station, if the train is there at all.
    pub fn visit(&self, station: StationId) -> Option<&Visit> {
        self.visits.get(&station)
    }

    /// All visited stations, in no particular order.
    pub fn visits(&self) -> impl Iterator<Item = &Visit> + '_ {
        self.visits.values()
    }

    pub fn visits_station(&self, station: StationId) -> bool {
        self.visits.contains_key(&station)
    }

    /// Sum of dwell times at recorded stops.
    pub fn total_dwell(&self) -> i32 {
        self.visits
            .values()
            .filter(|v| v.is_recorded_stop())
            .map(|v| v.departure - v.arrival)
            .fold(0, i32::saturating_add)
    }

    /// Check the polyline never goes backwards in time.
    pub fn validate(&self) -> Result<(), DomainError> {
        for pair in self.points.windows(2) {
            if pair[1].time < pair[0].time {
                return Err(DomainError::NonMonotonicPath {
                    train: self.train_id,
                    at: pair[1].time,
                });
            }
        }
        Ok(())
    }

    /// Distance of the train at a given time, interpolating between vertices.
    ///
    /// Returns `None` outside the run. A zero-length time step yields the
    /// distance of its first vertex rather than dividing by zero.
    pub fn position_at(&self, time: Minutes) -> Option<f64> {
        for pair in self.points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if time < a.time || time > b.time {
                continue;
            }
            let span = b.time - a.time;
            if span == 0 {
                return Some(a.distance);
            }
            let t = f64::from(time - a.time) / f64::from(span);
            return Some(a.distance + t * (b.distance - a.distance));
        }
        None
    }
}
