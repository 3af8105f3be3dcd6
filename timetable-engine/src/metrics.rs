//! Realised speed, run statistics and positions.
//!
//! Speeds here are net of dwell: the time a train spends standing at its
//! recorded stops does not count as running time.

use serde::Serialize;
use tracing::trace;

use crate::domain::{Minutes, Train, TrainId, TrainStop};
use crate::model::{Network, TimeDistancePath};

/// Run statistics for one train.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainMetrics {
    pub train_id: TrainId,
    /// End-to-end distance along the axis, in km.
    pub distance_km: f64,
    /// Scheduled time from departure to arrival, in minutes.
    pub total_minutes: i32,
    /// Sum of recorded stop durations, in minutes.
    pub dwell_minutes: i32,
    /// `total_minutes - dwell_minutes`.
    pub moving_minutes: i32,
    /// Average speed while moving, in km/h. Zero if the train never moves.
    pub speed_kmh: f64,
}

impl TrainMetrics {
    /// Compute the statistics, or `None` if an endpoint is not in the
    /// network.
    pub fn compute(network: &Network, train: &Train, stops: &[TrainStop]) -> Option<Self> {
        let from = network.coordinate(train.departure_station_id)?;
        let to = network.coordinate(train.arrival_station_id)?;

        let distance_km = (to - from).abs();
        let total_minutes = train.total_minutes();
        let dwell_minutes = stops
            .iter()
            .filter(|s| s.train_id == train.id)
            .map(|s| s.stop_duration)
            .fold(0, i32::saturating_add);
        let moving_minutes = total_minutes.saturating_sub(dwell_minutes);

        let speed_kmh = if moving_minutes > 0 {
            distance_km / (f64::from(moving_minutes) / 60.0)
        } else {
            0.0
        };

        Some(Self {
            train_id: train.id,
            distance_km,
            total_minutes,
            dwell_minutes,
            moving_minutes,
            speed_kmh,
        })
    }
}

/// Average speed of `train` net of dwell time, in km/h.
///
/// Returns 0 when the train has no moving time or an endpoint is unknown.
///
/// # Examples
///
/// ```
/// use timetable_engine::domain::{Minutes, Station, StationId, Train, TrainId, TrainType};
/// use timetable_engine::metrics::calculate_speed;
/// use timetable_engine::model::Network;
///
/// let network = Network::new(
///     vec![
///         Station::new(StationId(1), "A", 0).with_distance(0.0),
///         Station::new(StationId(2), "B", 1).with_distance(30.0),
///     ],
///     vec![],
/// );
/// let train = Train::new(
///     TrainId(1),
///     "12",
///     TrainType::Passenger,
///     (StationId(1), Minutes::new(0)),
///     (StationId(2), Minutes::new(30)),
/// );
///
/// assert_eq!(calculate_speed(&network, &train, &[]), 60.0);
/// ```
pub fn calculate_speed(network: &Network, train: &Train, stops: &[TrainStop]) -> f64 {
    TrainMetrics::compute(network, train, stops).map_or(0.0, |m| m.speed_kmh)
}

/// Statistics for every train whose endpoints are known, in input order.
pub fn train_metrics(
    network: &Network,
    trains: &[Train],
    stops: &[TrainStop],
) -> Vec<TrainMetrics> {
    trains
        .iter()
        .filter_map(|train| {
            let metrics = TrainMetrics::compute(network, train, stops);
            if metrics.is_none() {
                trace!(train = %train.id, "Skipping metrics for train with unknown endpoint");
            }
            metrics
        })
        .collect()
}

/// Where a train is along the axis at one moment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrainPosition {
    pub train_id: TrainId,
    pub distance_km: f64,
}

/// Position of every train running at `at`, in input order.
///
/// Trains that have not departed yet, have already arrived or have an
/// unknown endpoint are left out. A train standing at a stop is reported at
/// that station.
pub fn positions_at(
    network: &Network,
    trains: &[Train],
    stops: &[TrainStop],
    at: Minutes,
) -> Vec<TrainPosition> {
    trains
        .iter()
        .filter_map(|train| TimeDistancePath::build(network, train, stops))
        .filter_map(|path| {
            let distance_km = path.position_at(at)?;
            Some(TrainPosition {
                train_id: path.train_id(),
                distance_km,
            })
        })
        .collect()
}
