//! Conflict detection.
//!
//! Decides, for every pair of trains, whether they would occupy the same
//! infrastructure at the same time. The check for one pair runs in stages:
//!
//! 1. The two runs, each drawn as a straight line from departure to
//!    arrival, must cross in the time-distance plane. If they don't, the
//!    pair is clear.
//! 2. A shared single-track station occupied by both at once is a
//!    conflict, unless it has a siding and two opposing trains both stop
//!    there.
//! 3. A single-track section both trains traverse with overlapping
//!    windows is a conflict whatever the directions.
//! 4. Otherwise opposing trains pass each other on separate tracks, and
//!    trains running the same way have caught each other up.
//!
//! Every pass starts from scratch: nothing is cached between calls.

mod config;
mod geometry;
mod segment;
mod station;
mod types;

pub use config::DetectorConfig;
pub use geometry::segments_intersect;
pub use types::{Conflict, ConflictReason};

use tracing::{debug, trace, warn};

use crate::domain::{Direction, Train, TrainStop};
use crate::model::{Network, TimeDistancePath};

use segment::conflicting_section;
use station::conflicting_station;

/// A train together with its path through one network.
#[derive(Debug, Clone)]
pub struct TrainRun<'a> {
    train: &'a Train,
    path: TimeDistancePath,
}

impl<'a> TrainRun<'a> {
    /// Build the run, or `None` if the train's endpoints are not in the
    /// network.
    ///
    /// A train timed outside the day, or a path that goes backwards in
    /// time, is kept but logged.
    pub fn build(network: &Network, train: &'a Train, stops: &[TrainStop]) -> Option<Self> {
        if let Err(e) = train.validate() {
            warn!(train = %train.id, error = %e, "Invalid train record");
        }
        let path = TimeDistancePath::build(network, train, stops)?;
        if let Err(e) = path.validate() {
            warn!(train = %path.train_id(), error = %e, "Malformed train path");
        }
        Some(Self { train, path })
    }

    pub fn train(&self) -> &Train {
        self.train
    }

    pub fn path(&self) -> &TimeDistancePath {
        &self.path
    }

    pub fn direction(&self) -> Direction {
        self.train.direction()
    }
}

/// Why two runs conflict, or `None` if they don't.
///
/// Argument order does not affect the result.
pub fn conflict_between(
    network: &Network,
    a: &TrainRun<'_>,
    b: &TrainRun<'_>,
    config: &DetectorConfig,
) -> Option<ConflictReason> {
    let (a, b) = if a.train.id <= b.train.id { (a, b) } else { (b, a) };

    if !segments_intersect(a.path.chord(), b.path.chord(), config.parallel_epsilon) {
        trace!(first = %a.train.id, second = %b.train.id, "Runs do not cross");
        return None;
    }

    let opposite = a.direction() != b.direction();

    if let Some(station) = conflicting_station(network, &a.path, &b.path, opposite) {
        return Some(ConflictReason::Station { station });
    }

    if let Some(segment) = conflicting_section(network, &a.path, &b.path) {
        return Some(ConflictReason::SingleTrackSegment { segment });
    }

    if opposite {
        trace!(first = %a.train.id, second = %b.train.id, "Opposing trains pass");
        None
    } else {
        Some(ConflictReason::Crossing)
    }
}

/// All conflicting pairs among `trains`.
///
/// Trains whose endpoints are missing from the network are skipped. The
/// result is sorted by pair and does not depend on the order of `trains`
/// or `stops`.
pub fn detect_conflicts(
    network: &Network,
    trains: &[Train],
    stops: &[TrainStop],
    config: &DetectorConfig,
) -> Vec<Conflict> {
    let mut runs: Vec<TrainRun<'_>> = trains
        .iter()
        .filter_map(|train| {
            let run = TrainRun::build(network, train, stops);
            if run.is_none() {
                trace!(train = %train.id, "Skipping train with unknown endpoint");
            }
            run
        })
        .collect();
    runs.sort_by_key(|run| run.train.id);

    let mut conflicts = Vec::new();
    for (i, a) in runs.iter().enumerate() {
        for b in &runs[i + 1..] {
            if let Some(reason) = conflict_between(network, a, b, config) {
                conflicts.push(Conflict::new(a.train.id, b.train.id, reason));
            }
        }
    }

    debug!(
        trains = trains.len(),
        checked = runs.len(),
        conflicts = conflicts.len(),
        "Conflict detection complete"
    );

    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Minutes, SegmentKey, Station, StationId, StopId, TrackSegment, TrainId, TrainType,
    };

    fn train(id: i64, number: &str, from: i64, dep: i32, to: i64, arr: i32) -> Train {
        Train::new(
            TrainId(id),
            number,
            TrainType::Passenger,
            (StationId(from), Minutes::new(dep)),
            (StationId(to), Minutes::new(arr)),
        )
    }

    fn stop(id: i64, train: i64, station: i64, arr: i32, dep: i32) -> TrainStop {
        TrainStop {
            id: StopId(id),
            train_id: TrainId(train),
            station_id: StationId(station),
            arrival_time: Minutes::new(arr),
            departure_time: Minutes::new(dep),
            stop_duration: dep - arr,
        }
    }

    /// A (0 km) - B (10 km) - C (20 km), double-track ends.
    fn line(middle: Station, segments: Vec<TrackSegment>) -> Network {
        Network::new(
            vec![
                Station::new(StationId(1), "A", 0).with_distance(0.0).with_tracks(2),
                middle,
                Station::new(StationId(3), "C", 2).with_distance(20.0).with_tracks(2),
            ],
            segments,
        )
    }

    fn b_station() -> Station {
        Station::new(StationId(2), "B", 1).with_distance(10.0)
    }

    fn detect(net: &Network, trains: &[Train], stops: &[TrainStop]) -> Vec<Conflict> {
        detect_conflicts(net, trains, stops, &DetectorConfig::default())
    }

    #[test]
    fn runs_that_never_cross_are_clear() {
        let net = line(b_station(), vec![]);
        let trains = vec![train(1, "1", 1, 0, 3, 30), train(2, "3", 1, 60, 3, 90)];
        assert!(detect(&net, &trains, &[]).is_empty());
    }

    #[test]
    fn same_direction_crossing_conflicts() {
        let net = line(b_station().with_tracks(2), vec![]);
        // Fast train 2 overtakes slow train 1 between stations
        let trains = vec![train(1, "1", 1, 0, 3, 60), train(2, "3", 1, 10, 3, 40)];
        assert_eq!(
            detect(&net, &trains, &[]),
            vec![Conflict::new(TrainId(1), TrainId(2), ConflictReason::Crossing)]
        );
    }

    #[test]
    fn opposite_directions_pass_on_double_track() {
        let net = line(b_station().with_tracks(2), vec![]);
        let trains = vec![train(1, "2", 1, 0, 3, 40), train(2, "1", 3, 0, 1, 40)];
        assert!(detect(&net, &trains, &[]).is_empty());
    }

    #[test]
    fn opposing_dwells_at_single_track_station_conflict() {
        let net = line(b_station(), vec![]);
        let trains = vec![train(1, "2", 1, 0, 3, 40), train(2, "1", 3, 0, 1, 40)];
        let stops = vec![stop(1, 1, 2, 18, 22), stop(2, 2, 2, 20, 24)];
        assert_eq!(
            detect(&net, &trains, &stops),
            vec![Conflict::new(
                TrainId(1),
                TrainId(2),
                ConflictReason::Station {
                    station: StationId(2)
                }
            )]
        );
    }

    #[test]
    fn siding_lets_opposing_trains_cross() {
        let net = line(b_station().with_siding(), vec![]);
        let trains = vec![train(1, "2", 1, 0, 3, 40), train(2, "1", 3, 0, 1, 40)];
        let stops = vec![stop(1, 1, 2, 18, 22), stop(2, 2, 2, 20, 24)];
        assert!(detect(&net, &trains, &stops).is_empty());
    }

    #[test]
    fn single_track_section_beats_siding() {
        let net = line(
            b_station().with_siding(),
            vec![TrackSegment::single_track(StationId(1), StationId(2))],
        );
        let trains = vec![train(1, "2", 1, 0, 3, 40), train(2, "1", 3, 0, 1, 40)];
        // Both stop at B; train 2 leaves B towards A while train 1 is still
        // in the A-B section
        let stops = vec![stop(1, 1, 2, 18, 22), stop(2, 2, 2, 12, 16)];
        assert_eq!(
            detect(&net, &trains, &stops),
            vec![Conflict::new(
                TrainId(1),
                TrainId(2),
                ConflictReason::SingleTrackSegment {
                    segment: SegmentKey::new(StationId(1), StationId(2))
                }
            )]
        );
    }

    #[test]
    fn runs_past_midnight_are_still_checked() {
        let net = line(b_station().with_tracks(2), vec![]);
        let trains = vec![
            train(1, "1", 1, 1420, 3, 1480),
            train(2, "3", 1, 1430, 3, 1460),
        ];
        assert!(trains[0].validate().is_err());

        assert!(TrainRun::build(&net, &trains[0], &[]).is_some());
        assert_eq!(
            detect(&net, &trains, &[]),
            vec![Conflict::new(TrainId(1), TrainId(2), ConflictReason::Crossing)]
        );
    }

    #[test]
    fn unknown_endpoint_is_skipped() {
        let net = line(b_station(), vec![]);
        let trains = vec![train(1, "1", 1, 0, 3, 60), train(2, "3", 1, 10, 99, 40)];
        assert!(detect(&net, &trains, &[]).is_empty());
    }

    #[test]
    fn empty_and_single_inputs() {
        let net = line(b_station(), vec![]);
        assert!(detect(&net, &[], &[]).is_empty());
        assert!(detect(&net, &[train(1, "1", 1, 0, 3, 60)], &[]).is_empty());
    }

    #[test]
    fn explicit_direction_overrides_number() {
        let net = line(b_station().with_tracks(2), vec![]);
        let mut a = train(1, "2", 1, 0, 3, 40);
        let b = train(2, "1", 3, 0, 1, 40);
        a.direction = Some(Direction::Odd);
        // Same declared direction, so the crossing counts
        assert_eq!(detect(&net, &[a, b], &[]).len(), 1);
    }

    #[test]
    fn conflict_between_is_symmetric() {
        let net = line(b_station(), vec![]);
        let t1 = train(1, "2", 1, 0, 3, 40);
        let t2 = train(2, "1", 3, 0, 1, 40);
        let stops = vec![stop(1, 1, 2, 18, 22), stop(2, 2, 2, 20, 24)];
        let a = TrainRun::build(&net, &t1, &stops).unwrap();
        let b = TrainRun::build(&net, &t2, &stops).unwrap();

        let config = DetectorConfig::default();
        assert_eq!(
            conflict_between(&net, &a, &b, &config),
            conflict_between(&net, &b, &a, &config)
        );
    }
}
