//! Station and segment lookup for one snapshot.

use std::collections::HashMap;

use tracing::warn;

use crate::domain::{SegmentKey, Station, StationId, TrackSegment};

/// The route's infrastructure: stations on the distance axis and the
/// segments between them.
///
/// Built once per snapshot and then only read.
#[derive(Debug, Clone, Default)]
pub struct Network {
    stations: HashMap<StationId, Station>,
    /// Station ids sorted by coordinate, ties broken by id.
    order: Vec<StationId>,
    segments: HashMap<SegmentKey, TrackSegment>,
}

impl Network {
    /// Index stations and segments.
    ///
    /// Stations failing validation are still indexed (the engine treats them
    /// with the same rules as any other) but logged. Duplicate segment
    /// records for the same pair resolve to the last one.
    pub fn new(
        stations: impl IntoIterator<Item = Station>,
        segments: impl IntoIterator<Item = TrackSegment>,
    ) -> Self {
        let stations: HashMap<StationId, Station> = stations
            .into_iter()
            .inspect(|s| {
                if let Err(e) = s.validate() {
                    warn!(station = %s.id, error = %e, "Invalid station record");
                }
            })
            .map(|s| (s.id, s))
            .collect();

        let mut order: Vec<StationId> = stations.keys().copied().collect();
        order.sort_by(|a, b| {
            let ca = stations[a].coordinate();
            let cb = stations[b].coordinate();
            ca.total_cmp(&cb).then(a.cmp(b))
        });

        let segments = segments.into_iter().map(|seg| (seg.key(), seg)).collect();

        Self {
            stations,
            order,
            segments,
        }
    }

    /// Look up a station.
    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(&id)
    }

    /// Distance coordinate of a station.
    pub fn coordinate(&self, id: StationId) -> Option<f64> {
        self.station(id).map(Station::coordinate)
    }

    /// Segment between two stations, in either order.
    pub fn segment(&self, a: StationId, b: StationId) -> Option<&TrackSegment> {
        self.segments.get(&SegmentKey::new(a, b))
    }

    /// True only if a segment record exists and is marked single-track.
    pub fn is_single_track_between(&self, a: StationId, b: StationId) -> bool {
        self.segment(a, b).is_some_and(|s| s.is_single_track)
    }

    /// Stations in distance order.
    pub fn ordered(&self) -> impl Iterator<Item = &Station> + '_ {
        self.order.iter().map(|id| &self.stations[id])
    }

    /// Consecutive station pairs along the distance axis.
    pub fn adjacent_pairs(&self) -> impl Iterator<Item = (&Station, &Station)> + '_ {
        self.order
            .windows(2)
            .map(|w| (&self.stations[&w[0]], &self.stations[&w[1]]))
    }

    /// Adjacent station pairs joined by a single-track segment.
    pub fn single_track_sections(&self) -> Vec<SegmentKey> {
        self.adjacent_pairs()
            .filter(|(a, b)| self.is_single_track_between(a.id, b.id))
            .map(|(a, b)| SegmentKey::new(a.id, b.id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: i64, km: f64) -> Station {
        Station::new(StationId(id), format!("S{id}"), id as i32).with_distance(km)
    }

    #[test]
    fn orders_by_distance_not_id() {
        let network = Network::new(
            vec![station(1, 30.0), station(2, 0.0), station(3, 12.5)],
            vec![],
        );
        let ids: Vec<_> = network.ordered().map(|s| s.id).collect();
        assert_eq!(ids, vec![StationId(2), StationId(3), StationId(1)]);
    }

    #[test]
    fn position_is_fallback_coordinate() {
        let a = Station::new(StationId(1), "A", 5);
        let b = Station::new(StationId(2), "B", 2);
        let network = Network::new(vec![a, b], vec![]);

        assert_eq!(network.coordinate(StationId(1)), Some(5.0));
        let ids: Vec<_> = network.ordered().map(|s| s.id).collect();
        assert_eq!(ids, vec![StationId(2), StationId(1)]);
    }

    #[test]
    fn equal_coordinates_break_ties_by_id() {
        let network = Network::new(vec![station(9, 1.0), station(4, 1.0)], vec![]);
        let ids: Vec<_> = network.ordered().map(|s| s.id).collect();
        assert_eq!(ids, vec![StationId(4), StationId(9)]);
    }

    #[test]
    fn segment_lookup_is_symmetric() {
        let network = Network::new(
            vec![station(1, 0.0), station(2, 5.0)],
            vec![TrackSegment::single_track(StationId(2), StationId(1))],
        );

        assert_eq!(
            network.segment(StationId(1), StationId(2)),
            network.segment(StationId(2), StationId(1))
        );
        assert!(network.is_single_track_between(StationId(1), StationId(2)));
        assert!(network.is_single_track_between(StationId(2), StationId(1)));
    }

    #[test]
    fn missing_segment_is_not_single_track() {
        let network = Network::new(vec![station(1, 0.0), station(2, 5.0)], vec![]);
        assert!(network.segment(StationId(1), StationId(2)).is_none());
        assert!(!network.is_single_track_between(StationId(1), StationId(2)));
    }

    #[test]
    fn single_track_sections_only_between_neighbours() {
        let network = Network::new(
            vec![station(1, 0.0), station(2, 5.0), station(3, 9.0)],
            vec![
                TrackSegment::single_track(StationId(1), StationId(2)),
                TrackSegment::multi_track(StationId(2), StationId(3)),
                // Not adjacent on the distance axis, so never a section
                TrackSegment::single_track(StationId(1), StationId(3)),
            ],
        );

        assert_eq!(
            network.single_track_sections(),
            vec![SegmentKey::new(StationId(1), StationId(2))]
        );
    }

    #[test]
    fn unknown_station_lookups() {
        let network = Network::default();
        assert!(network.is_empty());
        assert!(network.station(StationId(1)).is_none());
        assert!(network.coordinate(StationId(1)).is_none());
        assert_eq!(network.adjacent_pairs().count(), 0);
    }
}
