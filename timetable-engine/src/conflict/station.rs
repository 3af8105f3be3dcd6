//! Station capacity checks.

use tracing::trace;

use crate::domain::StationId;
use crate::model::{Network, TimeDistancePath, Visit};

/// First station, in distance order, where the two trains' occupancies
/// overlap and the station cannot hold both.
///
/// Stations with two or more tracks never conflict. A single-track station
/// conflicts unless it has a passing siding, the trains run in opposite
/// directions and both have a recorded stop there.
pub(super) fn conflicting_station(
    network: &Network,
    a: &TimeDistancePath,
    b: &TimeDistancePath,
    opposite: bool,
) -> Option<StationId> {
    let mut shared: Vec<(&Visit, &Visit)> = a
        .visits()
        .filter_map(|va| b.visit(va.station_id).map(|vb| (va, vb)))
        .collect();
    shared.sort_by(|(x, _), (y, _)| {
        let cx = network.coordinate(x.station_id).unwrap_or(f64::NAN);
        let cy = network.coordinate(y.station_id).unwrap_or(f64::NAN);
        cx.total_cmp(&cy).then(x.station_id.cmp(&y.station_id))
    });

    shared.into_iter().find_map(|(va, vb)| {
        if !va.occupancy().overlaps(&vb.occupancy()) {
            return None;
        }
        let station = network.station(va.station_id)?;
        if !station.is_single_track() {
            return None;
        }
        if station.allows_passing() && opposite && va.is_recorded_stop() && vb.is_recorded_stop() {
            trace!(station = %station.id, "Trains pass at siding");
            return None;
        }
        Some(station.id)
    })
}
