//! Single-track section checks.

use crate::domain::SegmentKey;
use crate::model::{Interval, Network, TimeDistancePath, Visit};

/// Time window a train spends in a section: from departing the first of
/// the two stations it reaches to arriving at the other.
fn section_window(path: &TimeDistancePath, key: SegmentKey) -> Option<Interval> {
    let (x, y) = key.stations();
    let (vx, vy) = (path.visit(x)?, path.visit(y)?);
    let (enter, leave): (&Visit, &Visit) =
        if (vx.arrival, vx.departure) <= (vy.arrival, vy.departure) {
            (vx, vy)
        } else {
            (vy, vx)
        };
    Some(Interval::new(enter.departure, leave.arrival))
}

/// First single-track section, in distance order, that both trains traverse
/// with overlapping windows. Direction does not matter.
pub(super) fn conflicting_section(
    network: &Network,
    a: &TimeDistancePath,
    b: &TimeDistancePath,
) -> Option<SegmentKey> {
    network.single_track_sections().into_iter().find(|key| {
        match (section_window(a, *key), section_window(b, *key)) {
            (Some(wa), Some(wb)) => wa.overlaps(&wb),
            _ => false,
        }
    })
}
