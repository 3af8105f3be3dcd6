//! Line intersection in the time-distance plane.

use crate::model::PathPoint;

/// True if two segments cross at a point strictly inside both.
///
/// Uses the parametric determinant form with time on the x axis and
/// distance on the y axis. Segments whose determinant is below `epsilon`
/// in magnitude are treated as parallel and never intersect, including
/// collinear overlaps. Touching at an endpoint is not an intersection.
///
/// # Examples
///
/// ```
/// use timetable_engine::conflict::segments_intersect;
/// use timetable_engine::domain::Minutes;
/// use timetable_engine::model::PathPoint;
///
/// let p = |t, d| PathPoint { time: Minutes::new(t), distance: d };
///
/// // One train runs up the line while another runs down it
/// assert!(segments_intersect((p(0, 0.0), p(60, 30.0)), (p(0, 30.0), p(60, 0.0)), 0.001));
///
/// // Parallel runs never meet
/// assert!(!segments_intersect((p(0, 0.0), p(60, 30.0)), (p(10, 0.0), p(70, 30.0)), 0.001));
/// ```
pub fn segments_intersect(
    a: (PathPoint, PathPoint),
    b: (PathPoint, PathPoint),
    epsilon: f64,
) -> bool {
    let (x1, y1) = (a.0.time.as_f64(), a.0.distance);
    let (x2, y2) = (a.1.time.as_f64(), a.1.distance);
    let (x3, y3) = (b.0.time.as_f64(), b.0.distance);
    let (x4, y4) = (b.1.time.as_f64(), b.1.distance);

    let denom = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if !denom.is_finite() || denom.abs() < epsilon {
        return false;
    }

    let t = ((x1 - x3) * (y3 - y4) - (y1 - y3) * (x3 - x4)) / denom;
    let u = -((x1 - x2) * (y1 - y3) - (y1 - y2) * (x1 - x3)) / denom;

    t > 0.0 && t < 1.0 && u > 0.0 && u < 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Minutes;

    fn p(t: i32, d: f64) -> PathPoint {
        PathPoint {
            time: Minutes::new(t),
            distance: d,
        }
    }

    const EPS: f64 = 0.001;

    #[test]
    fn crossing_runs_intersect() {
        assert!(segments_intersect(
            (p(0, 0.0), p(60, 30.0)),
            (p(0, 30.0), p(60, 0.0)),
            EPS
        ));
    }

    #[test]
    fn shared_endpoint_is_not_an_intersection() {
        // Both runs meet at (60, 30)
        assert!(!segments_intersect(
            (p(0, 0.0), p(60, 30.0)),
            (p(30, 0.0), p(60, 30.0)),
            EPS
        ));
    }

    #[test]
    fn disjoint_in_time() {
        assert!(!segments_intersect(
            (p(0, 0.0), p(60, 30.0)),
            (p(100, 30.0), p(160, 0.0)),
            EPS
        ));
    }

    #[test]
    fn collinear_overlap_is_parallel() {
        assert!(!segments_intersect(
            (p(0, 0.0), p(60, 30.0)),
            (p(30, 15.0), p(90, 45.0)),
            EPS
        ));
    }

    #[test]
    fn zero_length_segment_never_intersects() {
        assert!(!segments_intersect(
            (p(30, 15.0), p(30, 15.0)),
            (p(0, 30.0), p(60, 0.0)),
            EPS
        ));
    }

    #[test]
    fn faster_train_overtakes() {
        // Slow train starts first, fast train catches it
        assert!(segments_intersect(
            (p(0, 0.0), p(100, 50.0)),
            (p(20, 0.0), p(60, 50.0)),
            EPS
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::Minutes;
    use proptest::prelude::*;

    // Whole kilometres keep the determinant arithmetic exact
    fn point() -> impl Strategy<Value = PathPoint> {
        (0i32..1440, 0i32..200).prop_map(|(t, d)| PathPoint {
            time: Minutes::new(t),
            distance: f64::from(d),
        })
    }

    proptest! {
        #[test]
        fn argument_order_does_not_matter(
            a0 in point(),
            a1 in point(),
            b0 in point(),
            b1 in point(),
        ) {
            let forward = segments_intersect((a0, a1), (b0, b1), 0.001);
            prop_assert_eq!(forward, segments_intersect((a1, a0), (b0, b1), 0.001));
            prop_assert_eq!(forward, segments_intersect((b0, b1), (a0, a1), 0.001));
        }

        #[test]
        fn segment_never_crosses_itself(a0 in point(), a1 in point()) {
            prop_assert!(!segments_intersect((a0, a1), (a0, a1), 0.001));
        }
    }
}
