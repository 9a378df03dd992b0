//! Proximity calculator.
//!
//! Given the winning real segment and the closest point on it, derive the
//! middleness percentage and the metric distance to the nearer segment end.

use geo::{Coord, Euclidean, Length, LineLocatePoint, LineString, Point};

use crate::error::{Error, Result};
use crate::model::ProximityResult;
use crate::projection::metric_length;

/// Compute the proximity figures for `closest`, a point known to lie on
/// `segment`.
pub fn proximity(segment: &LineString<f64>, closest: Coord<f64>) -> Result<ProximityResult> {
    let total = Euclidean.length(segment);
    if total <= 0.0 {
        return Err(Error::Format(
            "cannot compute proximity on a zero-length segment".to_string(),
        ));
    }

    let fraction = segment
        .line_locate_point(&Point::from(closest))
        .ok_or_else(|| {
            Error::Format("could not locate the closest point along its segment".to_string())
        })?;

    // 0 at either endpoint, 100 at the midpoint
    let middleness_pct = 100.0 * fraction.min(1.0 - fraction) / 0.5;

    let (left, right) = cut_at(segment, fraction * total);
    let distance_to_segment_end = metric_length(&left).min(metric_length(&right));

    Ok(ProximityResult {
        distance_to_segment_end,
        middleness_pct,
    })
}

/// Cut a linestring in two at an arc-length distance from its start. At or
/// beyond the extremes one side degenerates to a zero-length piece.
fn cut_at(line: &LineString<f64>, distance: f64) -> (LineString<f64>, LineString<f64>) {
    let coords = &line.0;
    let first = coords[0];
    let last = coords[coords.len() - 1];

    if distance <= 0.0 {
        return (LineString::new(vec![first, first]), line.clone());
    }

    let mut acc = 0.0;
    for i in 0..coords.len() - 1 {
        let chord_len = Euclidean.length(&geo::Line::new(coords[i], coords[i + 1]));
        let next = acc + chord_len;
        if next < distance {
            acc = next;
            continue;
        }

        if next == distance {
            // Cut lands exactly on vertex i+1
            let left = coords[..=i + 1].to_vec();
            let mut right = coords[i + 1..].to_vec();
            if right.len() < 2 {
                right.push(last);
            }
            return (LineString::new(left), LineString::new(right));
        }

        let t = (distance - acc) / chord_len;
        let cut_point = Coord {
            x: coords[i].x + t * (coords[i + 1].x - coords[i].x),
            y: coords[i].y + t * (coords[i + 1].y - coords[i].y),
        };
        let mut left = coords[..=i].to_vec();
        left.push(cut_point);
        let mut right = vec![cut_point];
        right.extend_from_slice(&coords[i + 1..]);
        return (LineString::new(left), LineString::new(right));
    }

    // distance >= total length
    (line.clone(), LineString::new(vec![last, last]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(coords: &[(f64, f64)]) -> LineString<f64> {
        coords.iter().map(|&(x, y)| Coord { x, y }).collect()
    }

    #[test]
    fn endpoint_has_zero_middleness_and_zero_distance() {
        let segment = line(&[(0.0, 0.0), (5.0, 0.0)]);
        let result = proximity(&segment, Coord { x: 5.0, y: 0.0 }).unwrap();
        assert!(result.middleness_pct.abs() < 1e-9);
        assert!(result.distance_to_segment_end.abs() < 1e-6);
    }

    #[test]
    fn midpoint_has_full_middleness_and_half_the_metric_length() {
        let segment = line(&[(0.0, 0.0), (5.0, 0.0)]);
        let result = proximity(&segment, Coord { x: 2.5, y: 0.0 }).unwrap();
        assert!((result.middleness_pct - 100.0).abs() < 1e-9);

        let half = metric_length(&segment) / 2.0;
        assert!((result.distance_to_segment_end - half).abs() < 1e-6);
    }

    #[test]
    fn quarter_point_scales_linearly() {
        let segment = line(&[(0.0, 0.0), (4.0, 0.0)]);
        let result = proximity(&segment, Coord { x: 1.0, y: 0.0 }).unwrap();
        assert!((result.middleness_pct - 50.0).abs() < 1e-9);
    }

    #[test]
    fn multi_vertex_segment_measures_along_the_arc() {
        // L-shaped segment on the equator: two unit-degree legs
        let segment = line(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        let result = proximity(&segment, Coord { x: 1.0, y: 0.0 }).unwrap();
        // The corner vertex is the arc midpoint
        assert!((result.middleness_pct - 100.0).abs() < 1e-6);
    }

    #[test]
    fn cut_in_chord_interior_interpolates() {
        let (left, right) = cut_at(&line(&[(0.0, 0.0), (4.0, 0.0)]), 1.0);
        assert_eq!(left.0, vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 0.0 }]);
        assert_eq!(right.0, vec![Coord { x: 1.0, y: 0.0 }, Coord { x: 4.0, y: 0.0 }]);
    }

    #[test]
    fn cut_on_a_vertex_keeps_it_on_both_sides() {
        let segment = line(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let chord = Euclidean.length(&geo::Line::new(
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 1.0, y: 0.0 },
        ));
        let (left, right) = cut_at(&segment, chord);
        assert_eq!(left.0.len(), 2);
        assert_eq!(right.0.len(), 2);
        assert_eq!(left.0[1], right.0[0]);
    }

    #[test]
    fn cut_at_zero_yields_a_degenerate_left_piece() {
        let segment = line(&[(0.0, 0.0), (4.0, 0.0)]);
        let (left, right) = cut_at(&segment, 0.0);
        assert_eq!(metric_length(&left), 0.0);
        assert_eq!(right.0, segment.0);
    }

    #[test]
    fn cut_past_the_end_yields_a_degenerate_right_piece() {
        let segment = line(&[(0.0, 0.0), (4.0, 0.0)]);
        let (left, right) = cut_at(&segment, 100.0);
        assert_eq!(left.0, segment.0);
        assert_eq!(metric_length(&right), 0.0);
    }

    #[test]
    fn zero_length_segment_is_a_format_error() {
        let segment = line(&[(1.0, 1.0), (1.0, 1.0)]);
        let err = proximity(&segment, Coord { x: 1.0, y: 1.0 }).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }
}
