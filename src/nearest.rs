//! Nearest segment query.
//!
//! A square window around the query point bounds the candidate set; the
//! half-width must be tuned so that, at the dataset's edge density, at least
//! one sub-edge always intersects the window. That assumption is checked, not
//! trusted: an empty candidate set or a winning chord outside the window is a
//! hard error, never a silent best-effort answer.

use geo::{Coord, Intersects, Line, Rect};
use rstar::AABB;

use crate::error::{Error, Result};
use crate::index::SegmentIndex;
use crate::model::SegmentId;

/// Default window half-width, in degrees. Tuned for typical urban street
/// density; override per profile for sparser networks.
pub const MIN_SIZE: f64 = 0.0006;

/// Closest sub-edge to a query point.
#[derive(Debug, Clone, Copy)]
pub struct NearestSegment {
    pub segment: SegmentId,
    pub chord: Line<f64>,
    /// Point on the chord closest to the query point
    pub closest: Coord<f64>,
    /// Straight-line distance from the query point, in native units
    pub distance: f64,
}

/// Find the sub-edge closest to `point` among all sub-edges whose bounding
/// box intersects the window of the given half-width.
pub fn nearest_segment(
    index: &SegmentIndex,
    point: Coord<f64>,
    half_width: f64,
) -> Result<NearestSegment> {
    let window = AABB::from_corners(
        [point.x - half_width, point.y - half_width],
        [point.x + half_width, point.y + half_width],
    );

    let mut best: Option<NearestSegment> = None;
    for hit in index.locate_window(&window) {
        let (closest, distance) = project_onto_chord(point, hit.chord);
        // `<=` keeps the later candidate on ties
        if best.as_ref().map_or(true, |b| distance <= b.distance) {
            best = Some(NearestSegment {
                segment: hit.segment,
                chord: hit.chord,
                closest,
                distance,
            });
        }
    }

    let Some(best) = best else {
        return Err(Error::IndexAssumption(format!(
            "no sub-edge within the search window around ({}, {}); \
             the window half-width ({half_width}) is too small for this network",
            point.x, point.y
        )));
    };

    // The window must geometrically reach the winning chord, otherwise a
    // closer segment outside the window could have been missed.
    let window_rect = Rect::new(
        Coord {
            x: point.x - half_width,
            y: point.y - half_width,
        },
        Coord {
            x: point.x + half_width,
            y: point.y + half_width,
        },
    );
    if !window_rect.to_polygon().intersects(&best.chord) {
        return Err(Error::IndexAssumption(format!(
            "winning chord lies outside the search window around ({}, {}); \
             the window half-width ({half_width}) is too small for this network",
            point.x, point.y
        )));
    }

    Ok(best)
}

/// Closest point on the chord `(b, c)` to `p`, via the projection parameter
/// `t = <p-b, c-b> / |c-b|^2`. Outside `(0, 1)` the projection falls beyond
/// the chord and the nearer endpoint wins.
fn project_onto_chord(p: Coord<f64>, chord: Line<f64>) -> (Coord<f64>, f64) {
    let b = chord.start;
    let c = chord.end;

    let len2 = (c.x - b.x).powi(2) + (c.y - b.y).powi(2);
    if len2 == 0.0 {
        return (b, distance(p, b));
    }

    let t = ((p.x - b.x) * (c.x - b.x) + (p.y - b.y) * (c.y - b.y)) / len2;
    if t <= 0.0 {
        (b, distance(p, b))
    } else if t >= 1.0 {
        (c, distance(p, c))
    } else {
        let projected = Coord {
            x: b.x + t * (c.x - b.x),
            y: b.y + t * (c.y - b.y),
        };
        (projected, distance(p, projected))
    }
}

fn distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}
