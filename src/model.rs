//! Core data model for the street-network pipeline.

use geo::{Coord, LineString, MultiLineString};

/// Opaque edge identifier from the road-network source
/// (the `street_edge_id` feature property).
pub type EdgeId = i64;

/// Position of a real segment in the preprocessed segment list.
/// Assigned by iteration order; carries no semantic meaning.
pub type SegmentId = usize;

/// Scale applied to lon/lat before truncating to integers, so vertices can be
/// compared exactly despite floating-point noise.
pub const QUANTIZE_SCALE: f64 = 1e5;

/// One raw road-network polyline. Source of truth, never mutated.
#[derive(Debug, Clone)]
pub struct Edge {
    pub id: EdgeId,
    pub geometry: LineString<f64>,
}

/// Street name attached to an edge by the name source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StreetName {
    /// The source had no name for this edge. All unnamed edges share one
    /// grouping key, so two *different* unnamed streets meeting will not
    /// register as an intersection. Known limitation, kept on purpose.
    Unnamed,
    Named(String),
}

impl StreetName {
    /// Key used for grouping and intersection detection.
    pub fn key(&self) -> &str {
        match self {
            StreetName::Unnamed => "",
            StreetName::Named(name) => name,
        }
    }

    pub fn from_field(raw: &str) -> Self {
        if raw.is_empty() {
            StreetName::Unnamed
        } else {
            StreetName::Named(raw.to_string())
        }
    }
}

/// Integer coordinate key, exact-comparable. Detection-phase only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuantizedPoint {
    pub x: i64,
    pub y: i64,
}

impl QuantizedPoint {
    pub fn quantize(coord: Coord<f64>) -> Self {
        Self {
            x: (coord.x * QUANTIZE_SCALE) as i64,
            y: (coord.y * QUANTIZE_SCALE) as i64,
        }
    }

    /// Recover the float coordinate for cutting.
    pub fn dequantize(self) -> Coord<f64> {
        Coord {
            x: self.x as f64 / QUANTIZE_SCALE,
            y: self.y as f64 / QUANTIZE_SCALE,
        }
    }
}

/// Merged per-name street geometry: one connected line, or several disjoint
/// pieces. Consumed during splitting.
#[derive(Debug, Clone)]
pub enum StreetGeometry {
    Line(LineString<f64>),
    MultiLine(MultiLineString<f64>),
}

impl StreetGeometry {
    pub fn from_pieces(mut pieces: Vec<LineString<f64>>) -> Self {
        if pieces.len() == 1 {
            StreetGeometry::Line(pieces.remove(0))
        } else {
            StreetGeometry::MultiLine(MultiLineString::new(pieces))
        }
    }

    pub fn into_pieces(self) -> Vec<LineString<f64>> {
        match self {
            StreetGeometry::Line(line) => vec![line],
            StreetGeometry::MultiLine(lines) => lines.0,
        }
    }
}

/// Answer for one query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityResult {
    /// Planar-metric distance from the point to the nearer end of its
    /// enclosing segment, in meters.
    pub distance_to_segment_end: f64,
    /// 0 at either segment end, 100 at the midpoint.
    pub middleness_pct: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantize_truncates_toward_zero() {
        let q = QuantizedPoint::quantize(Coord {
            x: -122.305442810059,
            y: 47.5775947570801,
        });
        assert_eq!(q.x, -12230544);
        assert_eq!(q.y, 4757759);
    }

    #[test]
    fn quantize_is_noise_tolerant() {
        let a = QuantizedPoint::quantize(Coord { x: 5.0, y: 0.000001 });
        let b = QuantizedPoint::quantize(Coord { x: 5.000000001, y: 0.0 });
        assert_eq!(a, b);
    }

    #[test]
    fn unnamed_streets_share_a_key() {
        assert_eq!(StreetName::Unnamed.key(), "");
        assert_eq!(StreetName::from_field(""), StreetName::Unnamed);
        assert_eq!(
            StreetName::from_field("Main St"),
            StreetName::Named("Main St".to_string())
        );
    }
}
