//! Segment splitter.
//!
//! Groups edges by street name, chains each group into a connected (multi)line,
//! cuts the merged geometry at every detected intersection, and flattens the
//! results into the global list of real segments: atomic street pieces with no
//! intersection in their interior.

use geo::{Coord, Distance, Euclidean, LineString, Point};
use hashbrown::HashMap;
use tracing::{debug, info};

use crate::detect::IntersectionMap;
use crate::error::{Error, Result};
use crate::model::{Edge, EdgeId, StreetGeometry, StreetName, QUANTIZE_SCALE};

/// Maximum distance between an intersection point and the vertex it snaps to.
/// Truncating quantization can displace a vertex by up to `1/QUANTIZE_SCALE`
/// per axis, so the tolerance covers the diagonal worst case.
pub const CUT_TOLERANCE: f64 = 2.0 / QUANTIZE_SCALE;

/// Build the real-segment list from raw edges and detected intersections.
///
/// Street groups are flattened in sorted name order so segment ids are
/// reproducible across runs.
pub fn build_real_segments(
    edges: &[Edge],
    names: &HashMap<EdgeId, StreetName>,
    intersections: &IntersectionMap,
) -> Result<Vec<LineString<f64>>> {
    // Group edge geometries by street-name key
    let mut by_name: HashMap<&str, Vec<LineString<f64>>> = HashMap::new();
    for edge in edges {
        let Some(name) = names.get(&edge.id) else {
            debug!("edge {} has no name mapping, excluding it", edge.id);
            continue;
        };
        by_name
            .entry(name.key())
            .or_default()
            .push(edge.geometry.clone());
    }

    let mut keys: Vec<&str> = by_name.keys().copied().collect();
    keys.sort_unstable();

    let mut segments = Vec::new();
    for key in keys {
        let lines = by_name.remove(key).unwrap_or_default();
        let mut street = merge_lines(lines);

        // Cut at every intersection this street participates in
        for (point, streets) in intersections {
            if streets.contains(key) {
                street = cut_street(street, point.dequantize());
            }
        }

        flatten(street, &mut segments)?;
    }

    info!("Generated {} real segments", segments.len());
    Ok(segments)
}

/// Chain a group of edge lines into one street geometry by matching
/// endpoints, reversing pieces as needed. Disconnected groups come out as
/// multiple disjoint pieces.
pub fn merge_lines(lines: Vec<LineString<f64>>) -> StreetGeometry {
    let mut remaining: Vec<Vec<Coord<f64>>> = lines.into_iter().map(|l| l.0).collect();
    let mut pieces: Vec<LineString<f64>> = Vec::new();

    while !remaining.is_empty() {
        let mut current = remaining.remove(0);

        let mut merged = true;
        while merged && !remaining.is_empty() {
            merged = false;

            let current_start = current.first().copied();
            let current_end = current.last().copied();

            for i in 0..remaining.len() {
                let line = &remaining[i];
                let line_start = line.first().copied();
                let line_end = line.last().copied();

                if current_end == line_start {
                    let mut line = remaining.remove(i);
                    line.remove(0); // Remove duplicate point
                    current.extend(line);
                    merged = true;
                    break;
                } else if current_end == line_end {
                    let mut line = remaining.remove(i);
                    line.reverse();
                    line.remove(0);
                    current.extend(line);
                    merged = true;
                    break;
                } else if current_start == line_end {
                    let mut line = remaining.remove(i);
                    line.pop();
                    line.extend(current);
                    current = line;
                    merged = true;
                    break;
                } else if current_start == line_start {
                    let mut line = remaining.remove(i);
                    line.reverse();
                    line.pop();
                    line.extend(current);
                    current = line;
                    merged = true;
                    break;
                }
            }
        }

        pieces.push(LineString::new(current));
    }

    StreetGeometry::from_pieces(pieces)
}

/// Cut a street at the vertex nearest to `point`, when that vertex lies
/// within [`CUT_TOLERANCE`]. Every piece running through the intersection is
/// cut, so disjoint pieces whose vertices collapse to the same quantized
/// point all split there. A cut at an interior vertex splits its piece in
/// two; a cut at a piece endpoint is a no-op; a piece with no qualifying
/// vertex is left alone rather than cut off-vertex.
pub fn cut_street(street: StreetGeometry, point: Coord<f64>) -> StreetGeometry {
    let pieces = street.into_pieces();
    let mut result = Vec::with_capacity(pieces.len());

    for piece in pieces {
        let mut nearest: Option<(usize, f64)> = None;
        for (vi, &vertex) in piece.0.iter().enumerate() {
            let d = Euclidean.distance(Point::from(vertex), Point::from(point));
            if nearest.map_or(true, |(_, bd)| d < bd) {
                nearest = Some((vi, d));
            }
        }

        match nearest {
            Some((vi, d)) if d < CUT_TOLERANCE && vi > 0 && vi < piece.0.len() - 1 => {
                let coords = piece.0;
                result.push(LineString::new(coords[..=vi].to_vec()));
                result.push(LineString::new(coords[vi..].to_vec()));
            }
            _ => result.push(piece),
        }
    }

    StreetGeometry::from_pieces(result)
}

/// Append a street's final pieces to the global segment list.
fn flatten(street: StreetGeometry, segments: &mut Vec<LineString<f64>>) -> Result<()> {
    match street {
        StreetGeometry::Line(line) => {
            push_segment(line, segments)?;
        }
        StreetGeometry::MultiLine(lines) => {
            for line in lines {
                push_segment(line, segments)?;
            }
        }
    }
    Ok(())
}

fn push_segment(line: LineString<f64>, segments: &mut Vec<LineString<f64>>) -> Result<()> {
    if line.0.len() < 2 {
        return Err(Error::Format(format!(
            "degenerate street piece with {} vertices",
            line.0.len()
        )));
    }
    segments.push(line);
    Ok(())
}
