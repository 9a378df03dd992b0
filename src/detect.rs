//! Intersection detector.
//!
//! An intersection is a quantized vertex shared by at least two distinctly
//! named streets. Working off quantized integer keys makes the shared-vertex
//! test robust to floating-point noise between edges.

use hashbrown::{HashMap, HashSet};
use tracing::{debug, info};

use crate::model::{Edge, EdgeId, QuantizedPoint, StreetName};

/// Quantized point -> set of distinct street-name keys observed there.
/// Every entry has at least two names.
pub type IntersectionMap = HashMap<QuantizedPoint, HashSet<String>>;

/// Find all intersections in the network.
///
/// Edges with no entry in the name lookup are excluded (non-fatal).
pub fn detect_intersections(
    edges: &[Edge],
    names: &HashMap<EdgeId, StreetName>,
) -> IntersectionMap {
    let mut points_to_streets: IntersectionMap = HashMap::new();
    let mut skipped = 0usize;

    for edge in edges {
        let Some(name) = names.get(&edge.id) else {
            debug!("edge {} has no name mapping, excluding it", edge.id);
            skipped += 1;
            continue;
        };

        for &coord in &edge.geometry.0 {
            points_to_streets
                .entry(QuantizedPoint::quantize(coord))
                .or_default()
                .insert(name.key().to_string());
        }
    }

    if skipped > 0 {
        info!("Excluded {skipped} edges missing from the name map");
    }

    // Only points on more than one street qualify
    points_to_streets.retain(|_, streets| streets.len() > 1);
    points_to_streets
}
