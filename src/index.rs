//! Spatial index over segment sub-edges.
//!
//! Each real segment is decomposed into its straight chords between
//! consecutive vertices; the chords' bounding boxes are bulk-loaded into an
//! R-tree. Built once, read-only afterward.

use geo::{Line, LineString};
use rstar::{RTree, RTreeObject, AABB};
use tracing::info;

use crate::model::SegmentId;

/// Wrapper for R-tree indexing of one segment chord
#[derive(Debug, Clone)]
pub struct IndexedSubEdge {
    /// Real segment this chord belongs to
    pub segment: SegmentId,
    /// Chord endpoints, in segment order
    pub chord: Line<f64>,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedSubEdge {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl IndexedSubEdge {
    fn new(segment: SegmentId, chord: Line<f64>) -> Self {
        let envelope = AABB::from_corners(
            [
                chord.start.x.min(chord.end.x),
                chord.start.y.min(chord.end.y),
            ],
            [
                chord.start.x.max(chord.end.x),
                chord.start.y.max(chord.end.y),
            ],
        );
        Self {
            segment,
            chord,
            envelope,
        }
    }
}

/// R-tree over all sub-edges of the real-segment list
pub struct SegmentIndex {
    tree: RTree<IndexedSubEdge>,
}

impl SegmentIndex {
    /// Bulk-load the index from the real-segment list
    pub fn build(segments: &[LineString<f64>]) -> Self {
        info!("Building spatial index for {} segments...", segments.len());

        let indexed: Vec<IndexedSubEdge> = segments
            .iter()
            .enumerate()
            .flat_map(|(id, segment)| {
                segment.lines().map(move |chord| IndexedSubEdge::new(id, chord))
            })
            .collect();

        let tree = RTree::bulk_load(indexed);
        info!("Spatial index built with {} sub-edges", tree.size());

        Self { tree }
    }

    /// All sub-edges whose bounding box intersects the window
    pub fn locate_window<'a>(
        &'a self,
        window: &'a AABB<[f64; 2]>,
    ) -> impl Iterator<Item = &'a IndexedSubEdge> + 'a {
        self.tree.locate_in_envelope_intersecting(window)
    }

    /// Total number of indexed sub-edges
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;

    fn line(coords: &[(f64, f64)]) -> LineString<f64> {
        coords.iter().map(|&(x, y)| Coord { x, y }).collect()
    }

    #[test]
    fn one_sub_edge_per_chord() {
        let segments = vec![
            line(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]),
            line(&[(5.0, -5.0), (5.0, 0.0)]),
        ];
        let index = SegmentIndex::build(&segments);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn window_query_returns_intersecting_boxes_only() {
        let segments = vec![
            line(&[(0.0, 0.0), (1.0, 0.0)]),
            line(&[(10.0, 10.0), (11.0, 10.0)]),
        ];
        let index = SegmentIndex::build(&segments);

        let window = AABB::from_corners([-0.5, -0.5], [0.5, 0.5]);
        let hits: Vec<_> = index.locate_window(&window).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].segment, 0);
    }

    #[test]
    fn sub_edges_carry_their_segment_id() {
        let segments = vec![
            line(&[(0.0, 0.0), (1.0, 0.0)]),
            line(&[(0.0, 1.0), (1.0, 1.0)]),
        ];
        let index = SegmentIndex::build(&segments);

        let window = AABB::from_corners([-1.0, 0.5], [2.0, 1.5]);
        let hits: Vec<_> = index.locate_window(&window).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].segment, 1);
        assert_eq!(hits[0].chord.start, Coord { x: 0.0, y: 1.0 });
    }
}
