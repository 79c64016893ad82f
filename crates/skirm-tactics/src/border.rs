//! Boundary extraction: tile regions to outline segments.

use std::collections::BTreeSet;

use skirm_core::Point;

/// One unit-length boundary segment on the cell lattice.
///
/// Endpoints are lattice corners, so the tile at `(x, y)` has corners
/// `(x, y)` through `(x+1, y+1)`. Edges are oriented to wind clockwise in
/// screen coordinates (y down) around the region, so consecutive edges of
/// a loop chain head-to-tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BorderEdge {
    pub a: Point,
    pub b: Point,
}

/// Extract the boundary of `region` as an unordered list of oriented edges.
///
/// A tile contributes one edge per side whose neighbor is outside the
/// region (out-of-bounds counts as outside — the region is its own bounds
/// authority). The edges form one or more closed loops, but stitching them
/// into ordered polygons is left to the renderer.
///
/// Output order is deterministic: region tiles in ascending (y, x) order,
/// sides in north, east, south, west order.
pub fn extract_border(region: &BTreeSet<Point>) -> Vec<BorderEdge> {
    let mut edges = Vec::new();
    for &t in region {
        let (x, y) = (t.x, t.y);
        if !region.contains(&Point::new(x, y - 1)) {
            edges.push(BorderEdge {
                a: Point::new(x, y),
                b: Point::new(x + 1, y),
            });
        }
        if !region.contains(&Point::new(x + 1, y)) {
            edges.push(BorderEdge {
                a: Point::new(x + 1, y),
                b: Point::new(x + 1, y + 1),
            });
        }
        if !region.contains(&Point::new(x, y + 1)) {
            edges.push(BorderEdge {
                a: Point::new(x + 1, y + 1),
                b: Point::new(x, y + 1),
            });
        }
        if !region.contains(&Point::new(x - 1, y)) {
            edges.push(BorderEdge {
                a: Point::new(x, y + 1),
                b: Point::new(x, y),
            });
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirm_core::Range;
    use std::collections::BTreeMap;

    fn pts(v: &[(i32, i32)]) -> BTreeSet<Point> {
        v.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    /// Every loop vertex must have as many incoming as outgoing edges.
    fn assert_closed(edges: &[BorderEdge]) {
        let mut degree: BTreeMap<Point, i32> = BTreeMap::new();
        for e in edges {
            *degree.entry(e.a).or_default() += 1;
            *degree.entry(e.b).or_default() -= 1;
        }
        for (corner, d) in degree {
            assert_eq!(d, 0, "unbalanced corner {corner}");
        }
    }

    #[test]
    fn empty_region_has_no_edges() {
        assert!(extract_border(&BTreeSet::new()).is_empty());
    }

    #[test]
    fn single_tile_has_four_edges() {
        let edges = extract_border(&pts(&[(2, 3)]));
        assert_eq!(edges.len(), 4);
        assert_closed(&edges);
        // First edge is the top, left corner to right corner.
        assert_eq!(
            edges[0],
            BorderEdge {
                a: Point::new(2, 3),
                b: Point::new(3, 3),
            }
        );
    }

    #[test]
    fn full_grid_yields_outer_perimeter() {
        let (w, h) = (7, 4);
        let region: BTreeSet<Point> = Range::new(0, 0, w, h).iter().collect();
        let edges = extract_border(&region);
        assert_eq!(edges.len(), (2 * (w + h)) as usize);
        assert_closed(&edges);
    }

    #[test]
    fn region_with_hole_has_two_loops() {
        // 3x3 block minus its center: outer perimeter 12 plus inner 4.
        let mut region: BTreeSet<Point> = Range::new(0, 0, 3, 3).iter().collect();
        region.remove(&Point::new(1, 1));
        let edges = extract_border(&region);
        assert_eq!(edges.len(), 16);
        assert_closed(&edges);
    }

    #[test]
    fn disjoint_blobs_each_get_a_loop() {
        let edges = extract_border(&pts(&[(0, 0), (5, 5)]));
        assert_eq!(edges.len(), 8);
        assert_closed(&edges);
    }

    #[test]
    fn interior_edges_are_suppressed() {
        // A 2x1 domino shares one interior edge: 6 boundary edges, not 8.
        let edges = extract_border(&pts(&[(0, 0), (1, 0)]));
        assert_eq!(edges.len(), 6);
        assert_closed(&edges);
    }

    #[test]
    fn output_is_deterministic() {
        let region = pts(&[(1, 1), (2, 1), (1, 2), (4, 4)]);
        assert_eq!(extract_border(&region), extract_border(&region));
    }
}
