//! Terrain kinds and the immutable map grid.

use crate::geom::{Point, Range, RangeIter};

/// Terrain kind of a single tile.
///
/// Passability is not a property of the terrain itself; it is derived per
/// movement class by the cost model in `skirm-tactics`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    Ground,
    Road,
    Forest,
    Hill,
    Mountain,
    River,
    Wall,
}

impl Terrain {
    /// All terrain kinds, in declaration order.
    pub const ALL: [Terrain; 7] = [
        Terrain::Ground,
        Terrain::Road,
        Terrain::Forest,
        Terrain::Hill,
        Terrain::Mountain,
        Terrain::River,
        Terrain::Wall,
    ];
}

/// A read-only rectangular grid of [`Terrain`], the static map query
/// surface. Built once, then shared immutably for the duration of a turn.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainGrid {
    range: Range,
    cells: Vec<Terrain>,
}

impl TerrainGrid {
    /// Create a `width` x `height` grid filled with `fill`, origin at (0, 0).
    pub fn new(width: i32, height: i32, fill: Terrain) -> Self {
        let range = Range::new(0, 0, width.max(0), height.max(0));
        Self {
            cells: vec![fill; range.len()],
            range,
        }
    }

    /// The grid rectangle.
    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }

    /// Whether `p` is inside the map.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.range.contains(p)
    }

    /// Terrain at `p`, or `None` when out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<Terrain> {
        self.idx(p).map(|i| self.cells[i])
    }

    /// Set the terrain at `p`. Out-of-bounds writes are ignored.
    ///
    /// Intended for map construction; once queries begin the grid is
    /// treated as immutable.
    pub fn set(&mut self, p: Point, t: Terrain) {
        if let Some(i) = self.idx(p) {
            self.cells[i] = t;
        }
    }

    /// The in-bounds cardinal neighbors of `p` (at most four).
    pub fn neighbors_4(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        p.neighbors_4().into_iter().filter(|&n| self.contains(n))
    }

    /// Row-major iterator over every in-bounds position.
    #[inline]
    pub fn positions(&self) -> RangeIter {
        self.range.iter()
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if !self.range.contains(p) {
            return None;
        }
        let x = (p.x - self.range.min.x) as usize;
        let y = (p.y - self.range.min.y) as usize;
        Some(y * self.range.width() as usize + x)
    }
}
