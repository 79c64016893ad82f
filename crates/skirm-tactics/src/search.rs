//! The reachability engine: one best-first search, two modes.
//!
//! [`Search::flood`] is Dijkstra (no goal, expansion bounded by a movement
//! budget) and powers movement-range queries. [`Search::path`] is A* (goal
//! plus admissible heuristic, optional budget cap) and powers "move here"
//! queries. Both share the relaxation rules supplied by a
//! [`WeightedPather`] and the same internal node storage.
//!
//! `Search` owns flat node arrays sized to the grid rectangle and
//! invalidates them lazily with a generation counter, so repeated queries
//! incur no allocations after warm-up.

use std::collections::BinaryHeap;

use skirm_core::{Point, Range};

use crate::traits::{AstarPather, WeightedPather};

/// Sentinel cost meaning "not reached."
pub const UNREACHABLE: i32 = i32::MAX;

/// Budget value that never rejects an expansion.
pub const UNBOUNDED: i32 = i32::MAX;

/// A reached position with its lowest known cumulative cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReachNode {
    pub pos: Point,
    pub cost: i32,
}

/// Internal per-tile search state, lazily invalidated by generation.
#[derive(Clone)]
struct Node {
    g: i32,
    parent: usize,
    generation: u32,
    open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            parent: usize::MAX,
            generation: 0,
            open: false,
        }
    }
}

/// Frontier entry ordered by priority, then by flat index.
///
/// The index tiebreak makes equal-priority pops come out in ascending
/// (y, x) order, so identical inputs always produce identical results.
#[derive(Clone, Copy, Eq, PartialEq)]
struct NodeRef {
    idx: usize,
    f: i32,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reversed so BinaryHeap (a max-heap) pops the smallest f first.
        other.f.cmp(&self.f).then(other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Reusable search state for one grid rectangle.
pub struct Search {
    range: Range,
    width: usize,
    nodes: Vec<Node>,
    generation: u32,
    cost_map: Vec<i32>,
    results: Vec<ReachNode>,
    nbuf: Vec<Point>,
}

impl Search {
    /// Create search state covering `range`.
    pub fn new(range: Range) -> Self {
        let len = range.len();
        Self {
            range,
            width: range.width().max(0) as usize,
            nodes: vec![Node::default(); len],
            generation: 0,
            cost_map: vec![UNREACHABLE; len],
            results: Vec::new(),
            nbuf: Vec::with_capacity(4),
        }
    }

    /// The rectangle being searched.
    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }

    // -----------------------------------------------------------------------
    // Movement-range mode (Dijkstra)
    // -----------------------------------------------------------------------

    /// Expand outward from `start`, recording every tile whose cumulative
    /// cost stays within `budget`. Pass [`UNBOUNDED`] for no cap.
    ///
    /// Returns the reached tiles in settled order (ascending cost, ties by
    /// ascending (y, x)). An out-of-range `start` yields an empty slice.
    /// Costs remain queryable through [`cost_at`](Search::cost_at) and
    /// predecessors through [`came_from`](Search::came_from) until the next
    /// query.
    pub fn flood<P: WeightedPather>(
        &mut self,
        pather: &P,
        start: Point,
        budget: i32,
    ) -> &[ReachNode] {
        for v in self.cost_map.iter_mut() {
            *v = UNREACHABLE;
        }
        self.results.clear();

        self.generation = self.generation.wrapping_add(1);
        let cur_gen = self.generation;

        let Some(si) = self.idx(start) else {
            return &self.results;
        };

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        {
            let n = &mut self.nodes[si];
            n.g = 0;
            n.parent = usize::MAX;
            n.generation = cur_gen;
            n.open = true;
        }
        self.cost_map[si] = 0;
        open.push(NodeRef { idx: si, f: 0 });

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(current) = open.pop() {
            let ci = current.idx;
            let cn = &self.nodes[ci];
            if cn.generation != cur_gen || !cn.open {
                continue;
            }
            let current_g = cn.g;
            self.nodes[ci].open = false;

            let cp = self.point(ci);
            self.results.push(ReachNode {
                pos: cp,
                cost: current_g,
            });

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative = current_g + pather.cost(cp, np);
                if tentative > budget {
                    continue;
                }

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    if tentative >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                }

                n.g = tentative;
                n.parent = ci;
                n.open = true;
                self.cost_map[ni] = tentative;
                open.push(NodeRef {
                    idx: ni,
                    f: tentative,
                });
            }
        }

        self.nbuf = nbuf;
        &self.results
    }

    /// Cumulative cost recorded for `p` by the last [`flood`](Search::flood)
    /// call, or [`UNREACHABLE`].
    #[inline]
    pub fn cost_at(&self, p: Point) -> i32 {
        match self.idx(p) {
            Some(i) => self.cost_map[i],
            None => UNREACHABLE,
        }
    }

    /// The tile `p` was reached from in the last query, if any.
    pub fn came_from(&self, p: Point) -> Option<Point> {
        let i = self.idx(p)?;
        let n = &self.nodes[i];
        if n.generation != self.generation || n.parent == usize::MAX {
            return None;
        }
        Some(self.point(n.parent))
    }

    // -----------------------------------------------------------------------
    // Path mode (A*)
    // -----------------------------------------------------------------------

    /// Compute the cheapest path from `from` to `to`, inclusive of both
    /// endpoints, using the pather's admissible heuristic.
    ///
    /// `budget`, when given, caps the cumulative cost exactly like flood
    /// mode. Returns `None` when no path exists within the cap — distinct
    /// from `Some(vec![from])`, the zero-cost path to the start itself.
    pub fn path<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
        budget: Option<i32>,
    ) -> Option<Vec<Point>> {
        let start_idx = self.idx(from)?;
        let goal_idx = self.idx(to)?;
        let budget = budget.unwrap_or(UNBOUNDED);

        if start_idx == goal_idx {
            return Some(vec![from]);
        }

        self.generation = self.generation.wrapping_add(1);
        let cur_gen = self.generation;

        {
            let n = &mut self.nodes[start_idx];
            n.g = 0;
            n.parent = usize::MAX;
            n.generation = cur_gen;
            n.open = true;
        }

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        open.push(NodeRef {
            idx: start_idx,
            f: pather.estimate(from, to),
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let found = loop {
            let Some(current) = open.pop() else {
                break false;
            };

            let ci = current.idx;
            if self.nodes[ci].generation != cur_gen || !self.nodes[ci].open {
                continue;
            }

            // With a consistent heuristic the goal's first pop is provably
            // its minimal-cost arrival, so the search may stop here.
            if ci == goal_idx {
                break true;
            }

            self.nodes[ci].open = false;
            let current_g = self.nodes[ci].g;
            let current_point = self.point(ci);

            nbuf.clear();
            pather.neighbors(current_point, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative = current_g + pather.cost(current_point, np);
                if tentative > budget {
                    continue;
                }

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    if tentative >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                }

                n.g = tentative;
                n.parent = ci;
                n.open = true;
                open.push(NodeRef {
                    idx: ni,
                    f: tentative + pather.estimate(np, to),
                });
            }
        };

        self.nbuf = nbuf;

        if !found {
            return None;
        }

        let mut path = Vec::new();
        let mut ci = goal_idx;
        while ci != usize::MAX {
            path.push(self.point(ci));
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        Some(path)
    }

    /// Cumulative cost of the goal after a successful [`path`](Search::path)
    /// call: the `g` value recorded for `p` in the current generation.
    pub fn path_cost_at(&self, p: Point) -> i32 {
        match self.idx(p) {
            Some(i) if self.nodes[i].generation == self.generation => self.nodes[i].g,
            _ => UNREACHABLE,
        }
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if !self.range.contains(p) {
            return None;
        }
        let x = (p.x - self.range.min.x) as usize;
        let y = (p.y - self.range.min.y) as usize;
        Some(y * self.width + x)
    }

    #[inline]
    fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.range.min.x;
        let y = (idx / self.width) as i32 + self.range.min.y;
        Point::new(x, y)
    }
}
