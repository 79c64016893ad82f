//! Search seams and the per-unit grid view the engine searches over.

use skirm_core::{Point, Terrain, TerrainGrid, manhattan};

use crate::cost::{CostTable, TileCost};
use crate::error::{Result, TacticsError};
use crate::occupancy::{Faction, Occupancy};
use crate::unit::UnitStats;

/// Minimal search interface: enumerate the expandable neighbors of a tile.
pub trait Pather {
    /// Append neighbors of `p` into `buf`. The caller clears `buf` first.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Point, to: Point) -> i32;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of distance from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Point, to: Point) -> i32;
}

/// A single unit's view of the battlefield, implementing the pather traits.
///
/// Applies the edge-rejection rules during neighbor enumeration: tiles out
/// of bounds, tiles whose terrain blocks this unit's movement class, and
/// tiles held by a hostile faction are never expanded. Tiles held by
/// friendly or neutral units are expanded (pass-through) but reported as
/// illegal stopping points by [`can_stop`](UnitPather::can_stop).
#[derive(Debug)]
pub struct UnitPather<'a> {
    grid: &'a TerrainGrid,
    occupancy: &'a Occupancy,
    faction: Faction,
    /// Step cost per terrain kind for this unit's class; `None` = blocked.
    row: [Option<i32>; Terrain::ALL.len()],
}

impl<'a> UnitPather<'a> {
    /// Build the view for `unit`, validating up front that `costs` has an
    /// entry for every (terrain, class) pair this grid could present.
    ///
    /// Doing the coverage check here keeps the missing-entry configuration
    /// error out of the search inner loop: once a `UnitPather` exists,
    /// every lookup it performs is known to succeed.
    pub fn new(
        grid: &'a TerrainGrid,
        costs: &'a CostTable,
        occupancy: &'a Occupancy,
        unit: &UnitStats,
    ) -> Result<Self> {
        let mut row = [None; Terrain::ALL.len()];
        let mut seen = [false; Terrain::ALL.len()];
        for p in grid.positions() {
            let terrain = grid.at(p).unwrap_or(Terrain::Wall);
            let i = terrain as usize;
            if seen[i] {
                continue;
            }
            seen[i] = true;
            match costs.get(terrain, unit.class) {
                Some(TileCost::Step(c)) => row[i] = Some(c),
                Some(TileCost::Blocked) => row[i] = None,
                None => {
                    return Err(TacticsError::MissingCost {
                        terrain,
                        class: unit.class,
                    });
                }
            }
        }
        Ok(Self {
            grid,
            occupancy,
            faction: unit.faction,
            row,
        })
    }

    /// Whether this unit's movement class can ever enter `p`.
    #[inline]
    pub fn passable(&self, p: Point) -> bool {
        self.grid.at(p).is_some_and(|t| self.row[t as usize].is_some())
    }

    /// Whether a hostile unit holds `p`.
    #[inline]
    pub fn hostile_at(&self, p: Point) -> bool {
        self.occupancy
            .faction_at(p)
            .is_some_and(|f| self.faction.hostile_to(f))
    }

    /// Whether this unit may legally end movement on `p`.
    ///
    /// A reachable tile held by any other unit is pass-through only. The
    /// unit's own tile is exempt so that "don't move" stays legal.
    #[inline]
    pub fn can_stop(&self, p: Point, own_pos: Point) -> bool {
        self.passable(p) && (p == own_pos || !self.occupancy.occupied(p))
    }

    /// Whether this unit could legally be standing at `p` right now.
    ///
    /// False means a degenerate query start: the caller placed the unit on
    /// a tile it cannot occupy.
    #[inline]
    pub fn valid_start(&self, p: Point) -> bool {
        self.passable(p) && !self.hostile_at(p)
    }
}

impl Pather for UnitPather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for n in p.neighbors_4() {
            if self.grid.contains(n) && self.passable(n) && !self.hostile_at(n) {
                buf.push(n);
            }
        }
    }
}

impl WeightedPather for UnitPather<'_> {
    #[inline]
    fn cost(&self, _from: Point, to: Point) -> i32 {
        // Neighbors are pre-filtered, so the lookup always hits a Step entry.
        self.grid
            .at(to)
            .and_then(|t| self.row[t as usize])
            .unwrap_or(i32::MAX)
    }
}

impl AstarPather for UnitPather<'_> {
    #[inline]
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::MoveClass;
    use skirm_core::Range;

    fn infantry_at(pos: Point) -> UnitStats {
        UnitStats {
            pos,
            faction: Faction::Player,
            class: MoveClass::Infantry,
            move_points: 5,
            min_range: 1,
            max_range: 1,
        }
    }

    #[test]
    fn missing_cost_entry_is_fatal() {
        let mut grid = TerrainGrid::new(3, 3, Terrain::Ground);
        grid.set(Point::new(1, 1), Terrain::River);
        let mut costs = CostTable::new();
        costs.set_for_all_classes(Terrain::Ground, TileCost::Step(1));
        // No entry for River at all.
        let occ = Occupancy::empty(Range::new(0, 0, 3, 3));
        let unit = infantry_at(Point::new(0, 0));
        let err = UnitPather::new(&grid, &costs, &occ, &unit).unwrap_err();
        assert_eq!(
            err,
            TacticsError::MissingCost {
                terrain: Terrain::River,
                class: MoveClass::Infantry,
            }
        );
    }

    #[test]
    fn absent_terrain_needs_no_entry() {
        // The grid is all Ground, so Mountain coverage is not required.
        let grid = TerrainGrid::new(3, 3, Terrain::Ground);
        let mut costs = CostTable::new();
        costs.set_for_all_classes(Terrain::Ground, TileCost::Step(1));
        let occ = Occupancy::empty(Range::new(0, 0, 3, 3));
        let unit = infantry_at(Point::new(0, 0));
        assert!(UnitPather::new(&grid, &costs, &occ, &unit).is_ok());
    }

    #[test]
    fn hostile_tiles_are_not_neighbors() {
        let grid = TerrainGrid::new(3, 1, Terrain::Ground);
        let costs = CostTable::uniform();
        let mut occ = Occupancy::empty(Range::new(0, 0, 3, 1));
        occ.place(Point::new(1, 0), Faction::Enemy);
        let unit = infantry_at(Point::new(0, 0));
        let pather = UnitPather::new(&grid, &costs, &occ, &unit).unwrap();
        let mut buf = Vec::new();
        pather.neighbors(Point::new(0, 0), &mut buf);
        assert!(buf.is_empty());
    }

    #[test]
    fn friendly_tiles_pass_through_but_block_stops() {
        let grid = TerrainGrid::new(3, 1, Terrain::Ground);
        let costs = CostTable::uniform();
        let mut occ = Occupancy::empty(Range::new(0, 0, 3, 1));
        occ.place(Point::new(1, 0), Faction::Ally);
        let unit = infantry_at(Point::new(0, 0));
        let pather = UnitPather::new(&grid, &costs, &occ, &unit).unwrap();
        let mut buf = Vec::new();
        pather.neighbors(Point::new(0, 0), &mut buf);
        assert_eq!(buf, vec![Point::new(1, 0)]);
        assert!(!pather.can_stop(Point::new(1, 0), unit.pos));
        assert!(pather.can_stop(Point::new(2, 0), unit.pos));
    }

    #[test]
    fn own_tile_is_a_legal_stop() {
        let grid = TerrainGrid::new(2, 1, Terrain::Ground);
        let costs = CostTable::uniform();
        let mut occ = Occupancy::empty(Range::new(0, 0, 2, 1));
        occ.place(Point::new(0, 0), Faction::Player);
        let unit = infantry_at(Point::new(0, 0));
        let pather = UnitPather::new(&grid, &costs, &occ, &unit).unwrap();
        assert!(pather.can_stop(Point::new(0, 0), unit.pos));
        assert!(pather.valid_start(Point::new(0, 0)));
    }
}
