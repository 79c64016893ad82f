//! The battlefield snapshot: the engine's caller-facing query surface.

use std::collections::BTreeSet;

use skirm_core::{Point, Range, TerrainGrid};

use crate::cost::CostTable;
use crate::error::Result;
use crate::occupancy::Occupancy;
use crate::search::Search;
use crate::threat::ThreatArea;
use crate::traits::UnitPather;
use crate::unit::UnitStats;

/// Immutable view of map, cost model, and occupancy for one batch of
/// queries.
///
/// Taken once at the start of a turn or UI interaction; all queries against
/// one snapshot see the same world. Because it only borrows shared
/// read-only data, independent per-unit queries may run on separate
/// threads, each with its own [`Search`] scratch.
#[derive(Clone, Copy)]
pub struct Battlefield<'a> {
    grid: &'a TerrainGrid,
    costs: &'a CostTable,
    occupancy: &'a Occupancy,
}

impl<'a> Battlefield<'a> {
    /// Bundle the three read-only inputs into a snapshot.
    pub fn new(grid: &'a TerrainGrid, costs: &'a CostTable, occupancy: &'a Occupancy) -> Self {
        Self {
            grid,
            costs,
            occupancy,
        }
    }

    /// The map rectangle, which a [`Search`] must be sized to.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.grid.range()
    }

    /// The occupancy snapshot queries run against.
    #[inline]
    pub fn occupancy(&self) -> &Occupancy {
        self.occupancy
    }

    /// Every tile `unit` can legally end movement on, including its own
    /// start tile.
    ///
    /// Tiles held by friendly or neutral units can be routed through but
    /// are excluded here. A unit standing somewhere it could never stand
    /// (blocked terrain, hostile tile) gets an empty set and a warning —
    /// that is a caller invariant slip, not an engine failure.
    pub fn movement_range(
        &self,
        unit: &UnitStats,
        search: &mut Search,
    ) -> Result<BTreeSet<Point>> {
        let pather = UnitPather::new(self.grid, self.costs, self.occupancy, unit)?;
        if !pather.valid_start(unit.pos) {
            log::warn!(
                "movement range queried from illegal start {} ({:?} {:?})",
                unit.pos,
                unit.faction,
                unit.class,
            );
            return Ok(BTreeSet::new());
        }
        let reached = search.flood(&pather, unit.pos, unit.move_points.max(0));
        Ok(reached
            .iter()
            .map(|n| n.pos)
            .filter(|&p| pather.can_stop(p, unit.pos))
            .collect())
    }

    /// The unit's movement tiles plus every further tile its weapon covers
    /// from some stopping tile.
    pub fn threat_area(&self, unit: &UnitStats, search: &mut Search) -> Result<ThreatArea> {
        let move_tiles = self.movement_range(unit, search)?;
        Ok(ThreatArea::compute(
            move_tiles,
            unit.min_range,
            unit.max_range,
            self.bounds(),
        ))
    }

    /// Cheapest route from the unit's position to `goal`, inclusive of both
    /// endpoints, or `None` when no legal route exists.
    ///
    /// `budget` optionally caps the route's total cost; `None` searches the
    /// whole map ("theoretical reachability"). The goal must be a tile the
    /// unit could stop on — in bounds, passable, and not held by another
    /// unit — otherwise the result is `None` without searching.
    pub fn path(
        &self,
        unit: &UnitStats,
        goal: Point,
        budget: Option<i32>,
        search: &mut Search,
    ) -> Result<Option<Vec<Point>>> {
        let pather = UnitPather::new(self.grid, self.costs, self.occupancy, unit)?;
        if !pather.valid_start(unit.pos) {
            log::warn!(
                "path queried from illegal start {} ({:?} {:?})",
                unit.pos,
                unit.faction,
                unit.class,
            );
            return Ok(None);
        }
        if !pather.can_stop(goal, unit.pos) {
            return Ok(None);
        }
        Ok(search.path(&pather, unit.pos, goal, budget))
    }
}
