//! Per-unit combat stats and stable unit handles.

use skirm_core::Point;

use crate::cost::MoveClass;
use crate::occupancy::Faction;

/// Everything the engine needs to know about one unit.
///
/// Supplied by the caller per query and never mutated by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitStats {
    /// Current position on the grid.
    pub pos: Point,
    pub faction: Faction,
    pub class: MoveClass,
    /// Movement budget in cost points. Zero means the unit cannot move.
    pub move_points: i32,
    /// Minimum weapon range in Manhattan distance. `0 <= min <= max`.
    pub min_range: i32,
    /// Maximum weapon range in Manhattan distance.
    pub max_range: i32,
}

/// Generation-checked handle to a unit tracked by the danger cache.
///
/// A raw slot index would silently alias a new unit after the slot is
/// reused; pairing it with a generation counter turns that into a cache
/// miss instead. A lookup whose generation no longer matches is treated as
/// "entry absent."
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId {
    pub(crate) slot: u32,
    pub(crate) generation: u32,
}
