//! The cost model: (terrain, movement class) -> step cost or blocked.

use std::collections::BTreeMap;

use skirm_core::Terrain;

/// Movement capability tag. Only ever used to index the [`CostTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveClass {
    Infantry,
    Cavalry,
    Armored,
    Flier,
}

impl MoveClass {
    /// All movement classes, in declaration order.
    pub const ALL: [MoveClass; 4] = [
        MoveClass::Infantry,
        MoveClass::Cavalry,
        MoveClass::Armored,
        MoveClass::Flier,
    ];
}

/// Cost of entering a tile: a positive step cost, or impassable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileCost {
    /// Entering costs this many movement points. Always at least 1, so
    /// Manhattan distance stays an admissible A* heuristic.
    Step(i32),
    /// The tile can never be entered by this movement class.
    Blocked,
}

/// Static table mapping (terrain, movement class) to a [`TileCost`].
///
/// Built once from game data and shared read-only afterwards. Pairs a
/// query actually uses must be present; a missing entry aborts the query
/// with [`TacticsError::MissingCost`](crate::TacticsError::MissingCost).
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostTable {
    entries: BTreeMap<(Terrain, MoveClass), TileCost>,
}

impl CostTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cost for one (terrain, class) pair.
    ///
    /// Panics if given a step cost below 1; that would silently break A*
    /// admissibility, so it is rejected at table-build time.
    pub fn set(&mut self, terrain: Terrain, class: MoveClass, cost: TileCost) -> &mut Self {
        if let TileCost::Step(c) = cost {
            assert!(c >= 1, "step cost must be >= 1, got {c} for {terrain:?}/{class:?}");
        }
        self.entries.insert((terrain, class), cost);
        self
    }

    /// Set the same cost for a terrain across every movement class.
    pub fn set_for_all_classes(&mut self, terrain: Terrain, cost: TileCost) -> &mut Self {
        for class in MoveClass::ALL {
            self.set(terrain, class, cost);
        }
        self
    }

    /// Look up the cost for a (terrain, class) pair, if present.
    #[inline]
    pub fn get(&self, terrain: Terrain, class: MoveClass) -> Option<TileCost> {
        self.entries.get(&(terrain, class)).copied()
    }

    /// A table where every terrain costs 1 for every class, except `Wall`
    /// which blocks everyone. Handy default for tests and prototypes.
    pub fn uniform() -> Self {
        let mut table = Self::new();
        for terrain in Terrain::ALL {
            let cost = if terrain == Terrain::Wall {
                TileCost::Blocked
            } else {
                TileCost::Step(1)
            };
            table.set_for_all_classes(terrain, cost);
        }
        table
    }
}
