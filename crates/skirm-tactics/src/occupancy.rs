//! Factions and the per-query occupancy snapshot.

use skirm_core::{Point, Range};

/// Which side a unit fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Faction {
    Player,
    Ally,
    Enemy,
    Neutral,
}

impl Faction {
    /// Whether units of `self` treat units of `other` as hostile.
    ///
    /// Player and Ally fight together against Enemy; Neutral is hostile to
    /// no one and no one is hostile to Neutral. Hostile-occupied tiles can
    /// never be entered, not even in passing; all other occupied tiles can
    /// be passed through but not stopped on.
    #[inline]
    pub fn hostile_to(self, other: Faction) -> bool {
        match (self, other) {
            (Faction::Player | Faction::Ally, Faction::Enemy) => true,
            (Faction::Enemy, Faction::Player | Faction::Ally) => true,
            _ => false,
        }
    }
}

/// Immutable snapshot of which faction occupies each tile.
///
/// Taken once before a batch of queries; the engine never mutates it. Unit
/// movement between batches means taking a fresh snapshot, not editing
/// this one mid-query.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Occupancy {
    range: Range,
    slots: Vec<Option<Faction>>,
}

impl Occupancy {
    /// An empty snapshot covering `range`.
    pub fn empty(range: Range) -> Self {
        Self {
            slots: vec![None; range.len()],
            range,
        }
    }

    /// Record a unit of `faction` standing at `p`. Out-of-bounds placements
    /// are ignored.
    pub fn place(&mut self, p: Point, faction: Faction) {
        if let Some(i) = self.idx(p) {
            self.slots[i] = Some(faction);
        }
    }

    /// The faction occupying `p`, if any. Out-of-bounds tiles are vacant.
    #[inline]
    pub fn faction_at(&self, p: Point) -> Option<Faction> {
        self.idx(p).and_then(|i| self.slots[i])
    }

    /// Whether any unit stands at `p`.
    #[inline]
    pub fn occupied(&self, p: Point) -> bool {
        self.faction_at(p).is_some()
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
