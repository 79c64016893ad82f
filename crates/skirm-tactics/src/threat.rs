//! Threat areas: what a unit can reach versus what it merely threatens.

use std::collections::BTreeSet;

use skirm_core::{Point, Range};

/// Two disjoint tile sets: where a unit can end movement, and which further
/// tiles its weapon covers from some legal stopping tile.
///
/// Invariant: `move_tiles` and `attack_tiles` never overlap. `BTreeSet`
/// keeps iteration order (and therefore downstream output) deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThreatArea {
    pub move_tiles: BTreeSet<Point>,
    pub attack_tiles: BTreeSet<Point>,
}

impl ThreatArea {
    /// An area threatening nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Expand a movement set by a weapon's `[min_range, max_range]` ring.
    ///
    /// Every movement tile contributes a ring — not just the frontier,
    /// since interior stopping tiles unlock firing solutions boundary tiles
    /// do not. Ring tiles outside `bounds` are dropped; ring tiles inside
    /// the movement set stay movement tiles, keeping the two sets disjoint.
    pub fn compute(
        move_tiles: BTreeSet<Point>,
        min_range: i32,
        max_range: i32,
        bounds: Range,
    ) -> Self {
        debug_assert!(0 <= min_range && min_range <= max_range);
        let mut attack_tiles = BTreeSet::new();
        for &p in &move_tiles {
            for r in min_range.max(0)..=max_range {
                ring(p, r, |t| {
                    if bounds.contains(t) && !move_tiles.contains(&t) {
                        attack_tiles.insert(t);
                    }
                });
            }
        }
        Self {
            move_tiles,
            attack_tiles,
        }
    }

    /// Union two areas, re-applying disjointness.
    ///
    /// A tile that is a movement tile for either side stays a movement
    /// tile, even when the other side merely attacks it.
    pub fn union(&self, other: &Self) -> Self {
        let move_tiles: BTreeSet<Point> = self
            .move_tiles
            .union(&other.move_tiles)
            .copied()
            .collect();
        let attack_tiles = self
            .attack_tiles
            .union(&other.attack_tiles)
            .copied()
            .filter(|p| !move_tiles.contains(p))
            .collect();
        Self {
            move_tiles,
            attack_tiles,
        }
    }

    /// Whether `p` is covered by either set.
    pub fn contains(&self, p: Point) -> bool {
        self.move_tiles.contains(&p) || self.attack_tiles.contains(&p)
    }

    /// Whether both sets are empty.
    pub fn is_empty(&self) -> bool {
        self.move_tiles.is_empty() && self.attack_tiles.is_empty()
    }
}

/// Visit every tile at exact Manhattan distance `r` from `center`.
fn ring(center: Point, r: i32, mut visit: impl FnMut(Point)) {
    if r == 0 {
        visit(center);
        return;
    }
    for dx in -r..=r {
        let dy = r - dx.abs();
        visit(center.shift(dx, dy));
        if dy != 0 {
            visit(center.shift(dx, -dy));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirm_core::manhattan;

    fn pts(v: &[(i32, i32)]) -> BTreeSet<Point> {
        v.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn ring_sizes() {
        let mut count = 0;
        ring(Point::new(5, 5), 0, |_| count += 1);
        assert_eq!(count, 1);
        for r in 1..=4 {
            let mut tiles = BTreeSet::new();
            ring(Point::new(5, 5), r, |p| {
                assert_eq!(manhattan(p, Point::new(5, 5)), r);
                tiles.insert(p);
            });
            // A Manhattan ring of radius r has 4r tiles.
            assert_eq!(tiles.len(), (4 * r) as usize);
        }
    }

    #[test]
    fn melee_ring_hugs_the_move_set() {
        let bounds = Range::new(0, 0, 5, 5);
        let area = ThreatArea::compute(pts(&[(2, 2)]), 1, 1, bounds);
        assert_eq!(area.move_tiles, pts(&[(2, 2)]));
        assert_eq!(area.attack_tiles, pts(&[(2, 1), (1, 2), (3, 2), (2, 3)]));
    }

    #[test]
    fn min_range_two_skips_adjacent_tiles() {
        // Budget-1 move set at the map corner, bow with range [2, 3].
        let bounds = Range::new(0, 0, 8, 8);
        let moves = pts(&[(0, 0), (1, 0), (0, 1)]);
        let area = ThreatArea::compute(moves.clone(), 2, 3, bounds);

        let mut expected = BTreeSet::new();
        for &from in &moves {
            for p in bounds.iter() {
                let d = manhattan(p, from);
                if (2..=3).contains(&d) && !moves.contains(&p) {
                    expected.insert(p);
                }
            }
        }
        assert_eq!(area.attack_tiles, expected);
        // Adjacent tiles are threatened anyway: some other stopping tile
        // is at distance 2 from them.
        assert!(area.attack_tiles.contains(&Point::new(1, 1)));
        assert!(area.attack_tiles.contains(&Point::new(2, 0)));
    }

    #[test]
    fn rings_are_clipped_to_bounds() {
        let bounds = Range::new(0, 0, 3, 3);
        let area = ThreatArea::compute(pts(&[(0, 0)]), 1, 1, bounds);
        assert_eq!(area.attack_tiles, pts(&[(1, 0), (0, 1)]));
    }

    #[test]
    fn sets_stay_disjoint() {
        let bounds = Range::new(0, 0, 6, 6);
        let moves = pts(&[(2, 2), (3, 2), (2, 3), (3, 3)]);
        let area = ThreatArea::compute(moves, 1, 2, bounds);
        assert!(area.move_tiles.is_disjoint(&area.attack_tiles));
    }

    #[test]
    fn union_reapplies_disjointness() {
        // B can *walk* onto a tile A can only attack; after union that tile
        // must count as a movement tile, not an attack tile.
        let shared = Point::new(3, 0);
        let a = ThreatArea {
            move_tiles: pts(&[(0, 0)]),
            attack_tiles: pts(&[(3, 0), (1, 0)]),
        };
        let b = ThreatArea {
            move_tiles: pts(&[(3, 0), (4, 0)]),
            attack_tiles: pts(&[(5, 0)]),
        };
        let u = a.union(&b);
        assert!(u.move_tiles.contains(&shared));
        assert!(!u.attack_tiles.contains(&shared));
        assert!(u.move_tiles.is_disjoint(&u.attack_tiles));
        assert_eq!(u.attack_tiles, pts(&[(1, 0), (5, 0)]));
    }

    #[test]
    fn union_is_commutative() {
        let bounds = Range::new(0, 0, 8, 8);
        let a = ThreatArea::compute(pts(&[(1, 1), (2, 1)]), 1, 2, bounds);
        let b = ThreatArea::compute(pts(&[(3, 1), (3, 2)]), 2, 3, bounds);
        assert_eq!(a.union(&b), b.union(&a));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use skirm_core::Range;

    #[test]
    fn threat_area_round_trip() {
        let bounds = Range::new(0, 0, 5, 5);
        let moves = [Point::new(2, 2), Point::new(3, 2)].into_iter().collect();
        let area = ThreatArea::compute(moves, 1, 2, bounds);
        let json = serde_json::to_string(&area).unwrap();
        let back: ThreatArea = serde_json::from_str(&json).unwrap();
        assert_eq!(area, back);
    }
}
