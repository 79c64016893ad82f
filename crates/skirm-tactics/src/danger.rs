//! The danger cache: per-unit threat areas and cheap aggregation.
//!
//! One [`ThreatArea`] is cached per tracked unit and recomputed only when
//! that unit is invalidated. Aggregates over unit selections ("all
//! enemies", "selected enemies") are pure unions of the cached entries —
//! aggregation never re-invokes the search engine — and are themselves
//! cached lazily, invalidated whenever a constituent changes.

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::error::Result;
use crate::field::Battlefield;
use crate::occupancy::Faction;
use crate::search::Search;
use crate::threat::ThreatArea;
use crate::unit::{UnitId, UnitStats};

struct Slot {
    generation: u32,
    unit: Option<UnitStats>,
    /// `None` while the entry is invalidated; recomputed on next read.
    area: Option<ThreatArea>,
}

/// Tracks units and caches their threat areas under generational handles.
///
/// Slots are reused after removal, but reuse bumps the slot's generation,
/// so a stale [`UnitId`] can never read data belonging to a different
/// logical unit: it simply misses.
#[derive(Default)]
pub struct DangerCache {
    slots: Vec<Slot>,
    free: Vec<u32>,
    aggregates: BTreeMap<Vec<UnitId>, ThreatArea>,
}

impl DangerCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a unit. Its threat area is computed on first read.
    pub fn insert(&mut self, unit: UnitStats) -> UnitId {
        if let Some(slot) = self.free.pop() {
            let s = &mut self.slots[slot as usize];
            s.unit = Some(unit);
            s.area = None;
            UnitId {
                slot,
                generation: s.generation,
            }
        } else {
            self.slots.push(Slot {
                generation: 0,
                unit: Some(unit),
                area: None,
            });
            UnitId {
                slot: (self.slots.len() - 1) as u32,
                generation: 0,
            }
        }
    }

    /// Stop tracking a unit, freeing its slot for reuse under a new
    /// generation. Returns false for handles that are already dead.
    pub fn remove(&mut self, id: UnitId) -> bool {
        if !self.live(id) {
            return false;
        }
        let s = &mut self.slots[id.slot as usize];
        s.generation = s.generation.wrapping_add(1);
        s.unit = None;
        s.area = None;
        self.free.push(id.slot);
        self.drop_aggregates_with(id);
        true
    }

    /// Replace a unit's stats (it moved, was promoted, swapped weapons),
    /// invalidating its entry and every aggregate it was part of.
    pub fn update(&mut self, id: UnitId, unit: UnitStats) -> bool {
        if !self.live(id) {
            return false;
        }
        let s = &mut self.slots[id.slot as usize];
        s.unit = Some(unit);
        s.area = None;
        self.drop_aggregates_with(id);
        true
    }

    /// Mark one unit's entry stale without touching its stats — the map or
    /// occupancy changed in a way that affects its search.
    pub fn invalidate(&mut self, id: UnitId) {
        if self.live(id) {
            self.slots[id.slot as usize].area = None;
            self.drop_aggregates_with(id);
        }
    }

    /// Mark every entry stale, e.g. after taking a fresh occupancy
    /// snapshot.
    pub fn invalidate_all(&mut self) {
        for s in &mut self.slots {
            s.area = None;
        }
        self.aggregates.clear();
    }

    /// The stats stored for a handle, if it is still live.
    pub fn unit(&self, id: UnitId) -> Option<&UnitStats> {
        if self.live(id) {
            self.slots[id.slot as usize].unit.as_ref()
        } else {
            None
        }
    }

    /// Handles of all tracked units, in slot order.
    pub fn ids(&self) -> Vec<UnitId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.unit.is_some())
            .map(|(i, s)| UnitId {
                slot: i as u32,
                generation: s.generation,
            })
            .collect()
    }

    /// Handles of all tracked units of one faction, in slot order.
    pub fn faction_ids(&self, faction: Faction) -> Vec<UnitId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.unit.is_some_and(|u| u.faction == faction))
            .map(|(i, s)| UnitId {
                slot: i as u32,
                generation: s.generation,
            })
            .collect()
    }

    /// The cached threat area for one unit, recomputing it first if the
    /// entry is stale. `None` for dead handles.
    pub fn threat_of(
        &mut self,
        field: &Battlefield<'_>,
        id: UnitId,
        search: &mut Search,
    ) -> Result<Option<&ThreatArea>> {
        if !self.live(id) {
            log::warn!("threat lookup with stale unit handle {id:?}");
            return Ok(None);
        }
        let i = id.slot as usize;
        if self.slots[i].area.is_none() {
            // live() above guarantees the stats are present.
            if let Some(unit) = self.slots[i].unit {
                let area = field.threat_area(&unit, search)?;
                self.slots[i].area = Some(area);
            }
        }
        Ok(self.slots[i].area.as_ref())
    }

    /// Aggregate threat area over a selection of units.
    ///
    /// The result is the disjointness-preserving union of the selection's
    /// cached entries (stale entries are recomputed first). Aggregates are
    /// memoized by normalized selection, so repeated reads of "all
    /// enemies" between invalidations are set-union-free. Dead handles in
    /// the selection contribute nothing.
    pub fn danger_map(
        &mut self,
        field: &Battlefield<'_>,
        selection: &[UnitId],
        search: &mut Search,
    ) -> Result<ThreatArea> {
        let mut key: Vec<UnitId> = selection
            .iter()
            .copied()
            .filter(|&id| {
                let ok = self.live(id);
                if !ok {
                    log::warn!("danger map selection contains stale unit handle {id:?}");
                }
                ok
            })
            .collect();
        key.sort_unstable();
        key.dedup();

        if let Some(cached) = self.aggregates.get(&key) {
            return Ok(cached.clone());
        }

        let mut total = ThreatArea::empty();
        for &id in &key {
            if let Some(area) = self.threat_of(field, id, search)? {
                total = total.union(area);
            }
        }
        self.aggregates.insert(key, total.clone());
        Ok(total)
    }

    /// Recompute every stale entry, one parallel search per unit.
    ///
    /// Each worker reads the shared snapshot and owns its own [`Search`]
    /// scratch; results are written back after the joint collect. Typical
    /// use: repopulate the cache for all enemies right after the player's
    /// turn begins.
    pub fn recompute_stale(&mut self, field: &Battlefield<'_>) -> Result<()> {
        let stale: Vec<(usize, UnitStats)> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.area.is_none())
            .filter_map(|(i, s)| s.unit.map(|u| (i, u)))
            .collect();

        let computed: Vec<(usize, ThreatArea)> = stale
            .into_par_iter()
            .map(|(i, unit)| {
                let mut search = Search::new(field.bounds());
                field.threat_area(&unit, &mut search).map(|a| (i, a))
            })
            .collect::<Result<_>>()?;

        for (i, area) in computed {
            self.slots[i].area = Some(area);
        }
        Ok(())
    }

    #[inline]
    fn live(&self, id: UnitId) -> bool {
        self.slots
            .get(id.slot as usize)
            .is_some_and(|s| s.generation == id.generation && s.unit.is_some())
    }

    fn drop_aggregates_with(&mut self, id: UnitId) {
        self.aggregates.retain(|key, _| !key.contains(&id));
    }
}
