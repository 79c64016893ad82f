//! Tactical grid reachability and threat engine.
//!
//! Given a tile map, per-unit movement and weapon stats, and faction
//! occupancy, this crate computes:
//!
//! - **Movement ranges** — tiles a unit can legally end movement on
//!   ([`Battlefield::movement_range`])
//! - **Threat areas** — tiles threatened after moving, disjoint from the
//!   movement set ([`Battlefield::threat_area`])
//! - **Paths** — cheapest routes to a destination
//!   ([`Battlefield::path`])
//! - **Danger maps** — aggregated multi-unit threat overlays with
//!   incremental recomputation ([`DangerCache::danger_map`])
//! - **Borders** — outline segments around any tile region, for rendering
//!   ([`extract_border`])
//!
//! All queries run against an immutable per-turn snapshot
//! ([`Battlefield`]); the engine consumes and produces plain data and
//! never owns UI or rendering state.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | neighbor enumeration |
//! | [`WeightedPather`] : [`Pather`] | flood (Dijkstra) queries |
//! | [`AstarPather`] : [`WeightedPather`] | path (A*) queries |
//!
//! [`UnitPather`] implements all three for a unit's view of a battlefield;
//! custom pathers only matter if you search something other than a
//! [`Battlefield`].

mod border;
mod cost;
mod danger;
mod error;
mod field;
mod occupancy;
mod search;
mod threat;
mod traits;
mod unit;

pub use border::{BorderEdge, extract_border};
pub use cost::{CostTable, MoveClass, TileCost};
pub use danger::DangerCache;
pub use error::{Result, TacticsError};
pub use field::Battlefield;
pub use occupancy::{Faction, Occupancy};
pub use search::{ReachNode, Search, UNBOUNDED, UNREACHABLE};
pub use threat::ThreatArea;
pub use traits::{AstarPather, Pather, UnitPather, WeightedPather};
pub use unit::{UnitId, UnitStats};
