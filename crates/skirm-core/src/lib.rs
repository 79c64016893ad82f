//! Geometry and map primitives for the tactical grid engine.
//!
//! This crate holds the plain-data foundation everything else builds on:
//!
//! - [`Point`] and [`Range`] — integer grid coordinates and half-open
//!   rectangles, with value semantics throughout.
//! - [`Terrain`] and [`TerrainGrid`] — the static, read-only map query
//!   surface: bounds tests, terrain kind per tile, 4-neighborhoods.
//!
//! Nothing here knows about units, factions, or searches; those live in
//! `skirm-tactics`.

mod geom;
mod terrain;

pub use geom::{Point, Range, RangeIter, manhattan};
pub use terrain::{Terrain, TerrainGrid};
