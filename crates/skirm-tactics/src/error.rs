use thiserror::Error;

use crate::cost::MoveClass;
use skirm_core::Terrain;

/// Errors produced by the tactics engine.
///
/// Only configuration problems surface as errors; degenerate inputs
/// (impassable start tiles, unreachable goals) are ordinary result values.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TacticsError {
    /// The cost table has no entry for a (terrain, movement class) pair the
    /// query needs. This is a content bug: the query aborts rather than
    /// guessing a cost.
    #[error("no movement cost defined for {terrain:?} / {class:?}")]
    MissingCost { terrain: Terrain, class: MoveClass },
}

pub type Result<T> = std::result::Result<T, TacticsError>;
