use std::collections::BTreeSet;

use crate::state::{MapMemory, Offset, Position};

/// Computes the cells visible from an origin.
pub trait FieldOfView {
    fn compute(&self, map: &MapMemory, origin: Position, range: u32) -> BTreeSet<Position>;
}

/// Picks the next step from one cell towards another.
pub trait Pathfinder {
    /// Unit step to take from `origin` on the way to `target`. Returns
    /// [`Offset::ZERO`] when no step makes progress.
    fn direction_towards(&self, map: &MapMemory, origin: Position, target: Position) -> Offset;
}
