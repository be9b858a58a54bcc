//! Concrete action payloads.

use crate::state::{EntityId, Offset, Position};

/// Step one cell. A blocked destination wastes the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveAction {
    pub actor: EntityId,
    pub direction: Offset,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeleeAction {
    pub actor: EntityId,
    pub target: EntityId,
}

/// Move, or attack whoever stands in the way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BumpAction {
    pub actor: EntityId,
    pub direction: Offset,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitAction {
    pub actor: EntityId,
}

/// Pick up the first item lying on the actor's cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PickUpAction {
    pub actor: EntityId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropAction {
    pub actor: EntityId,
    pub item: EntityId,
}

/// Use a carried item: consumables take effect or enter targeting mode,
/// equippables are toggled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivateAction {
    pub actor: EntityId,
    pub item: EntityId,
}

/// Release the selected consumable at a cell chosen in targeting mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CastAction {
    pub actor: EntityId,
    pub target: Position,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleEquipAction {
    pub actor: EntityId,
    pub item: EntityId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CancelTargetingAction {
    pub actor: EntityId,
}
