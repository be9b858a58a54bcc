use super::{ActorData, EntityId, ItemData, Position};

/// Label prefix given to a dead actor's remains.
pub const REMAINS_PREFIX: &str = "Remains of ";

/// Label suffix marking an item that is currently equipped.
pub const EQUIPPED_SUFFIX: &str = " (E)";

/// Capability payload distinguishing actors, items and plain scenery.
#[derive(Clone, Debug, PartialEq)]
pub enum EntityKind {
    Actor(Box<ActorData>),
    Item(ItemData),
    Other,
}

/// Anything placed in the world.
///
/// `name` is the template key used to instantiate the entity and doubles as
/// its display label (see [`Entity::label`]).
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub blocks_movement: bool,
    pub position: Position,
    /// Whether the entity sits inside the player's field of view.
    pub visible: bool,
    /// False while the entity is dormant (carried, or pulled out of the world).
    pub active: bool,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(
        name: impl Into<String>,
        position: Position,
        blocks_movement: bool,
        kind: EntityKind,
    ) -> Self {
        Self {
            id: EntityId::UNASSIGNED,
            name: name.into(),
            blocks_movement,
            position,
            visible: false,
            active: true,
            kind,
        }
    }

    pub fn actor(name: impl Into<String>, position: Position, data: ActorData) -> Self {
        Self::new(name, position, true, EntityKind::Actor(Box::new(data)))
    }

    pub fn item(name: impl Into<String>, position: Position, data: ItemData) -> Self {
        Self::new(name, position, false, EntityKind::Item(data))
    }

    pub fn as_actor(&self) -> Option<&ActorData> {
        match &self.kind {
            EntityKind::Actor(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_actor_mut(&mut self) -> Option<&mut ActorData> {
        match &mut self.kind {
            EntityKind::Actor(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_item(&self) -> Option<&ItemData> {
        match &self.kind {
            EntityKind::Item(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_item_mut(&mut self) -> Option<&mut ItemData> {
        match &mut self.kind {
            EntityKind::Item(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_actor(&self) -> bool {
        matches!(self.kind, EntityKind::Actor(_))
    }

    pub fn is_player(&self) -> bool {
        self.as_actor().is_some_and(ActorData::is_player)
    }

    /// Display label: a dead actor reads as its remains.
    pub fn label(&self) -> String {
        match self.as_actor() {
            Some(actor) if !actor.alive => format!("{REMAINS_PREFIX}{}", self.name),
            _ => self.name.clone(),
        }
    }
}

/// Recovers the template name from a saved label by stripping the remains
/// prefix and the equipped marker.
pub fn template_name(label: &str) -> &str {
    let name = label.strip_prefix(REMAINS_PREFIX).unwrap_or(label);
    name.strip_suffix(EQUIPPED_SUFFIX).unwrap_or(name)
}

/// Whether a saved label carries the equipped marker.
pub fn is_equipped_label(label: &str) -> bool {
    label.ends_with(EQUIPPED_SUFFIX)
}
