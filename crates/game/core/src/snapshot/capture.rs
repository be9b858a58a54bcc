use tracing::debug;

use super::{
    ActorRecord, AiSnapshot, EntityPayload, EntityRecord, GameSnapshot, ItemRecord, MapSnapshot,
    SceneSnapshot, SnapshotError, TileSnapshot,
};
use crate::state::{EQUIPPED_SUFFIX, Entity, EntityId, EntityKind, GameState, MapMemory};

/// Records every entity in the world, in list order.
///
/// The player's carried items are placed in the entity list for the duration
/// of the capture so they are recorded (after everything else) with the
/// player as their parent, then put back into the inventory.
pub fn capture_game(state: &mut GameState) -> Result<GameSnapshot, SnapshotError> {
    let carried: Vec<EntityId> = state
        .entities
        .actor(EntityId::PLAYER)
        .and_then(|data| data.inventory.as_ref())
        .map(|inventory| inventory.items.clone())
        .unwrap_or_default();

    for item in &carried {
        state.add_or_insert(*item, None)?;
    }

    let view: &GameState = state;
    let entities = view
        .entities
        .entities()
        .map(|entity| record(view, entity))
        .collect::<Vec<_>>();

    for item in &carried {
        state.remove(*item)?;
    }

    debug!(
        entities = entities.len(),
        carried = carried.len(),
        "game captured"
    );
    Ok(GameSnapshot { entities })
}

/// Copies map memory by value.
pub fn capture_map(map: &MapMemory) -> MapSnapshot {
    MapSnapshot {
        width: map.width,
        height: map.height,
        tiles: map
            .tiles
            .iter()
            .map(|(position, tile)| TileSnapshot {
                position: *position,
                name: tile.kind.to_string(),
                explored: tile.explored,
                visible: tile.visible,
            })
            .collect(),
        rooms: map.rooms.clone(),
    }
}

pub fn capture_scene(state: &mut GameState) -> Result<SceneSnapshot, SnapshotError> {
    Ok(SceneSnapshot {
        floor: state.floor,
        game: capture_game(state)?,
        map: capture_map(&state.map),
    })
}

fn record(state: &GameState, entity: &Entity) -> EntityRecord {
    let mut name = entity.label();

    let payload = match &entity.kind {
        EntityKind::Actor(data) => EntityPayload::Actor(ActorRecord {
            alive: data.alive,
            ai: data.ai.as_ref().map(AiSnapshot::from),
            fighter: data.fighter.as_ref().map(|fighter| fighter.state),
            level: data
                .level
                .filter(|_| data.is_player())
                .map(|level| level.state),
        }),
        EntityKind::Item(data) => {
            let container = data.container.and_then(|id| state.entities.get(id));
            let equipped = container
                .and_then(Entity::as_actor)
                .and_then(|holder| holder.equipment.as_ref())
                .is_some_and(|equipment| equipment.is_equipped(entity.id));
            if equipped {
                name.push_str(EQUIPPED_SUFFIX);
            }
            EntityPayload::Item(ItemRecord {
                parent: container.map(|holder| holder.name.clone()).unwrap_or_default(),
            })
        }
        EntityKind::Other => EntityPayload::Other,
    };

    EntityRecord {
        name,
        blocks_movement: entity.blocks_movement,
        visible: entity.visible,
        position: entity.position,
        payload,
    }
}
