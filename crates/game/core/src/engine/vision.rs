use crate::env::FieldOfView;
use crate::state::{EntityId, GameState};

/// Recomputes an actor's field of view. For the player this also updates map
/// memory and every other entity's visibility flag.
pub fn refresh_field_of_view(state: &mut GameState, fov: &dyn FieldOfView, actor: EntityId) {
    let Some((origin, range)) = state
        .entities
        .get(actor)
        .and_then(|entity| Some((entity.position, entity.as_actor()?.fov_range)))
    else {
        return;
    };

    let visible = fov.compute(&state.map, origin, range);

    if actor.is_player() {
        state.map.update_visibility(&visible);
        for entity in state.entities.listed_mut() {
            if !entity.id.is_player() {
                entity.visible = visible.contains(&entity.position);
            }
        }
    }

    if let Some(data) = state.entities.actor_mut(actor) {
        data.field_of_view = visible;
    }
}

/// Refreshes every listed actor, player first so visibility flags settle.
pub fn refresh_all(state: &mut GameState, fov: &dyn FieldOfView) {
    let actors = state.entities.actor_ids().to_vec();
    for actor in actors {
        refresh_field_of_view(state, fov, actor);
    }
}
