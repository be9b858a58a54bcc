//! Plain-text transcript of a run.

use game_core::{EntityId, GameState, Message};

pub fn print_messages<'a>(messages: impl Iterator<Item = &'a Message>) {
    for message in messages {
        println!("  [{}] {}", message.tone, message.text);
    }
}

pub fn status_line(state: &GameState) -> String {
    let Some(data) = state.entities.actor(EntityId::PLAYER) else {
        return format!("floor {} | no player", state.floor);
    };
    let (hp, max_hp) = data
        .fighter
        .as_ref()
        .map_or((0, 0), |fighter| (fighter.hp(), fighter.max_hp()));
    let (level, xp) = data
        .level
        .map_or((0, 0), |level| (level.state.current_level, level.state.current_xp));
    let carried = data.inventory.as_ref().map_or(0, |inventory| inventory.items.len());

    format!(
        "floor {} | turn {} | hp {hp}/{max_hp} | level {level} ({xp} xp) | power {} | defense {} | carrying {carried}",
        state.floor,
        state.nonce,
        state.power(EntityId::PLAYER),
        state.defense(EntityId::PLAYER),
    )
}
