//! Frame-paced floor restore.
//!
//! [`RestoreJob::begin`] tears the world down and rebuilds map memory in one
//! go; [`RestoreJob::step`] then replays one entity record per call so the
//! host loop can keep ticking between records. Turns and player input stay
//! gated (`GameState::restoring`) until the last record is in.

use tracing::{debug, info};

use super::{EntityPayload, EntityRecord, MapSnapshot, SceneSnapshot, SnapshotError};
use crate::action::equipment::equip_to_slot;
use crate::action::inventory::add_to_inventory;
use crate::engine::{refresh_all, refresh_field_of_view};
use crate::env::{GameEnv, NullLog};
use crate::state::{
    EntityId, GameState, MapMemory, TileKind, TileRecord, is_equipped_label, template_name,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RestoreProgress {
    Pending { restored: usize, total: usize },
    Complete,
}

/// Resumable replay of one scene.
#[derive(Clone, Debug)]
pub struct RestoreJob {
    floor: u32,
    records: Vec<EntityRecord>,
    cursor: usize,
    allow_player_replace: bool,
    finished: bool,
}

impl RestoreJob {
    /// Starts restoring `scene`.
    ///
    /// With `allow_player_replace` the player is torn down with everything
    /// else and respawned from its record. Without it the live player (and
    /// what it carries) is kept and only moved to its saved position.
    pub fn begin(
        state: &mut GameState,
        scene: &SceneSnapshot,
        allow_player_replace: bool,
    ) -> Result<Self, SnapshotError> {
        if state.restoring {
            return Err(SnapshotError::RestoreInProgress);
        }
        let map = rebuild_map(&scene.map)?;

        state.restoring = true;
        state.reset_world(!allow_player_replace);
        state.map = map;
        state.floor = scene.floor;

        info!(
            floor = scene.floor,
            records = scene.game.entities.len(),
            allow_player_replace,
            "restore started"
        );
        Ok(Self {
            floor: scene.floor,
            records: scene.game.entities.clone(),
            cursor: 0,
            allow_player_replace,
            finished: false,
        })
    }

    pub fn floor(&self) -> u32 {
        self.floor
    }

    /// Replays the next record. The call that consumes the last record also
    /// refreshes fields of view and lifts the input gate.
    pub fn step(
        &mut self,
        state: &mut GameState,
        env: &GameEnv<'_>,
    ) -> Result<RestoreProgress, SnapshotError> {
        if self.finished {
            return Ok(RestoreProgress::Complete);
        }

        if let Some(record) = self.records.get(self.cursor) {
            restore_record(state, env, record, self.allow_player_replace)?;
            self.cursor += 1;
        }

        if self.cursor < self.records.len() {
            return Ok(RestoreProgress::Pending {
                restored: self.cursor,
                total: self.records.len(),
            });
        }

        refresh_all(state, env.fov()?);
        state.restoring = false;
        self.finished = true;
        info!(floor = self.floor, records = self.records.len(), "restore complete");
        Ok(RestoreProgress::Complete)
    }

    /// Steps until the replay is done.
    pub fn run_to_completion(
        &mut self,
        state: &mut GameState,
        env: &GameEnv<'_>,
    ) -> Result<(), SnapshotError> {
        while self.step(state, env)? != RestoreProgress::Complete {}
        Ok(())
    }

    /// Lifts the input gate after a failed step. The world is left as far as
    /// the replay got.
    pub fn abandon(self, state: &mut GameState) {
        state.restoring = false;
    }
}

fn rebuild_map(snapshot: &MapSnapshot) -> Result<MapMemory, SnapshotError> {
    let mut map = MapMemory::new(snapshot.width, snapshot.height);
    for tile in &snapshot.tiles {
        let kind: TileKind = tile
            .name
            .parse()
            .map_err(|_| SnapshotError::UnknownTileKind(tile.name.clone()))?;
        map.tiles.insert(
            tile.position,
            TileRecord {
                kind,
                explored: tile.explored,
                visible: false,
            },
        );
    }
    map.rooms = snapshot.rooms.clone();
    Ok(map)
}

fn restore_record(
    state: &mut GameState,
    env: &GameEnv<'_>,
    record: &EntityRecord,
    allow_player_replace: bool,
) -> Result<(), SnapshotError> {
    let template = template_name(&record.name);
    let kept_player = state
        .player()
        .filter(|player| !allow_player_replace && player.name == template)
        .is_some();

    if kept_player {
        if let Some(player) = state.entities.player_mut() {
            player.position = record.position;
        }
        refresh_field_of_view(state, env.fov()?, EntityId::PLAYER);
        debug!(position = %record.position, "player relocated");
        return Ok(());
    }

    if let EntityPayload::Item(item) = &record.payload {
        let held_by_kept_player = !allow_player_replace
            && state.player().is_some_and(|player| player.name == item.parent);
        if held_by_kept_player {
            return Ok(());
        }
    }

    let mut entity = env
        .templates()?
        .instantiate(template, record.position)
        .ok_or_else(|| SnapshotError::UnknownTemplate(template.to_string()))?;
    entity.blocks_movement = record.blocks_movement;
    entity.visible = record.visible;

    match &record.payload {
        EntityPayload::Actor(saved) => {
            if let Some(data) = entity.as_actor_mut() {
                data.alive = saved.alive;
                if let Some(ai) = &saved.ai {
                    data.ai = Some(ai.restore());
                }
                if let (Some(fighter), Some(saved_fighter)) = (data.fighter.as_mut(), saved.fighter) {
                    fighter.state = saved_fighter;
                }
                if let (Some(level), Some(saved_level)) = (data.level.as_mut(), saved.level) {
                    level.state = saved_level;
                }
            }

            let id = state.spawn(entity)?;
            if !saved.alive {
                state.retire_actor(id);
            }
            debug!(entity = %id, name = %record.name, "actor restored");
        }
        EntityPayload::Item(saved) => {
            let id = state.spawn(entity)?;
            if !saved.parent.is_empty() {
                let container = state.entities.find_by_name(&saved.parent).ok_or_else(|| {
                    SnapshotError::UnresolvedContainer {
                        item: record.name.clone(),
                        container: saved.parent.clone(),
                    }
                })?;
                add_to_inventory(state, container, id)?;

                let slot = state
                    .entities
                    .get(id)
                    .and_then(|entity| entity.as_item())
                    .and_then(|data| data.equippable)
                    .map(|equippable| equippable.slot);
                if let Some(slot) = slot.filter(|_| is_equipped_label(&record.name)) {
                    equip_to_slot(state, &mut NullLog, container, slot, id, false)?;
                }
            }
            debug!(entity = %id, name = %record.name, "item restored");
        }
        EntityPayload::Other => {
            state.spawn(entity)?;
        }
    }
    Ok(())
}
