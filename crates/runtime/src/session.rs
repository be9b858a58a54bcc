//! Session orchestration: the tick loop, floor transitions and save/load.
//!
//! A [`Session`] owns the live [`GameState`], the in-memory [`SaveTree`], the
//! reference collaborators and the message log. Hosts drive it with
//! [`Session::tick`] and [`Session::player_action`]; everything else happens
//! on explicit calls.

use std::time::Duration;

use game_content::TemplateCatalog;
use game_core::engine::refresh_all;
use game_core::{
    Action, Advance, DungeonGenerator, EntityId, GameConfig, GameEngine, GameEnv, GameState,
    GenerationParams, MapMemory, PcgRng, Position, RestoreJob, RestoreProgress, RngOracle, Room,
    SaveTree, SceneSnapshot, SnapshotError, TemplateRegistry, TickReport, TurnCost,
    capture_scene, env::compute_seed,
};
use tracing::{debug, error, info, trace};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::oracle::{BfsPathfinder, BoundedLog, LineOfSightFov, RoomsAndCorridors};
use crate::repository::{FileSaveRepository, SaveRepository};

const GENERATE_CONTEXT: u32 = 0x4745_4e00;
const POPULATE_CONTEXT: u32 = 0x504f_5000;

/// Read-only collaborators lent to the core on every call.
struct Oracles {
    config: GameConfig,
    catalog: TemplateCatalog,
    fov: LineOfSightFov,
    paths: BfsPathfinder,
    generator: RoomsAndCorridors,
    rng: PcgRng,
}

impl Oracles {
    fn env(&self) -> GameEnv<'_> {
        GameEnv::with_all(&self.config, &self.fov, &self.paths, &self.catalog, &self.rng)
    }
}

pub struct Session {
    oracles: Oracles,
    repository: Box<dyn SaveRepository>,
    state: GameState,
    saves: SaveTree,
    messages: BoundedLog,
    restore: Option<RestoreJob>,
}

impl Session {
    pub fn new(
        config: RuntimeConfig,
        catalog: TemplateCatalog,
        repository: Box<dyn SaveRepository>,
    ) -> Self {
        let state = GameState::new(config.game_seed, &config.game);
        Self {
            oracles: Oracles {
                config: config.game,
                catalog,
                fov: LineOfSightFov,
                paths: BfsPathfinder,
                generator: RoomsAndCorridors,
                rng: PcgRng,
            },
            repository,
            state,
            saves: SaveTree::new(),
            messages: BoundedLog::new(config.message_capacity),
            restore: None,
        }
    }

    /// Session persisting to `{save_dir}/{save_file_name}`.
    pub fn with_file_store(config: RuntimeConfig, catalog: TemplateCatalog) -> Result<Self> {
        let repository = FileSaveRepository::new(&config.save_dir, &config.save_file_name)?;
        Ok(Self::new(config, catalog, Box::new(repository)))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn saves(&self) -> &SaveTree {
        &self.saves
    }

    pub fn messages(&self) -> &BoundedLog {
        &self.messages
    }

    pub fn config(&self) -> &GameConfig {
        &self.oracles.config
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.oracles.catalog
    }

    pub fn is_restoring(&self) -> bool {
        self.restore.is_some()
    }

    pub fn is_player_turn(&self) -> bool {
        self.state.turn.player_turn
    }

    /// Starts over on a freshly generated first floor.
    ///
    /// This and descending to an unvisited floor are the only paths that
    /// fabricate a floor.
    pub fn new_game(&mut self) -> Result<()> {
        self.abandon_restore();
        let game_seed = self.state.game_seed;
        self.state = GameState::new(game_seed, &self.oracles.config);
        self.saves = SaveTree::new();
        self.messages.clear();

        self.fabricate_floor(1)?;
        info!(seed = game_seed, "new game started");
        Ok(())
    }

    /// Feeds elapsed time.
    ///
    /// While a restore is running each tick replays exactly one record and no
    /// turn is taken; otherwise the turn rotation runs until the player is up.
    pub fn tick(&mut self, elapsed: Duration) -> Result<TickReport> {
        if let Some(job) = self.restore.as_mut() {
            let env = self.oracles.env();
            match job.step(&mut self.state, &env) {
                Ok(RestoreProgress::Complete) => {
                    self.restore = None;
                    debug!(floor = self.state.floor, "floor ready");
                    let mut engine = GameEngine::new(&mut self.state, &mut self.messages);
                    let mut report = TickReport::default();
                    if let Advance::Acted(_) = engine.resume(&env)? {
                        report.turns_taken = 1;
                    }
                    report.player_turn = engine.is_player_turn();
                    return Ok(report);
                }
                Ok(RestoreProgress::Pending { restored, total }) => {
                    trace!(restored, total, "restore step");
                }
                Err(restore_error) => {
                    self.abandon_restore();
                    error!(error = %restore_error, "restore failed");
                    return Err(restore_error.into());
                }
            }
            return Ok(TickReport::default());
        }

        let env = self.oracles.env();
        let mut engine = GameEngine::new(&mut self.state, &mut self.messages);
        Ok(engine.tick(&env, elapsed)?)
    }

    /// Runs the pending restore to its end.
    pub fn finish_restore(&mut self) -> Result<()> {
        while self.restore.is_some() {
            self.tick(Duration::ZERO)?;
        }
        Ok(())
    }

    pub fn player_action(&mut self, action: &Action) -> Result<TurnCost> {
        let env = self.oracles.env();
        let mut engine = GameEngine::new(&mut self.state, &mut self.messages);
        Ok(engine.player_action(&env, action)?)
    }

    /// Records the current floor in the save tree and marks it as the floor
    /// the player is on.
    pub fn save_floor(&mut self) -> Result<()> {
        if self.state.restoring {
            return Err(SnapshotError::RestoreInProgress.into());
        }
        let scene = capture_scene(&mut self.state)?;
        let floor = scene.floor;
        self.saves.upsert_scene(scene);
        self.saves.saved_floor = floor;
        Ok(())
    }

    /// Records the current floor and writes the whole tree to the store.
    pub fn save_game(&mut self) -> Result<()> {
        self.save_floor()?;
        self.repository.save(&self.saves)?;
        info!(
            floor = self.saves.saved_floor,
            floors = self.saves.scenes.len(),
            "game saved"
        );
        Ok(())
    }

    /// Reads the stored tree and starts restoring the floor it was saved on,
    /// player included.
    pub fn load_game(&mut self) -> Result<()> {
        let tree = self.repository.load()?.ok_or(RuntimeError::NoSave)?;
        let scene = required_scene(&tree, tree.saved_floor)?;

        self.abandon_restore();
        self.saves = tree;
        self.begin_restore(&scene, true)?;
        info!(floor = scene.floor, "game loading");
        Ok(())
    }

    pub fn has_save(&self) -> bool {
        self.repository.exists()
    }

    pub fn delete_save(&mut self) -> Result<()> {
        self.repository.delete()?;
        info!("save deleted");
        Ok(())
    }

    /// Leaves the current floor for `floor + delta`.
    ///
    /// The current floor is recorded first. A floor visited before is
    /// restored around the live player; an unvisited floor below is generated.
    pub fn change_floor(&mut self, delta: i32) -> Result<()> {
        let requested = i64::from(self.state.floor) + i64::from(delta);
        let target = u32::try_from(requested)
            .ok()
            .filter(|floor| *floor >= 1)
            .ok_or(RuntimeError::InvalidFloor(requested))?;

        let from = self.state.floor;
        self.save_floor()?;

        if let Some(scene) = self.saves.scene(target).cloned() {
            info!(from, to = target, "returning to a visited floor");
            self.begin_restore(&scene, false)
        } else if target > from {
            info!(from, to = target, "descending to a new floor");
            self.state.reset_world(true);
            self.fabricate_floor(target)
        } else {
            error!(floor = target, "save data missing for floor");
            Err(SnapshotError::MissingScene { floor: target }.into())
        }
    }

    /// Restores a recorded floor around the live player. A floor with no
    /// recorded scene is a hard error.
    pub fn load_floor(&mut self, floor: u32) -> Result<()> {
        let scene = required_scene(&self.saves, floor)?;
        self.begin_restore(&scene, false)
    }

    fn begin_restore(&mut self, scene: &SceneSnapshot, allow_player_replace: bool) -> Result<()> {
        let job = RestoreJob::begin(&mut self.state, scene, allow_player_replace)?;
        self.restore = Some(job);
        Ok(())
    }

    fn abandon_restore(&mut self) {
        if let Some(job) = self.restore.take() {
            job.abandon(&mut self.state);
        }
    }

    fn fabricate_floor(&mut self, floor: u32) -> Result<()> {
        let seed = compute_seed(self.state.game_seed, u64::from(floor), 0, GENERATE_CONTEXT);
        let params = GenerationParams::from_config(&self.oracles.config, floor, seed);
        let generated = self.oracles.generator.generate(&params);
        let entrance = generated
            .entrance()
            .ok_or(RuntimeError::EmptyFloor { floor })?;

        let mut map = MapMemory::new(params.width, params.height);
        for (position, kind) in &generated.tiles {
            map.set_tile(*position, *kind);
        }
        map.rooms = generated.rooms.clone();
        self.state.map = map;
        self.state.floor = floor;

        match self.state.entities.player_mut() {
            Some(player) => player.position = entrance,
            None => {
                self.spawn_template(GameConfig::PLAYER_TEMPLATE, entrance)?;
            }
        }

        for (index, room) in generated.rooms.iter().enumerate().skip(1) {
            self.populate_room(floor, index, room)?;
        }

        refresh_all(&mut self.state, &self.oracles.fov);
        info!(
            floor,
            rooms = generated.rooms.len(),
            entities = self.state.entities.entity_ids().len(),
            "floor fabricated"
        );
        Ok(())
    }

    fn populate_room(&mut self, floor: u32, index: usize, room: &Room) -> Result<()> {
        let cells: Vec<Position> = room.inner().collect();
        if cells.is_empty() {
            return Ok(());
        }
        let mut rolls = RoomRolls::new(self.oracles.rng, self.state.game_seed, floor, index);

        let monsters = rolls.below(self.oracles.config.max_monsters_per_room + 1);
        let items = rolls.below(self.oracles.config.max_items_per_room + 1);
        let spawns = self.oracles.catalog.spawns();
        let mut picks = Vec::new();
        for _ in 0..monsters {
            let cell = cells[rolls.below(cells.len())];
            if let Some(name) = spawns.pick_monster(floor, rolls.next()) {
                picks.push((name.to_owned(), cell));
            }
        }
        for _ in 0..items {
            let cell = cells[rolls.below(cells.len())];
            if let Some(name) = spawns.pick_item(floor, rolls.next()) {
                picks.push((name.to_owned(), cell));
            }
        }

        for (name, cell) in picks {
            let occupied = self.state.entities.entities().any(|entity| entity.position == cell);
            if !occupied {
                self.spawn_template(&name, cell)?;
            }
        }
        Ok(())
    }

    /// Places a templated entity on the current floor.
    pub fn spawn_template(&mut self, name: &str, position: Position) -> Result<EntityId> {
        let entity = self
            .oracles
            .catalog
            .instantiate(name, position)
            .ok_or_else(|| RuntimeError::MissingTemplate(name.to_string()))?;
        let id = self.state.spawn(entity)?;
        trace!(entity = %id, name, %position, "spawned");
        Ok(id)
    }
}

fn required_scene(tree: &SaveTree, floor: u32) -> Result<SceneSnapshot> {
    match tree.require_scene(floor) {
        Ok(scene) => Ok(scene.clone()),
        Err(missing) => {
            error!(floor, "save data missing for floor");
            Err(missing.into())
        }
    }
}

/// Independent rolls for populating one room.
struct RoomRolls {
    rng: PcgRng,
    game_seed: u64,
    floor: u64,
    room: u32,
    counter: u32,
}

impl RoomRolls {
    fn new(rng: PcgRng, game_seed: u64, floor: u32, room: usize) -> Self {
        Self {
            rng,
            game_seed,
            floor: u64::from(floor),
            room: u32::try_from(room).unwrap_or(u32::MAX),
            counter: 0,
        }
    }

    fn seed(&mut self) -> u64 {
        self.counter += 1;
        let context = POPULATE_CONTEXT.wrapping_add(self.counter);
        compute_seed(self.game_seed, self.floor, self.room, context)
    }

    fn next(&mut self) -> u32 {
        let seed = self.seed();
        self.rng.next_u32(seed)
    }

    /// Uniform value in `0..bound`.
    fn below(&mut self, bound: usize) -> usize {
        let seed = self.seed();
        self.rng.pick_index(seed, bound)
    }
}
