//! Deterministic dungeon rules shared by the runtime and the headless client.
//!
//! `game-core` owns the world registry, the turn scheduler, actions and AI
//! policies, and the scene snapshot format. It performs no I/O: field of view,
//! pathfinding, dungeon generation and entity templates are reached through
//! the collaborator traits in [`env`], and every message goes through a
//! [`env::MessageLog`].
pub mod action;
pub mod ai;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod snapshot;
pub mod state;

pub use action::{
    Action, ActionError, ActionTransition, ActivateAction, BumpAction, CancelTargetingAction,
    CastAction, DropAction, LevelUpAction, LevelUpChoice, MeleeAction, MoveAction, PickUpAction,
    ToggleEquipAction, TurnCost, WaitAction,
};
pub use ai::{AiKind, AiPolicy, ConfusedState, PursueState};
pub use config::GameConfig;
pub use engine::{Advance, GameEngine, TickReport, TurnError};
pub use env::{
    DungeonGenerator, FieldOfView, GameEnv, GeneratedFloor, GenerationParams, Message, MessageLog,
    MessageTone, NullLog, OracleError, Pathfinder, PcgRng, RngOracle, TemplateRegistry,
};
pub use error::{ErrorSeverity, GameError};
pub use snapshot::{
    RestoreJob, RestoreProgress, SaveTree, SceneSnapshot, SnapshotError, capture_scene,
};
pub use state::{
    ActorData, ActorRole, Consumable, Entity, EntityId, EntityKind, EquipmentSlot, Equippable,
    FighterState, GameState, ItemData, Level, LevelState, MapMemory, Offset, Position,
    RegistryError, Room, TileKind,
};
