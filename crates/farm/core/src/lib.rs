//! Data model, session interfaces and filter predicates for the farming engine.
//!
//! `farm-core` describes what the engine can observe (units, the player, the
//! party), how it talks to the game (the [`GameSession`] trait family and the
//! [`ActionCatalog`]), and the pure predicates that decide whether an ability
//! or a unit is currently usable. Nothing here is async and nothing here
//! performs I/O; the runtime crate drives these types from its poll loop.
pub mod ability;
pub mod config;
pub mod filter;
pub mod session;
pub mod state;

pub use ability::{Ability, AbilityCategory, TargetType};
pub use config::{
    BattleAction, BattleList, BattleLists, BattleSlot, FarmConfig, RestConfig, RouteConfig,
    SharedConfig, TargetingConfig,
};
pub use filter::{action_filter, select_target, unit_filter};
pub use session::{
    ActionCatalog, GameSession, MemoryCatalog, MemorySession, Navigator, PlayerController,
    RecastTimer, SessionError, UsedAbility,
};
pub use state::{PartyMember, Player, Position, Status, Unit, UnitId, UnitKind};
