//! Interfaces to the live game and to the ability database.
//!
//! The engine never touches process memory or parses ability files itself.
//! A host implements [`GameSession`] on top of whatever attachment mechanism
//! it uses and hands it to the runtime; reads may race with the game and
//! must not be cached beyond one tick.
//!
//! Reads are infallible and return the game's current view. Commands return
//! [`SessionError`] so the engine can tell a refused command (transient,
//! re-evaluated next tick) from a lost session (fatal).
mod catalog;
mod error;
mod memory;

pub use catalog::{ActionCatalog, MemoryCatalog};
pub use error::SessionError;
pub use memory::{MemorySession, UsedAbility};

use std::time::Duration;

use crate::ability::Ability;
use crate::state::{PartyMember, Player, Position, Unit, UnitId};

/// Live view of the game plus the handles used to act on it.
pub trait GameSession: Send + Sync {
    /// Confirms the session is still attached. Called once per tick.
    fn heartbeat(&self) -> Result<(), SessionError>;

    fn player(&self) -> Player;

    /// Unit currently selected in game, if any.
    fn target(&self) -> Option<Unit>;

    fn party(&self) -> Vec<PartyMember>;

    /// Every unit the game currently reports around the player.
    fn npcs(&self) -> Vec<Unit>;

    /// Looks up a single unit by id.
    fn unit(&self, id: UnitId) -> Option<Unit> {
        self.npcs().into_iter().find(|unit| unit.id == id)
    }

    fn navigator(&self) -> &dyn Navigator;

    fn timer(&self) -> &dyn RecastTimer;

    fn controller(&self) -> &dyn PlayerController;
}

/// Movement of the player character.
pub trait Navigator: Send + Sync {
    /// Stops any movement in progress.
    fn reset(&self);

    /// Moves toward `position`. With `keep_running` the character keeps
    /// moving after this call returns.
    fn goto(&self, position: &Position, keep_running: bool) -> Result<(), SessionError>;

    /// Distance from the player to `position`.
    fn distance_to(&self, position: &Position) -> f32;

    /// Turns the player toward `position`; `Ok(false)` when already facing it.
    fn face_heading(&self, position: &Position) -> Result<bool, SessionError>;

    /// Distance under which a destination counts as reached.
    fn distance_tolerance(&self) -> f32 {
        1.0
    }
}

/// Live recast timers.
pub trait RecastTimer: Send + Sync {
    /// Time until `ability` can be used again. Zero means ready.
    fn remaining(&self, ability: &Ability) -> Duration;

    fn is_ready(&self, ability: &Ability) -> bool {
        self.remaining(ability).is_zero()
    }
}

/// Commands issued on behalf of the player.
pub trait PlayerController: Send + Sync {
    /// Issues `ability`, optionally against `target` (`None` means the player).
    fn use_ability(&self, ability: &Ability, target: Option<UnitId>) -> Result<(), SessionError>;

    fn set_target(&self, target: UnitId) -> Result<(), SessionError>;

    /// Draws weapons on the current target.
    fn engage(&self) -> Result<(), SessionError>;

    fn disengage(&self) -> Result<(), SessionError>;

    /// Sits down to recover.
    fn rest(&self) -> Result<(), SessionError>;

    fn stand(&self) -> Result<(), SessionError>;
}
