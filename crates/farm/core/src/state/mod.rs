//! Snapshot types describing what the engine can observe in the game world.
//!
//! Every value here is produced fresh by a [`crate::GameSession`] read and is
//! never persisted. The engine must not hold on to a snapshot for longer than
//! one tick: the game keeps changing underneath it.
mod player;
mod position;
mod unit;

pub use player::{PartyMember, Player};
pub use position::Position;
pub use unit::{Status, Unit, UnitId, UnitKind};
