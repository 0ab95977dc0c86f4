use super::Position;

/// Game-assigned identifier of a unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Posture/status reported by the game for a unit or the player.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Status {
    /// Standing, not in combat.
    #[default]
    Idle,
    /// In active combat.
    Engaged,
    /// Sitting down to recover HP/MP.
    Resting,
    Dead,
    /// Changing zones; nothing can be issued.
    Zoning,
    Unknown,
}

/// Broad classification of a unit in the NPC list.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum UnitKind {
    #[default]
    Monster,
    Npc,
    /// Another player character.
    Pc,
}

/// A unit visible in the game world.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub kind: UnitKind,
    pub position: Position,
    pub status: Status,
    /// Health in percent (0-100).
    pub hpp: u8,
    /// Who currently owns the claim on this unit, if anyone.
    pub claimed_by: Option<UnitId>,
    pub is_rendered: bool,
}

impl Unit {
    pub fn new(id: UnitId, name: impl Into<String>, position: Position) -> Self {
        Self {
            id,
            name: name.into(),
            kind: UnitKind::Monster,
            position,
            status: Status::Idle,
            hpp: 100,
            claimed_by: None,
            is_rendered: true,
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: UnitKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_hpp(mut self, hpp: u8) -> Self {
        self.hpp = hpp.min(100);
        self
    }

    #[must_use]
    pub fn claimed_by(mut self, owner: UnitId) -> Self {
        self.claimed_by = Some(owner);
        self
    }

    pub fn is_dead(&self) -> bool {
        self.status == Status::Dead || self.hpp == 0
    }

    pub fn is_engaged(&self) -> bool {
        self.status == Status::Engaged
    }

    pub fn is_claimed(&self) -> bool {
        self.claimed_by.is_some()
    }
}
