//! Ability descriptors resolved from the [`crate::ActionCatalog`].
//!
//! An [`Ability`] is immutable: it is loaded once by the host from whatever
//! database it uses and handed to the engine by value.

use std::time::Duration;

/// What an ability is used for.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AbilityCategory {
    Offensive,
    Buff,
    Heal,
    Pull,
    Weaponskill,
}

/// Who an ability may be used on.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TargetType {
    /// Only the player.
    #[strum(serialize = "self")]
    SelfOnly,
    /// The player or a party member.
    Ally,
    Enemy,
}

/// Immutable description of something the player can use.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ability {
    pub id: u32,
    pub name: String,
    pub category: AbilityCategory,
    pub target_type: TargetType,
    /// Minimum time between two uses.
    pub recast: Duration,
    /// Time the player is locked while the ability resolves.
    pub cast_time: Duration,
    /// Maximum distance to the target in yalms.
    pub range: f32,
    pub mp_cost: u32,
    pub tp_cost: u32,
}

impl Ability {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        category: AbilityCategory,
        target_type: TargetType,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            target_type,
            recast: Duration::ZERO,
            cast_time: Duration::ZERO,
            range: 0.0,
            mp_cost: 0,
            tp_cost: 0,
        }
    }

    #[must_use]
    pub fn with_recast(mut self, recast: Duration) -> Self {
        self.recast = recast;
        self
    }

    #[must_use]
    pub fn with_cast_time(mut self, cast_time: Duration) -> Self {
        self.cast_time = cast_time;
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: f32) -> Self {
        self.range = range;
        self
    }

    #[must_use]
    pub fn with_mp_cost(mut self, mp_cost: u32) -> Self {
        self.mp_cost = mp_cost;
        self
    }

    #[must_use]
    pub fn with_tp_cost(mut self, tp_cost: u32) -> Self {
        self.tp_cost = tp_cost;
        self
    }

    pub fn targets_enemy(&self) -> bool {
        self.target_type == TargetType::Enemy
    }
}
