//! User-editable farming configuration.
//!
//! The host UI owns a [`SharedConfig`] and mutates it from its own thread;
//! the engine takes a [`FarmConfig`] snapshot at the start of every tick, so
//! an edit becomes visible on the next tick without any transactional
//! coordination.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::state::Position;

/// Behavior slot a battle list feeds.
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
#[strum(ascii_case_insensitive)]
pub enum BattleSlot {
    Start,
    Pull,
    Healing,
    Fight,
}

impl BattleSlot {
    pub const ALL: [BattleSlot; 4] = [
        BattleSlot::Start,
        BattleSlot::Pull,
        BattleSlot::Healing,
        BattleSlot::Fight,
    ];
}

/// One configured entry of a battle list.
///
/// The ability itself is referenced by name and resolved through the
/// [`crate::ActionCatalog`] every time it is considered.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleAction {
    pub name: String,
    pub is_enabled: bool,
    /// Lowest player HP% (inclusive) at which the action may be used.
    pub health_low: u8,
    /// Highest player HP% (inclusive) at which the action may be used.
    pub health_high: u8,
    /// Buff granted by this action; skipped while the player already has it.
    pub status_effect: Option<String>,
    /// Only use against targets below this HP%.
    pub target_health_below: Option<u8>,
}

impl Default for BattleAction {
    fn default() -> Self {
        Self {
            name: String::new(),
            is_enabled: true,
            health_low: 0,
            health_high: 100,
            status_effect: None,
            target_health_below: None,
        }
    }
}

impl BattleAction {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.is_enabled = false;
        self
    }

    #[must_use]
    pub fn with_health_window(mut self, low: u8, high: u8) -> Self {
        self.health_low = low;
        self.health_high = high;
        self
    }

    #[must_use]
    pub fn with_status_effect(mut self, effect: impl Into<String>) -> Self {
        self.status_effect = Some(effect.into());
        self
    }

    #[must_use]
    pub fn with_target_health_below(mut self, hpp: u8) -> Self {
        self.target_health_below = Some(hpp);
        self
    }
}

/// Ordered actions for one behavior slot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleList {
    pub slot: BattleSlot,
    pub actions: Vec<BattleAction>,
}

impl BattleList {
    pub fn new(slot: BattleSlot, actions: Vec<BattleAction>) -> Self {
        Self { slot, actions }
    }

    pub fn enabled(&self) -> impl Iterator<Item = &BattleAction> {
        self.actions.iter().filter(|action| action.is_enabled)
    }
}

/// All battle lists, one per slot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleLists {
    lists: Vec<BattleList>,
}

impl Default for BattleLists {
    fn default() -> Self {
        Self {
            lists: BattleSlot::ALL
                .iter()
                .map(|&slot| BattleList::new(slot, Vec::new()))
                .collect(),
        }
    }
}

impl BattleLists {
    /// Actions configured for `slot`; empty when the slot has no list.
    pub fn get(&self, slot: BattleSlot) -> &[BattleAction] {
        self.lists
            .iter()
            .find(|list| list.slot == slot)
            .map(|list| list.actions.as_slice())
            .unwrap_or(&[])
    }

    /// Replaces the list for `slot`.
    pub fn set(&mut self, slot: BattleSlot, actions: Vec<BattleAction>) {
        match self.lists.iter_mut().find(|list| list.slot == slot) {
            Some(list) => list.actions = actions,
            None => self.lists.push(BattleList::new(slot, actions)),
        }
    }

    /// Appends one action to the list for `slot`.
    pub fn push(&mut self, slot: BattleSlot, action: BattleAction) {
        match self.lists.iter_mut().find(|list| list.slot == slot) {
            Some(list) => list.actions.push(action),
            None => self.lists.push(BattleList::new(slot, vec![action])),
        }
    }

    #[must_use]
    pub fn with(mut self, slot: BattleSlot, actions: Vec<BattleAction>) -> Self {
        self.set(slot, actions);
        self
    }

    pub fn lists(&self) -> &[BattleList] {
        &self.lists
    }
}

/// When to sit down and recover.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RestConfig {
    pub enabled: bool,
    /// Start resting below this HP%.
    pub low_health: u8,
    /// Start resting below this MP%.
    pub low_magic: u8,
    /// Keep resting until HP% reaches this.
    pub high_health: u8,
    /// Keep resting until MP% reaches this.
    pub high_magic: u8,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            low_health: 50,
            low_magic: 20,
            high_health: 100,
            high_magic: 100,
        }
    }
}

/// Which units are worth engaging.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TargetingConfig {
    /// Ignore units farther than this.
    pub detection_distance: f32,
    /// Ignore units whose height differs more than this.
    pub height_threshold: f32,
    /// Units claimed by a party member are fair game.
    pub claimed_by_party_allowed: bool,
    /// When non-empty, only these names are engaged.
    pub targets: Vec<String>,
    /// Never engage these names.
    pub ignored: Vec<String>,
    /// Melee distance kept from the target while fighting.
    pub approach_distance: f32,
}

impl Default for TargetingConfig {
    fn default() -> Self {
        Self {
            detection_distance: 17.0,
            height_threshold: 5.0,
            claimed_by_party_allowed: true,
            targets: Vec::new(),
            ignored: Vec::new(),
            approach_distance: 3.0,
        }
    }
}

impl TargetingConfig {
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignored.iter().any(|n| n.eq_ignore_ascii_case(name))
    }

    pub fn is_wanted(&self, name: &str) -> bool {
        self.targets.is_empty() || self.targets.iter().any(|n| n.eq_ignore_ascii_case(name))
    }
}

/// Waypoints walked while there is nothing to fight.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RouteConfig {
    pub waypoints: Vec<Position>,
    /// Walk the route back and forth instead of looping to the start.
    pub straight: bool,
}

/// Everything the user can configure about a farming session.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FarmConfig {
    pub battle_lists: BattleLists,
    pub rest: RestConfig,
    pub targeting: TargetingConfig,
    pub route: RouteConfig,
}

/// Configuration shared between the host UI and the engine.
#[derive(Clone, Debug, Default)]
pub struct SharedConfig {
    inner: Arc<RwLock<FarmConfig>>,
}

impl SharedConfig {
    pub fn new(config: FarmConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Clones the current configuration.
    pub fn snapshot(&self) -> FarmConfig {
        self.inner.read().clone()
    }

    /// Applies an edit under the write lock.
    pub fn update<R>(&self, edit: impl FnOnce(&mut FarmConfig) -> R) -> R {
        edit(&mut self.inner.write())
    }

    /// Replaces the whole configuration, e.g. after the host loaded a profile.
    pub fn replace(&self, config: FarmConfig) {
        *self.inner.write() = config;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_slot_reads_as_empty() {
        let lists = BattleLists { lists: Vec::new() };
        assert!(lists.get(BattleSlot::Pull).is_empty());
    }

    #[test]
    fn set_replaces_existing_slot() {
        let mut lists = BattleLists::default();
        lists.set(BattleSlot::Fight, vec![BattleAction::new("Slash")]);
        lists.set(BattleSlot::Fight, vec![BattleAction::new("Stab")]);

        assert_eq!(lists.get(BattleSlot::Fight).len(), 1);
        assert_eq!(lists.get(BattleSlot::Fight)[0].name, "Stab");
        assert_eq!(lists.lists().len(), 4);
    }

    #[test]
    fn slot_names_match_ui_labels() {
        assert_eq!(BattleSlot::Healing.to_string(), "Healing");
        assert_eq!("pull".parse::<BattleSlot>().unwrap(), BattleSlot::Pull);
    }

    #[test]
    fn shared_config_edits_are_visible_in_next_snapshot() {
        let shared = SharedConfig::default();
        let before = shared.snapshot();

        shared.update(|cfg| cfg.rest.enabled = false);

        assert!(before.rest.enabled);
        assert!(!shared.snapshot().rest.enabled);
    }

    #[test]
    fn targeting_lists_are_case_insensitive() {
        let targeting = TargetingConfig {
            targets: vec!["Mandragora".into()],
            ignored: vec!["Goblin".into()],
            ..TargetingConfig::default()
        };
        assert!(targeting.is_wanted("mandragora"));
        assert!(!targeting.is_wanted("Bee"));
        assert!(targeting.is_ignored("GOBLIN"));
    }
}
