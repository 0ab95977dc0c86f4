//! In-memory [`GameSession`] used by tests and the demo host.
//!
//! The world reacts to commands with a tiny deterministic model: offensive
//! abilities claim and engage their target and take a fixed slice of its
//! health, buffs show up on the player, heals restore a quarter of max HP,
//! and navigation arrives instantly. [`MemorySession::step`] advances the
//! parts of the world that change on their own (resting regen, corpses).

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

use super::{GameSession, Navigator, PlayerController, RecastTimer, SessionError};
use crate::ability::{Ability, AbilityCategory, TargetType};
use crate::state::{PartyMember, Player, Position, Status, Unit, UnitId};

/// Record of one accepted [`PlayerController::use_ability`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct UsedAbility {
    pub name: String,
    pub target: Option<UnitId>,
}

#[derive(Debug)]
struct World {
    attached: bool,
    player: Player,
    target: Option<UnitId>,
    party: Vec<PartyMember>,
    units: Vec<Unit>,
    recasts: HashMap<String, Instant>,
    used: Vec<UsedAbility>,
    reject_next: Option<String>,
    damage_per_use: u8,
    navigator_resets: usize,
    destinations: Vec<Position>,
}

/// Thread-safe simulated game session.
#[derive(Debug)]
pub struct MemorySession {
    world: Mutex<World>,
}

impl Default for MemorySession {
    fn default() -> Self {
        Self::new(Player {
            id: UnitId(0),
            name: "Player".into(),
            hp: 1000,
            max_hp: 1000,
            mp: 500,
            max_mp: 500,
            ..Player::default()
        })
    }
}

impl MemorySession {
    pub fn new(player: Player) -> Self {
        Self {
            world: Mutex::new(World {
                attached: true,
                player,
                target: None,
                party: Vec::new(),
                units: Vec::new(),
                recasts: HashMap::new(),
                used: Vec::new(),
                reject_next: None,
                damage_per_use: 25,
                navigator_resets: 0,
                destinations: Vec::new(),
            }),
        }
    }

    #[must_use]
    pub fn with_unit(self, unit: Unit) -> Self {
        self.add_unit(unit);
        self
    }

    #[must_use]
    pub fn with_party_member(self, member: PartyMember) -> Self {
        self.world.lock().party.push(member);
        self
    }

    /// Health taken from an enemy by each offensive use.
    #[must_use]
    pub fn with_damage_per_use(self, damage: u8) -> Self {
        self.world.lock().damage_per_use = damage;
        self
    }

    pub fn add_unit(&self, unit: Unit) {
        let mut world = self.world.lock();
        world.units.retain(|existing| existing.id != unit.id);
        world.units.push(unit);
    }

    pub fn remove_unit(&self, id: UnitId) {
        let mut world = self.world.lock();
        world.units.retain(|unit| unit.id != id);
        if world.target == Some(id) {
            world.target = None;
        }
    }

    /// Mutates a unit in place. Returns `false` when no such unit exists.
    pub fn update_unit(&self, id: UnitId, edit: impl FnOnce(&mut Unit)) -> bool {
        let mut world = self.world.lock();
        match world.units.iter_mut().find(|unit| unit.id == id) {
            Some(unit) => {
                edit(unit);
                true
            }
            None => false,
        }
    }

    pub fn update_player(&self, edit: impl FnOnce(&mut Player)) {
        edit(&mut self.world.lock().player);
    }

    /// Forces the recast timer of `name` to `remaining` from now.
    pub fn set_recast(&self, name: &str, remaining: Duration) {
        self.world
            .lock()
            .recasts
            .insert(name.to_ascii_lowercase(), Instant::now() + remaining);
    }

    /// Makes the next `use_ability` call fail with [`SessionError::Rejected`].
    pub fn reject_next(&self, reason: impl Into<String>) {
        self.world.lock().reject_next = Some(reason.into());
    }

    /// Simulates the game process going away.
    pub fn detach(&self) {
        self.world.lock().attached = false;
    }

    pub fn used_abilities(&self) -> Vec<UsedAbility> {
        self.world.lock().used.clone()
    }

    pub fn navigator_resets(&self) -> usize {
        self.world.lock().navigator_resets
    }

    pub fn destinations(&self) -> Vec<Position> {
        self.world.lock().destinations.clone()
    }

    pub fn selected_target(&self) -> Option<UnitId> {
        self.world.lock().target
    }

    /// Advances autonomous parts of the world: resting restores 10% of
    /// HP/MP, and dead units disappear.
    pub fn step(&self) {
        let mut world = self.world.lock();

        if world.player.status == Status::Resting {
            let player = &mut world.player;
            player.hp = (player.hp + player.max_hp / 10).min(player.max_hp);
            player.mp = (player.mp + player.max_mp / 10).min(player.max_mp);
        }

        let before = world.units.len();
        world.units.retain(|unit| !unit.is_dead());
        if world.units.len() != before {
            let target = world.target;
            if let Some(id) = target
                && !world.units.iter().any(|unit| unit.id == id)
            {
                world.target = None;
                if world.player.status == Status::Engaged {
                    world.player.status = Status::Idle;
                }
            }
        }
    }

    fn ensure_attached(world: &World) -> Result<(), SessionError> {
        if world.attached {
            Ok(())
        } else {
            Err(SessionError::Detached)
        }
    }
}

impl GameSession for MemorySession {
    fn heartbeat(&self) -> Result<(), SessionError> {
        Self::ensure_attached(&self.world.lock())
    }

    fn player(&self) -> Player {
        self.world.lock().player.clone()
    }

    fn target(&self) -> Option<Unit> {
        let world = self.world.lock();
        let id = world.target?;
        world.units.iter().find(|unit| unit.id == id).cloned()
    }

    fn party(&self) -> Vec<PartyMember> {
        self.world.lock().party.clone()
    }

    fn npcs(&self) -> Vec<Unit> {
        self.world.lock().units.clone()
    }

    fn unit(&self, id: UnitId) -> Option<Unit> {
        self.world
            .lock()
            .units
            .iter()
            .find(|unit| unit.id == id)
            .cloned()
    }

    fn navigator(&self) -> &dyn Navigator {
        self
    }

    fn timer(&self) -> &dyn RecastTimer {
        self
    }

    fn controller(&self) -> &dyn PlayerController {
        self
    }
}

impl Navigator for MemorySession {
    fn reset(&self) {
        self.world.lock().navigator_resets += 1;
    }

    fn goto(&self, position: &Position, _keep_running: bool) -> Result<(), SessionError> {
        let mut world = self.world.lock();
        Self::ensure_attached(&world)?;

        let heading = world.player.position.heading_to(position);
        world.player.position = Position {
            heading,
            ..*position
        };
        world.destinations.push(*position);
        Ok(())
    }

    fn distance_to(&self, position: &Position) -> f32 {
        self.world.lock().player.position.distance(position)
    }

    fn face_heading(&self, position: &Position) -> Result<bool, SessionError> {
        let mut world = self.world.lock();
        Self::ensure_attached(&world)?;

        let heading = world.player.position.heading_to(position);
        let changed = (world.player.position.heading - heading).abs() > f32::EPSILON;
        world.player.position.heading = heading;
        Ok(changed)
    }
}

impl RecastTimer for MemorySession {
    fn remaining(&self, ability: &Ability) -> Duration {
        self.world
            .lock()
            .recasts
            .get(&ability.name.to_ascii_lowercase())
            .map(|ready_at| ready_at.saturating_duration_since(Instant::now()))
            .unwrap_or(Duration::ZERO)
    }
}

impl PlayerController for MemorySession {
    fn use_ability(&self, ability: &Ability, target: Option<UnitId>) -> Result<(), SessionError> {
        let mut world = self.world.lock();
        Self::ensure_attached(&world)?;

        if let Some(reason) = world.reject_next.take() {
            return Err(SessionError::rejected(&ability.name, reason));
        }

        let key = ability.name.to_ascii_lowercase();
        if world
            .recasts
            .get(&key)
            .is_some_and(|ready_at| *ready_at > Instant::now())
        {
            return Err(SessionError::rejected(&ability.name, "recast not ready"));
        }
        if world.player.mp < ability.mp_cost || world.player.tp < ability.tp_cost {
            return Err(SessionError::rejected(&ability.name, "not enough resources"));
        }

        world.player.mp -= ability.mp_cost;
        world.player.tp -= ability.tp_cost;
        world.recasts.insert(key, Instant::now() + ability.recast);
        world.used.push(UsedAbility {
            name: ability.name.clone(),
            target,
        });

        let player_id = world.player.id;
        let damage = world.damage_per_use;
        match (ability.target_type, target) {
            (TargetType::Enemy, Some(id)) => {
                if let Some(unit) = world.units.iter_mut().find(|unit| unit.id == id) {
                    unit.claimed_by = Some(player_id);
                    unit.hpp = unit.hpp.saturating_sub(damage);
                    unit.status = if unit.hpp == 0 {
                        Status::Dead
                    } else {
                        Status::Engaged
                    };
                }
                world.player.tp = (world.player.tp + 100).min(3000);
            }
            _ => match ability.category {
                AbilityCategory::Heal => {
                    let player = &mut world.player;
                    player.hp = (player.hp + player.max_hp / 4).min(player.max_hp);
                }
                AbilityCategory::Buff => {
                    if !world.player.has_buff(&ability.name) {
                        world.player.buffs.push(ability.name.clone());
                    }
                }
                _ => {}
            },
        }

        Ok(())
    }

    fn set_target(&self, target: UnitId) -> Result<(), SessionError> {
        let mut world = self.world.lock();
        Self::ensure_attached(&world)?;
        world.target = Some(target);
        Ok(())
    }

    fn engage(&self) -> Result<(), SessionError> {
        let mut world = self.world.lock();
        Self::ensure_attached(&world)?;
        if world.target.is_some() {
            world.player.status = Status::Engaged;
        }
        Ok(())
    }

    fn disengage(&self) -> Result<(), SessionError> {
        let mut world = self.world.lock();
        Self::ensure_attached(&world)?;
        if world.player.status == Status::Engaged {
            world.player.status = Status::Idle;
        }
        Ok(())
    }

    fn rest(&self) -> Result<(), SessionError> {
        let mut world = self.world.lock();
        Self::ensure_attached(&world)?;
        world.player.status = Status::Resting;
        Ok(())
    }

    fn stand(&self) -> Result<(), SessionError> {
        let mut world = self.world.lock();
        Self::ensure_attached(&world)?;
        if world.player.status == Status::Resting {
            world.player.status = Status::Idle;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slash() -> Ability {
        Ability::new(1, "Slash", AbilityCategory::Offensive, TargetType::Enemy)
            .with_recast(Duration::from_secs(60))
    }

    #[test]
    fn offensive_use_claims_and_damages_target() {
        let session = MemorySession::default()
            .with_unit(Unit::new(UnitId(7), "Crab", Position::ORIGIN))
            .with_damage_per_use(40);

        session
            .controller()
            .use_ability(&slash(), Some(UnitId(7)))
            .unwrap();

        let crab = session.unit(UnitId(7)).unwrap();
        assert_eq!(crab.hpp, 60);
        assert_eq!(crab.status, Status::Engaged);
        assert_eq!(crab.claimed_by, Some(UnitId(0)));
    }

    #[test]
    fn recast_blocks_second_use() {
        let session = MemorySession::default();

        session.controller().use_ability(&slash(), None).unwrap();
        assert!(!session.timer().is_ready(&slash()));

        let err = session.controller().use_ability(&slash(), None).unwrap_err();
        assert!(matches!(err, SessionError::Rejected { .. }));
        assert_eq!(session.used_abilities().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn recast_expires_with_the_clock() {
        let session = MemorySession::default();
        session.controller().use_ability(&slash(), None).unwrap();
        assert_eq!(session.timer().remaining(&slash()), Duration::from_secs(60));

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(session.timer().remaining(&slash()), Duration::from_secs(1));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(session.timer().is_ready(&slash()));
        session.controller().use_ability(&slash(), None).unwrap();
        assert_eq!(session.used_abilities().len(), 2);
    }

    #[test]
    fn detached_session_fails_commands_and_heartbeat() {
        let session = MemorySession::default();
        session.detach();

        assert_eq!(session.heartbeat(), Err(SessionError::Detached));
        assert!(session.controller().rest().unwrap_err().is_fatal());
    }

    #[test]
    fn step_regenerates_while_resting_and_clears_corpses() {
        let session = MemorySession::default()
            .with_unit(Unit::new(UnitId(3), "Bee", Position::ORIGIN).with_status(Status::Dead));
        session.update_player(|p| p.hp = 100);
        session.controller().set_target(UnitId(3)).unwrap();
        session.controller().rest().unwrap();

        session.step();

        assert_eq!(session.player().hp, 200);
        assert!(session.npcs().is_empty());
        assert!(session.target().is_none());
    }
}
