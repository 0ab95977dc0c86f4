//! Context handed to every behavior state.
//!
//! [`FarmContext`] is owned by the engine worker and lives as long as a
//! session is attached. It carries the live session, the configuration
//! snapshot taken at the start of the tick, the executor, and the
//! [`CombatContext`] that combat states share. Only the active state mutates
//! the combat context, and the single poll loop serializes those mutations.

use std::sync::Arc;

use farm_core::{FarmConfig, GameSession, Unit, UnitId, unit_filter};

use crate::events::{Event, EventBus};
use crate::executor::Executor;

/// State of the current engagement, shared by the combat states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CombatContext {
    /// Set when Fight enters; cleared when the engagement ends or the
    /// engine halts.
    pub is_fighting: bool,
    /// Unit selected for this engagement. Never names a dead or vanished
    /// unit past the start of a tick.
    pub target: Option<UnitId>,
}

impl CombatContext {
    /// Ends the engagement.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

pub struct FarmContext {
    session: Arc<dyn GameSession>,
    pub executor: Executor,
    /// Configuration as of the start of this tick.
    pub config: FarmConfig,
    pub combat: CombatContext,
    events: EventBus,
    pause: Option<String>,
}

impl FarmContext {
    pub fn new(
        session: Arc<dyn GameSession>,
        executor: Executor,
        config: FarmConfig,
        events: EventBus,
    ) -> Self {
        Self {
            session,
            executor,
            config,
            combat: CombatContext::default(),
            events,
            pause: None,
        }
    }

    pub fn session(&self) -> &dyn GameSession {
        self.session.as_ref()
    }

    /// The engagement target as the game sees it now, if it is still alive
    /// and rendered.
    pub fn target_unit(&self) -> Option<Unit> {
        let id = self.combat.target?;
        self.session
            .unit(id)
            .filter(unit_filter::is_valid_unit)
    }

    /// The engagement target if it still qualifies as a mob to farm.
    pub fn target_mob(&self) -> Option<Unit> {
        self.target_unit()
            .filter(|unit| unit_filter::mob(self.session(), unit, &self.config.targeting))
    }

    /// Publishes a human-readable status message.
    pub fn status(&self, message: impl Into<String>) {
        self.events.publish(Event::status(message));
    }

    /// Asks the engine to halt after the current tick.
    pub fn request_pause(&mut self, reason: impl Into<String>) {
        self.pause = Some(reason.into());
    }

    pub(crate) fn take_pause(&mut self) -> Option<String> {
        self.pause.take()
    }

    /// Takes the tick's configuration snapshot and settles the engagement
    /// against the current world: a dead or vanished target is dropped, and
    /// a target that no longer qualifies as a mob ends the fight.
    pub(crate) fn refresh(&mut self, config: FarmConfig) {
        self.config = config;

        if self.combat.target.is_some() && self.target_unit().is_none() {
            self.combat.reset();
        } else if self.combat.is_fighting && self.target_mob().is_none() {
            self.combat.is_fighting = false;
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Fixtures shared by the state tests.

    use std::sync::Arc;
    use std::time::Duration;

    use farm_core::{
        Ability, AbilityCategory, BattleAction, BattleSlot, FarmConfig, MemoryCatalog,
        MemorySession, Position, TargetType, Unit, UnitId,
    };

    use super::FarmContext;
    use crate::events::EventBus;
    use crate::executor::Executor;

    pub fn catalog() -> MemoryCatalog {
        MemoryCatalog::new()
            .with(Ability::new(1, "Protect", AbilityCategory::Buff, TargetType::SelfOnly))
            .with(Ability::new(2, "Cure", AbilityCategory::Heal, TargetType::SelfOnly))
            .with(
                Ability::new(3, "Provoke", AbilityCategory::Pull, TargetType::Enemy)
                    .with_range(20.0),
            )
            .with(
                Ability::new(4, "Slash", AbilityCategory::Offensive, TargetType::Enemy)
                    .with_range(5.0),
            )
    }

    pub fn config() -> FarmConfig {
        let mut config = FarmConfig::default();
        config.battle_lists.set(BattleSlot::Pull, vec![BattleAction::new("Provoke")]);
        config.battle_lists.set(BattleSlot::Fight, vec![BattleAction::new("Slash")]);
        config
    }

    pub fn crab(x: f32) -> Unit {
        Unit::new(UnitId(7), "Crab", Position::new(x, 0.0, 0.0))
    }

    pub fn context(session: &Arc<MemorySession>, config: FarmConfig) -> FarmContext {
        let events = EventBus::new();
        let executor = Executor::new(Arc::new(catalog()), events.clone(), Duration::ZERO);
        FarmContext::new(session.clone(), executor, config, events)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{config, context, crab};
    use super::*;
    use farm_core::{MemorySession, Status};

    #[test]
    fn dead_or_missing_target_reads_as_none() {
        let session = Arc::new(MemorySession::default().with_unit(crab(3.0)));
        let mut ctx = context(&session, config());
        assert!(ctx.target_unit().is_none());

        ctx.combat.target = Some(UnitId(7));
        assert_eq!(ctx.target_unit().map(|unit| unit.id), Some(UnitId(7)));

        session.update_unit(UnitId(7), |unit| unit.status = Status::Dead);
        assert!(ctx.target_unit().is_none());

        ctx.combat.target = Some(UnitId(99));
        assert!(ctx.target_unit().is_none());
    }

    #[test]
    fn refresh_drops_a_dead_target() {
        let session = Arc::new(MemorySession::default().with_unit(crab(3.0)));
        let mut ctx = context(&session, config());
        ctx.combat.target = Some(UnitId(7));

        ctx.refresh(config());
        assert_eq!(ctx.combat.target, Some(UnitId(7)));

        session.update_unit(UnitId(7), |unit| unit.hpp = 0);
        ctx.refresh(config());
        assert_eq!(ctx.combat, CombatContext::default());
    }

    #[test]
    fn refresh_ends_a_fight_on_a_target_we_lost() {
        let session = Arc::new(
            MemorySession::default()
                .with_unit(crab(3.0).with_status(Status::Engaged).claimed_by(UnitId(0))),
        );
        let mut ctx = context(&session, config());
        ctx.combat.target = Some(UnitId(7));
        ctx.combat.is_fighting = true;

        ctx.refresh(config());
        assert!(ctx.combat.is_fighting);

        session.update_unit(UnitId(7), |unit| unit.claimed_by = Some(UnitId(42)));
        ctx.refresh(config());
        assert!(!ctx.combat.is_fighting);
        assert_eq!(ctx.combat.target, Some(UnitId(7)));
    }

    #[test]
    fn pause_request_is_taken_once() {
        let session = Arc::new(MemorySession::default());
        let mut ctx = context(&session, config());
        ctx.request_pause("player died");

        assert_eq!(ctx.take_pause().as_deref(), Some("player died"));
        assert_eq!(ctx.take_pause(), None);
    }
}
