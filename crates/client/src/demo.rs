//! Simulated world the binary farms when no real game is attached.
//!
//! A handful of crabs roam around a small square route. While the player is
//! engaged they hit back, and slain crabs respawn after a while, so every
//! behavior state gets exercised over a longer run.

use std::sync::Arc;
use std::time::Duration;

use farm_core::{
    Ability, AbilityCategory, BattleAction, BattleLists, BattleSlot, FarmConfig, GameSession,
    MemoryCatalog, MemorySession, Position, RouteConfig, TargetType, Unit, UnitId,
};
use tracing::debug;

/// Seconds between world steps.
const STEP: Duration = Duration::from_secs(1);
/// HP the player loses per step while engaged.
const HIT_DAMAGE: u32 = 60;
/// Crabs kept alive in the world.
const POPULATION: usize = 3;

pub fn catalog() -> MemoryCatalog {
    MemoryCatalog::new()
        .with(
            Ability::new(1, "Protect", AbilityCategory::Buff, TargetType::SelfOnly)
                .with_cast_time(Duration::from_millis(1500))
                .with_mp_cost(10),
        )
        .with(
            Ability::new(2, "Cure", AbilityCategory::Heal, TargetType::SelfOnly)
                .with_cast_time(Duration::from_secs(2))
                .with_recast(Duration::from_secs(5))
                .with_mp_cost(24),
        )
        .with(
            Ability::new(3, "Provoke", AbilityCategory::Pull, TargetType::Enemy)
                .with_recast(Duration::from_secs(10))
                .with_range(17.0),
        )
        .with(
            Ability::new(4, "Slash", AbilityCategory::Offensive, TargetType::Enemy)
                .with_recast(Duration::from_secs(2))
                .with_range(4.0),
        )
        .with(
            Ability::new(5, "Red Lotus Blade", AbilityCategory::Weaponskill, TargetType::Enemy)
                .with_range(4.0)
                .with_tp_cost(1000),
        )
}

pub fn battle_lists() -> BattleLists {
    BattleLists::default()
        .with(
            BattleSlot::Start,
            vec![BattleAction::new("Protect").with_status_effect("Protect")],
        )
        .with(BattleSlot::Pull, vec![BattleAction::new("Provoke")])
        .with(
            BattleSlot::Healing,
            vec![BattleAction::new("Cure").with_health_window(0, 45)],
        )
        .with(
            BattleSlot::Fight,
            vec![
                BattleAction::new("Red Lotus Blade").with_target_health_below(60),
                BattleAction::new("Slash"),
            ],
        )
}

pub fn farm_config() -> FarmConfig {
    FarmConfig {
        battle_lists: battle_lists(),
        route: RouteConfig {
            waypoints: vec![
                Position::new(0.0, 0.0, 0.0),
                Position::new(30.0, 0.0, 0.0),
                Position::new(30.0, 0.0, 30.0),
                Position::new(0.0, 0.0, 30.0),
            ],
            straight: false,
        },
        ..FarmConfig::default()
    }
}

fn crab(id: u32) -> Unit {
    // Spread spawns around the route
    let offset = (id % 4) as f32 * 9.0;
    Unit::new(
        UnitId(id),
        "Crab",
        Position::new(8.0 + offset, 0.0, 25.0 - offset),
    )
}

pub fn world() -> MemorySession {
    (1..=POPULATION as u32).fold(MemorySession::default(), |session, id| {
        session.with_unit(crab(id))
    })
}

/// Advances the world forever: regen, corpses, retaliation and respawns.
pub async fn simulate(session: Arc<MemorySession>) {
    let mut ticker = tokio::time::interval(STEP);
    let mut next_id = POPULATION as u32 + 1;

    loop {
        ticker.tick().await;
        session.step();

        if session.player().is_engaged() {
            session.update_player(|player| player.hp = player.hp.saturating_sub(HIT_DAMAGE));
        }

        if session.npcs().len() < POPULATION {
            debug!(id = next_id, "crab respawned");
            session.add_unit(crab(next_id));
            next_id += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use farm_core::ActionCatalog;

    #[test]
    fn every_configured_action_is_in_the_catalog() {
        let catalog = catalog();
        for list in battle_lists().lists() {
            for action in &list.actions {
                assert!(
                    catalog.resolve(&action.name).is_some(),
                    "{} missing from catalog",
                    action.name
                );
            }
        }
    }

    #[test]
    fn world_starts_populated() {
        assert_eq!(world().npcs().len(), POPULATION);
    }
}
