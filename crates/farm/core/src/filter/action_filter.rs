//! Ability usability predicates.
//!
//! Both filters answer "could this configured action be issued right now?".
//! They read the live session and never mutate it.

use crate::ability::{Ability, AbilityCategory};
use crate::config::BattleAction;
use crate::session::GameSession;
use crate::state::{Player, Status, Unit};

use super::unit_filter;

/// Whether a self/ally action (buff, heal) is usable now (BuffingFilter).
pub fn buffing(session: &dyn GameSession, action: &BattleAction, ability: &Ability) -> bool {
    if !is_configured(action) {
        return false;
    }
    if ability.targets_enemy() {
        return false;
    }

    let player = session.player();
    if !player_can_act(&player) || !within_health_window(&player, action) {
        return false;
    }
    if !can_afford(&player, ability) {
        return false;
    }
    if buff_already_active(&player, action, ability) {
        return false;
    }

    session.timer().is_ready(ability)
}

/// Whether an enemy-targeted action is usable against `target` now
/// (TargetedFilter).
pub fn targeted(
    session: &dyn GameSession,
    action: &BattleAction,
    ability: &Ability,
    target: &Unit,
) -> bool {
    if !is_configured(action) {
        return false;
    }
    if !ability.targets_enemy() || !unit_filter::is_valid_unit(target) {
        return false;
    }
    if action
        .target_health_below
        .is_some_and(|limit| target.hpp >= limit)
    {
        return false;
    }

    let player = session.player();
    if !player_can_act(&player) || !within_health_window(&player, action) {
        return false;
    }
    if !can_afford(&player, ability) {
        return false;
    }
    if session.navigator().distance_to(&target.position) > ability.range {
        return false;
    }

    session.timer().is_ready(ability)
}

fn is_configured(action: &BattleAction) -> bool {
    action.is_enabled && !action.name.trim().is_empty()
}

fn player_can_act(player: &Player) -> bool {
    !player.is_dead() && player.status != Status::Zoning
}

fn within_health_window(player: &Player, action: &BattleAction) -> bool {
    let hpp = player.hpp();
    hpp >= action.health_low && hpp <= action.health_high
}

fn can_afford(player: &Player, ability: &Ability) -> bool {
    player.mp >= ability.mp_cost && player.tp >= ability.tp_cost
}

fn buff_already_active(player: &Player, action: &BattleAction, ability: &Ability) -> bool {
    match &action.status_effect {
        Some(effect) => player.has_buff(effect),
        None => ability.category == AbilityCategory::Buff && player.has_buff(&ability.name),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::ability::TargetType;
    use crate::session::MemorySession;
    use crate::state::{Position, UnitId};

    fn protect() -> Ability {
        Ability::new(10, "Protect", AbilityCategory::Buff, TargetType::SelfOnly).with_mp_cost(9)
    }

    fn dia() -> Ability {
        Ability::new(20, "Dia", AbilityCategory::Pull, TargetType::Enemy)
            .with_range(20.0)
            .with_mp_cost(7)
    }

    fn mob_at(x: f32) -> Unit {
        Unit::new(UnitId(5), "Crab", Position::new(x, 0.0, 0.0))
    }

    #[test]
    fn buffing_accepts_ready_affordable_buff() {
        let session = MemorySession::default();
        assert!(buffing(&session, &BattleAction::new("Protect"), &protect()));
    }

    #[test]
    fn buffing_rejects_disabled_or_unnamed_actions() {
        let session = MemorySession::default();
        assert!(!buffing(&session, &BattleAction::new("Protect").disabled(), &protect()));
        assert!(!buffing(&session, &BattleAction::new("  "), &protect()));
    }

    #[test]
    fn buffing_rejects_active_buff_and_recast() {
        let session = MemorySession::default();
        session.update_player(|p| p.buffs.push("Protect".into()));
        assert!(!buffing(&session, &BattleAction::new("Protect"), &protect()));

        session.update_player(|p| p.buffs.clear());
        session.set_recast("Protect", Duration::from_secs(30));
        assert!(!buffing(&session, &BattleAction::new("Protect"), &protect()));
    }

    #[test]
    fn buffing_respects_health_window() {
        let session = MemorySession::default();
        session.update_player(|p| p.hp = p.max_hp / 2);

        let low_only = BattleAction::new("Protect").with_health_window(0, 40);
        let mid = BattleAction::new("Protect").with_health_window(0, 60);
        assert!(!buffing(&session, &low_only, &protect()));
        assert!(buffing(&session, &mid, &protect()));
    }

    #[test]
    fn buffing_rejects_unaffordable_and_enemy_abilities() {
        let session = MemorySession::default();
        session.update_player(|p| p.mp = 3);
        assert!(!buffing(&session, &BattleAction::new("Protect"), &protect()));

        session.update_player(|p| p.mp = 300);
        assert!(!buffing(&session, &BattleAction::new("Dia"), &dia()));
    }

    #[test]
    fn targeted_checks_range() {
        let session = MemorySession::default();
        let action = BattleAction::new("Dia");

        assert!(!targeted(&session, &action, &dia(), &mob_at(25.0)));
        assert!(targeted(&session, &action, &dia(), &mob_at(20.0)));
    }

    #[test]
    fn targeted_rejects_dead_target_and_health_limit() {
        let session = MemorySession::default();
        let action = BattleAction::new("Dia");

        assert!(!targeted(&session, &action, &dia(), &mob_at(5.0).with_hpp(0)));

        let finisher = BattleAction::new("Dia").with_target_health_below(30);
        assert!(!targeted(&session, &finisher, &dia(), &mob_at(5.0).with_hpp(50)));
        assert!(targeted(&session, &finisher, &dia(), &mob_at(5.0).with_hpp(20)));
    }

    #[test]
    fn targeted_rejects_when_player_is_dead() {
        let session = MemorySession::default();
        session.update_player(|p| p.status = Status::Dead);
        assert!(!targeted(&session, &BattleAction::new("Dia"), &dia(), &mob_at(5.0)));
    }
}
