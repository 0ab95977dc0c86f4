//! Unit eligibility predicates.

use crate::config::TargetingConfig;
use crate::session::GameSession;
use crate::state::{Status, Unit, UnitId, UnitKind};

/// Alive and visible.
pub fn is_valid_unit(unit: &Unit) -> bool {
    !unit.is_dead() && unit.is_rendered
}

/// Whether `unit` qualifies as a farming target (MobFilter).
///
/// A unit qualifies when it is a live monster inside the detection radius and
/// height band, passes the name lists, and is either unclaimed or claimed by
/// the player (or by the party when that is allowed).
pub fn mob(session: &dyn GameSession, unit: &Unit, targeting: &TargetingConfig) -> bool {
    if !is_valid_unit(unit) {
        return false;
    }
    if unit.kind != UnitKind::Monster {
        return false;
    }
    if targeting.is_ignored(&unit.name) || !targeting.is_wanted(&unit.name) {
        return false;
    }

    let player = session.player();
    if unit.position.height_difference(&player.position) > targeting.height_threshold {
        return false;
    }
    if session.navigator().distance_to(&unit.position) > targeting.detection_distance {
        return false;
    }

    match unit.claimed_by {
        None => true,
        Some(owner) if owner == player.id => true,
        Some(owner) => targeting.claimed_by_party_allowed && is_party_member(session, owner),
    }
}

/// Whether `unit` is in combat with the player: engaged and claimed by them.
pub fn is_aggroed(session: &dyn GameSession, unit: &Unit) -> bool {
    unit.status == Status::Engaged
        && !unit.is_dead()
        && unit.claimed_by == Some(session.player().id)
}

/// Whether any live unit is currently in combat with the player.
pub fn has_aggro(session: &dyn GameSession) -> bool {
    session
        .npcs()
        .iter()
        .any(|unit| is_aggroed(session, unit))
}

fn is_party_member(session: &dyn GameSession, id: UnitId) -> bool {
    session
        .party()
        .iter()
        .any(|member| member.is_active && member.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySession;
    use crate::state::{PartyMember, Position};

    fn crab() -> Unit {
        Unit::new(UnitId(9), "Crab", Position::new(5.0, 0.0, 0.0))
    }

    #[test]
    fn accepts_unclaimed_monster_in_range() {
        let session = MemorySession::default();
        assert!(mob(&session, &crab(), &TargetingConfig::default()));
    }

    #[test]
    fn rejects_dead_hidden_and_non_monsters() {
        let session = MemorySession::default();
        let targeting = TargetingConfig::default();

        assert!(!mob(&session, &crab().with_hpp(0), &targeting));
        assert!(!mob(&session, &crab().with_kind(UnitKind::Npc), &targeting));

        let mut hidden = crab();
        hidden.is_rendered = false;
        assert!(!mob(&session, &hidden, &targeting));
    }

    #[test]
    fn rejects_units_outside_detection_or_height() {
        let session = MemorySession::default();
        let targeting = TargetingConfig::default();

        let far = Unit::new(UnitId(1), "Crab", Position::new(40.0, 0.0, 0.0));
        let above = Unit::new(UnitId(2), "Crab", Position::new(2.0, 12.0, 0.0));
        assert!(!mob(&session, &far, &targeting));
        assert!(!mob(&session, &above, &targeting));
    }

    #[test]
    fn claim_rules_follow_party_setting() {
        let session = MemorySession::default().with_party_member(PartyMember {
            id: UnitId(50),
            name: "Friend".into(),
            is_active: true,
            ..PartyMember::default()
        });
        let mut targeting = TargetingConfig::default();

        assert!(mob(&session, &crab().claimed_by(UnitId(0)), &targeting));
        assert!(mob(&session, &crab().claimed_by(UnitId(50)), &targeting));
        assert!(!mob(&session, &crab().claimed_by(UnitId(99)), &targeting));

        targeting.claimed_by_party_allowed = false;
        assert!(!mob(&session, &crab().claimed_by(UnitId(50)), &targeting));
    }

    #[test]
    fn aggro_requires_engaged_claim_by_player() {
        let session = MemorySession::default()
            .with_unit(crab().with_status(Status::Engaged).claimed_by(UnitId(99)));
        assert!(!has_aggro(&session));

        session.update_unit(UnitId(9), |u| u.claimed_by = Some(UnitId(0)));
        assert!(has_aggro(&session));
    }
}
