//! Pure predicates deciding what is usable and what is worth engaging.
//!
//! Filters never fail: missing or stale data makes them return `false`.
//! Checks are ordered cheapest first (configuration flags, then snapshot
//! fields, then distance, then the live recast timer) so an early rejection
//! avoids the more expensive reads.
pub mod action_filter;
pub mod unit_filter;

use crate::config::TargetingConfig;
use crate::session::GameSession;
use crate::state::Unit;

/// Picks the best unit to engage next.
///
/// Units already claimed by the player (or the party, when allowed) come
/// first since they are attacking us; ties break on distance.
pub fn select_target(session: &dyn GameSession, targeting: &TargetingConfig) -> Option<Unit> {
    let player = session.player();
    let navigator = session.navigator();
    let party: Vec<_> = session.party().into_iter().map(|m| m.id).collect();

    session
        .npcs()
        .into_iter()
        .filter(|unit| unit_filter::mob(session, unit, targeting))
        .map(|unit| {
            let ours = unit
                .claimed_by
                .is_some_and(|owner| owner == player.id || party.contains(&owner));
            let distance = navigator.distance_to(&unit.position);
            (unit, ours, distance)
        })
        .min_by(|(_, a_ours, a_dist), (_, b_ours, b_dist)| {
            b_ours.cmp(a_ours).then(a_dist.total_cmp(b_dist))
        })
        .map(|(unit, _, _)| unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySession;
    use crate::state::{Position, UnitId};

    #[test]
    fn prefers_units_claimed_by_player_over_closer_ones() {
        let session = MemorySession::default()
            .with_unit(Unit::new(UnitId(1), "Near", Position::new(2.0, 0.0, 0.0)))
            .with_unit(
                Unit::new(UnitId(2), "Far", Position::new(10.0, 0.0, 0.0)).claimed_by(UnitId(0)),
            );

        let picked = select_target(&session, &TargetingConfig::default()).unwrap();
        assert_eq!(picked.id, UnitId(2));
    }

    #[test]
    fn picks_closest_when_nothing_is_claimed() {
        let session = MemorySession::default()
            .with_unit(Unit::new(UnitId(1), "Far", Position::new(9.0, 0.0, 0.0)))
            .with_unit(Unit::new(UnitId(2), "Near", Position::new(4.0, 0.0, 0.0)));

        let picked = select_target(&session, &TargetingConfig::default()).unwrap();
        assert_eq!(picked.id, UnitId(2));
    }

    #[test]
    fn empty_world_selects_nothing() {
        let session = MemorySession::default();
        assert!(select_target(&session, &TargetingConfig::default()).is_none());
    }
}
