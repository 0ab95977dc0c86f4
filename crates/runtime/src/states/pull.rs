use async_trait::async_trait;
use farm_core::{BattleSlot, SessionError};
use state_machine::BehaviorState;
use tracing::debug;

use crate::context::FarmContext;

/// Provokes a fresh target, closing in when every pull is out of range.
pub struct PullState;

impl PullState {
    pub const PRIORITY: u32 = 500;
}

/// Range of the shortest enabled pull the catalog knows.
fn shortest_pull_range(ctx: &FarmContext) -> Option<f32> {
    let actions = ctx.config.battle_lists.get(BattleSlot::Pull);
    ctx.executor
        .candidates(actions)
        .filter(|(action, _)| action.is_enabled)
        .map(|(_, ability)| ability.range)
        .min_by(f32::total_cmp)
}

#[async_trait]
impl BehaviorState<FarmContext, SessionError> for PullState {
    fn name(&self) -> &'static str {
        "Pull"
    }

    fn priority(&self) -> u32 {
        Self::PRIORITY
    }

    fn check(&self, ctx: &FarmContext) -> bool {
        if ctx.combat.is_fighting {
            return false;
        }
        if !ctx.target_mob().is_some_and(|unit| !unit.is_engaged()) {
            return false;
        }

        ctx.config
            .battle_lists
            .get(BattleSlot::Pull)
            .iter()
            .any(|action| action.is_enabled)
    }

    async fn enter(&mut self, ctx: &mut FarmContext) -> Result<(), SessionError> {
        ctx.session().navigator().reset();
        Ok(())
    }

    async fn run(&mut self, ctx: &mut FarmContext) -> Result<(), SessionError> {
        let Some(target) = ctx.target_unit() else {
            return Ok(());
        };

        let actions = ctx.config.battle_lists.get(BattleSlot::Pull);
        let dispatch = ctx
            .executor
            .use_targeted_actions(ctx.session(), actions, &target)
            .await?;
        if dispatch.is_issued() {
            return Ok(());
        }

        let Some(range) = shortest_pull_range(ctx) else {
            return Ok(());
        };
        let navigator = ctx.session().navigator();
        if navigator.distance_to(&target.position) > range {
            let player = ctx.session().player();
            let spot = player
                .position
                .approach(&target.position, (range - navigator.distance_tolerance()).max(0.0));
            debug!(target: "farm::state", unit = %target.id, range, "closing in to pull");
            navigator.goto(&spot, false)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::{config, context, crab};
    use farm_core::{BattleAction, GameSession, MemorySession, Status, UnitId};
    use std::sync::Arc;

    #[test]
    fn needs_an_enabled_pull_action() {
        let session = Arc::new(MemorySession::default().with_unit(crab(10.0)));
        let mut cfg = config();
        cfg.battle_lists
            .set(BattleSlot::Pull, vec![BattleAction::new("Provoke").disabled()]);
        let mut ctx = context(&session, cfg);
        ctx.combat.target = Some(UnitId(7));

        assert!(!PullState.check(&ctx));
    }

    #[test]
    fn engaged_or_fighting_hands_over_to_fight() {
        let session = Arc::new(MemorySession::default().with_unit(crab(10.0)));
        let mut ctx = context(&session, config());
        ctx.combat.target = Some(UnitId(7));
        assert!(PullState.check(&ctx));

        ctx.combat.is_fighting = true;
        assert!(!PullState.check(&ctx));

        ctx.combat.is_fighting = false;
        session.update_unit(UnitId(7), |unit| unit.status = Status::Engaged);
        assert!(!PullState.check(&ctx));
    }

    #[tokio::test]
    async fn out_of_range_issues_nothing_until_close_enough() {
        let mut cfg = config();
        cfg.targeting.detection_distance = 30.0;
        let session = Arc::new(MemorySession::default().with_unit(crab(25.0)));
        let mut ctx = context(&session, cfg);
        ctx.combat.target = Some(UnitId(7));
        assert!(PullState.check(&ctx));

        PullState.run(&mut ctx).await.unwrap();
        assert!(session.used_abilities().is_empty());
        let distance = session.player().position.distance(&crab(25.0).position);
        assert!(distance <= 20.0);

        PullState.run(&mut ctx).await.unwrap();
        assert_eq!(session.used_abilities()[0].name, "Provoke");
    }
}
