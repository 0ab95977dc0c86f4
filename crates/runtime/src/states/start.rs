use async_trait::async_trait;
use farm_core::{BattleSlot, SessionError};
use state_machine::BehaviorState;

use crate::context::FarmContext;

/// Buffs up before engaging a fresh target.
pub struct StartState;

impl StartState {
    pub const PRIORITY: u32 = 600;
}

#[async_trait]
impl BehaviorState<FarmContext, SessionError> for StartState {
    fn name(&self) -> &'static str {
        "Start"
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

        let actions = ctx.config.battle_lists.get(BattleSlot::Start);
        ctx.executor.usable_buff(ctx.session(), actions).is_some()
    }

    async fn enter(&mut self, ctx: &mut FarmContext) -> Result<(), SessionError> {
        ctx.session().navigator().reset();
        Ok(())
    }

    async fn run(&mut self, ctx: &mut FarmContext) -> Result<(), SessionError> {
        let actions = ctx.config.battle_lists.get(BattleSlot::Start);
        ctx.executor
            .use_buffing_actions(ctx.session(), actions)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::{config, context, crab};
    use farm_core::{BattleAction, MemorySession, Status, UnitId};
    use std::sync::Arc;

    fn start_config() -> farm_core::FarmConfig {
        let mut cfg = config();
        cfg.battle_lists
            .set(BattleSlot::Start, vec![BattleAction::new("Protect")]);
        cfg
    }

    #[test]
    fn requires_a_target() {
        let session = Arc::new(MemorySession::default().with_unit(crab(3.0)));
        assert!(!StartState.check(&context(&session, start_config())));
    }

    #[test]
    fn engaged_target_skips_start() {
        let session = Arc::new(
            MemorySession::default().with_unit(crab(3.0).with_status(Status::Engaged)),
        );
        let mut ctx = context(&session, start_config());
        ctx.combat.target = Some(UnitId(7));
        assert!(!StartState.check(&ctx));
    }

    #[tokio::test]
    async fn buffs_once_then_yields() {
        let session = Arc::new(MemorySession::default().with_unit(crab(3.0)));
        let mut ctx = context(&session, start_config());
        ctx.combat.target = Some(UnitId(7));
        assert!(StartState.check(&ctx));

        StartState.run(&mut ctx).await.unwrap();

        assert_eq!(session.used_abilities()[0].name, "Protect");
        assert!(!StartState.check(&ctx));
    }
}
