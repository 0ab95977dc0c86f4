use async_trait::async_trait;
use farm_core::{BattleSlot, SessionError};
use state_machine::BehaviorState;

use crate::context::FarmContext;

/// Uses the Healing list whenever one of its actions is usable.
pub struct HealingState;

impl HealingState {
    pub const PRIORITY: u32 = 800;
}

#[async_trait]
impl BehaviorState<FarmContext, SessionError> for HealingState {
    fn name(&self) -> &'static str {
        "Healing"
    }

    fn priority(&self) -> u32 {
        Self::PRIORITY
    }

    fn check(&self, ctx: &FarmContext) -> bool {
        let actions = ctx.config.battle_lists.get(BattleSlot::Healing);
        ctx.executor.usable_buff(ctx.session(), actions).is_some()
    }

    async fn enter(&mut self, ctx: &mut FarmContext) -> Result<(), SessionError> {
        if ctx.session().player().is_resting() {
            ctx.session().controller().stand()?;
        }
        ctx.session().navigator().reset();
        Ok(())
    }

    async fn run(&mut self, ctx: &mut FarmContext) -> Result<(), SessionError> {
        let actions = ctx.config.battle_lists.get(BattleSlot::Healing);
        ctx.executor
            .use_buffing_actions(ctx.session(), actions)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::{config, context};
    use farm_core::{BattleAction, GameSession, MemorySession};
    use std::sync::Arc;
    use std::time::Duration;

    fn healing_config() -> farm_core::FarmConfig {
        let mut cfg = config();
        cfg.battle_lists.set(
            BattleSlot::Healing,
            vec![BattleAction::new("Cure").with_health_window(0, 60)],
        );
        cfg
    }

    #[test]
    fn healthy_player_does_not_heal() {
        let session = Arc::new(MemorySession::default());
        assert!(!HealingState.check(&context(&session, healing_config())));
    }

    #[test]
    fn recast_not_ready_means_no_usable_move() {
        let session = Arc::new(MemorySession::default());
        session.update_player(|player| player.hp = 200);
        session.set_recast("Cure", Duration::from_secs(60));

        assert!(!HealingState.check(&context(&session, healing_config())));
    }

    #[tokio::test]
    async fn heals_with_first_usable_action() {
        let session = Arc::new(MemorySession::default());
        session.update_player(|player| player.hp = 200);
        let mut ctx = context(&session, healing_config());
        assert!(HealingState.check(&ctx));

        HealingState.enter(&mut ctx).await.unwrap();
        HealingState.run(&mut ctx).await.unwrap();

        assert_eq!(session.used_abilities()[0].name, "Cure");
        assert_eq!(session.player().hp, 450);
    }
}
