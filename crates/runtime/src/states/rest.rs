use async_trait::async_trait;
use farm_core::{Player, RestConfig, SessionError, unit_filter};
use state_machine::BehaviorState;
use tracing::info;

use crate::context::FarmContext;

/// Rests when HP or MP runs low and keeps resting until both recover.
pub struct RestState;

impl RestState {
    pub const PRIORITY: u32 = 900;
}

fn needs_rest(player: &Player, rest: &RestConfig) -> bool {
    // Jobs without MP never rest for it.
    let has_mp = player.max_mp > 0;

    let low = player.hpp() < rest.low_health || (has_mp && player.mpp() < rest.low_magic);
    let recovering = player.is_resting()
        && (player.hpp() < rest.high_health || (has_mp && player.mpp() < rest.high_magic));

    low || recovering
}

#[async_trait]
impl BehaviorState<FarmContext, SessionError> for RestState {
    fn name(&self) -> &'static str {
        "Rest"
    }

    fn priority(&self) -> u32 {
        Self::PRIORITY
    }

    fn check(&self, ctx: &FarmContext) -> bool {
        if !ctx.config.rest.enabled {
            return false;
        }

        let player = ctx.session().player();
        if player.is_dead() || player.is_engaged() {
            return false;
        }
        if unit_filter::has_aggro(ctx.session()) {
            return false;
        }

        needs_rest(&player, &ctx.config.rest)
    }

    async fn enter(&mut self, ctx: &mut FarmContext) -> Result<(), SessionError> {
        ctx.session().navigator().reset();
        ctx.status("Resting");
        Ok(())
    }

    async fn run(&mut self, ctx: &mut FarmContext) -> Result<(), SessionError> {
        if !ctx.session().player().is_resting() {
            info!(target: "farm::state", "resting");
            ctx.session().controller().rest()?;
        }
        Ok(())
    }

    async fn exit(&mut self, ctx: &mut FarmContext) -> Result<(), SessionError> {
        if ctx.session().player().is_resting() {
            ctx.session().controller().stand()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::{config, context, crab};
    use farm_core::{GameSession, MemorySession, Status, UnitId};
    use std::sync::Arc;

    fn wounded() -> Arc<MemorySession> {
        let session = Arc::new(MemorySession::default());
        session.update_player(|player| player.hp = 300);
        session
    }

    #[test]
    fn low_health_triggers_rest() {
        let session = wounded();
        let ctx = context(&session, config());
        assert!(RestState.check(&ctx));
    }

    #[test]
    fn disabled_or_aggroed_never_rests() {
        let session = wounded();
        let mut cfg = config();
        cfg.rest.enabled = false;
        assert!(!RestState.check(&context(&session, cfg)));

        session.add_unit(
            crab(3.0)
                .with_status(Status::Engaged)
                .claimed_by(UnitId(0)),
        );
        assert!(!RestState.check(&context(&session, config())));
    }

    #[test]
    fn keeps_resting_until_high_thresholds() {
        let session = Arc::new(MemorySession::default());
        session.update_player(|player| {
            player.hp = 900;
            player.status = Status::Resting;
        });
        let ctx = context(&session, config());
        assert!(RestState.check(&ctx));

        session.update_player(|player| player.hp = player.max_hp);
        assert!(!RestState.check(&ctx));
    }

    #[test]
    fn missing_mp_pool_is_ignored() {
        let session = Arc::new(MemorySession::default());
        session.update_player(|player| {
            player.mp = 0;
            player.max_mp = 0;
        });
        assert!(!RestState.check(&context(&session, config())));
    }

    #[tokio::test]
    async fn rests_then_stands_on_exit() {
        let session = wounded();
        let mut ctx = context(&session, config());
        let mut state = RestState;

        state.enter(&mut ctx).await.unwrap();
        state.run(&mut ctx).await.unwrap();
        assert!(session.player().is_resting());
        assert_eq!(session.navigator_resets(), 1);

        state.exit(&mut ctx).await.unwrap();
        assert!(!session.player().is_resting());
    }
}
