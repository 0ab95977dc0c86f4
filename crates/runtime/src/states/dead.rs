use async_trait::async_trait;
use farm_core::SessionError;
use state_machine::BehaviorState;
use tracing::warn;

use crate::context::FarmContext;

/// Halts the engine when the player dies.
pub struct DeadState;

impl DeadState {
    pub const PRIORITY: u32 = 1000;
}

#[async_trait]
impl BehaviorState<FarmContext, SessionError> for DeadState {
    fn name(&self) -> &'static str {
        "Dead"
    }

    fn priority(&self) -> u32 {
        Self::PRIORITY
    }

    fn check(&self, ctx: &FarmContext) -> bool {
        ctx.session().player().is_dead()
    }

    async fn enter(&mut self, ctx: &mut FarmContext) -> Result<(), SessionError> {
        warn!(target: "farm::state", "player died, pausing");
        ctx.combat.reset();
        ctx.status("Player died. Program paused.");
        ctx.request_pause("player died");
        Ok(())
    }

    async fn run(&mut self, _ctx: &mut FarmContext) -> Result<(), SessionError> {
        Ok(())
    }
}
