use async_trait::async_trait;
use farm_core::{BattleSlot, SessionError};
use state_machine::BehaviorState;
use tracing::info;

use crate::context::FarmContext;

/// Melee loop against the engagement target.
///
/// Entering marks the engagement as fighting. Being preempted (e.g. by
/// Healing) keeps the engagement so Fight resumes afterwards. Once the tick
/// refresh has ended the engagement (target dead, gone, or no longer a mob
/// we may fight), exit disengages the player.
pub struct FightState;

impl FightState {
    pub const PRIORITY: u32 = 400;
}

#[async_trait]
impl BehaviorState<FarmContext, SessionError> for FightState {
    fn name(&self) -> &'static str {
        "Fight"
    }

    fn priority(&self) -> u32 {
        Self::PRIORITY
    }

    fn check(&self, ctx: &FarmContext) -> bool {
        ctx.target_mob()
            .is_some_and(|unit| ctx.combat.is_fighting || unit.is_engaged())
    }

    async fn enter(&mut self, ctx: &mut FarmContext) -> Result<(), SessionError> {
        ctx.combat.is_fighting = true;
        ctx.session().navigator().reset();
        if !ctx.session().player().is_engaged() {
            ctx.session().controller().engage()?;
        }
        Ok(())
    }

    async fn run(&mut self, ctx: &mut FarmContext) -> Result<(), SessionError> {
        let Some(target) = ctx.target_unit() else {
            return Ok(());
        };
        let session = ctx.session();
        let navigator = session.navigator();

        if !session.player().is_engaged() {
            session.controller().engage()?;
        }
        navigator.face_heading(&target.position)?;

        let approach = ctx.config.targeting.approach_distance;
        if navigator.distance_to(&target.position) > approach + navigator.distance_tolerance() {
            let spot = session.player().position.approach(&target.position, approach);
            navigator.goto(&spot, true)?;
        }

        let actions = ctx.config.battle_lists.get(BattleSlot::Fight);
        ctx.executor
            .use_targeted_actions(session, actions, &target)
            .await?;
        Ok(())
    }

    async fn exit(&mut self, ctx: &mut FarmContext) -> Result<(), SessionError> {
        if ctx.combat.is_fighting {
            return Ok(());
        }

        let defeated = ctx.target_unit().is_none();
        info!(target: "farm::state", defeated, "engagement over");
        ctx.combat.reset();
        if ctx.session().player().is_engaged() {
            ctx.session().controller().disengage()?;
        }
        ctx.status(if defeated { "Target defeated" } else { "Target lost" });
        Ok(())
    }
}
