use async_trait::async_trait;
use farm_core::{SessionError, select_target, unit_filter};
use state_machine::BehaviorState;
use tracing::info;

use crate::context::FarmContext;

/// Picks the next mob when the engagement has no usable target.
pub struct SetTargetState;

impl SetTargetState {
    pub const PRIORITY: u32 = 700;
}

/// Whether the current target should be replaced.
fn needs_target(ctx: &FarmContext) -> bool {
    match ctx.target_unit() {
        None => true,
        // Mid-fight the target may legitimately fail the mob filter (claimed
        // and engaged by us); otherwise a target someone else took is dropped.
        Some(unit) => {
            !ctx.combat.is_fighting
                && !unit_filter::mob(ctx.session(), &unit, &ctx.config.targeting)
        }
    }
}

#[async_trait]
impl BehaviorState<FarmContext, SessionError> for SetTargetState {
    fn name(&self) -> &'static str {
        "SetTarget"
    }

    fn priority(&self) -> u32 {
        Self::PRIORITY
    }

    fn check(&self, ctx: &FarmContext) -> bool {
        needs_target(ctx) && select_target(ctx.session(), &ctx.config.targeting).is_some()
    }

    async fn run(&mut self, ctx: &mut FarmContext) -> Result<(), SessionError> {
        let Some(unit) = select_target(ctx.session(), &ctx.config.targeting) else {
            return Ok(());
        };

        info!(target: "farm::state", unit = %unit.id, name = %unit.name, "target selected");
        ctx.session().controller().set_target(unit.id)?;
        ctx.combat.target = Some(unit.id);
        ctx.status(format!("Targeting {}", unit.name));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::{config, context, crab};
    use farm_core::{MemorySession, Position, Unit, UnitId};
    use std::sync::Arc;

    #[test]
    fn no_mobs_means_nothing_to_select() {
        let session = Arc::new(MemorySession::default());
        assert!(!SetTargetState.check(&context(&session, config())));
    }

    #[tokio::test]
    async fn selects_closest_mob() {
        let session = Arc::new(
            MemorySession::default()
                .with_unit(crab(12.0))
                .with_unit(Unit::new(UnitId(8), "Bee", Position::new(4.0, 0.0, 0.0))),
        );
        let mut ctx = context(&session, config());
        assert!(SetTargetState.check(&ctx));

        SetTargetState.run(&mut ctx).await.unwrap();

        assert_eq!(ctx.combat.target, Some(UnitId(8)));
        assert_eq!(session.selected_target(), Some(UnitId(8)));
        assert!(!SetTargetState.check(&ctx));
    }

    #[test]
    fn target_claimed_by_someone_else_is_replaced() {
        let session = Arc::new(
            MemorySession::default()
                .with_unit(crab(3.0).claimed_by(UnitId(42)))
                .with_unit(Unit::new(UnitId(8), "Bee", Position::new(9.0, 0.0, 0.0))),
        );
        let mut ctx = context(&session, config());
        ctx.combat.target = Some(UnitId(7));

        assert!(SetTargetState.check(&ctx));
    }
}
