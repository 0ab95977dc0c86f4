use async_trait::async_trait;
use farm_core::{Position, RouteConfig, SessionError};
use state_machine::BehaviorState;
use tracing::debug;

use crate::context::FarmContext;

/// Walks the configured waypoint route while there is nothing to fight.
///
/// Loops back to the first waypoint at the end of the route, or walks it
/// back and forth when the route is `straight`.
#[derive(Debug, Default)]
pub struct TravelState {
    next: usize,
    backwards: bool,
}

impl TravelState {
    pub const PRIORITY: u32 = 100;

    /// Index of the waypoint currently walked to.
    pub fn next_waypoint(&self) -> usize {
        self.next
    }

    fn advance(&mut self, route: &RouteConfig) {
        let len = route.waypoints.len();
        if len <= 1 {
            self.next = 0;
            return;
        }

        if !route.straight {
            self.next = (self.next + 1) % len;
            return;
        }

        if self.backwards {
            if self.next == 0 {
                self.backwards = false;
                self.next = 1;
            } else {
                self.next -= 1;
            }
        } else if self.next + 1 >= len {
            self.backwards = true;
            self.next = len - 2;
        } else {
            self.next += 1;
        }
    }
}

fn closest(waypoints: &[Position], from: &Position) -> usize {
    waypoints
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| from.distance(a).total_cmp(&from.distance(b)))
        .map_or(0, |(index, _)| index)
}

#[async_trait]
impl BehaviorState<FarmContext, SessionError> for TravelState {
    fn name(&self) -> &'static str {
        "Travel"
    }

    fn priority(&self) -> u32 {
        Self::PRIORITY
    }

    fn check(&self, ctx: &FarmContext) -> bool {
        !ctx.config.route.waypoints.is_empty()
            && !ctx.combat.is_fighting
            && ctx.target_mob().is_none()
    }

    async fn enter(&mut self, ctx: &mut FarmContext) -> Result<(), SessionError> {
        let player = ctx.session().player();
        self.next = closest(&ctx.config.route.waypoints, &player.position);
        Ok(())
    }

    async fn run(&mut self, ctx: &mut FarmContext) -> Result<(), SessionError> {
        let route = &ctx.config.route;
        if route.waypoints.is_empty() {
            return Ok(());
        }
        // The route may have shrunk since the last tick.
        if self.next >= route.waypoints.len() {
            self.next = 0;
        }

        let navigator = ctx.session().navigator();
        if navigator.distance_to(&route.waypoints[self.next]) <= navigator.distance_tolerance() {
            self.advance(route);
        }

        let waypoint = route.waypoints[self.next];
        debug!(target: "farm::state", index = self.next, "walking to waypoint");
        navigator.goto(&waypoint, true)
    }

    async fn exit(&mut self, ctx: &mut FarmContext) -> Result<(), SessionError> {
        ctx.session().navigator().reset();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::{config, context, crab};
    use farm_core::{MemorySession, UnitId};
    use std::sync::Arc;

    fn route(straight: bool) -> RouteConfig {
        RouteConfig {
            waypoints: vec![
                Position::new(10.0, 0.0, 0.0),
                Position::new(20.0, 0.0, 0.0),
                Position::new(30.0, 0.0, 0.0),
            ],
            straight,
        }
    }

    fn visit(state: &mut TravelState, route: &RouteConfig, steps: usize) -> Vec<usize> {
        (0..steps)
            .map(|_| {
                state.advance(route);
                state.next
            })
            .collect()
    }

    #[test]
    fn looping_route_wraps_around() {
        let mut state = TravelState::default();
        assert_eq!(visit(&mut state, &route(false), 4), vec![1, 2, 0, 1]);
    }

    #[test]
    fn straight_route_walks_back_and_forth() {
        let mut state = TravelState::default();
        assert_eq!(visit(&mut state, &route(true), 6), vec![1, 2, 1, 0, 1, 2]);
    }

    #[test]
    fn idle_only_without_mob_or_fight() {
        let session = Arc::new(MemorySession::default().with_unit(crab(3.0)));
        let mut cfg = config();
        cfg.route = route(false);
        let mut ctx = context(&session, cfg);
        assert!(TravelState::default().check(&ctx));

        ctx.combat.target = Some(UnitId(7));
        assert!(!TravelState::default().check(&ctx));
    }

    #[tokio::test]
    async fn follows_waypoints_in_order() {
        let session = Arc::new(MemorySession::default());
        let mut cfg = config();
        cfg.route = route(false);
        let mut ctx = context(&session, cfg);
        let mut state = TravelState::default();

        state.enter(&mut ctx).await.unwrap();
        for _ in 0..3 {
            state.run(&mut ctx).await.unwrap();
        }

        assert_eq!(
            session.destinations(),
            vec![
                Position::new(10.0, 0.0, 0.0),
                Position::new(20.0, 0.0, 0.0),
                Position::new(30.0, 0.0, 0.0),
            ]
        );
    }
}
