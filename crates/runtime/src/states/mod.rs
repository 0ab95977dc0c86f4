//! Concrete behavior states of the farming loop.
//!
//! Priorities, highest first:
//!
//! | state     | priority | wants control when                              |
//! |-----------|----------|-------------------------------------------------|
//! | Dead      | 1000     | the player is dead                              |
//! | Rest      | 900      | HP/MP is low and nothing is attacking us        |
//! | Healing   | 800      | a Healing action is usable                      |
//! | SetTarget | 700      | there is no usable target but a mob is around   |
//! | Start     | 600      | a fresh target is set and a Start buff is usable |
//! | Pull      | 500      | a fresh target is set and a Pull action exists  |
//! | Fight     | 400      | we are fighting or the target is on us          |
//! | Travel    | 100      | nothing to fight and a route is configured      |

mod dead;
mod fight;
mod healing;
mod pull;
mod rest;
mod set_target;
mod start;
mod travel;

pub use dead::DeadState;
pub use fight::FightState;
pub use healing::HealingState;
pub use pull::PullState;
pub use rest::RestState;
pub use set_target::SetTargetState;
pub use start::StartState;
pub use travel::TravelState;

use farm_core::SessionError;
use state_machine::BehaviorState;

use crate::context::FarmContext;

/// Boxed state as scheduled by the engine.
pub type FarmState = Box<dyn BehaviorState<FarmContext, SessionError>>;

/// The full state set in its standard configuration.
pub fn default_states() -> Vec<FarmState> {
    vec![
        Box::new(DeadState),
        Box::new(RestState),
        Box::new(HealingState),
        Box::new(SetTargetState),
        Box::new(StartState),
        Box::new(PullState),
        Box::new(FightState),
        Box::new(TravelState::default()),
    ]
}
