//! Priority scheduler over behavior states.
//!
//! [`StateMachine`] evaluates its states in descending priority order and
//! hands control to the first one whose [`BehaviorState::check`] passes.
//! Ties keep registration order.

use crate::{BehaviorState, Step};

/// Drives a fixed set of mutually exclusive behavior states.
///
/// # Transition protocol
///
/// On every [`tick`](Self::tick):
/// - The highest-priority eligible state is selected
/// - If it differs from the active one, the active state exits **before** the
///   selected state enters
/// - The (possibly new) active state runs, never before it has entered
/// - A state that stays selected is not re-entered
///
/// # Failures
///
/// A failing phase aborts the tick and returns its error. A failed `exit`
/// still clears the active slot; a failed `enter` leaves the machine idle so
/// the next tick selects afresh.
pub struct StateMachine<C: Send + 'static, E: 'static> {
    states: Vec<Box<dyn BehaviorState<C, E>>>,
    active: Option<usize>,
}

impl<C: Send + 'static, E: 'static> StateMachine<C, E> {
    /// Creates a machine over `states`, ordering them by descending priority.
    pub fn new(mut states: Vec<Box<dyn BehaviorState<C, E>>>) -> Self {
        // sort_by is stable, so equal priorities keep registration order
        states.sort_by(|a, b| b.priority().cmp(&a.priority()));
        Self {
            states,
            active: None,
        }
    }

    /// Name of the active state, if any.
    pub fn active(&self) -> Option<&'static str> {
        self.active.map(|index| self.states[index].name())
    }

    /// Returns `true` if a state currently holds control.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// State names in evaluation order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.states.iter().map(|state| state.name())
    }

    /// Number of registered states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` if no states are registered.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Name of the state that would be selected against `ctx`, without
    /// changing anything.
    pub fn peek(&self, ctx: &C) -> Option<&'static str> {
        self.select(ctx).map(|index| self.states[index].name())
    }

    fn select(&self, ctx: &C) -> Option<usize> {
        self.states.iter().position(|state| state.check(ctx))
    }

    /// Runs one scheduling step.
    pub async fn tick(&mut self, ctx: &mut C) -> Result<Step, E> {
        let selected = self.select(ctx);
        let mut step = Step::default();

        if selected != self.active {
            if let Some(index) = self.active.take() {
                let state = &mut self.states[index];
                step.exited = Some(state.name());
                state.exit(ctx).await?;
            }

            if let Some(index) = selected {
                let state = &mut self.states[index];
                state.enter(ctx).await?;
                step.entered = Some(state.name());
                self.active = Some(index);
            }
        }

        if let Some(index) = self.active {
            let state = &mut self.states[index];
            state.run(ctx).await?;
            step.ran = Some(state.name());
        }

        Ok(step)
    }

    /// Exits the active state, if any, and leaves the machine idle.
    ///
    /// Calling `stop` on an idle machine is a no-op, so a state is never
    /// exited twice.
    pub async fn stop(&mut self, ctx: &mut C) -> Result<Option<&'static str>, E> {
        let Some(index) = self.active.take() else {
            return Ok(None);
        };
        let state = &mut self.states[index];
        let name = state.name();
        state.exit(ctx).await?;
        Ok(Some(name))
    }
}
