//! Core behavior-state trait.
//!
//! This module defines [`BehaviorState`], the unit the [`crate::StateMachine`]
//! schedules. The trait is generic over a context type `C` carrying whatever
//! the states need to observe and act on, and over the error type `E` their
//! phases can raise.

use async_trait::async_trait;

/// A mutually exclusive behavior with a four-phase lifecycle.
#[async_trait]
pub trait BehaviorState<C, E>: Send
where
    C: Send + 'static,
    E: 'static,
{
    /// Stable name used in logs and events.
    fn name(&self) -> &'static str;

    /// Scheduling priority. Higher values are checked first.
    fn priority(&self) -> u32;

    /// Whether this state wants control.
    ///
    /// Polled every tick for every state until one matches, so it must be
    /// cheap and free of side effects: calling it twice against the same
    /// context yields the same answer.
    fn check(&self, ctx: &C) -> bool;

    /// One-time setup when the state becomes active.
    ///
    /// May be called again after a transient re-entry and must tolerate it.
    async fn enter(&mut self, _ctx: &mut C) -> Result<(), E> {
        Ok(())
    }

    /// Per-tick work while active. Should issue at most one meaningful game
    /// action and must not block.
    async fn run(&mut self, ctx: &mut C) -> Result<(), E>;

    /// Cleanup when the state loses control.
    async fn exit(&mut self, _ctx: &mut C) -> Result<(), E> {
        Ok(())
    }
}
