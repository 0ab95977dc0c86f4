//! Action dispatch.
//!
//! The [`Executor`] turns "use one of these configured actions" into at most
//! one game command. Candidates are resolved by name through the
//! [`ActionCatalog`], checked with the action filters in list order, and the
//! first that passes is sent. After an accepted send the executor sleeps out
//! the ability's lock window, yielding to the runtime instead of blocking it.
//!
//! A refused send is reported and not retried: the next tick re-evaluates
//! the filters against fresh state.

use std::sync::Arc;
use std::time::Duration;

use farm_core::{
    Ability, ActionCatalog, BattleAction, GameSession, SessionError, Unit, action_filter,
};
use tracing::debug;

use crate::events::{ActionEvent, Event, EventBus};

/// Outcome of one executor call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The game accepted the ability.
    Issued { ability: String },
    /// The game refused the ability.
    Rejected { ability: String, reason: String },
    /// No candidate passed its filters. Not an error.
    NoCandidate,
}

impl Dispatch {
    pub fn is_issued(&self) -> bool {
        matches!(self, Dispatch::Issued { .. })
    }
}

/// Issues configured actions against the game.
#[derive(Clone)]
pub struct Executor {
    catalog: Arc<dyn ActionCatalog>,
    events: EventBus,
    after_cast_delay: Duration,
}

impl Executor {
    pub fn new(catalog: Arc<dyn ActionCatalog>, events: EventBus, after_cast_delay: Duration) -> Self {
        Self {
            catalog,
            events,
            after_cast_delay,
        }
    }

    pub fn catalog(&self) -> &dyn ActionCatalog {
        self.catalog.as_ref()
    }

    /// Pairs each configured action with its catalog entry, skipping names the
    /// catalog does not know.
    pub fn candidates<'a>(
        &'a self,
        actions: &'a [BattleAction],
    ) -> impl Iterator<Item = (&'a BattleAction, Ability)> + 'a {
        actions.iter().filter_map(|action| match self.catalog.resolve(&action.name) {
            Some(ability) => Some((action, ability)),
            None => {
                debug!(target: "farm::executor", action = %action.name, "not in catalog");
                None
            }
        })
    }

    /// First self/ally action currently usable, if any.
    pub fn usable_buff(
        &self,
        session: &dyn GameSession,
        actions: &[BattleAction],
    ) -> Option<(BattleAction, Ability)> {
        self.candidates(actions)
            .find(|(action, ability)| action_filter::buffing(session, action, ability))
            .map(|(action, ability)| (action.clone(), ability))
    }

    /// First enemy action currently usable against `target`, if any.
    pub fn usable_targeted(
        &self,
        session: &dyn GameSession,
        actions: &[BattleAction],
        target: &Unit,
    ) -> Option<(BattleAction, Ability)> {
        self.candidates(actions)
            .find(|(action, ability)| action_filter::targeted(session, action, ability, target))
            .map(|(action, ability)| (action.clone(), ability))
    }

    /// Uses a single buffing action if it is currently usable.
    pub async fn use_buffing_action(
        &self,
        session: &dyn GameSession,
        action: &BattleAction,
    ) -> Result<Dispatch, SessionError> {
        self.use_buffing_actions(session, std::slice::from_ref(action))
            .await
    }

    /// Uses the first currently usable self/ally action of `actions`.
    pub async fn use_buffing_actions(
        &self,
        session: &dyn GameSession,
        actions: &[BattleAction],
    ) -> Result<Dispatch, SessionError> {
        match self.usable_buff(session, actions) {
            Some((_, ability)) => self.issue(session, &ability, None).await,
            None => Ok(Dispatch::NoCandidate),
        }
    }

    /// Uses the first currently usable enemy action of `actions` on `target`.
    pub async fn use_targeted_actions(
        &self,
        session: &dyn GameSession,
        actions: &[BattleAction],
        target: &Unit,
    ) -> Result<Dispatch, SessionError> {
        match self.usable_targeted(session, actions, target) {
            Some((_, ability)) => self.issue(session, &ability, Some(target)).await,
            None => Ok(Dispatch::NoCandidate),
        }
    }

    /// Time the player stays locked after `ability` was accepted, capped by
    /// its recast.
    pub fn lock_window(&self, ability: &Ability) -> Duration {
        let window = ability.cast_time + self.after_cast_delay;
        if ability.recast.is_zero() {
            window
        } else {
            window.min(ability.recast)
        }
    }

    async fn issue(
        &self,
        session: &dyn GameSession,
        ability: &Ability,
        target: Option<&Unit>,
    ) -> Result<Dispatch, SessionError> {
        let target_id = target.map(|unit| unit.id);

        match session.controller().use_ability(ability, target_id) {
            Ok(()) => {
                debug!(
                    target: "farm::executor",
                    ability = %ability.name,
                    target = ?target_id,
                    "ability used"
                );
                self.events.publish(Event::Action(ActionEvent::Used {
                    ability: ability.name.clone(),
                    target: target_id,
                }));

                let lock = self.lock_window(ability);
                if !lock.is_zero() {
                    tokio::time::sleep(lock).await;
                }

                Ok(Dispatch::Issued {
                    ability: ability.name.clone(),
                })
            }
            Err(SessionError::Rejected { ability: name, reason }) => {
                debug!(target: "farm::executor", ability = %name, %reason, "ability rejected");
                self.events.publish(Event::Action(ActionEvent::Rejected {
                    ability: name.clone(),
                    reason: reason.clone(),
                }));
                Ok(Dispatch::Rejected {
                    ability: name,
                    reason,
                })
            }
            Err(err) => Err(err),
        }
    }
}
