//! Outcome of a single scheduler tick.

/// What one [`crate::StateMachine::tick`] did.
///
/// # Ordering
///
/// Within a tick the phases happen in field order: `exited`, then
/// `entered`, then `ran`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Step {
    /// State that lost control this tick.
    pub exited: Option<&'static str>,
    /// State that gained control this tick.
    pub entered: Option<&'static str>,
    /// State whose run phase executed this tick.
    pub ran: Option<&'static str>,
}

impl Step {
    /// Returns `true` if control changed hands this tick.
    #[inline]
    pub fn is_transition(&self) -> bool {
        self.exited.is_some() || self.entered.is_some()
    }

    /// Returns `true` if no state ran this tick.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.ran.is_none()
    }
}
