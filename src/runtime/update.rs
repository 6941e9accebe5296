use crate::commands::CommandOutcome;

/// Messages from background tasks back to the UI loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiUpdate {
    /// The in-flight command finished.
    CommandResolved(CommandOutcome),
    /// The click-to-fill settle delay is over; execute the live line now.
    SettleElapsed,
}
