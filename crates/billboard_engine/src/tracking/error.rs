//! Tracking errors

use super::session::{SessionEvent, TrackingSessionState};
use thiserror::Error;

/// Errors raised by a pose source
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackingError {
    /// The world-tracking subscription could not be established
    #[error("World tracking subscription failed: {0}")]
    SubscriptionFailed(String),

    /// The provider went away before the subscription completed
    #[error("World tracking provider disconnected")]
    Disconnected,
}

/// Errors raised by the session state machine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The event is not legal in the current state
    #[error("Invalid session transition: {event:?} while {from:?}")]
    InvalidTransition {
        /// State the session was in
        from: TrackingSessionState,
        /// Rejected event
        event: SessionEvent,
    },
}
