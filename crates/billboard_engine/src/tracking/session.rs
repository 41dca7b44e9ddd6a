//! World-tracking session lifecycle
//!
//! The session is an explicit state machine:
//!
//! ```text
//! Idle --Start--> Starting --Subscribed---------> Running
//!                          \--SubscriptionFailed--> Failed(reason)
//! ```
//!
//! `Running` and `Failed` are terminal. The startup future is the only writer
//! after `Starting`; the frame loop only reads.

use super::{DevicePose, PoseSource, SessionError};
use crate::foundation::time::Timestamp;
use futures::future::{self, BoxFuture, FutureExt};
use log::{error, info, warn};
use parking_lot::RwLock;
use std::sync::Arc;

/// Lifecycle state of a tracking session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackingSessionState {
    /// Not started
    Idle,
    /// Subscription requested, not yet established
    Starting,
    /// Poses may be queried
    Running,
    /// Subscription failed; the session stays inert
    Failed(String),
}

/// Inputs to the session state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The owner asked for the subscription
    Start,
    /// The provider accepted the subscription
    Subscribed,
    /// The provider rejected the subscription
    SubscriptionFailed(String),
}

impl TrackingSessionState {
    /// Apply an event, returning the next state
    pub fn transition(&self, event: SessionEvent) -> Result<Self, SessionError> {
        match (self, event) {
            (Self::Idle, SessionEvent::Start) => Ok(Self::Starting),
            (Self::Starting, SessionEvent::Subscribed) => Ok(Self::Running),
            (Self::Starting, SessionEvent::SubscriptionFailed(reason)) => Ok(Self::Failed(reason)),
            (from, event) => Err(SessionError::InvalidTransition {
                from: from.clone(),
                event,
            }),
        }
    }

    /// Whether poses may be queried
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Whether no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Running | Self::Failed(_))
    }
}

struct SessionShared {
    state: RwLock<TrackingSessionState>,
    source: Arc<dyn PoseSource>,
}

impl SessionShared {
    fn apply(&self, event: SessionEvent) -> Result<TrackingSessionState, SessionError> {
        let mut state = self.state.write();
        let next = state.transition(event)?;
        *state = next.clone();
        Ok(next)
    }
}

/// Owns one world-tracking subscription
///
/// Cloning yields another handle to the same session.
#[derive(Clone)]
pub struct TrackingSession {
    shared: Arc<SessionShared>,
}

impl TrackingSession {
    /// Create an idle session over a pose source
    pub fn new(source: Arc<dyn PoseSource>) -> Self {
        Self {
            shared: Arc::new(SessionShared {
                state: RwLock::new(TrackingSessionState::Idle),
                source,
            }),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> TrackingSessionState {
        self.shared.state.read().clone()
    }

    /// Whether poses may be queried
    pub fn is_running(&self) -> bool {
        self.shared.state.read().is_running()
    }

    /// Begin the subscription
    ///
    /// Moves to `Starting` immediately and returns the future that completes
    /// the subscription; nothing blocks until that future is polled. The
    /// future resolves to the state it left the session in. Failures are
    /// logged and recorded, never returned.
    ///
    /// Only the first call subscribes. Later calls log a warning and resolve
    /// immediately to the current state.
    pub fn start(&self) -> BoxFuture<'static, TrackingSessionState> {
        if let Err(err) = self.shared.apply(SessionEvent::Start) {
            warn!("Tracking session start ignored: {}", err);
            return future::ready(self.state()).boxed();
        }

        info!("Starting world tracking session");
        let shared = Arc::clone(&self.shared);
        async move {
            let event = match shared.source.subscribe().await {
                Ok(()) => SessionEvent::Subscribed,
                Err(err) => {
                    error!("World tracking session error: {}", err);
                    SessionEvent::SubscriptionFailed(err.to_string())
                }
            };

            match shared.apply(event) {
                Ok(state) => {
                    if state.is_running() {
                        info!("World tracking session running");
                    }
                    state
                }
                Err(err) => {
                    error!("Dropping subscription result: {}", err);
                    shared.state.read().clone()
                }
            }
        }
        .boxed()
    }

    /// Record a startup failure that happened outside the subscription
    ///
    /// Used when the startup task could not be spawned at all.
    pub fn fail(&self, reason: impl Into<String>) {
        let reason = reason.into();
        error!("World tracking session error: {}", reason);
        if let Err(err) = self.shared.apply(SessionEvent::SubscriptionFailed(reason)) {
            warn!("Tracking session failure not recorded: {}", err);
        }
    }

    /// Pose at `at`, if the session is running and the source can resolve it
    pub fn query_pose(&self, at: Timestamp) -> Option<DevicePose> {
        if !self.is_running() {
            return None;
        }
        self.shared.source.query_device_anchor(at)
    }
}
