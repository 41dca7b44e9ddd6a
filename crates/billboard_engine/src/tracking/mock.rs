//! Mock world-tracking provider
//!
//! Scriptable stand-in for a platform tracker: the subscription outcome is
//! chosen up front (or completed later), and viewer poses are pushed by the
//! host or test.

use super::{DevicePose, PoseSource, TrackingError};
use crate::core::config::TrackingConfig;
use crate::foundation::math::{Point3, Quat};
use crate::foundation::time::Timestamp;
use futures::channel::oneshot;
use futures::future::{self, BoxFuture, FutureExt};
use log::debug;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// How the mock answers `subscribe`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockSubscription {
    /// Succeed on first poll
    Immediate,
    /// Fail on first poll with this reason
    Fail(String),
    /// Stay pending until [`MockPoseSource::complete_subscription`]
    Deferred,
}

struct MockState {
    behavior: MockSubscription,
    resolution: Option<Result<(), TrackingError>>,
    pending: Vec<oneshot::Sender<Result<(), TrackingError>>>,
    history: VecDeque<DevicePose>,
    subscribe_calls: usize,
}

/// Mock pose source
pub struct MockPoseSource {
    config: TrackingConfig,
    state: Mutex<MockState>,
}

impl MockPoseSource {
    /// Create a mock with default tracking config
    pub fn new(behavior: MockSubscription) -> Self {
        Self::with_config(behavior, TrackingConfig::default())
    }

    /// Create a mock with explicit history and staleness limits
    pub fn with_config(behavior: MockSubscription, config: TrackingConfig) -> Self {
        Self {
            state: Mutex::new(MockState {
                behavior,
                resolution: None,
                pending: Vec::new(),
                history: VecDeque::with_capacity(config.history_capacity),
                subscribe_calls: 0,
            }),
            config,
        }
    }

    /// Resolve deferred subscriptions, including ones requested later
    ///
    /// Returns whether a pending subscription was woken.
    pub fn complete_subscription(&self, result: Result<(), TrackingError>) -> bool {
        let mut state = self.state.lock();
        state.resolution = Some(result.clone());
        let pending = std::mem::take(&mut state.pending);
        let mut woke = false;
        for sender in pending {
            woke |= sender.send(result.clone()).is_ok();
        }
        woke
    }

    /// Record a pose sample; samples are kept ordered by timestamp
    pub fn push_pose(&self, pose: DevicePose) {
        let mut state = self.state.lock();
        let index = state
            .history
            .iter()
            .rposition(|sample| sample.timestamp <= pose.timestamp)
            .map_or(0, |i| i + 1);
        state.history.insert(index, pose);
        while state.history.len() > self.config.history_capacity.max(1) {
            state.history.pop_front();
        }
    }

    /// Record an upright viewer at `position`
    pub fn set_viewer_position(&self, position: Point3, at: Timestamp) {
        self.push_pose(DevicePose::new(position, Quat::identity(), at));
    }

    /// Forget every recorded pose
    pub fn clear_poses(&self) {
        self.state.lock().history.clear();
    }

    /// How many times `subscribe` was called
    pub fn subscribe_calls(&self) -> usize {
        self.state.lock().subscribe_calls
    }
}

impl PoseSource for MockPoseSource {
    fn subscribe(&self) -> BoxFuture<'static, Result<(), TrackingError>> {
        let mut state = self.state.lock();
        state.subscribe_calls += 1;
        debug!("Mock tracking subscribe #{} ({:?})", state.subscribe_calls, state.behavior);

        match state.behavior.clone() {
            MockSubscription::Immediate => future::ready(Ok(())).boxed(),
            MockSubscription::Fail(reason) => {
                future::ready(Err(TrackingError::SubscriptionFailed(reason))).boxed()
            }
            MockSubscription::Deferred => {
                if let Some(result) = state.resolution.clone() {
                    return future::ready(result).boxed();
                }
                let (sender, receiver) = oneshot::channel();
                state.pending.push(sender);
                receiver
                    .map(|outcome| outcome.unwrap_or(Err(TrackingError::Disconnected)))
                    .boxed()
            }
        }
    }

    fn query_device_anchor(&self, at: Timestamp) -> Option<DevicePose> {
        let state = self.state.lock();
        state
            .history
            .iter()
            .rev()
            .find(|sample| sample.timestamp <= at)
            .filter(|sample| at.seconds_since(sample.timestamp) <= self.config.max_pose_age_secs)
            .cloned()
    }
}
