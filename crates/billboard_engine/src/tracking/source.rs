//! Pose source contract

use super::{DevicePose, TrackingError};
use crate::foundation::time::Timestamp;
use futures::future::BoxFuture;

/// A world-tracking provider
///
/// Only the query contract is used: one asynchronous, fallible subscription,
/// then synchronous non-blocking pose lookups from the frame loop.
pub trait PoseSource: Send + Sync {
    /// Establish the world-tracking subscription
    fn subscribe(&self) -> BoxFuture<'static, Result<(), TrackingError>>;

    /// Latest device anchor resolvable at `at`, if any
    fn query_device_anchor(&self, at: Timestamp) -> Option<DevicePose>;
}
