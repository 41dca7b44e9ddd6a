//! World tracking
//!
//! Acquires the viewer's pose from a world-tracking provider. The provider is
//! abstracted behind [`PoseSource`]; [`TrackingSession`] owns the single
//! subscription and gates pose queries on its readiness.

pub mod error;
pub mod pose;
pub mod source;
pub mod session;
pub mod mock;

pub use error::{SessionError, TrackingError};
pub use pose::DevicePose;
pub use source::PoseSource;
pub use session::{SessionEvent, TrackingSession, TrackingSessionState};
pub use mock::{MockPoseSource, MockSubscription};
