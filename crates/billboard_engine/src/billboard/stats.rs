//! Orientation pass counters

/// Counters kept by the orientation system
///
/// Every tick lands in exactly one of `frames_processed`,
/// `frames_skipped_not_running` or `frames_skipped_no_pose`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BillboardStats {
    /// Ticks in which a pose was available and the tagged set was walked
    pub frames_processed: u64,
    /// Ticks skipped because the tracking session was not running
    pub frames_skipped_not_running: u64,
    /// Ticks skipped because no pose resolved at the tick's timestamp
    pub frames_skipped_no_pose: u64,
    /// Rotations written
    pub entities_oriented: u64,
    /// Entities left untouched because the look direction was degenerate
    pub degenerate_skips: u64,
}

impl BillboardStats {
    /// All ticks seen
    pub fn total_frames(&self) -> u64 {
        self.frames_processed + self.frames_skipped_not_running + self.frames_skipped_no_pose
    }

    /// All skipped ticks
    pub fn frames_skipped(&self) -> u64 {
        self.frames_skipped_not_running + self.frames_skipped_no_pose
    }
}
