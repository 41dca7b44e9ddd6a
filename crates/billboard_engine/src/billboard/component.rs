//! Vertical billboard tag

use crate::ecs::Component;
use serde::{Deserialize, Serialize};

/// Marks an entity for the yaw-only orientation pass
///
/// Carries no data. Hosts attach it while composing the scene; the
/// orientation system only reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerticalBillboard;

impl Component for VerticalBillboard {}

impl VerticalBillboard {
    /// Create the tag
    pub fn new() -> Self {
        Self
    }
}
