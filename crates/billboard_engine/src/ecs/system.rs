//! System trait and per-tick context

use crate::ecs::World;
use crate::foundation::time::Timestamp;

/// Kind of host tick
///
/// Hosts that run fixed simulation sub-steps between rendered frames report
/// the sub-steps as `Simulation` and the tick preceding a frame as `Rendering`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKind {
    /// A simulation sub-step with no frame presented after it
    Simulation,
    /// The tick that precedes a rendered frame
    Rendering,
}

impl TickKind {
    /// Whether this tick precedes a rendered frame
    pub fn is_rendering(self) -> bool {
        matches!(self, Self::Rendering)
    }
}

/// Everything a system may touch during one tick
pub struct SceneUpdateContext<'w> {
    /// The scene's entities and components
    pub world: &'w mut World,
    /// Media time of this tick
    pub timestamp: Timestamp,
    /// Tick kind
    pub tick: TickKind,
}

impl<'w> SceneUpdateContext<'w> {
    /// Create a context for one tick
    pub fn new(world: &'w mut World, timestamp: Timestamp, tick: TickKind) -> Self {
        Self {
            world,
            timestamp,
            tick,
        }
    }
}

/// System trait for processing entities and components
pub trait System {
    /// Stable name used in logs
    fn name(&self) -> &'static str;

    /// Run the system for one tick
    fn tick(&mut self, delta_time: f32, context: &mut SceneUpdateContext<'_>);
}
