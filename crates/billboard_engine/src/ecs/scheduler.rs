//! System scheduling
//!
//! Deterministic, single-threaded execution order: systems run phase by phase,
//! and in registration order within a phase.

use super::{SceneUpdateContext, System, TickKind, World};
use crate::foundation::time::Timestamp;
use log::debug;

/// System execution phases with explicit ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SystemPhase {
    /// Input processing, entity lifecycle management
    PreUpdate = 0,
    /// Game logic
    Update = 1,
    /// Transform-dependent work such as orientation constraints
    PostUpdate = 2,
}

struct ScheduledSystem {
    phase: SystemPhase,
    system: Box<dyn System>,
}

/// System scheduler
#[derive(Default)]
pub struct SystemScheduler {
    systems: Vec<ScheduledSystem>,
}

impl SystemScheduler {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a system to the scheduler
    pub fn add_system(&mut self, phase: SystemPhase, system: Box<dyn System>) {
        debug!("Registering system '{}' in {:?}", system.name(), phase);
        // Stable sort keeps registration order inside a phase
        self.systems.push(ScheduledSystem { phase, system });
        self.systems.sort_by_key(|scheduled| scheduled.phase);
    }

    /// Number of registered systems
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Whether no system is registered
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Execute all systems for one tick
    pub fn run_tick(&mut self, world: &mut World, delta_time: f32, timestamp: Timestamp, tick: TickKind) {
        let mut context = SceneUpdateContext::new(world, timestamp, tick);
        for scheduled in &mut self.systems {
            scheduled.system.tick(delta_time, &mut context);
        }
    }
}
