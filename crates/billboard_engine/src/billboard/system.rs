//! Vertical billboard system
//!
//! Turns every entity tagged with [`VerticalBillboard`] to face the viewer
//! about world up, once per tick. Only rotation is written; positions and
//! scales are inputs.

use super::orientation::{project_to_height, yaw_look_rotation};
use super::{BillboardStats, VerticalBillboard};
use crate::core::config::BillboardConfig;
use crate::ecs::{Entity, Query, SceneUpdateContext, System, World};
use crate::tracking::{DevicePose, PoseSource, TrackingSession};
use futures::future::FutureExt;
use futures::task::{Spawn, SpawnExt};
use log::{debug, trace};
use std::sync::Arc;

/// Per-frame yaw-only orientation pass
pub struct VerticalBillboardSystem {
    session: TrackingSession,
    config: BillboardConfig,
    query: Query<VerticalBillboard>,
    stats: BillboardStats,
}

impl VerticalBillboardSystem {
    /// Create the system and start world tracking in the background
    ///
    /// The subscription runs on `spawner`; this returns immediately. If the
    /// task cannot be spawned the session is marked failed and the system
    /// stays inert.
    pub fn new<S>(source: Arc<dyn PoseSource>, spawner: &S, config: BillboardConfig) -> Self
    where
        S: Spawn + ?Sized,
    {
        let session = TrackingSession::new(source);
        let startup = session.start().map(|_| ());
        if let Err(err) = spawner.spawn(startup) {
            session.fail(format!("could not spawn tracking startup: {}", err));
        }
        Self::with_session(session, config)
    }

    /// Create the system over a session the caller drives
    pub fn with_session(session: TrackingSession, config: BillboardConfig) -> Self {
        debug!("VerticalBillboardSystem init ({:?})", config);
        Self {
            query: Query::new(config.query_mode),
            session,
            config,
            stats: BillboardStats::default(),
        }
    }

    /// The tracking session this system reads
    pub fn session(&self) -> &TrackingSession {
        &self.session
    }

    /// Counters accumulated so far
    pub fn stats(&self) -> BillboardStats {
        self.stats
    }

    /// The active configuration
    pub fn config(&self) -> &BillboardConfig {
        &self.config
    }

    /// Run the orientation pass for one tick
    pub fn update(&mut self, context: &mut SceneUpdateContext<'_>) {
        if !self.session.is_running() {
            self.stats.frames_skipped_not_running += 1;
            trace!("Billboard pass skipped: tracking {:?}", self.session.state());
            return;
        }

        let Some(pose) = self.session.query_pose(context.timestamp) else {
            self.stats.frames_skipped_no_pose += 1;
            trace!("Billboard pass skipped: no pose at {:?}", context.timestamp);
            return;
        };

        if !pose.is_finite() {
            self.stats.frames_skipped_no_pose += 1;
            debug!("Billboard pass skipped: non-finite pose at {:?}", context.timestamp);
            return;
        }

        self.stats.frames_processed += 1;
        // Parents first, so a child's world rotation is solved against its
        // parent's rotation for this tick
        let mut entities = self.query.entities(context.world, context.tick).to_vec();
        entities.sort_by_cached_key(|&entity| context.world.hierarchy_depth(entity));
        for entity in entities {
            match orient_entity(context.world, entity, &pose, &self.config) {
                Orientation::Written => self.stats.entities_oriented += 1,
                Orientation::Degenerate => self.stats.degenerate_skips += 1,
                Orientation::NoTransform => {}
            }
        }
    }
}

enum Orientation {
    Written,
    Degenerate,
    NoTransform,
}

/// Face one entity toward the viewer
fn orient_entity(world: &mut World, entity: Entity, pose: &DevicePose, config: &BillboardConfig) -> Orientation {
    let Some(position) = world.world_position(entity) else {
        debug!("Tagged entity {:?} has no transform", entity);
        return Orientation::NoTransform;
    };

    let target = project_to_height(&pose.position, &position);
    let Some(rotation) = yaw_look_rotation(&position, &target, config.forward_axis, config.degenerate_epsilon)
    else {
        trace!("Entity {:?} has no horizontal look direction; keeping rotation", entity);
        return Orientation::Degenerate;
    };

    if world.set_world_rotation(entity, rotation) {
        Orientation::Written
    } else {
        Orientation::NoTransform
    }
}

impl System for VerticalBillboardSystem {
    fn name(&self) -> &'static str {
        "VerticalBillboardSystem"
    }

    fn tick(&mut self, _delta_time: f32, context: &mut SceneUpdateContext<'_>) {
        self.update(context);
    }
}
