//! # Billboard Engine
//!
//! Engine-agnostic yaw-only billboarding: entities tagged with
//! [`billboard::VerticalBillboard`] are turned about world up to face the
//! viewer every tick, using poses from a world-tracking provider that may not
//! be ready yet.
//!
//! ## Features
//!
//! - **ECS Core**: generational entity handles, typed components, cached queries
//! - **World Tracking**: asynchronous session start with an explicit state machine
//! - **Yaw-only Orientation**: upright look-at that never changes position or scale
//! - **Configuration**: TOML/RON configs with validation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use billboard_engine::prelude::*;
//! use futures::executor::LocalPool;
//! use std::sync::Arc;
//!
//! let source = Arc::new(MockPoseSource::new(MockSubscription::Immediate));
//! let mut pool = LocalPool::new();
//! let system = VerticalBillboardSystem::new(source, &pool.spawner(), BillboardConfig::default());
//!
//! let mut scheduler = SystemScheduler::new();
//! scheduler.add_system(SystemPhase::PostUpdate, Box::new(system));
//!
//! let mut world = World::new();
//! let smoke = world.create_entity();
//! world.add_component(smoke, TransformComponent::from_position(Vec3::new(0.0, 1.0, 0.0))).unwrap();
//! world.add_component(smoke, VerticalBillboard).unwrap();
//!
//! let mut clock = FrameClock::new();
//! loop {
//!     pool.run_until_stalled();
//!     let now = clock.tick();
//!     scheduler.run_tick(&mut world, clock.delta_time(), now, TickKind::Rendering);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;

pub mod foundation;
pub mod config;
pub mod ecs;
pub mod tracking;
pub mod billboard;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        billboard::{BillboardStats, ForwardAxis, VerticalBillboard, VerticalBillboardSystem},
        config::Config,
        core::config::{BillboardConfig, EngineConfig, TrackingConfig},
        ecs::{
            components::{Name, Parent, TransformComponent},
            Component, Entity, SceneUpdateContext, System, SystemPhase, SystemScheduler, TickKind,
            UpdateMode, World,
        },
        foundation::{
            math::{Point3, Quat, Transform, Vec3},
            time::{FrameClock, Timestamp},
        },
        tracking::{
            DevicePose, MockPoseSource, MockSubscription, PoseSource, TrackingSession,
            TrackingSessionState,
        },
    };
}
