//! Smoke demo application
//!
//! Runs a fixed number of frames against a mock tracker whose subscription
//! completes late, so the first frames exercise the not-running path before
//! the smoke starts following the orbiting viewer.

use crate::config::SmokeAppConfig;
use crate::scene::{attach_billboard, compose_immersive_scene};
use billboard_engine::billboard::{yaw_angle, BillboardStats, VerticalBillboardSystem};
use billboard_engine::config::ConfigError;
use billboard_engine::ecs::components::TransformComponent;
use billboard_engine::ecs::{EcsError, Entity, SceneUpdateContext, System, TickKind, World};
use billboard_engine::foundation::time::{FrameClock, Timestamp};
use billboard_engine::tracking::{MockPoseSource, MockSubscription, TrackingSessionState};
use futures::executor::LocalPool;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Application errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Scene composition failed
    #[error("Scene error: {0}")]
    Ecs(#[from] EcsError),
    /// The scene has no entity at this path
    #[error("Entity not found: {0}")]
    MissingEntity(String),
}

/// Outcome of a run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Counters from the orientation pass
    pub stats: BillboardStats,
    /// Tracking state at exit
    pub tracking: TrackingSessionState,
    /// Final heading of the smoke, in radians
    pub final_yaw: Option<f32>,
}

/// Demo application
pub struct SmokeApp {
    config: SmokeAppConfig,
    world: World,
    smoke: Entity,
    source: Arc<MockPoseSource>,
    billboards: VerticalBillboardSystem,
    pool: LocalPool,
}

impl SmokeApp {
    /// Build the scene and start tracking
    pub fn new(config: SmokeAppConfig) -> Result<Self, AppError> {
        let mut world = World::new();
        let root = compose_immersive_scene(&mut world)?;
        let smoke = attach_billboard(&mut world, root, &["candle", "Cube"])?
            .ok_or_else(|| AppError::MissingEntity("candle/Cube".to_string()))?;

        let behavior = if config.subscription_delay_frames == 0 {
            MockSubscription::Immediate
        } else {
            MockSubscription::Deferred
        };
        let source = Arc::new(MockPoseSource::with_config(behavior, config.tracking.clone()));

        let pool = LocalPool::new();
        let billboards = VerticalBillboardSystem::new(source.clone(), &pool.spawner(), config.billboard.clone());

        Ok(Self {
            config,
            world,
            smoke,
            source,
            billboards,
            pool,
        })
    }

    fn frame_interval(&self) -> Duration {
        let fps = self.config.engine.target_fps.unwrap_or(90);
        Duration::from_secs_f64(1.0 / f64::from(fps))
    }

    /// Run every configured frame
    pub fn run(&mut self) -> Result<RunSummary, AppError> {
        info!(
            "Running {} frames ({} simulation sub-steps each)",
            self.config.frames, self.config.simulation_substeps
        );

        let interval = self.frame_interval();
        let substeps = self.config.simulation_substeps;
        let step = interval.as_secs_f32() / (substeps + 1) as f32;
        let mut clock = FrameClock::new();
        let mut media_time = Timestamp::ZERO;

        for frame in 0..self.config.frames {
            let frame_start = Instant::now();

            if frame == self.config.subscription_delay_frames && self.source.complete_subscription(Ok(())) {
                debug!("World tracking accepted at frame {}", frame);
            }
            self.pool.run_until_stalled();

            let viewer = self.config.viewer.position_at(media_time.as_secs() as f32);
            self.source.set_viewer_position(viewer, media_time);

            for _ in 0..substeps {
                self.tick(step, media_time, TickKind::Simulation);
            }
            self.tick(step, media_time, TickKind::Rendering);

            clock.tick();
            let interval_frames = self.config.engine.stats_interval_frames;
            if interval_frames > 0 && (frame + 1) % interval_frames == 0 {
                let stats = self.billboards.stats();
                info!(
                    "Frame {}: {:?}, {} processed, {} skipped, yaw {:.1} deg, {:.0} fps",
                    frame + 1,
                    self.billboards.session().state(),
                    stats.frames_processed,
                    stats.frames_skipped(),
                    self.smoke_yaw().map_or(f32::NAN, f32::to_degrees),
                    clock.current_fps()
                );
            }

            media_time = media_time.advanced_by(interval);
            if self.config.engine.target_fps.is_some() {
                if let Some(remaining) = interval.checked_sub(frame_start.elapsed()) {
                    std::thread::sleep(remaining);
                }
            }
        }

        let summary = RunSummary {
            stats: self.billboards.stats(),
            tracking: self.billboards.session().state(),
            final_yaw: self.smoke_yaw(),
        };
        if !summary.tracking.is_running() {
            warn!("World tracking never started: {:?}", summary.tracking);
        }
        Ok(summary)
    }

    fn tick(&mut self, delta_time: f32, timestamp: Timestamp, kind: TickKind) {
        let mut context = SceneUpdateContext::new(&mut self.world, timestamp, kind);
        self.billboards.tick(delta_time, &mut context);
    }

    /// Heading of the smoke quad in world space
    pub fn smoke_yaw(&self) -> Option<f32> {
        let transform = self.world.world_transform(self.smoke)?;
        Some(yaw_angle(&transform.rotation, self.config.billboard.forward_axis))
    }

    /// Local transform of the smoke quad
    pub fn smoke_transform(&self) -> Option<&TransformComponent> {
        self.world.get_component::<TransformComponent>(self.smoke)
    }
}
