//! End-to-end tests of the orientation pass against the mock tracker

use super::*;
use crate::core::config::BillboardConfig;
use crate::ecs::components::{Parent, TransformComponent};
use crate::ecs::{
    Entity, SceneUpdateContext, SystemPhase, SystemScheduler, TickKind, UpdateMode, World,
};
use crate::foundation::math::{Point3, Quat, Vec3, WORLD_UP};
use crate::foundation::time::Timestamp;
use crate::tracking::{MockPoseSource, MockSubscription, TrackingSessionState};
use approx::assert_relative_eq;
use futures::executor::LocalPool;
use futures::task::{FutureObj, Spawn, SpawnError};
use std::sync::Arc;

struct Harness {
    world: World,
    system: VerticalBillboardSystem,
    source: Arc<MockPoseSource>,
    pool: LocalPool,
}

impl Harness {
    fn new(subscription: MockSubscription, config: BillboardConfig) -> Self {
        let source = Arc::new(MockPoseSource::new(subscription));
        let mut pool = LocalPool::new();
        let system = VerticalBillboardSystem::new(source.clone(), &pool.spawner(), config);
        pool.run_until_stalled();
        Self {
            world: World::new(),
            system,
            source,
            pool,
        }
    }

    fn running() -> Self {
        Self::new(MockSubscription::Immediate, BillboardConfig::default())
    }

    fn viewer_at(&self, x: f32, y: f32, z: f32) {
        self.source.set_viewer_position(Point3::new(x, y, z), Timestamp::ZERO);
    }

    fn spawn(&mut self, transform: TransformComponent) -> Entity {
        let entity = self.world.create_entity();
        self.world.add_component(entity, transform).unwrap();
        self.world.add_component(entity, VerticalBillboard).unwrap();
        entity
    }

    fn spawn_at(&mut self, x: f32, y: f32, z: f32) -> Entity {
        self.spawn(TransformComponent::from_position(Vec3::new(x, y, z)))
    }

    fn tick_as(&mut self, tick: TickKind) {
        let mut context = SceneUpdateContext::new(&mut self.world, Timestamp::from_secs(0.5), tick);
        self.system.update(&mut context);
    }

    fn tick(&mut self) {
        self.tick_as(TickKind::Rendering);
    }

    fn transform(&self, entity: Entity) -> TransformComponent {
        self.world.get_component::<TransformComponent>(entity).unwrap().clone()
    }

    fn world_facing(&self, entity: Entity) -> Vec3 {
        let rotation = self.world.world_transform(entity).unwrap().rotation;
        rotation * self.system.config().forward_axis.local_vector()
    }
}

fn tilted() -> Quat {
    Quat::from_axis_angle(&Vec3::x_axis(), 0.3)
}

#[test]
fn test_viewer_in_front_turns_entity_toward_positive_z() {
    let mut h = Harness::running();
    h.viewer_at(0.0, 1.6, 2.0);
    let entity = h.spawn_at(0.0, 1.0, 0.0);

    h.tick();

    let transform = h.transform(entity);
    assert_eq!(transform.position, Vec3::new(0.0, 1.0, 0.0));
    assert_relative_eq!(h.world_facing(entity), Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-5);
    assert_relative_eq!(transform.rotation * WORLD_UP, WORLD_UP, epsilon = 1e-5);
}

#[test]
fn test_viewer_moving_to_the_side_updates_yaw_only() {
    let mut h = Harness::running();
    h.viewer_at(0.0, 1.6, 2.0);
    let entity = h.spawn_at(0.0, 1.0, 0.0);
    h.tick();

    h.source.clear_poses();
    h.viewer_at(2.0, 1.6, 0.0);
    h.tick();

    assert_relative_eq!(h.world_facing(entity), Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-5);
    assert_eq!(h.transform(entity).position.y, 1.0);
    assert_relative_eq!(
        yaw_angle(&h.transform(entity).rotation, ForwardAxis::NegativeZ),
        std::f32::consts::FRAC_PI_2,
        epsilon = 1e-5
    );
}

#[test]
fn test_entities_at_different_heights_share_yaw() {
    let mut h = Harness::running();
    h.viewer_at(3.0, 1.6, -4.0);
    let low = h.spawn_at(1.0, 0.2, 1.0);
    let high = h.spawn_at(1.0, 5.0, 1.0);

    h.tick();

    let low_rotation = h.transform(low).rotation;
    let high_rotation = h.transform(high).rotation;
    assert_relative_eq!(low_rotation, high_rotation, epsilon = 1e-6);
    assert_eq!(h.transform(low).position.y, 0.2);
    assert_eq!(h.transform(high).position.y, 5.0);
}

#[test]
fn test_height_and_uprightness_hold_for_many_placements() {
    let mut h = Harness::running();
    h.viewer_at(-1.5, 1.7, 2.5);

    let mut placed = Vec::new();
    for (i, &(x, y, z)) in [
        (0.0, 0.0, 0.0),
        (4.0, -2.0, 1.0),
        (-3.0, 10.0, -7.5),
        (0.25, 1.7, 0.5),
        (-1.5, 3.0, 2.4),
    ]
    .iter()
    .enumerate()
    {
        let transform = TransformComponent::from_position_rotation(Vec3::new(x, y, z), tilted())
            .with_uniform_scale(1.0 + i as f32);
        placed.push(h.spawn(transform));
    }
    let before: Vec<_> = placed.iter().map(|&e| h.transform(e)).collect();

    h.tick();

    for (entity, before) in placed.iter().zip(before) {
        let after = h.transform(*entity);
        assert_eq!(after.position, before.position);
        assert_eq!(after.scale, before.scale);
        assert_relative_eq!(after.rotation * WORLD_UP, WORLD_UP, epsilon = 1e-5);
    }
}

#[test]
fn test_nothing_moves_until_tracking_runs() {
    let mut h = Harness::new(MockSubscription::Deferred, BillboardConfig::default());
    h.viewer_at(0.0, 1.6, 2.0);
    let entity = h.spawn(TransformComponent::from_position_rotation(Vec3::new(0.0, 1.0, 0.0), tilted()));
    let before = h.transform(entity);

    h.tick();
    h.tick();
    assert_eq!(h.system.session().state(), TrackingSessionState::Starting);
    assert_eq!(h.transform(entity), before);
    assert_eq!(h.system.stats().frames_skipped_not_running, 2);

    h.source.complete_subscription(Ok(()));
    h.pool.run_until_stalled();
    h.tick();

    assert_eq!(h.system.session().state(), TrackingSessionState::Running);
    assert_ne!(h.transform(entity).rotation, before.rotation);
    assert_eq!(h.system.stats().frames_processed, 1);
}

#[test]
fn test_failed_tracking_leaves_system_inert() {
    let mut h = Harness::new(
        MockSubscription::Fail("world sensing denied".into()),
        BillboardConfig::default(),
    );
    h.viewer_at(0.0, 1.6, 2.0);
    let entity = h.spawn(TransformComponent::from_position_rotation(Vec3::new(0.0, 1.0, 0.0), tilted()));
    let before = h.transform(entity);

    for _ in 0..5 {
        h.tick();
    }

    assert!(matches!(h.system.session().state(), TrackingSessionState::Failed(_)));
    assert_eq!(h.transform(entity), before);
    assert_eq!(h.system.stats().frames_skipped_not_running, 5);
    assert_eq!(h.source.subscribe_calls(), 1);
}

#[test]
fn test_unspawnable_startup_marks_session_failed() {
    struct ShutDown;
    impl Spawn for ShutDown {
        fn spawn_obj(&self, _future: FutureObj<'static, ()>) -> Result<(), SpawnError> {
            Err(SpawnError::shutdown())
        }
    }

    let source = Arc::new(MockPoseSource::new(MockSubscription::Immediate));
    let system = VerticalBillboardSystem::new(source, &ShutDown, BillboardConfig::default());

    assert!(matches!(system.session().state(), TrackingSessionState::Failed(_)));
}

#[test]
fn test_pose_miss_skips_the_frame() {
    let mut h = Harness::running();
    let entity = h.spawn(TransformComponent::from_position_rotation(Vec3::new(0.0, 1.0, 0.0), tilted()));
    let before = h.transform(entity);

    h.tick();

    assert_eq!(h.transform(entity), before);
    assert_eq!(h.system.stats().frames_skipped_no_pose, 1);
    assert_eq!(h.system.stats().frames_processed, 0);
}

#[test]
fn test_viewer_directly_above_keeps_previous_rotation() {
    let mut h = Harness::running();
    h.viewer_at(2.0, 5.0, -1.0);
    let entity = h.spawn(TransformComponent::from_position_rotation(Vec3::new(2.0, 1.0, -1.0), tilted()));
    let before = h.transform(entity);

    h.tick();

    let after = h.transform(entity);
    assert_eq!(after, before);
    assert!(after.rotation.coords.iter().all(|c| c.is_finite()));
    assert_eq!(h.system.stats().degenerate_skips, 1);
}

#[test]
fn test_static_input_gives_identical_rotation_every_frame() {
    let mut h = Harness::running();
    h.viewer_at(-2.0, 1.6, 3.0);
    let entity = h.spawn_at(0.5, 1.0, 0.5);

    h.tick();
    let first = h.transform(entity);
    for _ in 0..10 {
        h.tick();
        assert_eq!(h.transform(entity), first);
    }
}

#[test]
fn test_untagged_entities_are_untouched() {
    let mut h = Harness::running();
    h.viewer_at(0.0, 1.6, 2.0);
    let plain = h.world.create_entity();
    let transform = TransformComponent::from_position_rotation(Vec3::new(1.0, 0.0, 0.0), tilted());
    h.world.add_component(plain, transform.clone()).unwrap();

    h.tick();

    assert_eq!(h.transform(plain), transform);
    assert_eq!(h.system.stats().frames_processed, 1);
    assert_eq!(h.system.stats().entities_oriented, 0);
}

#[test]
fn test_child_of_rotated_parent_faces_viewer_in_world_space() {
    let mut h = Harness::running();
    h.viewer_at(0.0, 1.6, 5.0);

    let candle = h.world.create_entity();
    h.world
        .add_component(
            candle,
            TransformComponent::from_position_rotation(
                Vec3::new(2.0, 0.8, 0.0),
                Quat::from_axis_angle(&Vec3::y_axis(), 1.1),
            ),
        )
        .unwrap();
    let smoke = h.spawn_at(0.0, 0.3, 0.0);
    h.world.add_component(smoke, Parent(candle)).unwrap();
    let height_before = h.world.world_position(smoke).unwrap().y;

    h.tick();

    let smoke_position = h.world.world_position(smoke).unwrap();
    let expected = Vec3::new(-smoke_position.x, 0.0, 5.0 - smoke_position.z).normalize();
    assert_relative_eq!(h.world_facing(smoke), expected, epsilon = 1e-5);
    assert_eq!(smoke_position.y, height_before);
}

#[test]
fn test_tagged_child_created_before_tilted_tagged_parent_stays_upright() {
    let mut h = Harness::running();
    h.viewer_at(3.0, 1.6, 4.0);

    let smoke = h.spawn_at(0.0, 0.4, 0.0);
    let candle = h.spawn(TransformComponent::from_position_rotation(Vec3::new(1.0, 0.5, -1.0), tilted()));
    h.world.add_component(smoke, Parent(candle)).unwrap();

    h.tick();

    for entity in [candle, smoke] {
        let rotation = h.world.world_transform(entity).unwrap().rotation;
        assert_relative_eq!(rotation * WORLD_UP, WORLD_UP, epsilon = 1e-5);

        let position = h.world.world_position(entity).unwrap();
        let expected = Vec3::new(3.0 - position.x, 0.0, 4.0 - position.z).normalize();
        assert_relative_eq!(h.world_facing(entity), expected, epsilon = 1e-5);
    }
    assert_eq!(h.system.stats().entities_oriented, 2);
}

#[test]
fn test_non_finite_pose_is_skipped() {
    let mut h = Harness::running();
    h.viewer_at(f32::NAN, 1.6, 2.0);
    let entity = h.spawn(TransformComponent::from_position_rotation(Vec3::new(0.0, 1.0, 0.0), tilted()));
    let before = h.transform(entity);

    h.tick();

    assert_eq!(h.transform(entity), before);
    assert_eq!(h.system.stats().frames_skipped_no_pose, 1);
    assert_eq!(h.system.stats().degenerate_skips, 0);
}

#[test]
fn test_positive_z_forward_axis() {
    let config = BillboardConfig::default().with_forward_axis(ForwardAxis::PositiveZ);
    let mut h = Harness::new(MockSubscription::Immediate, config);
    h.viewer_at(0.0, 1.6, -2.0);
    let entity = h.spawn_at(0.0, 1.0, 0.0);

    h.tick();

    let facing = h.transform(entity).rotation * Vec3::new(0.0, 0.0, 1.0);
    assert_relative_eq!(facing, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-5);
}

#[test]
fn test_rendering_query_picks_up_new_tags_on_rendering_ticks() {
    let mut h = Harness::running();
    h.viewer_at(0.0, 1.6, 2.0);
    h.spawn_at(0.0, 1.0, 0.0);
    h.tick();

    let late = h.spawn(TransformComponent::from_position_rotation(Vec3::new(1.0, 1.0, 0.0), tilted()));
    let before = h.transform(late);

    h.tick_as(TickKind::Simulation);
    assert_eq!(h.transform(late), before);

    h.tick_as(TickKind::Rendering);
    assert_ne!(h.transform(late), before);
}

#[test]
fn test_every_tick_query_picks_up_new_tags_immediately() {
    let config = BillboardConfig::default().with_query_mode(UpdateMode::EveryTick);
    let mut h = Harness::new(MockSubscription::Immediate, config);
    h.viewer_at(0.0, 1.6, 2.0);
    h.tick();

    let late = h.spawn(TransformComponent::from_position_rotation(Vec3::new(1.0, 1.0, 0.0), tilted()));
    let before = h.transform(late);
    h.tick_as(TickKind::Simulation);

    assert_ne!(h.transform(late), before);
}

#[test]
fn test_runs_from_the_scheduler() {
    let source = Arc::new(MockPoseSource::new(MockSubscription::Immediate));
    source.set_viewer_position(Point3::new(0.0, 1.6, 2.0), Timestamp::ZERO);
    let mut pool = LocalPool::new();
    let system = VerticalBillboardSystem::new(source, &pool.spawner(), BillboardConfig::default());
    pool.run_until_stalled();

    let mut scheduler = SystemScheduler::new();
    scheduler.add_system(SystemPhase::PostUpdate, Box::new(system));

    let mut world = World::new();
    world.register_component::<VerticalBillboard>();
    let entity = world.create_entity();
    world.add_component(entity, TransformComponent::from_position(Vec3::new(0.0, 1.0, 0.0))).unwrap();
    world.add_component(entity, VerticalBillboard).unwrap();

    scheduler.run_tick(&mut world, 0.011, Timestamp::from_secs(0.1), TickKind::Rendering);

    let rotation = world.get_component::<TransformComponent>(entity).unwrap().rotation;
    assert_relative_eq!(rotation * Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-5);
}
