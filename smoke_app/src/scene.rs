//! Immersive scene composition
//!
//! Builds the demo hierarchy `Immersive -> candle -> Cube` and tags the smoke
//! cube, the same way a host would after loading an authored scene.

use billboard_engine::billboard::VerticalBillboard;
use billboard_engine::ecs::components::{Name, Parent, TransformComponent};
use billboard_engine::ecs::{EcsError, Entity, World};
use billboard_engine::foundation::math::{Quat, Vec3};
use log::{debug, info};

fn spawn_named(
    world: &mut World,
    name: &str,
    parent: Option<Entity>,
    transform: TransformComponent,
) -> Result<Entity, EcsError> {
    let entity = world.create_entity();
    world.add_component(entity, Name::new(name))?;
    world.add_component(entity, transform)?;
    if let Some(parent) = parent {
        world.add_component(entity, Parent(parent))?;
    }
    Ok(entity)
}

/// Spawn the demo hierarchy and return its root
pub fn compose_immersive_scene(world: &mut World) -> Result<Entity, EcsError> {
    let root = spawn_named(world, "Immersive", None, TransformComponent::identity())?;
    let candle = spawn_named(
        world,
        "candle",
        Some(root),
        TransformComponent::from_position(Vec3::new(0.0, 0.9, -1.0))
            .with_rotation(Quat::from_axis_angle(&Vec3::y_axis(), 0.6)),
    )?;
    spawn_named(
        world,
        "wick",
        Some(candle),
        TransformComponent::from_position(Vec3::new(0.0, 0.12, 0.0)),
    )?;
    spawn_named(
        world,
        "Cube",
        Some(candle),
        TransformComponent::from_position(Vec3::new(0.0, 0.25, 0.0)).with_uniform_scale(0.1),
    )?;

    debug!("Composed scene with {} entities", world.entity_count());
    Ok(root)
}

/// Find a descendant of `ancestor` (or `ancestor` itself) by name
pub fn find_entity_by_name(world: &World, ancestor: Entity, name: &str) -> Option<Entity> {
    world
        .query::<Name>()
        .into_iter()
        .filter(|(_, candidate)| candidate.as_str() == name)
        .map(|(entity, _)| entity)
        .find(|&entity| is_descendant_of(world, entity, ancestor))
}

fn is_descendant_of(world: &World, mut entity: Entity, ancestor: Entity) -> bool {
    // Bounded: parent links may form a cycle
    for _ in 0..=world.entity_count() {
        if entity == ancestor {
            return true;
        }
        match world.get_component::<Parent>(entity) {
            Some(Parent(parent)) => entity = *parent,
            None => return false,
        }
    }
    false
}

/// Find `path` below `root` and tag the last element as a vertical billboard
///
/// Each step searches the descendants of the previous match.
pub fn attach_billboard(world: &mut World, root: Entity, path: &[&str]) -> Result<Option<Entity>, EcsError> {
    let mut current = root;
    for name in path {
        match find_entity_by_name(world, current, name) {
            Some(found) => current = found,
            None => return Ok(None),
        }
    }
    world.add_component(current, VerticalBillboard)?;
    info!("Tagged {:?} ({}) as vertical billboard", current, path.join("/"));
    Ok(Some(current))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoke_cube_is_found_under_candle() {
        let mut world = World::new();
        let root = compose_immersive_scene(&mut world).unwrap();

        let candle = find_entity_by_name(&world, root, "candle").unwrap();
        let smoke = find_entity_by_name(&world, candle, "Cube").unwrap();

        assert_eq!(world.get_component::<Parent>(smoke), Some(&Parent(candle)));
        assert_eq!(find_entity_by_name(&world, root, "Cube"), Some(smoke));
        assert_eq!(find_entity_by_name(&world, smoke, "candle"), None);
    }

    #[test]
    fn test_attach_tags_only_the_cube() {
        let mut world = World::new();
        let root = compose_immersive_scene(&mut world).unwrap();

        let tagged = attach_billboard(&mut world, root, &["candle", "Cube"]).unwrap().unwrap();

        assert_eq!(world.get_component::<Name>(tagged).map(Name::as_str), Some("Cube"));
        assert_eq!(world.entities_with::<VerticalBillboard>(), vec![tagged]);
    }

    #[test]
    fn test_missing_path_tags_nothing() {
        let mut world = World::new();
        let root = compose_immersive_scene(&mut world).unwrap();

        let tagged = attach_billboard(&mut world, root, &["candle", "Flame"]).unwrap();

        assert_eq!(tagged, None);
        assert!(world.entities_with::<VerticalBillboard>().is_empty());
    }
}
