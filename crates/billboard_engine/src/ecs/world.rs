//! ECS World implementation

use super::components::{Parent, TransformComponent};
use super::{Component, Entity};
use crate::foundation::math::{Quat, Transform, Vec3};
use log::warn;
use slotmap::{SecondaryMap, SlotMap};
use std::any::{Any, TypeId};
use std::collections::HashMap;

/// ECS errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// The handle refers to an entity that was never created or was despawned
    #[error("Entity {0:?} does not exist")]
    NoSuchEntity(Entity),
}

/// Type-erased storage for one component type
trait ComponentColumn: Send + Sync {
    fn remove_entity(&mut self, entity: Entity) -> bool;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ComponentColumn for SecondaryMap<Entity, T> {
    fn remove_entity(&mut self, entity: Entity) -> bool {
        self.remove(entity).is_some()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// ECS World containing all entities and components
pub struct World {
    entities: SlotMap<Entity, ()>,
    component_storages: HashMap<TypeId, Box<dyn ComponentColumn>>,
    /// Bumped whenever entity or component membership changes
    structure_version: u64,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
            component_storages: HashMap::new(),
            structure_version: 0,
        }
    }

    /// Create a new entity
    pub fn create_entity(&mut self) -> Entity {
        self.structure_version += 1;
        self.entities.insert(())
    }

    /// Remove an entity and all of its components
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if self.entities.remove(entity).is_none() {
            return false;
        }
        for column in self.component_storages.values_mut() {
            column.remove_entity(entity);
        }
        self.structure_version += 1;
        true
    }

    /// Whether the handle refers to a live entity
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Get an iterator over all entities
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.keys()
    }

    /// Monotonic counter of structural changes
    ///
    /// Cached queries compare against it to decide whether membership may have
    /// changed.
    pub fn structure_version(&self) -> u64 {
        self.structure_version
    }

    /// Register a component type; registering twice is a no-op
    pub fn register_component<T: Component>(&mut self) {
        self.component_storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(SecondaryMap::<Entity, T>::new()));
    }

    /// Whether a component type has been registered
    pub fn is_registered<T: Component>(&self) -> bool {
        self.component_storages.contains_key(&TypeId::of::<T>())
    }

    /// Add a component to an entity, replacing any previous value
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> Result<(), EcsError> {
        if !self.is_alive(entity) {
            return Err(EcsError::NoSuchEntity(entity));
        }
        self.register_component::<T>();

        let replaced = self
            .column_mut::<T>()
            .and_then(|column| column.insert(entity, component))
            .is_some();
        if !replaced {
            self.structure_version += 1;
        }
        Ok(())
    }

    /// Remove a component from an entity
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        let removed = self.column_mut::<T>()?.remove(entity);
        if removed.is_some() {
            self.structure_version += 1;
        }
        removed
    }

    /// Get a component from an entity
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.column::<T>()?.get(entity)
    }

    /// Get a mutable component from an entity
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.column_mut::<T>()?.get_mut(entity)
    }

    /// Whether the entity carries a component of type `T`
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.column::<T>().is_some_and(|column| column.contains_key(entity))
    }

    /// All entities carrying `T`, with the component
    pub fn query<T: Component>(&self) -> Vec<(Entity, &T)> {
        self.column::<T>()
            .map(|column| column.iter().collect())
            .unwrap_or_default()
    }

    /// All entities carrying `T`
    pub fn entities_with<T: Component>(&self) -> Vec<Entity> {
        self.column::<T>()
            .map(|column| column.keys().collect())
            .unwrap_or_default()
    }

    /// Resolve an entity's world-space transform through its parent chain
    ///
    /// Returns `None` when the entity has no `TransformComponent`. Parents
    /// without one contribute identity.
    pub fn world_transform(&self, entity: Entity) -> Option<Transform> {
        let local = Transform::from(self.get_component::<TransformComponent>(entity)?);
        Some(match self.parent_world_transform(entity) {
            Some(parent) => parent.combine(&local),
            None => local,
        })
    }

    /// World-space position, independent of how the entity is parented
    pub fn world_position(&self, entity: Entity) -> Option<Vec3> {
        self.world_transform(entity).map(|transform| transform.position)
    }

    /// Set an entity's world-space rotation, leaving position and scale alone
    ///
    /// Under a parent the local rotation is solved so that the composed world
    /// rotation equals `rotation`.
    pub fn set_world_rotation(&mut self, entity: Entity, rotation: Quat) -> bool {
        let local_rotation = match self.parent_world_transform(entity) {
            Some(parent) => parent.rotation.inverse() * rotation,
            None => rotation,
        };

        match self.get_component_mut::<TransformComponent>(entity) {
            Some(transform) => {
                transform.rotation = local_rotation;
                true
            }
            None => false,
        }
    }

    /// Number of live ancestors above an entity; roots are at depth 0
    ///
    /// Sorting by depth visits parents before their children. A cyclic chain
    /// stops counting once it exceeds the entity count.
    pub fn hierarchy_depth(&self, entity: Entity) -> usize {
        let mut depth = 0;
        let mut current = self.get_component::<Parent>(entity).map(|parent| parent.0);
        while let Some(ancestor) = current {
            if depth > self.entities.len() || !self.is_alive(ancestor) {
                break;
            }
            depth += 1;
            current = self.get_component::<Parent>(ancestor).map(|parent| parent.0);
        }
        depth
    }

    /// Composed transform of every ancestor, root first
    fn parent_world_transform(&self, entity: Entity) -> Option<Transform> {
        let mut chain = Vec::new();
        let mut current = self.get_component::<Parent>(entity).map(|parent| parent.0);

        while let Some(ancestor) = current {
            if chain.len() > self.entities.len() {
                warn!("Parent cycle detected above {:?}; ignoring hierarchy", entity);
                return None;
            }
            if !self.is_alive(ancestor) {
                break;
            }
            chain.push(ancestor);
            current = self.get_component::<Parent>(ancestor).map(|parent| parent.0);
        }

        if chain.is_empty() {
            return None;
        }

        Some(chain.iter().rev().fold(Transform::identity(), |acc, &ancestor| {
            match self.get_component::<TransformComponent>(ancestor) {
                Some(local) => acc.combine(&Transform::from(local)),
                None => acc,
            }
        }))
    }

    fn column<T: Component>(&self) -> Option<&SecondaryMap<Entity, T>> {
        self.component_storages
            .get(&TypeId::of::<T>())?
            .as_any()
            .downcast_ref::<SecondaryMap<Entity, T>>()
    }

    fn column_mut<T: Component>(&mut self) -> Option<&mut SecondaryMap<Entity, T>> {
        self.component_storages
            .get_mut(&TypeId::of::<T>())?
            .as_any_mut()
            .downcast_mut::<SecondaryMap<Entity, T>>()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
