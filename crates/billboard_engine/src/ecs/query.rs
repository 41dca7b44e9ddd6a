//! Cached entity queries

use super::{Component, Entity, TickKind, World};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// When a cached query re-evaluates its membership
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// Re-evaluate on every tick
    EveryTick,
    /// Re-evaluate only on rendering ticks, and only if the world changed
    #[default]
    Rendering,
}

/// Query for the set of entities carrying component `T`
///
/// Membership is cached between evaluations. Entities that were despawned or
/// lost `T` since then are dropped on every read, so a stale handle is never
/// returned.
pub struct Query<T> {
    mode: UpdateMode,
    matched: Vec<Entity>,
    evaluated_at: Option<u64>,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: Component> Query<T> {
    /// Create a new query
    pub fn new(mode: UpdateMode) -> Self {
        Self {
            mode,
            matched: Vec::new(),
            evaluated_at: None,
            _phantom: PhantomData,
        }
    }

    /// Entities matching the query for this tick
    pub fn entities(&mut self, world: &World, tick: TickKind) -> &[Entity] {
        if self.needs_evaluation(world, tick) {
            self.matched = world.entities_with::<T>();
            self.evaluated_at = Some(world.structure_version());
        } else {
            self.matched.retain(|&entity| world.has_component::<T>(entity));
        }
        &self.matched
    }

    fn needs_evaluation(&self, world: &World, tick: TickKind) -> bool {
        match (self.mode, self.evaluated_at) {
            (_, None) | (UpdateMode::EveryTick, _) => true,
            (UpdateMode::Rendering, Some(version)) => {
                tick.is_rendering() && version != world.structure_version()
            }
        }
    }
}
