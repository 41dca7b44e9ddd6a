//! Entity-Component-System implementation
//!
//! A deliberately small ECS: generational entity handles, typed component
//! columns, cached queries and a phase-ordered scheduler.

pub mod world;
pub mod entity;
pub mod component;
pub mod components;
pub mod system;
pub mod query;
pub mod scheduler;

pub use world::{EcsError, World};
pub use entity::Entity;
pub use component::Component;
pub use system::{SceneUpdateContext, System, TickKind};
pub use query::{Query, UpdateMode};
pub use scheduler::{SystemPhase, SystemScheduler};
