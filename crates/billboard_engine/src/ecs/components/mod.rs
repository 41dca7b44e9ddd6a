//! ECS Components module

pub mod transform;
pub mod hierarchy;

pub use transform::TransformComponent;
pub use hierarchy::{Name, Parent};
