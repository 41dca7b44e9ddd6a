//! Yaw-only billboarding
//!
//! Keeps tagged entities facing the viewer around the vertical axis while
//! staying upright, e.g. smoke or flame sprites.

pub mod component;
pub mod orientation;
pub mod stats;
pub mod system;

#[cfg(test)]
mod tests;

pub use component::VerticalBillboard;
pub use orientation::{project_to_height, yaw_angle, yaw_look_rotation, ForwardAxis};
pub use stats::BillboardStats;
pub use system::VerticalBillboardSystem;
