//! Scene hierarchy components

use crate::ecs::{Component, Entity};

/// Attaches an entity under another; its transform becomes parent-relative
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parent(pub Entity);

impl Component for Parent {}

/// Human-readable entity name, as authored in the scene asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(pub String);

impl Component for Name {}

impl Name {
    /// Create a name component
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
