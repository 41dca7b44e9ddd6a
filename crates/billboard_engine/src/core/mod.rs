//! # Core Engine Module
//!
//! Shared configuration for the engine subsystems.

pub mod config;

pub use config::{BillboardConfig, EngineConfig, TrackingConfig};
pub use crate::config::{Config, ConfigError};
