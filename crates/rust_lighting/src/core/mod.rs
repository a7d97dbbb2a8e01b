//! # Core Module
//!
//! Shared configuration types used by applications embedding the lighting
//! library.

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;

pub use config::{Config, ConfigError, EngineConfig, LightDefaults, LightDesc, LightShape, LightingConfig};
