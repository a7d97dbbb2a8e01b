//! # Rust Lighting
//!
//! GPU light sources for a real-time renderer.
//!
//! ## Features
//!
//! - **Light Variants**: Directional, point and spot lights behind one [`Light`](render::lighting::Light) trait
//! - **GPU Layout**: A fixed 80-byte, 16-byte aligned record shared with shaders
//! - **Constant Buffers**: Upload by variable name or byte offset
//! - **Editor Controls**: Per-light UI through a backend-agnostic [`Gui`](ui::Gui) trait
//! - **Configuration**: Light setups loaded from TOML or RON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rust_lighting::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = LightingConfig::load("lights.ron")?;
//!     let scene = LightScene::from_config(&config);
//!
//!     let mut buffer = HostConstantBuffer::new(16 + scene.array_size_bytes())
//!         .with_variable(LIGHTS_COUNT_VAR, 0)?
//!         .with_variable(LIGHTS_ARRAY_VAR, 16)?;
//!
//!     scene.prepare_gpu_data();
//!     scene.set_into_constant_buffer(&mut buffer, LIGHTS_ARRAY_VAR, LIGHTS_COUNT_VAR);
//!     scene.unload_gpu_data();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod config;
pub mod core;
pub mod foundation;
pub mod render;
pub mod ui;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        core::config::{Config, ConfigError, LightingConfig},
        foundation::{math::Vec3, movable::Movable},
        render::{
            constant_buffer::{ConstantBuffer, HostConstantBuffer},
            lighting::{
                DirectionalLight, Light, LightData, LightScene, LightType, LocalLight, PointLight,
                SharedLight, SpotLight, LIGHTS_ARRAY_VAR, LIGHTS_COUNT_VAR,
            },
        },
        ui::{Gui, UiRecorder},
    };
}
