//! # Lighting Configuration
//!
//! Serializable description of a light setup. A [`LightingConfig`] is loaded
//! from TOML or RON through the [`Config`] trait, validated, and then turned
//! into a [`LightScene`](crate::render::lighting::LightScene) with
//! `LightScene::from_config`.
//!
//! Per-light optional fields fall back to [`LightDefaults`], so a file only
//! spells out what differs from the defaults.

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};
use crate::render::lighting::light_data::DEFAULT_ATTENUATION_RADIUS;
use crate::render::lighting::spot::{DEFAULT_INNER_CONE_ANGLE, DEFAULT_OUTER_CONE_ANGLE};

/// # Engine Configuration
///
/// Logging and debug switches for the host application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Log level filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Whether to enable debug features
    pub debug_mode: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            debug_mode: cfg!(debug_assertions),
        }
    }

    /// Set log level
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable debug mode
    #[must_use]
    pub const fn with_debug(mut self, enabled: bool) -> Self {
        self.debug_mode = enabled;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Fallback values for optional per-light fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightDefaults {
    /// Attenuation radius for point and spot lights
    pub attenuation_radius: f32,
    /// Inner cone angle for spot lights, in degrees
    pub inner_cone_angle: f32,
    /// Outer cone angle for spot lights, in degrees
    pub outer_cone_angle: f32,
}

impl Default for LightDefaults {
    fn default() -> Self {
        Self {
            attenuation_radius: DEFAULT_ATTENUATION_RADIUS,
            inner_cone_angle: DEFAULT_INNER_CONE_ANGLE,
            outer_cone_angle: DEFAULT_OUTER_CONE_ANGLE,
        }
    }
}

/// Placement and emitter shape of a point or spot light
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightShape {
    /// World-space position
    pub position: [f32; 3],
    /// World-space up vector
    pub up: [f32; 3],
    /// Radius of influence, [`LightDefaults::attenuation_radius`] when absent
    pub attenuation_radius: Option<f32>,
    /// Emitter radius
    pub source_radius: f32,
    /// Emitter length
    pub source_length: f32,
}

impl Default for LightShape {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            up: [0.0, 1.0, 0.0],
            attenuation_radius: None,
            source_radius: 0.0,
            source_length: 0.0,
        }
    }
}

/// One light in a configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LightDesc {
    /// Directional light
    Directional {
        /// Display name, the variant's default name when absent
        #[serde(default)]
        name: Option<String>,
        /// Modulation color
        #[serde(default = "white")]
        color: [f32; 3],
        /// Intensity multiplier
        #[serde(default = "unit")]
        intensity: f32,
        /// World-space direction
        #[serde(default = "down")]
        direction: [f32; 3],
    },
    /// Point light
    Point {
        /// Display name, the variant's default name when absent
        #[serde(default)]
        name: Option<String>,
        /// Modulation color
        #[serde(default = "white")]
        color: [f32; 3],
        /// Intensity in lumens
        #[serde(default = "unit")]
        intensity: f32,
        /// Placement and emitter shape
        #[serde(default)]
        shape: LightShape,
    },
    /// Spot light
    Spot {
        /// Display name, the variant's default name when absent
        #[serde(default)]
        name: Option<String>,
        /// Modulation color
        #[serde(default = "white")]
        color: [f32; 3],
        /// Intensity in lumens
        #[serde(default = "unit")]
        intensity: f32,
        /// Placement and emitter shape
        #[serde(default)]
        shape: LightShape,
        /// Cone axis
        #[serde(default = "down")]
        direction: [f32; 3],
        /// Inner cone angle in degrees
        #[serde(default)]
        inner_cone_angle: Option<f32>,
        /// Outer cone angle in degrees
        #[serde(default)]
        outer_cone_angle: Option<f32>,
    },
}

const fn white() -> [f32; 3] {
    [1.0; 3]
}

const fn unit() -> f32 {
    1.0
}

const fn down() -> [f32; 3] {
    [0.0, -1.0, 0.0]
}

impl LightDesc {
    fn validate(&self, index: usize) -> Result<(), String> {
        let (color, intensity) = match self {
            Self::Directional { color, intensity, .. }
            | Self::Point { color, intensity, .. }
            | Self::Spot { color, intensity, .. } => (color, *intensity),
        };
        check_finite(index, "color", color)?;
        if !intensity.is_finite() {
            return Err(format!("light {index}: intensity must be finite"));
        }

        match self {
            Self::Directional { direction, .. } => check_finite(index, "direction", direction),
            Self::Point { shape, .. } => shape.validate(index),
            Self::Spot {
                shape,
                direction,
                inner_cone_angle,
                outer_cone_angle,
                ..
            } => {
                shape.validate(index)?;
                check_finite(index, "direction", direction)?;
                let angles = [inner_cone_angle.unwrap_or(0.0), outer_cone_angle.unwrap_or(0.0)];
                check_finite(index, "cone angle", &angles)
            }
        }
    }
}

impl LightShape {
    fn validate(&self, index: usize) -> Result<(), String> {
        check_finite(index, "position", &self.position)?;
        check_finite(index, "up", &self.up)?;
        let radius = self.attenuation_radius.unwrap_or(0.0);
        for (field, value) in [
            ("attenuation_radius", radius),
            ("source_radius", self.source_radius),
            ("source_length", self.source_length),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("light {index}: {field} must be finite and non-negative, got {value}"));
            }
        }
        Ok(())
    }
}

fn check_finite(index: usize, field: &str, values: &[f32]) -> Result<(), String> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(format!("light {index}: {field} must be finite, got {values:?}"))
    }
}

/// # Complete Lighting Configuration
///
/// Top-level configuration for an application driving a [`LightScene`](crate::render::lighting::LightScene).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LightingConfig {
    /// Engine core configuration
    #[serde(default)]
    pub engine: EngineConfig,
    /// Fallbacks for optional light fields
    #[serde(default)]
    pub defaults: LightDefaults,
    /// Lights in upload order
    #[serde(default)]
    pub lights: Vec<LightDesc>,
}

impl LightingConfig {
    /// Load and validate a configuration file
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let config = Self::load_from_file(path)?;
        config.validate().map_err(ConfigError::Invalid)?;
        log::info!("Loaded {} lights from {}", config.lights.len(), path);
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), String> {
        let d = &self.defaults;
        if !d.attenuation_radius.is_finite() || d.attenuation_radius < 0.0 {
            return Err(format!(
                "defaults: attenuation_radius must be finite and non-negative, got {}",
                d.attenuation_radius
            ));
        }
        if !d.inner_cone_angle.is_finite() || !d.outer_cone_angle.is_finite() {
            return Err("defaults: cone angles must be finite".to_string());
        }
        for (i, light) in self.lights.iter().enumerate() {
            light.validate(i)?;
        }
        Ok(())
    }
}

impl Config for LightingConfig {}
