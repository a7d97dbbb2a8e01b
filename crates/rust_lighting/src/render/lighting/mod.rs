//! # Light Sources
//!
//! Directional, point and spot lights sharing one GPU record layout.
//!
//! Every light owns a [`LightData`] block that is copied verbatim into a
//! constant buffer. Point and spot lights share their positional parameters
//! through [`LocalLight`]; spot lights add a cone whose angles always satisfy
//! `0 <= inner <= outer <= 90` degrees.
//!
//! ```
//! use rust_lighting::render::lighting::{Light, LocalLight, PointLight};
//! use rust_lighting::foundation::math::Vec3;
//!
//! let light = PointLight::create();
//! light.borrow_mut().set_position(Vec3::new(0.0, 5.0, 0.0));
//! light.borrow_mut().set_color(Vec3::new(1.0, 0.0, 0.0));
//! light.borrow_mut().set_intensity(2.0);
//! assert_eq!(light.borrow().data().light_color, [2.0, 0.0, 0.0]);
//! ```

pub mod directional;
pub mod light;
pub mod light_data;
pub mod point;
pub mod scene;
pub mod spot;

pub use directional::DirectionalLight;
pub use light::{Light, LightBase, SharedLight};
pub use light_data::{shader_struct_size, LightData, LightType, LIGHT_DATA_GLSL};
pub use point::{LocalLight, PointLight};
pub use scene::{LightScene, LIGHTS_ARRAY_VAR, LIGHTS_COUNT_VAR};
pub use spot::SpotLight;
