//! Scene-side light collection
//!
//! Owns the lights of a scene and uploads them as a contiguous array of
//! [`LightData`] records followed by a light count, mirroring the
//! `LightData gLights[N]; uint gLightsCount;` block shaders declare.

use super::directional::DirectionalLight;
use super::light::{Light, SharedLight};
use super::light_data::LightData;
use super::point::{LocalLight, PointLight};
use super::spot::SpotLight;
use crate::core::config::{LightDesc, LightingConfig};
use crate::foundation::math::Vec3;
use crate::render::constant_buffer::ConstantBuffer;
use crate::ui::Gui;

/// Default shader variable holding the light array
pub const LIGHTS_ARRAY_VAR: &str = "gLights";

/// Default shader variable holding the light count
pub const LIGHTS_COUNT_VAR: &str = "gLightsCount";

/// Lights owned by a scene
#[derive(Debug, Default)]
pub struct LightScene {
    lights: Vec<SharedLight>,
}

impl LightScene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scene from a lighting configuration
    pub fn from_config(config: &LightingConfig) -> Self {
        let mut scene = Self::new();
        for desc in &config.lights {
            scene.add_light(light_from_desc(desc, config));
        }
        log::debug!("LightScene: built {} lights from config", scene.light_count());
        scene
    }

    /// Add a light, returning its index
    pub fn add_light(&mut self, light: SharedLight) -> usize {
        self.lights.push(light);
        self.lights.len() - 1
    }

    /// Light at `index`
    pub fn light(&self, index: usize) -> Option<&SharedLight> {
        self.lights.get(index)
    }

    /// Remove the light at `index`. Later lights shift down by one.
    pub fn remove_light(&mut self, index: usize) -> Option<SharedLight> {
        if index < self.lights.len() {
            Some(self.lights.remove(index))
        } else {
            None
        }
    }

    /// First light named `name`
    pub fn find_by_name(&self, name: &str) -> Option<&SharedLight> {
        self.lights.iter().find(|l| l.borrow().name() == name)
    }

    /// Number of lights
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// All lights, in upload order
    pub fn lights(&self) -> impl Iterator<Item = &SharedLight> {
        self.lights.iter()
    }

    /// Bytes needed for the light array
    pub fn array_size_bytes(&self) -> usize {
        self.lights.len() * LightData::SIZE
    }

    /// Write every light into `array_var` and the light count into `count_var`
    ///
    /// Light `i` lands at `offset(array_var) + i * LightData::SIZE`. Nothing is
    /// written if `array_var` is unknown to the buffer or the whole array does
    /// not fit behind it, so the count never covers unwritten records. A
    /// missing `count_var` only skips the count.
    pub fn set_into_constant_buffer(&self, buffer: &mut dyn ConstantBuffer, array_var: &str, count_var: &str) {
        let Some(base) = buffer.variable_offset(array_var) else {
            log::warn!("LightScene: variable '{}' not found in constant buffer, lights not set", array_var);
            return;
        };
        if base + self.array_size_bytes() > buffer.size() {
            log::warn!(
                "LightScene: {} lights need {} bytes at offset {}, buffer holds {}, lights not set",
                self.lights.len(),
                self.array_size_bytes(),
                base,
                buffer.size()
            );
            return;
        }

        for (i, light) in self.lights.iter().enumerate() {
            light.borrow().set_into_constant_buffer_at(buffer, base + i * LightData::SIZE);
        }

        match buffer.variable_offset(count_var) {
            Some(offset) => {
                let count = u32::try_from(self.lights.len()).unwrap_or(u32::MAX);
                buffer.set_blob(bytemuck::bytes_of(&count), offset);
            }
            None => log::debug!("LightScene: no '{}' variable, light count not set", count_var),
        }

        log::trace!("LightScene: uploaded {} lights", self.lights.len());
    }

    /// Prepare GPU data of every light
    pub fn prepare_gpu_data(&self) {
        for light in &self.lights {
            light.borrow_mut().prepare_gpu_data();
        }
    }

    /// Unload GPU data of every light
    pub fn unload_gpu_data(&self) {
        for light in &self.lights {
            light.borrow_mut().unload_gpu_data();
        }
    }

    /// Render every light inside a group labelled with its name
    pub fn render_ui(&self, gui: &mut dyn Gui) {
        for light in &self.lights {
            let mut light = light.borrow_mut();
            let label = light.name().to_string();
            light.render_ui(gui, Some(&label));
        }
    }
}

fn light_from_desc(desc: &LightDesc, config: &LightingConfig) -> SharedLight {
    let defaults = &config.defaults;
    match desc {
        LightDesc::Directional { name, color, intensity, direction } => {
            let light = DirectionalLight::create();
            {
                let mut l = light.borrow_mut();
                apply_common(&mut *l, name.as_deref(), *color, *intensity);
                l.set_direction(Vec3::from(*direction));
            }
            light
        }
        LightDesc::Point { name, color, intensity, shape } => {
            let light = PointLight::create();
            {
                let mut l = light.borrow_mut();
                apply_common(&mut *l, name.as_deref(), *color, *intensity);
                l.set_position(Vec3::from(shape.position));
                l.set_up_vector(Vec3::from(shape.up));
                l.set_attenuation_radius(shape.attenuation_radius.unwrap_or(defaults.attenuation_radius));
                l.set_source_radius(shape.source_radius);
                l.set_source_length(shape.source_length);
            }
            light
        }
        LightDesc::Spot {
            name,
            color,
            intensity,
            shape,
            direction,
            inner_cone_angle,
            outer_cone_angle,
        } => {
            let light = SpotLight::create();
            {
                let mut l = light.borrow_mut();
                apply_common(&mut *l, name.as_deref(), *color, *intensity);
                l.set_position(Vec3::from(shape.position));
                l.set_up_vector(Vec3::from(shape.up));
                l.set_attenuation_radius(shape.attenuation_radius.unwrap_or(defaults.attenuation_radius));
                l.set_source_radius(shape.source_radius);
                l.set_source_length(shape.source_length);
                l.set_direction(Vec3::from(*direction));
                // Outer first so the inner angle is clamped against the configured outer angle
                l.set_outer_cone_angle(outer_cone_angle.unwrap_or(defaults.outer_cone_angle));
                l.set_inner_cone_angle(inner_cone_angle.unwrap_or(defaults.inner_cone_angle));
            }
            light
        }
    }
}

fn apply_common(light: &mut dyn Light, name: Option<&str>, color: [f32; 3], intensity: f32) {
    if let Some(name) = name {
        light.set_name(name);
    }
    light.set_color(Vec3::from(color));
    light.set_intensity(intensity);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{LightShape, LightDefaults};
    use crate::render::constant_buffer::HostConstantBuffer;
    use crate::render::lighting::light_data::LightType;
    use crate::ui::UiRecorder;
    use approx::assert_relative_eq;

    const ARRAY_OFFSET: usize = 16;
    const COUNT_OFFSET: usize = 0;

    fn buffer_for(lights: usize) -> HostConstantBuffer {
        HostConstantBuffer::new(ARRAY_OFFSET + lights * LightData::SIZE)
            .with_variable(LIGHTS_COUNT_VAR, COUNT_OFFSET)
            .unwrap()
            .with_variable(LIGHTS_ARRAY_VAR, ARRAY_OFFSET)
            .unwrap()
    }

    fn three_light_scene() -> LightScene {
        let mut scene = LightScene::new();
        scene.add_light(DirectionalLight::create());
        let point = PointLight::create();
        point.borrow_mut().set_position(Vec3::new(0.0, 5.0, 0.0));
        scene.add_light(point);
        scene.add_light(SpotLight::create());
        scene
    }

    #[test]
    fn test_add_and_lookup() {
        let scene = three_light_scene();

        assert_eq!(scene.light_count(), 3);
        assert_eq!(scene.light(0).unwrap().borrow().light_type(), LightType::Directional);
        assert_eq!(scene.light(1).unwrap().borrow().light_type(), LightType::Point);
        assert_eq!(scene.light(2).unwrap().borrow().light_type(), LightType::Spot);
        assert!(scene.light(3).is_none());
        assert!(scene.find_by_name("SpotLight").is_some());
        assert_eq!(scene.array_size_bytes(), 240);
    }

    #[test]
    fn test_struct_size_is_shared_by_all_variants() {
        let scene = three_light_scene();
        for light in scene.lights() {
            assert_eq!(light.borrow().shader_struct_size(), LightData::SIZE);
        }
    }

    #[test]
    fn test_remove_light_shifts_indices() {
        let mut scene = three_light_scene();
        let removed = scene.remove_light(0).unwrap();

        assert_eq!(removed.borrow().light_type(), LightType::Directional);
        assert_eq!(scene.light_count(), 2);
        assert_eq!(scene.light(0).unwrap().borrow().light_type(), LightType::Point);
        assert!(scene.remove_light(5).is_none());
    }

    #[test]
    fn test_upload_writes_array_and_count() {
        let scene = three_light_scene();
        let mut buffer = buffer_for(3);
        scene.set_into_constant_buffer(&mut buffer, LIGHTS_ARRAY_VAR, LIGHTS_COUNT_VAR);

        for (i, light) in scene.lights().enumerate() {
            let offset = ARRAY_OFFSET + i * LightData::SIZE;
            assert_eq!(
                buffer.read_blob(offset, LightData::SIZE).unwrap(),
                light.borrow().data().as_bytes()
            );
        }
        assert_eq!(buffer.read_blob(COUNT_OFFSET, 4).unwrap(), &3u32.to_ne_bytes());
    }

    #[test]
    fn test_single_light_named_upload() {
        let scene = three_light_scene();
        let mut buffer = HostConstantBuffer::new(96).with_variable("gLight", 16).unwrap();
        let light = scene.light(1).unwrap().borrow();

        light.set_into_constant_buffer(&mut buffer, "gLight");
        assert_eq!(buffer.read_blob(16, LightData::SIZE).unwrap(), light.data().as_bytes());

        let data: LightData = bytemuck::pod_read_unaligned(buffer.read_blob(16, LightData::SIZE).unwrap());
        assert_eq!(data.pos_w, [0.0, 5.0, 0.0]);
    }

    #[test]
    fn test_upload_at_explicit_offset() {
        let light = SpotLight::create();
        let mut buffer = HostConstantBuffer::new(LightData::SIZE * 2);
        light.borrow().set_into_constant_buffer_at(&mut buffer, LightData::SIZE);

        assert_eq!(buffer.read_blob(0, LightData::SIZE).unwrap(), &[0u8; 80][..]);
        assert_eq!(buffer.read_blob(LightData::SIZE, LightData::SIZE).unwrap(), light.borrow().data().as_bytes());
    }

    #[test]
    fn test_unknown_variable_leaves_buffer_untouched() {
        let scene = three_light_scene();
        let mut buffer = HostConstantBuffer::new(256);

        scene.set_into_constant_buffer(&mut buffer, "gMissing", LIGHTS_COUNT_VAR);
        scene.light(0).unwrap().borrow().set_into_constant_buffer(&mut buffer, "gMissing");

        assert!(!buffer.is_dirty());
        assert!(buffer.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_array_that_does_not_fit_writes_nothing() {
        let scene = three_light_scene();
        // Room for two of the three records
        let mut buffer = buffer_for(2);
        scene.set_into_constant_buffer(&mut buffer, LIGHTS_ARRAY_VAR, LIGHTS_COUNT_VAR);

        assert!(!buffer.is_dirty());
        assert_eq!(buffer.read_blob(COUNT_OFFSET, 4).unwrap(), &0u32.to_ne_bytes());
        assert!(buffer.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_lifecycle_forwarding() {
        let scene = three_light_scene();
        scene.prepare_gpu_data();
        assert!(scene.lights().all(|l| l.borrow().is_gpu_data_prepared()));
        scene.unload_gpu_data();
        assert!(scene.lights().all(|l| !l.borrow().is_gpu_data_prepared()));
    }

    #[test]
    fn test_render_ui_groups_by_name() {
        let scene = three_light_scene();
        scene.light(1).unwrap().borrow_mut().set_name("Lamp");
        let mut ui = UiRecorder::new();
        scene.render_ui(&mut ui);

        let groups: Vec<_> = ui.controls().iter().filter_map(|c| c.group.clone()).collect();
        assert_eq!(groups.len(), ui.controls().len());
        assert!(groups.contains(&"DirectionalLight".to_string()));
        assert!(groups.contains(&"Lamp".to_string()));
        assert!(groups.contains(&"SpotLight".to_string()));
    }

    #[test]
    fn test_from_config() {
        let config = LightingConfig {
            defaults: LightDefaults {
                attenuation_radius: 50.0,
                inner_cone_angle: 5.0,
                outer_cone_angle: 25.0,
            },
            lights: vec![
                LightDesc::Directional {
                    name: Some("Sun".to_string()),
                    color: [1.0, 0.9, 0.8],
                    intensity: 2.0,
                    direction: [0.0, -1.0, 0.0],
                },
                LightDesc::Point {
                    name: None,
                    color: [1.0, 0.0, 0.0],
                    intensity: 2.0,
                    shape: LightShape {
                        position: [0.0, 5.0, 0.0],
                        attenuation_radius: Some(10.0),
                        ..LightShape::default()
                    },
                },
                LightDesc::Spot {
                    name: Some("Torch".to_string()),
                    color: [1.0, 1.0, 1.0],
                    intensity: 1.0,
                    shape: LightShape::default(),
                    direction: [0.0, 0.0, -1.0],
                    inner_cone_angle: Some(70.0),
                    outer_cone_angle: None,
                },
            ],
            ..LightingConfig::default()
        };

        let scene = LightScene::from_config(&config);
        assert_eq!(scene.light_count(), 3);

        let sun = scene.find_by_name("Sun").unwrap().borrow();
        assert_eq!(sun.light_type(), LightType::Directional);
        assert_eq!(sun.data().light_color, [2.0, 1.8, 1.6]);

        let point = scene.light(1).unwrap().borrow();
        assert_eq!(point.name(), "PointLight");
        assert_eq!(point.data().light_color, [2.0, 0.0, 0.0]);
        assert_eq!(point.data().pos_w, [0.0, 5.0, 0.0]);
        assert_relative_eq!(point.data().attenuation_radius, 10.0);

        let torch = scene.find_by_name("Torch").unwrap().borrow();
        assert_eq!(torch.direction(), Vec3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(torch.data().attenuation_radius, 50.0);
        // Inner clamped against the default outer angle
        assert_relative_eq!(torch.data().cos_inner_angle, 25f32.to_radians().cos(), epsilon = 1e-6);
        assert_relative_eq!(torch.data().cos_outer_angle, 25f32.to_radians().cos(), epsilon = 1e-6);
    }
}
