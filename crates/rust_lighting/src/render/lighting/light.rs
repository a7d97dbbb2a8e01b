//! Base light capability
//!
//! Every light owns one [`LightData`] record plus the color/intensity pair it
//! was derived from. The [`Light`] trait carries the protocol shared by all
//! variants: premultiplied color upkeep, constant buffer upload, editor
//! controls and the paired GPU data lifecycle.
//!
//! Lights are handed around as [`SharedLight`], a single shared-ownership
//! handle for the whole hierarchy. Factories return the concrete handle, which
//! coerces to `SharedLight<dyn Light>` for storage in a scene.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::light_data::{LightData, LightType};
use crate::foundation::math::utils::{from_array, to_array};
use crate::foundation::math::Vec3;
use crate::foundation::movable::Movable;
use crate::render::constant_buffer::ConstantBuffer;
use crate::ui::Gui;

/// Shared-ownership handle to a light
pub type SharedLight<T = dyn Light> = Rc<RefCell<T>>;

/// Upper bound of the intensity slider
pub const UI_MAX_INTENSITY: f32 = 1000.0;

/// State common to every light variant
#[derive(Debug, Clone)]
pub struct LightBase {
    light_type: LightType,
    name: String,
    color: Vec3,
    intensity: f32,
    data: LightData,
    gpu_data_prepared: bool,
}

impl LightBase {
    pub(crate) fn new(light_type: LightType, name: &str) -> Self {
        let mut base = Self {
            light_type,
            name: name.to_string(),
            color: Vec3::new(1.0, 1.0, 1.0),
            intensity: 1.0,
            data: LightData::with_type(light_type),
            gpu_data_prepared: false,
        };
        base.update_light_color();
        base
    }

    /// Light type, fixed at construction
    pub const fn light_type(&self) -> LightType {
        self.light_type
    }

    /// Light name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unpremultiplied color
    pub const fn color(&self) -> Vec3 {
        self.color
    }

    /// Intensity multiplier
    pub const fn intensity(&self) -> f32 {
        self.intensity
    }

    /// GPU record
    pub const fn data(&self) -> &LightData {
        &self.data
    }

    /// Whether GPU data is prepared and not yet unloaded
    pub const fn is_gpu_data_prepared(&self) -> bool {
        self.gpu_data_prepared
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub(crate) fn set_color(&mut self, color: Vec3) {
        self.color = color;
        self.update_light_color();
    }

    pub(crate) fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity;
        self.update_light_color();
    }

    /// Mutable access to the GPU record. `light_color` and `light_type` are
    /// owned by the base and must not be written through this.
    pub(crate) fn data_mut(&mut self) -> &mut LightData {
        &mut self.data
    }

    pub(crate) fn mark_gpu_data_prepared(&mut self) {
        if self.gpu_data_prepared {
            log::debug!("Light '{}': GPU data prepared twice", self.name);
        }
        self.gpu_data_prepared = true;
    }

    pub(crate) fn mark_gpu_data_unloaded(&mut self) {
        if !self.gpu_data_prepared {
            log::warn!("Light '{}': unload_gpu_data without matching prepare_gpu_data", self.name);
            return;
        }
        self.gpu_data_prepared = false;
    }

    /// Color and intensity controls shared by every variant
    pub(crate) fn render_color_ui(&mut self, gui: &mut dyn Gui) {
        let mut color = self.color;
        if gui.add_rgb_color("Color", &mut color) {
            self.set_color(color);
        }
        let mut intensity = self.intensity;
        if gui.add_float_var("Intensity", &mut intensity, 0.0, UI_MAX_INTENSITY) {
            self.set_intensity(intensity);
        }
    }

    fn update_light_color(&mut self) {
        self.data.light_color = to_array(&(self.color * self.intensity));
    }
}

pub(crate) mod sealed {
    use super::LightBase;

    /// Access to the embedded [`LightBase`]. Not nameable outside the crate.
    pub trait HasLightBase {
        fn base(&self) -> &LightBase;
        fn base_mut(&mut self) -> &mut LightBase;
    }
}

/// Run `body` inside an optional UI group
///
/// Without a label the controls are emitted at the current level. With a
/// label they are emitted only if the group is open.
pub(crate) fn with_group(gui: &mut dyn Gui, group: Option<&str>, body: impl FnOnce(&mut dyn Gui)) {
    match group {
        Some(label) => {
            if gui.begin_group(label) {
                body(gui);
                gui.end_group();
            }
        }
        None => body(gui),
    }
}

/// Base capability of every light source
pub trait Light: sealed::HasLightBase + Movable + fmt::Debug {
    /// Acquire GPU resources the variant needs. Every call must be paired
    /// with exactly one later [`Light::unload_gpu_data`].
    fn prepare_gpu_data(&mut self);

    /// Release resources acquired by [`Light::prepare_gpu_data`]
    fn unload_gpu_data(&mut self);

    /// Emit editor controls for this light, optionally inside a group
    fn render_ui(&mut self, gui: &mut dyn Gui, group: Option<&str>) {
        with_group(gui, group, |gui| self.base_mut().render_color_ui(gui));
    }

    /// Write the light record into the named shader variable
    ///
    /// Unknown variables are skipped with a warning.
    fn set_into_constant_buffer(&self, buffer: &mut dyn ConstantBuffer, var_name: &str) {
        match buffer.variable_offset(var_name) {
            Some(offset) => self.set_into_constant_buffer_at(buffer, offset),
            None => log::warn!(
                "Light '{}': variable '{}' not found in constant buffer, light not set",
                self.name(),
                var_name
            ),
        }
    }

    /// Write the light record at a byte offset
    fn set_into_constant_buffer_at(&self, buffer: &mut dyn ConstantBuffer, offset: usize) {
        log::trace!("Light '{}': writing {} bytes at offset {}", self.name(), LightData::SIZE, offset);
        buffer.set_blob(self.data().as_bytes(), offset);
    }

    /// Set the intensity. Units are lumens for point and spot lights, a plain
    /// brightness multiplier otherwise.
    fn set_intensity(&mut self, intensity: f32) {
        self.base_mut().set_intensity(intensity);
    }

    /// Set the modulation color
    fn set_color(&mut self, color: Vec3) {
        self.base_mut().set_color(color);
    }

    /// Set the world-space direction. Not normalized.
    fn set_direction(&mut self, direction: Vec3) {
        self.base_mut().data_mut().dir_w = to_array(&direction);
    }

    /// Rename the light
    fn set_name(&mut self, name: &str) {
        self.base_mut().set_name(name);
    }

    /// Intensity
    fn intensity(&self) -> f32 {
        self.base().intensity()
    }

    /// Modulation color
    fn color(&self) -> Vec3 {
        self.base().color()
    }

    /// World-space direction
    fn direction(&self) -> Vec3 {
        from_array(self.base().data().dir_w)
    }

    /// Light name
    fn name(&self) -> &str {
        self.base().name()
    }

    /// Light type, fixed at construction
    fn light_type(&self) -> LightType {
        self.base().light_type()
    }

    /// GPU record
    fn data(&self) -> &LightData {
        self.base().data()
    }

    /// Whether GPU data is prepared and not yet unloaded
    fn is_gpu_data_prepared(&self) -> bool {
        self.base().is_gpu_data_prepared()
    }

    /// Byte size of the GPU record, identical for every variant
    fn shader_struct_size(&self) -> usize {
        LightData::SIZE
    }
}
