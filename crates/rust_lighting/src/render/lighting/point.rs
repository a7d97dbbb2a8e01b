//! Point light source and the parameters it shares with spot lights

use std::cell::RefCell;
use std::rc::Rc;

use super::light::{sealed::HasLightBase, with_group, Light, LightBase, SharedLight};
use super::light_data::LightType;
use crate::foundation::math::utils::{from_array, to_array};
use crate::foundation::math::Vec3;
use crate::foundation::movable::Movable;
use crate::ui::Gui;

/// Slider bounds for world-space positions
pub const UI_WORLD_EXTENT: f32 = 10_000.0;

/// Upper bound of the radius and length sliders
pub const UI_MAX_RADIUS: f32 = 10_000.0;

/// Parameters of lights emitted from a point in space (point and spot lights)
pub trait LocalLight: Light {
    /// Set the world-space position
    fn set_position(&mut self, position: Vec3) {
        self.base_mut().data_mut().pos_w = to_array(&position);
    }

    /// Set the up vector. Orients tube lights.
    fn set_up_vector(&mut self, up: Vec3) {
        self.base_mut().data_mut().up_w = to_array(&up);
    }

    /// Set the radius of the light's influence
    fn set_attenuation_radius(&mut self, radius: f32) {
        self.base_mut().data_mut().attenuation_radius = radius;
    }

    /// Set the radius of the emitter shape. Used to simulate sphere/tube lights.
    fn set_source_radius(&mut self, radius: f32) {
        self.base_mut().data_mut().source_radius = radius;
    }

    /// Set the length of the emitter shape. Used to simulate tube lights.
    fn set_source_length(&mut self, length: f32) {
        self.base_mut().data_mut().source_length = length;
    }

    /// World-space position
    fn position(&self) -> Vec3 {
        from_array(self.data().pos_w)
    }

    /// World-space up vector
    fn up_vector(&self) -> Vec3 {
        from_array(self.data().up_w)
    }

    /// Radius of the light's influence
    fn attenuation_radius(&self) -> f32 {
        self.data().attenuation_radius
    }

    /// Radius of the emitter shape
    fn source_radius(&self) -> f32 {
        self.data().source_radius
    }

    /// Length of the emitter shape
    fn source_length(&self) -> f32 {
        self.data().source_length
    }
}

/// Position, attenuation and shape controls shared by point and spot lights
pub(crate) fn render_local_ui<L: LocalLight + ?Sized>(light: &mut L, gui: &mut dyn Gui) {
    let mut position = light.position();
    if gui.add_float3_var("World Position", &mut position, -UI_WORLD_EXTENT, UI_WORLD_EXTENT) {
        light.set_position(position);
    }
    let mut radius = light.attenuation_radius();
    if gui.add_float_var("Attenuation Radius", &mut radius, 0.0, UI_MAX_RADIUS) {
        light.set_attenuation_radius(radius);
    }
    let mut source_radius = light.source_radius();
    if gui.add_float_var("Source Radius", &mut source_radius, 0.0, UI_MAX_RADIUS) {
        light.set_source_radius(source_radius);
    }
    let mut source_length = light.source_length();
    if gui.add_float_var("Source Length", &mut source_length, 0.0, UI_MAX_RADIUS) {
        light.set_source_length(source_length);
    }
}

/// Infinitely small point light, optionally approximating a sphere or tube emitter
#[derive(Debug, Clone)]
pub struct PointLight {
    base: LightBase,
}

impl PointLight {
    /// Create a point light at the origin
    pub fn create() -> SharedLight<Self> {
        log::debug!("Creating point light");
        Rc::new(RefCell::new(Self::with_type(LightType::Point, "PointLight")))
    }

    /// Point light state tagged with `light_type`, shared with spot lights
    pub(crate) fn with_type(light_type: LightType, name: &str) -> Self {
        Self {
            base: LightBase::new(light_type, name),
        }
    }
}

impl HasLightBase for PointLight {
    fn base(&self) -> &LightBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut LightBase {
        &mut self.base
    }
}

impl Light for PointLight {
    fn prepare_gpu_data(&mut self) {
        self.base.mark_gpu_data_prepared();
    }

    fn unload_gpu_data(&mut self) {
        self.base.mark_gpu_data_unloaded();
    }

    fn render_ui(&mut self, gui: &mut dyn Gui, group: Option<&str>) {
        with_group(gui, group, |gui| {
            self.base.render_color_ui(gui);
            render_local_ui(self, gui);
        });
    }
}

impl LocalLight for PointLight {}

impl Movable for PointLight {
    /// Places the light at `position` with `up` as its up vector. `target` is
    /// ignored and the direction is left untouched.
    fn move_to(&mut self, position: Vec3, _target: Vec3, up: Vec3) {
        self.set_position(position);
        self.set_up_vector(up);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::lighting::light_data::{LightData, DEFAULT_ATTENUATION_RADIUS};
    use crate::ui::{ControlKind, UiRecorder};
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let light = PointLight::create();
        let light = light.borrow();

        assert_eq!(light.light_type(), LightType::Point);
        assert_eq!(light.name(), "PointLight");
        assert_eq!(light.position(), Vec3::zeros());
        assert_relative_eq!(light.attenuation_radius(), DEFAULT_ATTENUATION_RADIUS);
        assert_relative_eq!(light.source_radius(), 0.0);
        assert_relative_eq!(light.source_length(), 0.0);
        assert_eq!(light.data().light_color, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_point_light_scenario() {
        let light = PointLight::create();
        let mut light = light.borrow_mut();

        light.set_position(Vec3::new(0.0, 5.0, 0.0));
        light.set_attenuation_radius(10.0);
        light.set_color(Vec3::new(1.0, 0.0, 0.0));
        light.set_intensity(2.0);

        let data = light.data();
        assert_eq!(data.light_color, [2.0, 0.0, 0.0]);
        assert_eq!(data.pos_w, [0.0, 5.0, 0.0]);
        assert_eq!(data.attenuation_radius, 10.0);
    }

    #[test]
    fn test_light_color_is_product_in_either_order() {
        let c = Vec3::new(0.25, 0.5, 0.75);
        let i = 3.0;

        let first = PointLight::create();
        first.borrow_mut().set_color(c);
        first.borrow_mut().set_intensity(i);

        let second = PointLight::create();
        second.borrow_mut().set_intensity(i);
        second.borrow_mut().set_color(c);

        let expected = [c.x * i, c.y * i, c.z * i];
        assert_eq!(first.borrow().data().light_color, expected);
        assert_eq!(second.borrow().data().light_color, expected);
    }

    #[test]
    fn test_negative_intensity_is_accepted() {
        let light = PointLight::create();
        light.borrow_mut().set_intensity(-1.0);

        assert_relative_eq!(light.borrow().intensity(), -1.0);
        assert_eq!(light.borrow().data().light_color, [-1.0, -1.0, -1.0]);
    }

    #[test]
    fn test_move_sets_position_and_up_only() {
        let light = PointLight::create();
        let mut light = light.borrow_mut();
        light.set_direction(Vec3::new(0.0, 0.0, 1.0));

        let p = Vec3::new(3.0, 4.0, 5.0);
        let up = Vec3::new(0.0, 0.0, 1.0);
        light.move_to(p, Vec3::new(-10.0, 0.0, 0.0), up);

        assert_eq!(light.position(), p);
        assert_eq!(light.up_vector(), up);
        assert_eq!(light.direction(), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_shape_setters() {
        let light = PointLight::create();
        let mut light = light.borrow_mut();
        light.set_source_radius(0.5);
        light.set_source_length(2.0);

        assert_eq!(light.data().source_radius, 0.5);
        assert_eq!(light.data().source_length, 2.0);
    }

    #[test]
    fn test_render_ui_adds_local_controls() {
        let light = PointLight::create();
        let mut ui = UiRecorder::new();
        light.borrow_mut().render_ui(&mut ui, Some("Lamp"));

        assert_eq!(
            ui.labels(),
            vec!["Color", "Intensity", "World Position", "Attenuation Radius", "Source Radius", "Source Length"]
        );
        assert!(ui.controls().iter().all(|c| c.group.as_deref() == Some("Lamp")));
        assert_eq!(
            ui.find("World Position").unwrap().kind,
            ControlKind::Float3 { min: -UI_WORLD_EXTENT, max: UI_WORLD_EXTENT }
        );
    }

    #[test]
    fn test_ui_edits_flow_through_setters() {
        let light = PointLight::create();
        let mut ui = UiRecorder::new();
        ui.queue_float_edit("Intensity", 4.0);
        ui.queue_vec3_edit("Color", Vec3::new(0.5, 0.5, 0.0));
        ui.queue_float_edit("Attenuation Radius", 25.0);
        light.borrow_mut().render_ui(&mut ui, None);

        let light = light.borrow();
        assert_relative_eq!(light.intensity(), 4.0);
        assert_eq!(light.data().light_color, [2.0, 2.0, 0.0]);
        assert_relative_eq!(light.attenuation_radius(), 25.0);
        assert_eq!(ui.pending_edits(), 0);
    }

    #[test]
    fn test_collapsed_group_emits_nothing() {
        let light = PointLight::create();
        let mut ui = UiRecorder::new();
        ui.collapse_group("Lamp");
        light.borrow_mut().render_ui(&mut ui, Some("Lamp"));

        assert!(ui.controls().is_empty());
    }

    #[test]
    fn test_gpu_data_lifecycle() {
        let light = PointLight::create();
        let mut light = light.borrow_mut();
        assert!(!light.is_gpu_data_prepared());

        light.prepare_gpu_data();
        assert!(light.is_gpu_data_prepared());
        light.unload_gpu_data();
        assert!(!light.is_gpu_data_prepared());

        // Unmatched unload is logged and leaves the state alone
        light.unload_gpu_data();
        assert!(!light.is_gpu_data_prepared());

        light.prepare_gpu_data();
        assert!(light.is_gpu_data_prepared());
        assert_eq!(light.shader_struct_size(), LightData::SIZE);
    }
}
