//! Spot light source
//!
//! A point light restricted to a cone. Both cone angles are in degrees and
//! measured from the cone axis to its edge, with `0 <= inner <= outer <= 90`
//! holding after every setter call. A setter clamps its own argument into the
//! range allowed by the other angle; the other angle never moves. A NaN
//! argument resolves to the lower bound.
//!
//! The shader receives the cosines of both angles plus the reciprocal of their
//! difference, so the falloff `saturate((cos_theta - cos_outer) * inv_range)`
//! needs no division on the GPU.

use std::cell::RefCell;
use std::rc::Rc;

use super::light::{sealed::HasLightBase, with_group, Light, LightBase, SharedLight};
use super::light_data::LightType;
use super::point::{render_local_ui, LocalLight, PointLight};
use crate::foundation::math::utils::deg_to_rad;
use crate::foundation::math::Vec3;
use crate::foundation::movable::Movable;
use crate::ui::Gui;

/// Largest outer cone angle in degrees
pub const MAX_CONE_ANGLE: f32 = 90.0;

/// Default inner cone angle in degrees
pub const DEFAULT_INNER_CONE_ANGLE: f32 = 0.0;

/// Default outer cone angle in degrees
pub const DEFAULT_OUTER_CONE_ANGLE: f32 = 45.0;

/// Smallest cosine difference used for the falloff reciprocal
const MIN_CONE_COS_RANGE: f32 = 1e-4;

/// Point light with a cone-shaped emission
#[derive(Debug, Clone)]
pub struct SpotLight {
    point: PointLight,
    inner_cone_angle: f32,
    outer_cone_angle: f32,
}

impl SpotLight {
    /// Create a spot light at the origin pointing straight down
    pub fn create() -> SharedLight<Self> {
        log::debug!("Creating spot light");
        Rc::new(RefCell::new(Self::new()))
    }

    fn new() -> Self {
        let mut light = Self {
            point: PointLight::with_type(LightType::Spot, "SpotLight"),
            inner_cone_angle: DEFAULT_INNER_CONE_ANGLE,
            outer_cone_angle: DEFAULT_OUTER_CONE_ANGLE,
        };
        light.set_direction(Vec3::new(0.0, -1.0, 0.0));
        light.update_cone_properties();
        light
    }

    /// Set the inner cone angle in degrees, clamped to `[0, outer]`
    pub fn set_inner_cone_angle(&mut self, angle: f32) {
        self.inner_cone_angle = angle.max(0.0).min(self.outer_cone_angle);
        self.update_cone_properties();
    }

    /// Set the outer cone angle in degrees, clamped to `[inner, 90]`
    pub fn set_outer_cone_angle(&mut self, angle: f32) {
        self.outer_cone_angle = angle.max(self.inner_cone_angle).min(MAX_CONE_ANGLE);
        self.update_cone_properties();
    }

    /// Inner cone angle in degrees
    pub const fn inner_cone_angle(&self) -> f32 {
        self.inner_cone_angle
    }

    /// Outer cone angle in degrees
    pub const fn outer_cone_angle(&self) -> f32 {
        self.outer_cone_angle
    }

    fn update_cone_properties(&mut self) {
        let cos_inner = deg_to_rad(self.inner_cone_angle).cos();
        let cos_outer = deg_to_rad(self.outer_cone_angle).cos();
        let data = self.base_mut().data_mut();
        data.cos_inner_angle = cos_inner;
        data.cos_outer_angle = cos_outer;
        data.inv_cone_cos_range = 1.0 / (cos_inner - cos_outer).max(MIN_CONE_COS_RANGE);
    }
}

impl HasLightBase for SpotLight {
    fn base(&self) -> &LightBase {
        self.point.base()
    }

    fn base_mut(&mut self) -> &mut LightBase {
        self.point.base_mut()
    }
}

impl Light for SpotLight {
    fn prepare_gpu_data(&mut self) {
        self.point.prepare_gpu_data();
    }

    fn unload_gpu_data(&mut self) {
        self.point.unload_gpu_data();
    }

    fn render_ui(&mut self, gui: &mut dyn Gui, group: Option<&str>) {
        with_group(gui, group, |gui| {
            self.base_mut().render_color_ui(gui);
            render_local_ui(self, gui);

            let mut direction = self.direction();
            if gui.add_direction_var("Direction", &mut direction) {
                self.set_direction(direction);
            }

            let mut inner = self.inner_cone_angle;
            if gui.add_float_var("Inner Cone Angle", &mut inner, 0.0, self.outer_cone_angle) {
                self.set_inner_cone_angle(inner);
            }
            let mut outer = self.outer_cone_angle;
            if gui.add_float_var("Outer Cone Angle", &mut outer, self.inner_cone_angle, MAX_CONE_ANGLE) {
                self.set_outer_cone_angle(outer);
            }
        });
    }
}

impl LocalLight for SpotLight {}

impl Movable for SpotLight {
    /// Same placement as a point light: position and up vector only
    fn move_to(&mut self, position: Vec3, target: Vec3, up: Vec3) {
        self.point.move_to(position, target, up);
    }
}
