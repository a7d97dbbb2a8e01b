//! Directional light source

use std::cell::RefCell;
use std::rc::Rc;

use super::light::{sealed::HasLightBase, with_group, Light, LightBase, SharedLight};
use super::light_data::LightType;
use crate::foundation::math::Vec3;
use crate::foundation::movable::Movable;
use crate::ui::Gui;

/// Parallel light rays from an infinitely distant source (like sunlight)
#[derive(Debug, Clone)]
pub struct DirectionalLight {
    base: LightBase,
}

impl DirectionalLight {
    /// Create a directional light pointing straight down
    pub fn create() -> SharedLight<Self> {
        log::debug!("Creating directional light");
        Rc::new(RefCell::new(Self::new()))
    }

    fn new() -> Self {
        let mut light = Self {
            base: LightBase::new(LightType::Directional, "DirectionalLight"),
        };
        light.set_direction(Vec3::new(0.0, -1.0, 0.0));
        light
    }
}

impl HasLightBase for DirectionalLight {
    fn base(&self) -> &LightBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut LightBase {
        &mut self.base
    }
}

impl Light for DirectionalLight {
    fn prepare_gpu_data(&mut self) {
        self.base.mark_gpu_data_prepared();
    }

    fn unload_gpu_data(&mut self) {
        self.base.mark_gpu_data_unloaded();
    }

    fn render_ui(&mut self, gui: &mut dyn Gui, group: Option<&str>) {
        with_group(gui, group, |gui| {
            self.base.render_color_ui(gui);
            let mut direction = self.direction();
            if gui.add_direction_var("Direction", &mut direction) {
                self.set_direction(direction);
            }
        });
    }
}

impl Movable for DirectionalLight {
    /// Only the orientation matters: the direction becomes `normalize(target - position)`
    /// and neither the position nor `up` is stored.
    fn move_to(&mut self, position: Vec3, target: Vec3, _up: Vec3) {
        match (target - position).try_normalize(f32::EPSILON) {
            Some(direction) => self.set_direction(direction),
            None => log::warn!(
                "Light '{}': move_to with target equal to position, direction unchanged",
                self.name()
            ),
        }
    }
}
