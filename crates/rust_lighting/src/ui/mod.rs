//! Editor UI sink
//!
//! Lights describe their editable parameters to a [`Gui`] implementation as
//! "build a control bound to this field" requests. The widget toolkit behind
//! the trait is free to draw them however it likes; edited values come back
//! through the returned `bool` and are applied by the light through its normal
//! setters.
//!
//! [`UiRecorder`] is a headless implementation that records the requested
//! controls, used for tooling and tests.

pub mod recorder;

pub use recorder::{ControlKind, UiControl, UiRecorder};

use crate::foundation::math::Vec3;

/// Immediate-mode editor interface
pub trait Gui {
    /// Open a collapsible group. Controls are only emitted when this returns `true`,
    /// and each `true` must be matched by one [`Gui::end_group`].
    fn begin_group(&mut self, label: &str) -> bool;

    /// Close the innermost open group
    fn end_group(&mut self);

    /// RGB color picker. Returns `true` if the user changed the value.
    fn add_rgb_color(&mut self, label: &str, color: &mut Vec3) -> bool;

    /// Scalar slider clamped to `[min, max]`. Returns `true` if the user changed the value.
    fn add_float_var(&mut self, label: &str, value: &mut f32, min: f32, max: f32) -> bool;

    /// Three-component slider clamped to `[min, max]`. Returns `true` if the user changed the value.
    fn add_float3_var(&mut self, label: &str, value: &mut Vec3, min: f32, max: f32) -> bool;

    /// Direction gizmo, edits produce unit vectors. Returns `true` if the user changed the value.
    fn add_direction_var(&mut self, label: &str, direction: &mut Vec3) -> bool;
}
