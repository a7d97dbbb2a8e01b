//! Headless [`Gui`] that records control requests

use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;

use super::Gui;
use crate::foundation::math::Vec3;

/// Kind of control a light asked for
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlKind {
    /// RGB color picker
    RgbColor,
    /// Scalar slider
    Float {
        /// Lower bound
        min: f32,
        /// Upper bound
        max: f32,
    },
    /// Three-component slider
    Float3 {
        /// Lower bound
        min: f32,
        /// Upper bound
        max: f32,
    },
    /// Direction gizmo
    Direction,
}

/// One recorded control request
#[derive(Debug, Clone, PartialEq)]
pub struct UiControl {
    /// Slash-separated path of the enclosing groups, `None` at top level
    pub group: Option<String>,
    /// Control label
    pub label: String,
    /// Control kind and bounds
    pub kind: ControlKind,
}

#[derive(Debug, Clone, Copy)]
enum PendingEdit {
    Float(f32),
    Vec3(Vec3),
}

/// Records every control requested through [`Gui`]
///
/// Edits can be queued by label; the next control with that label picks the
/// value up and reports a change, as if a user had dragged the widget.
#[derive(Debug, Default)]
pub struct UiRecorder {
    controls: Vec<UiControl>,
    group_stack: Vec<String>,
    collapsed: HashSet<String>,
    edits: HashMap<String, PendingEdit>,
}

impl UiRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded controls, in request order
    pub fn controls(&self) -> &[UiControl] {
        &self.controls
    }

    /// Labels of the recorded controls, in request order
    pub fn labels(&self) -> Vec<&str> {
        self.controls.iter().map(|c| c.label.as_str()).collect()
    }

    /// First recorded control with `label`
    pub fn find(&self, label: &str) -> Option<&UiControl> {
        self.controls.iter().find(|c| c.label == label)
    }

    /// Make [`Gui::begin_group`] report `label` as collapsed
    pub fn collapse_group(&mut self, label: impl Into<String>) {
        self.collapsed.insert(label.into());
    }

    /// Queue a scalar edit for the next float control named `label`
    pub fn queue_float_edit(&mut self, label: impl Into<String>, value: f32) {
        self.edits.insert(label.into(), PendingEdit::Float(value));
    }

    /// Queue a vector edit for the next color, float3 or direction control named `label`
    pub fn queue_vec3_edit(&mut self, label: impl Into<String>, value: Vec3) {
        self.edits.insert(label.into(), PendingEdit::Vec3(value));
    }

    /// Number of edits not yet consumed
    pub fn pending_edits(&self) -> usize {
        self.edits.len()
    }

    /// Indented text listing of the recorded controls
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let mut current_group: Option<&str> = None;
        for control in &self.controls {
            if control.group.as_deref() != current_group {
                current_group = control.group.as_deref();
                if let Some(group) = current_group {
                    let _ = writeln!(out, "[{group}]");
                }
            }
            let indent = if control.group.is_some() { "  " } else { "" };
            let _ = match control.kind {
                ControlKind::RgbColor => writeln!(out, "{indent}{} (rgb)", control.label),
                ControlKind::Float { min, max } => {
                    writeln!(out, "{indent}{} [{min}, {max}]", control.label)
                }
                ControlKind::Float3 { min, max } => {
                    writeln!(out, "{indent}{} xyz [{min}, {max}]", control.label)
                }
                ControlKind::Direction => writeln!(out, "{indent}{} (direction)", control.label),
            };
        }
        out
    }

    fn record(&mut self, label: &str, kind: ControlKind) {
        let group = if self.group_stack.is_empty() {
            None
        } else {
            Some(self.group_stack.join("/"))
        };
        self.controls.push(UiControl {
            group,
            label: label.to_string(),
            kind,
        });
    }

    fn take_vec3_edit(&mut self, label: &str) -> Option<Vec3> {
        match self.edits.get(label) {
            Some(PendingEdit::Vec3(v)) => {
                let v = *v;
                self.edits.remove(label);
                Some(v)
            }
            _ => None,
        }
    }

    fn take_float_edit(&mut self, label: &str) -> Option<f32> {
        match self.edits.get(label) {
            Some(PendingEdit::Float(v)) => {
                let v = *v;
                self.edits.remove(label);
                Some(v)
            }
            _ => None,
        }
    }
}

impl Gui for UiRecorder {
    fn begin_group(&mut self, label: &str) -> bool {
        if self.collapsed.contains(label) {
            return false;
        }
        self.group_stack.push(label.to_string());
        true
    }

    fn end_group(&mut self) {
        if self.group_stack.pop().is_none() {
            log::warn!("UiRecorder: end_group without matching begin_group");
        }
    }

    fn add_rgb_color(&mut self, label: &str, color: &mut Vec3) -> bool {
        self.record(label, ControlKind::RgbColor);
        match self.take_vec3_edit(label) {
            Some(v) => {
                *color = v;
                true
            }
            None => false,
        }
    }

    fn add_float_var(&mut self, label: &str, value: &mut f32, min: f32, max: f32) -> bool {
        self.record(label, ControlKind::Float { min, max });
        match self.take_float_edit(label) {
            Some(v) => {
                *value = v.max(min).min(max);
                true
            }
            None => false,
        }
    }

    fn add_float3_var(&mut self, label: &str, value: &mut Vec3, min: f32, max: f32) -> bool {
        self.record(label, ControlKind::Float3 { min, max });
        match self.take_vec3_edit(label) {
            Some(v) => {
                *value = v.map(|c| c.max(min).min(max));
                true
            }
            None => false,
        }
    }

    fn add_direction_var(&mut self, label: &str, direction: &mut Vec3) -> bool {
        self.record(label, ControlKind::Direction);
        match self.take_vec3_edit(label) {
            Some(v) => {
                *direction = v.try_normalize(f32::EPSILON).unwrap_or(*direction);
                true
            }
            None => false,
        }
    }
}
