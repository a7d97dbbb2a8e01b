//! Movable-object capability

use super::math::Vec3;

/// Objects that can be placed with a look-at triple
///
/// This is the `move(position, target, up)` entry point shared by scene
/// objects. Each implementor decides which parts of the triple it keeps.
pub trait Movable {
    /// Place the object at `position`, facing `target`, with `up` as the up vector
    fn move_to(&mut self, position: Vec3, target: Vec3, up: Vec3);
}
