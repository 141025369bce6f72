use crate::vector::Vector2;

/// A point disturbance that frightens fish while activated.
///
/// Only the host moves or toggles it; fish read it during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Stimulus {
    position: Vector2,
    activated: bool,
}

impl Stimulus {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Vector2::new(x, y),
            activated: false,
        }
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = Vector2::new(x, y);
    }

    pub fn set_activated(&mut self, activated: bool) {
        self.activated = activated;
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// Whether an activated stimulus is within `scare_distance` of `point`.
    pub fn frightens(&self, point: Vector2, scare_distance: f32) -> bool {
        self.activated && self.position.distance(&point) <= scare_distance
    }
}
