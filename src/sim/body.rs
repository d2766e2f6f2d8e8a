//! Moving circle shared by every entity

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Vec2Ext;

/// Position, velocity and collision radius of an entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    /// Advance position by velocity
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Wrap position onto the screen torus
    #[inline]
    pub fn wrap(&mut self, width: f32, height: f32) {
        self.pos = self.pos.wrap_toroidal(width, height);
    }

    /// True if any part of the circle is still inside the padded screen rect
    pub fn within_bounds(&self, width: f32, height: f32) -> bool {
        let r = self.radius;
        self.pos.x >= -r && self.pos.x <= width + r && self.pos.y >= -r && self.pos.y <= height + r
    }

    /// Strict circle-circle overlap
    #[inline]
    pub fn overlaps(&self, other: &Body) -> bool {
        self.pos.distance(other.pos) < self.radius + other.radius
    }
}
