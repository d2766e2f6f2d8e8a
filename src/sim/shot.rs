//! Player projectiles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;

/// A shot entity. Shots never wrap: they expire off-screen or on lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shot {
    pub id: u32,
    pub body: Body,
    /// Asteroids this shot can still pass through
    pub pierce: u32,
    /// Seconds until the shot expires
    pub lifetime: f32,
    pub alive: bool,
}

impl Shot {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32, pierce: u32, lifetime: f32) -> Self {
        Self {
            id,
            body: Body::new(pos, vel, radius),
            pierce,
            lifetime,
            alive: true,
        }
    }

    /// Move, then expire if off-screen or out of time. Dead shots stay dead.
    pub fn update(&mut self, dt: f32, width: f32, height: f32) {
        if !self.alive {
            return;
        }
        self.body.advance(dt);
        if !self.body.within_bounds(width, height) {
            self.alive = false;
        }

        self.lifetime -= dt;
        if self.lifetime <= 0.0 {
            self.alive = false;
        }
    }

    /// Register a hit: spend one pierce charge or die
    pub fn register_hit(&mut self) {
        if self.pierce > 0 {
            self.pierce -= 1;
        } else {
            self.alive = false;
        }
    }
}
